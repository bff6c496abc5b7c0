//! Core INDYFY library (auth workflow, session, identity service, config).

pub mod auth;
pub mod catalog;
pub mod config;
pub mod identity;
pub mod logging;
pub mod profile;
pub mod session;
