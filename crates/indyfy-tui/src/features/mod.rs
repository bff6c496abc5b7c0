pub mod auth;
pub mod nav;
pub mod pages;
