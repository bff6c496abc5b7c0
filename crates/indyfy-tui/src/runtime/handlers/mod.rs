//! Effect handlers.
//!
//! Pure async functions that perform I/O and return the resulting `UiEvent`.
//! The runtime spawns them and posts their result to the inbox.

mod auth;

pub use auth::{run_auth, sign_out};
