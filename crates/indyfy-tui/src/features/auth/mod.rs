//! Auth feature: modal rendering and the reducer side of auth results.

mod render;
mod update;

pub use render::render_auth_overlay;
pub use update::{handle_auth_finished, handle_signed_out, open_auth_modal, request_sign_out};
