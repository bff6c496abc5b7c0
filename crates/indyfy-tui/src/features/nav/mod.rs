//! Navigation shell: page selector and header.

mod render;
mod state;

pub use render::{HEADER_HEIGHT, render_header, session_label};
pub use state::Page;
