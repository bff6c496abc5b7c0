//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── page: Page              (navigation selector)
//! │   ├── calendar: CalendarTab   (upcoming / past toggle)
//! │   ├── session: SessionSnapshot (mirrored from the observer)
//! │   ├── task_seq: TaskSeq       (async task id generator)
//! │   └── tasks: Tasks            (task lifecycle state)
//! └── overlay: Option<Overlay>    (the auth modal)
//! ```
//!
//! State is split between `TuiState` and `Option<Overlay>` so overlay
//! handlers can hold `&mut self` and `&mut TuiState` at the same time.

use indyfy_core::session::SessionSnapshot;

use crate::common::{TaskSeq, Tasks};
use crate::nav::Page;
use crate::overlays::Overlay;
use crate::pages::CalendarTab;

/// Combined application state for the TUI.
#[derive(Debug, Default)]
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates state that already shows `session` (the observer's first value).
    pub fn with_session(session: SessionSnapshot) -> Self {
        let mut state = Self::new();
        state.tui.session = session;
        state
    }
}

/// Non-overlay UI state.
#[derive(Debug, Default)]
pub struct TuiState {
    pub page: Page,
    pub calendar: CalendarTab,
    /// Read-only mirror of the session observer.
    pub session: SessionSnapshot,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    /// One-line notice shown in the footer until the next key press.
    pub notice: Option<String>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}
