//! Overlay modules for the TUI.
//!
//! Overlays are modal UI components that temporarily take over keyboard input.
//! Each overlay owns its state and key handler; the reducer applies the
//! returned `OverlayUpdate`.
//!
//! - `auth.rs`: the sign-in / registration modal
//! - `render_utils.rs`: shared rendering helpers for overlays

pub mod auth;
pub mod render_utils;

pub use auth::AuthOverlayState;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::common::TaskId;
use crate::effects::UiEffect;
use crate::state::TuiState;

/// Transition returned by overlay key handlers.
#[derive(Debug)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Auth(AuthOverlayState),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Overlay::Auth(state) => state.render(frame, area, tui.spinner_frame),
        }
    }

    pub fn handle_key(&mut self, tui: &mut TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Auth(state) => state.handle_key(tui, key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self {
            Overlay::Auth(state) => state.handle_paste(text),
        }
    }

    /// The task this overlay is waiting on, if any.
    pub fn pending_task(&self) -> Option<TaskId> {
        match self {
            Overlay::Auth(state) => state.pending_task(),
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState);

    /// Returns the auth overlay state if the auth modal is open.
    fn as_auth_mut(&mut self) -> Option<&mut AuthOverlayState>;
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        if let Some(overlay) = self {
            overlay.render(frame, area, tui);
        }
    }

    fn as_auth_mut(&mut self) -> Option<&mut AuthOverlayState> {
        match self {
            Some(Overlay::Auth(state)) => Some(state),
            None => None,
        }
    }
}
