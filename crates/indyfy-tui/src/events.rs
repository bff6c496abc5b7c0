//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: terminal input,
//! timer ticks, session snapshots from the observer, and results posted by
//! async handlers through the runtime inbox.

use crossterm::event::Event as CrosstermEvent;
use indyfy_core::auth::{AuthError, AuthOperation};
use indyfy_core::profile::Account;
use indyfy_core::session::SessionSnapshot;

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, render cadence).
    Tick,

    /// Terminal input event (key, mouse, paste, resize).
    Terminal(CrosstermEvent),

    /// The session observer published a new snapshot.
    Session(SessionSnapshot),

    /// An async task was spawned.
    TaskStarted { kind: TaskKind, started: TaskStarted },

    /// An async task finished; `result` is applied only if still active.
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// An auth request from the modal finished.
    AuthFinished {
        operation: AuthOperation,
        result: Result<Account, AuthError>,
    },

    /// Sign-out finished.
    SignedOut { result: Result<(), String> },
}
