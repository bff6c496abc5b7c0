//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O and task spawning only; the reducer itself never
//! touches the identity service.

use indyfy_core::auth::AuthRequest;

use crate::common::TaskId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Perform the external calls for an auth request from the modal.
    RunAuth { task: TaskId, request: AuthRequest },

    /// Sign the current account out.
    SignOut { task: TaskId },

    /// Ask the session observer to re-read the current profile.
    RefreshSession,
}
