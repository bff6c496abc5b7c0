//! Reducer helpers for auth results and sign-out.

use indyfy_core::auth::{AuthError, AuthOperation};
use indyfy_core::profile::Account;

use crate::effects::UiEffect;
use crate::overlays::{AuthOverlayState, Overlay, OverlayExt};
use crate::state::{AppState, TuiState};

/// Opens a fresh auth modal. Every opening starts at the role choice.
pub fn open_auth_modal(app: &mut AppState) {
    if app.overlay.is_none() {
        app.overlay = Some(Overlay::Auth(AuthOverlayState::open()));
    }
}

/// Applies a finished auth request to the open modal.
///
/// Registration and federated sign-in write the profile after the account
/// switch was already published, so the session is re-read to pick it up.
pub fn handle_auth_finished(
    app: &mut AppState,
    operation: AuthOperation,
    result: Result<Account, AuthError>,
) -> Vec<UiEffect> {
    let Some(state) = app.overlay.as_auth_mut() else {
        tracing::debug!(?operation, "auth result arrived after the modal closed");
        return vec![];
    };
    let Some(account) = state.finish(result) else {
        return vec![];
    };

    app.overlay = None;
    app.tui.notice = Some(format!("Signed in as {}", account.email));
    match operation {
        AuthOperation::Registration | AuthOperation::Federated => vec![UiEffect::RefreshSession],
        AuthOperation::SignIn => vec![],
    }
}

/// Starts a sign-out if someone is signed in and none is running.
pub fn request_sign_out(tui: &mut TuiState) -> Vec<UiEffect> {
    if !tui.session.is_signed_in() || tui.tasks.sign_out.is_running() {
        return vec![];
    }
    let task = tui.task_seq.next_id();
    vec![UiEffect::SignOut { task }]
}

pub fn handle_signed_out(tui: &mut TuiState, result: Result<(), String>) -> Vec<UiEffect> {
    match result {
        Ok(()) => tui.notice = Some("Signed out".to_string()),
        Err(error) => {
            tracing::warn!(%error, "sign-out failed");
            tui.notice = Some(format!("Sign-out failed: {error}"));
        }
    }
    vec![]
}
