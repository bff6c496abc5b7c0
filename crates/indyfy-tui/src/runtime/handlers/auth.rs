use std::sync::Arc;

use indyfy_core::auth::{self, AuthRequest};
use indyfy_core::identity::IdentityService;

use crate::events::UiEvent;

/// Performs the external calls for an auth request from the modal.
pub async fn run_auth(service: Arc<dyn IdentityService>, request: AuthRequest) -> UiEvent {
    let operation = request.operation();
    let result = auth::execute(service.as_ref(), &request).await;
    UiEvent::AuthFinished { operation, result }
}

/// Signs the current account out.
pub async fn sign_out(service: Arc<dyn IdentityService>) -> UiEvent {
    let result = service.sign_out().await.map_err(|e| e.message);
    UiEvent::SignedOut { result }
}
