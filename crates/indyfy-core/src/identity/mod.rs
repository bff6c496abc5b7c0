//! Identity and document service port.
//!
//! The client never owns accounts or profile documents. Everything goes
//! through [`IdentityService`], which exposes the six capabilities the UI
//! needs plus a watch channel of the current account.
//!
//! ## Adapters
//!
//! - `firebase`: Firebase Authentication + Cloud Firestore over REST
//! - `memory`: in-process backend used by `--offline` and the tests

pub mod firebase;
pub mod memory;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::profile::{Account, AccountId, ProfileDocument};

pub use firebase::FirebaseIdentityService;
pub use memory::MemoryIdentityService;

/// Canonical failure codes reported by identity service adapters.
pub mod codes {
    pub const EMAIL_ALREADY_IN_USE: &str = "auth/email-already-in-use";
    pub const INVALID_EMAIL: &str = "auth/invalid-email";
    pub const WEAK_PASSWORD: &str = "auth/weak-password";
    pub const USER_NOT_FOUND: &str = "auth/user-not-found";
    pub const WRONG_PASSWORD: &str = "auth/wrong-password";
    pub const INVALID_CREDENTIAL: &str = "auth/invalid-credential";
    pub const USER_DISABLED: &str = "auth/user-disabled";
    pub const TOO_MANY_REQUESTS: &str = "auth/too-many-requests";
    pub const POPUP_CLOSED: &str = "auth/popup-closed-by-user";
    pub const FEDERATED_UNAVAILABLE: &str = "auth/operation-not-allowed";
    pub const NETWORK: &str = "auth/network-request-failed";
    pub const REQUIRES_RECENT_LOGIN: &str = "auth/requires-recent-login";
    pub const PERMISSION_DENIED: &str = "firestore/permission-denied";
    pub const INTERNAL: &str = "internal";
}

/// Failure reported by the identity service.
///
/// `code` is one of [`codes`] (or an adapter-specific code that the auth
/// workflow treats as unknown).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ServiceError {
    pub code: String,
    pub message: String,
}

impl ServiceError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(codes::NETWORK, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, message)
    }
}

/// Result alias for identity service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// External identity and document service.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Creates an account and signs it in.
    async fn create_account(&self, email: &str, password: &str) -> ServiceResult<Account>;

    /// Signs in with email and password.
    async fn sign_in(&self, email: &str, password: &str) -> ServiceResult<Account>;

    /// Runs the interactive federated sign-in flow.
    ///
    /// May wait on the user for a long time (browser consent screen).
    async fn sign_in_federated(&self) -> ServiceResult<Account>;

    /// Clears the current session.
    async fn sign_out(&self) -> ServiceResult<()>;

    /// Reads the profile document for `id`. Returns `Ok(None)` if absent.
    async fn read_profile(&self, id: &AccountId) -> ServiceResult<Option<ProfileDocument>>;

    /// Writes (creates or replaces) the profile document for `id`.
    async fn write_profile(&self, id: &AccountId, doc: &ProfileDocument) -> ServiceResult<()>;

    /// Subscribes to the current account.
    ///
    /// The initial value is the resolved persisted session (or `None`).
    fn auth_state(&self) -> watch::Receiver<Option<Account>>;
}
