//! Firebase Authentication + Cloud Firestore over REST.
//!
//! - `auth_api`: Identity Toolkit / Secure Token calls and error mapping
//! - `firestore`: typed-value documents under `users/{uid}`
//! - `google`: browser-based Google sign-in (PKCE + loopback)
//! - `session_store`: the persisted session file

pub mod auth_api;
pub mod firestore;
pub mod google;
pub mod session_store;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, watch};

use self::auth_api::AuthTokens;
use self::google::BrowserLauncher;
use self::session_store::{SessionStore, StoredSession};
use super::{IdentityService, ServiceError, ServiceResult, codes};
use crate::config::FirebaseSettings;
use crate::profile::{Account, AccountId, ProfileDocument};

/// Returns true when a refresh failure means the session itself is gone.
///
/// Transport and server failures keep the session so the next call can
/// retry the refresh.
fn is_session_rejected(code: &str) -> bool {
    matches!(
        code,
        codes::REQUIRES_RECENT_LOGIN
            | codes::INVALID_CREDENTIAL
            | codes::USER_DISABLED
            | codes::USER_NOT_FOUND
    )
}

/// Identity service backed by a Firebase project.
pub struct FirebaseIdentityService {
    settings: FirebaseSettings,
    http: reqwest::Client,
    store: SessionStore,
    session: Mutex<Option<StoredSession>>,
    current: watch::Sender<Option<Account>>,
    browser: Arc<BrowserLauncher>,
}

impl FirebaseIdentityService {
    /// Creates a service with no active session.
    pub fn new(settings: FirebaseSettings, store: SessionStore) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            settings,
            http: reqwest::Client::new(),
            store,
            session: Mutex::new(None),
            current,
            browser: Arc::new(|url: &str| open::that(url)),
        }
    }

    /// Creates a service and restores the persisted session, if any.
    pub async fn connect(settings: FirebaseSettings, store: SessionStore) -> Self {
        let service = Self::new(settings, store);
        service.restore().await;
        service
    }

    /// Replaces the browser launcher used for Google sign-in.
    #[must_use]
    pub fn with_browser(mut self, browser: Arc<BrowserLauncher>) -> Self {
        self.browser = browser;
        self
    }

    /// Loads the persisted session, refreshing its token if needed.
    ///
    /// A session that cannot be read, or whose refresh is rejected, is
    /// dropped. When the refresh fails for any other reason the stale
    /// session is kept and refreshed again on first use.
    pub async fn restore(&self) -> Option<Account> {
        let stored = match self.store.load() {
            Ok(stored) => stored?,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "dropping unreadable session");
                self.forget_file();
                return None;
            }
        };

        let stored = if stored.is_expired() {
            match auth_api::refresh(
                &self.http,
                &self.settings,
                &stored.account,
                &stored.refresh_token,
            )
            .await
            {
                Ok(tokens) => self.persist(StoredSession::from(tokens)),
                Err(e) if is_session_rejected(&e.code) => {
                    tracing::warn!(code = %e.code, "session refresh rejected; signing out");
                    self.forget_file();
                    return None;
                }
                Err(e) => {
                    tracing::warn!(code = %e.code, "session refresh failed; keeping session");
                    stored
                }
            }
        } else {
            stored
        };

        let account = stored.account.clone();
        *self.session.lock().await = Some(stored);
        tracing::info!(account = %account.id, "restored session");
        self.current.send_replace(Some(account.clone()));
        Some(account)
    }

    async fn establish(&self, tokens: AuthTokens) -> Account {
        let session = self.persist(StoredSession::from(tokens));
        let account = session.account.clone();
        *self.session.lock().await = Some(session);
        self.current.send_replace(Some(account.clone()));
        account
    }

    fn persist(&self, session: StoredSession) -> StoredSession {
        if let Err(e) = self.store.save(&session) {
            // The session still works for this run.
            tracing::warn!(error = %format!("{e:#}"), "failed to persist session");
        }
        session
    }

    fn forget_file(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %format!("{e:#}"), "failed to remove session file");
        }
    }

    /// Returns a valid id token, refreshing it when expired.
    async fn id_token(&self) -> ServiceResult<String> {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return Err(ServiceError::new(
                codes::REQUIRES_RECENT_LOGIN,
                "No active session",
            ));
        };
        if !session.is_expired() {
            return Ok(session.id_token.clone());
        }

        match auth_api::refresh(
            &self.http,
            &self.settings,
            &session.account,
            &session.refresh_token,
        )
        .await
        {
            Ok(tokens) => {
                *session = self.persist(StoredSession::from(tokens));
                Ok(session.id_token.clone())
            }
            Err(e) if !is_session_rejected(&e.code) => {
                tracing::warn!(code = %e.code, "token refresh failed; keeping session");
                Err(e)
            }
            Err(e) => {
                tracing::warn!(code = %e.code, "token refresh rejected; signing out");
                *guard = None;
                drop(guard);
                self.forget_file();
                self.current.send_replace(None);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl IdentityService for FirebaseIdentityService {
    async fn create_account(&self, email: &str, password: &str) -> ServiceResult<Account> {
        let tokens = auth_api::sign_up(&self.http, &self.settings, email, password).await?;
        Ok(self.establish(tokens).await)
    }

    async fn sign_in(&self, email: &str, password: &str) -> ServiceResult<Account> {
        let tokens =
            auth_api::sign_in_with_password(&self.http, &self.settings, email, password).await?;
        Ok(self.establish(tokens).await)
    }

    async fn sign_in_federated(&self) -> ServiceResult<Account> {
        let Some(google_settings) = &self.settings.google else {
            return Err(ServiceError::new(
                codes::FEDERATED_UNAVAILABLE,
                "Google sign-in is not configured",
            ));
        };
        let google_token =
            google::authorize(&self.http, google_settings, self.browser.as_ref()).await?;
        let tokens =
            auth_api::sign_in_with_google(&self.http, &self.settings, &google_token).await?;
        Ok(self.establish(tokens).await)
    }

    async fn sign_out(&self) -> ServiceResult<()> {
        *self.session.lock().await = None;
        let removed = self
            .store
            .clear()
            .map_err(|e| ServiceError::internal(format!("{e:#}")));
        self.current.send_replace(None);
        tracing::info!("signed out");
        removed.map(|_| ())
    }

    async fn read_profile(&self, id: &AccountId) -> ServiceResult<Option<ProfileDocument>> {
        let token = self.id_token().await?;
        firestore::get_profile(&self.http, &self.settings, &token, id).await
    }

    async fn write_profile(&self, id: &AccountId, doc: &ProfileDocument) -> ServiceResult<()> {
        let token = self.id_token().await?;
        firestore::set_profile(&self.http, &self.settings, &token, id, doc).await
    }

    fn auth_state(&self) -> watch::Receiver<Option<Account>> {
        self.current.subscribe()
    }
}
