//! Session observer.
//!
//! Mirrors the identity service's current account plus the account's
//! profile document into a [`SessionSnapshot`] watch channel. The UI only
//! reads snapshots; it never asks the service who is signed in.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::identity::IdentityService;
use crate::profile::{Account, ProfileDocument, Role};

/// Who is signed in, and their profile when it could be read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub account: Option<Account>,
    pub profile: Option<ProfileDocument>,
}

impl SessionSnapshot {
    pub fn is_signed_in(&self) -> bool {
        self.account.is_some()
    }

    /// Username from the profile, falling back to the account email.
    pub fn display_name(&self) -> Option<&str> {
        match (&self.profile, &self.account) {
            (Some(profile), _) => Some(profile.username.as_str()),
            (None, Some(account)) => Some(account.email.as_str()),
            (None, None) => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }
}

/// Owning handle for the background observer task.
///
/// Dropping the handle cancels the task; [`SessionObserver::shutdown`]
/// cancels and waits for it.
pub struct SessionObserver {
    snapshots: watch::Receiver<SessionSnapshot>,
    refresh_tx: mpsc::UnboundedSender<()>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl SessionObserver {
    /// Starts observing `service`. Must be called inside a tokio runtime.
    pub fn start(service: Arc<dyn IdentityService>) -> Self {
        let (tx, snapshots) = watch::channel(SessionSnapshot::default());
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let auth = service.auth_state();

        let task = tokio::spawn(observe(service, auth, tx, refresh_rx, cancel.clone()));

        Self {
            snapshots,
            refresh_tx,
            cancel,
            task: Some(task),
        }
    }

    /// Returns a new receiver of session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Re-reads the profile of the current account.
    pub fn refresh(&self) {
        // Send only fails once the task has stopped.
        let _ = self.refresh_tx.send(());
    }

    /// Stops the observer and waits for the task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
        {
            tracing::warn!(error = %err, "session observer task failed");
        }
    }
}

impl Drop for SessionObserver {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn observe(
    service: Arc<dyn IdentityService>,
    mut auth: watch::Receiver<Option<Account>>,
    tx: watch::Sender<SessionSnapshot>,
    mut refresh_rx: mpsc::UnboundedReceiver<()>,
    cancel: CancellationToken,
) {
    'outer: loop {
        let current = auth.borrow_and_update().clone();

        if let Some(account) = current {
            tx.send_if_modified(|snapshot| {
                if snapshot.account.as_ref() == Some(&account) {
                    return false;
                }
                *snapshot = SessionSnapshot {
                    account: Some(account.clone()),
                    profile: None,
                };
                true
            });

            // A change or refresh while the read is pending restarts the loop
            // and drops the in-flight read.
            tokio::select! {
                () = cancel.cancelled() => break 'outer,
                changed = auth.changed() => {
                    if changed.is_err() {
                        break 'outer;
                    }
                    continue 'outer;
                }
                msg = refresh_rx.recv() => {
                    if msg.is_none() {
                        break 'outer;
                    }
                    continue 'outer;
                }
                result = service.read_profile(&account.id) => {
                    let profile = match result {
                        Ok(profile) => profile,
                        Err(err) => {
                            tracing::warn!(
                                account = %account.id,
                                code = %err.code,
                                "profile read failed"
                            );
                            None
                        }
                    };
                    tracing::debug!(
                        account = %account.id,
                        has_profile = profile.is_some(),
                        "session updated"
                    );
                    tx.send_replace(SessionSnapshot {
                        account: Some(account),
                        profile,
                    });
                }
            }
        } else {
            tx.send_if_modified(|snapshot| {
                if snapshot.account.is_none() && snapshot.profile.is_none() {
                    return false;
                }
                *snapshot = SessionSnapshot::default();
                true
            });
            tracing::debug!("session cleared");
        }

        tokio::select! {
            () = cancel.cancelled() => break,
            changed = auth.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            msg = refresh_rx.recv() => {
                if msg.is_none() {
                    break;
                }
            }
        }
    }
    tracing::debug!("session observer stopped");
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::identity::memory::Operation;
    use crate::identity::{MemoryIdentityService, ServiceError, ServiceResult};
    use crate::profile::AccountId;

    const WAIT: Duration = Duration::from_secs(2);

    async fn wait_for(
        rx: &mut watch::Receiver<SessionSnapshot>,
        pred: impl FnMut(&SessionSnapshot) -> bool,
    ) -> SessionSnapshot {
        tokio::time::timeout(WAIT, rx.wait_for(pred))
            .await
            .expect("timed out waiting for snapshot")
            .expect("observer stopped")
            .clone()
    }

    fn seeded() -> Arc<MemoryIdentityService> {
        let luna = ProfileDocument::new("luna@x.com", "Luna", Role::Artist, Utc::now());
        Arc::new(
            MemoryIdentityService::new()
                .with_account("luna@x.com", "secret1", Some(luna))
                .with_account("sam@x.com", "secret1", None),
        )
    }

    #[tokio::test]
    async fn test_sign_in_publishes_account_and_profile() {
        let service = seeded();
        let observer = SessionObserver::start(service.clone());
        let mut rx = observer.subscribe();

        service.sign_in("luna@x.com", "secret1").await.unwrap();

        let snapshot = wait_for(&mut rx, |s| s.profile.is_some()).await;
        assert_eq!(snapshot.account.unwrap().email, "luna@x.com");
        assert_eq!(snapshot.profile.unwrap().username, "Luna");
        observer.shutdown().await;
    }

    #[tokio::test]
    async fn test_sign_out_clears_snapshot() {
        let service = seeded();
        let observer = SessionObserver::start(service.clone());
        let mut rx = observer.subscribe();

        service.sign_in("luna@x.com", "secret1").await.unwrap();
        wait_for(&mut rx, |s| s.profile.is_some()).await;

        service.sign_out().await.unwrap();
        let snapshot = wait_for(&mut rx, |s| !s.is_signed_in()).await;
        assert_eq!(snapshot, SessionSnapshot::default());
        observer.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_profile_falls_back_to_email() {
        let service = seeded();
        let observer = SessionObserver::start(service.clone());
        let mut rx = observer.subscribe();

        service.sign_in("sam@x.com", "secret1").await.unwrap();

        let snapshot = wait_for(&mut rx, SessionSnapshot::is_signed_in).await;
        assert!(snapshot.profile.is_none());
        assert_eq!(snapshot.display_name(), Some("sam@x.com"));
        observer.shutdown().await;
    }

    #[tokio::test]
    async fn test_read_failure_is_swallowed() {
        let service = seeded();
        service.fail_next(Operation::ReadProfile, ServiceError::network("offline"));
        let observer = SessionObserver::start(service.clone());
        let mut rx = observer.subscribe();

        service.sign_in("luna@x.com", "secret1").await.unwrap();

        let snapshot = wait_for(&mut rx, SessionSnapshot::is_signed_in).await;
        assert!(snapshot.profile.is_none());
        assert!(!observer.task.as_ref().unwrap().is_finished());
        observer.shutdown().await;
    }

    #[tokio::test]
    async fn test_refresh_picks_up_new_profile() {
        let service = seeded();
        let observer = SessionObserver::start(service.clone());
        let mut rx = observer.subscribe();

        let account = service.sign_in("sam@x.com", "secret1").await.unwrap();
        wait_for(&mut rx, SessionSnapshot::is_signed_in).await;
        while service.call_count(Operation::ReadProfile) == 0 {
            tokio::task::yield_now().await;
        }

        let doc = ProfileDocument::new("sam@x.com", "Sam", Role::Fan, Utc::now());
        service.write_profile(&account.id, &doc).await.unwrap();
        observer.refresh();

        let snapshot = wait_for(&mut rx, |s| s.profile.is_some()).await;
        assert_eq!(snapshot.role(), Some(Role::Fan));
        assert_eq!(snapshot.display_name(), Some("Sam"));
        observer.shutdown().await;
    }

    /// Never answers profile reads for one account.
    struct StallingReads {
        inner: Arc<MemoryIdentityService>,
        stalled: AccountId,
    }

    #[async_trait]
    impl IdentityService for StallingReads {
        async fn create_account(&self, email: &str, password: &str) -> ServiceResult<Account> {
            self.inner.create_account(email, password).await
        }
        async fn sign_in(&self, email: &str, password: &str) -> ServiceResult<Account> {
            self.inner.sign_in(email, password).await
        }
        async fn sign_in_federated(&self) -> ServiceResult<Account> {
            self.inner.sign_in_federated().await
        }
        async fn sign_out(&self) -> ServiceResult<()> {
            self.inner.sign_out().await
        }
        async fn read_profile(&self, id: &AccountId) -> ServiceResult<Option<ProfileDocument>> {
            if *id == self.stalled {
                std::future::pending::<()>().await;
            }
            self.inner.read_profile(id).await
        }
        async fn write_profile(&self, id: &AccountId, doc: &ProfileDocument) -> ServiceResult<()> {
            self.inner.write_profile(id, doc).await
        }
        fn auth_state(&self) -> watch::Receiver<Option<Account>> {
            self.inner.auth_state()
        }
    }

    #[tokio::test]
    async fn test_stale_read_is_discarded() {
        let inner = seeded();
        let sam_doc = ProfileDocument::new("sam@x.com", "Sam", Role::Fan, Utc::now());
        let sam = inner.account_id("sam@x.com").unwrap();
        inner.write_profile(&sam, &sam_doc).await.unwrap();
        let service = Arc::new(StallingReads {
            inner: inner.clone(),
            stalled: inner.account_id("luna@x.com").unwrap(),
        });
        let observer = SessionObserver::start(service.clone());
        let mut rx = observer.subscribe();

        service.sign_in("luna@x.com", "secret1").await.unwrap();
        wait_for(&mut rx, |s| {
            s.account.as_ref().is_some_and(|a| a.email == "luna@x.com")
        })
        .await;
        service.sign_in("sam@x.com", "secret1").await.unwrap();

        let snapshot = wait_for(&mut rx, |s| s.profile.is_some()).await;
        assert_eq!(snapshot.account.unwrap().email, "sam@x.com");
        assert_eq!(snapshot.profile, Some(sam_doc));
        observer.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_closes_channel() {
        let service = seeded();
        let observer = SessionObserver::start(service.clone());
        let mut rx = observer.subscribe();

        observer.shutdown().await;

        assert!(rx.changed().await.is_err());
    }
}
