//! In-memory identity service.
//!
//! Mirrors the observable behavior of the hosted service closely enough for
//! the offline demo mode and the test suites: duplicate emails, malformed
//! emails, short passwords and bad credentials fail with the same codes.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::watch;

use super::{IdentityService, ServiceError, ServiceResult, codes};
use crate::profile::{Account, AccountId, ProfileDocument};

/// Operations that can be observed or failed on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAccount,
    SignIn,
    SignInFederated,
    SignOut,
    ReadProfile,
    WriteProfile,
}

/// A recorded call, in invocation order.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    CreateAccount { email: String },
    SignIn { email: String },
    SignInFederated,
    SignOut,
    ReadProfile { id: AccountId },
    WriteProfile { id: AccountId, doc: ProfileDocument },
}

impl ServiceCall {
    pub fn operation(&self) -> Operation {
        match self {
            ServiceCall::CreateAccount { .. } => Operation::CreateAccount,
            ServiceCall::SignIn { .. } => Operation::SignIn,
            ServiceCall::SignInFederated => Operation::SignInFederated,
            ServiceCall::SignOut => Operation::SignOut,
            ServiceCall::ReadProfile { .. } => Operation::ReadProfile,
            ServiceCall::WriteProfile { .. } => Operation::WriteProfile,
        }
    }
}

#[derive(Debug)]
struct StoredAccount {
    id: AccountId,
    /// `None` for accounts created by federated sign-in.
    password: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Default)]
struct Inner {
    accounts: HashMap<String, StoredAccount>,
    profiles: HashMap<AccountId, ProfileDocument>,
    federated: Option<(String, Option<String>)>,
    failures: HashMap<Operation, ServiceError>,
    calls: Vec<ServiceCall>,
}

/// Identity service kept entirely in process memory.
#[derive(Debug)]
pub struct MemoryIdentityService {
    inner: Mutex<Inner>,
    current: watch::Sender<Option<Account>>,
}

impl Default for MemoryIdentityService {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryIdentityService {
    pub fn new() -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Mutex::new(Inner::default()),
            current,
        }
    }

    /// Seeds an existing account, optionally with a profile document.
    #[must_use]
    pub fn with_account(
        self,
        email: &str,
        password: &str,
        profile: Option<ProfileDocument>,
    ) -> Self {
        {
            let mut inner = self.lock();
            let id = new_account_id();
            if let Some(doc) = profile {
                inner.profiles.insert(id.clone(), doc);
            }
            inner.accounts.insert(
                email.to_string(),
                StoredAccount {
                    id,
                    password: Some(password.to_string()),
                    display_name: None,
                },
            );
        }
        self
    }

    /// Scripts the identity returned by the next federated sign-ins.
    #[must_use]
    pub fn with_federated_identity(self, email: &str, display_name: Option<&str>) -> Self {
        self.lock().federated = Some((email.to_string(), display_name.map(str::to_string)));
        self
    }

    /// Makes the next call to `operation` fail with `error`.
    pub fn fail_next(&self, operation: Operation, error: ServiceError) {
        self.lock().failures.insert(operation, error);
    }

    /// Returns every call made so far.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.lock().calls.clone()
    }

    /// Returns how many calls of `operation` were made.
    pub fn call_count(&self, operation: Operation) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Returns the stored profile for `id`.
    pub fn profile(&self, id: &AccountId) -> Option<ProfileDocument> {
        self.lock().profiles.get(id).cloned()
    }

    /// Returns the account id registered for `email`.
    pub fn account_id(&self, email: &str) -> Option<AccountId> {
        self.lock().accounts.get(email).map(|a| a.id.clone())
    }

    /// Returns the currently signed-in account.
    pub fn current_account(&self) -> Option<Account> {
        self.current.borrow().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panic while holding the lock cannot leave the maps half-updated,
        // so a poisoned lock is still usable.
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn record(&self, call: ServiceCall) -> ServiceResult<()> {
        let mut inner = self.lock();
        let operation = call.operation();
        inner.calls.push(call);
        match inner.failures.remove(&operation) {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn publish(&self, account: Option<Account>) {
        self.current.send_replace(account);
    }
}

#[async_trait]
impl IdentityService for MemoryIdentityService {
    async fn create_account(&self, email: &str, password: &str) -> ServiceResult<Account> {
        self.record(ServiceCall::CreateAccount {
            email: email.to_string(),
        })?;

        let account = {
            let mut inner = self.lock();
            if !looks_like_email(email) {
                return Err(ServiceError::new(
                    codes::INVALID_EMAIL,
                    "The email address is badly formatted.",
                ));
            }
            if inner.accounts.contains_key(email) {
                return Err(ServiceError::new(
                    codes::EMAIL_ALREADY_IN_USE,
                    "The email address is already in use by another account.",
                ));
            }
            if password.chars().count() < 6 {
                return Err(ServiceError::new(
                    codes::WEAK_PASSWORD,
                    "Password should be at least 6 characters.",
                ));
            }
            let id = new_account_id();
            inner.accounts.insert(
                email.to_string(),
                StoredAccount {
                    id: id.clone(),
                    password: Some(password.to_string()),
                    display_name: None,
                },
            );
            Account {
                id,
                email: email.to_string(),
                display_name: None,
            }
        };

        self.publish(Some(account.clone()));
        Ok(account)
    }

    async fn sign_in(&self, email: &str, password: &str) -> ServiceResult<Account> {
        self.record(ServiceCall::SignIn {
            email: email.to_string(),
        })?;

        let account = {
            let inner = self.lock();
            if !looks_like_email(email) {
                return Err(ServiceError::new(
                    codes::INVALID_EMAIL,
                    "The email address is badly formatted.",
                ));
            }
            let Some(stored) = inner.accounts.get(email) else {
                return Err(ServiceError::new(
                    codes::USER_NOT_FOUND,
                    "There is no user record corresponding to this identifier.",
                ));
            };
            match &stored.password {
                Some(expected) if expected == password => {}
                Some(_) => {
                    return Err(ServiceError::new(
                        codes::WRONG_PASSWORD,
                        "The password is invalid.",
                    ));
                }
                None => {
                    return Err(ServiceError::new(
                        codes::INVALID_CREDENTIAL,
                        "This account signs in with Google.",
                    ));
                }
            }
            Account {
                id: stored.id.clone(),
                email: email.to_string(),
                display_name: stored.display_name.clone(),
            }
        };

        self.publish(Some(account.clone()));
        Ok(account)
    }

    async fn sign_in_federated(&self) -> ServiceResult<Account> {
        self.record(ServiceCall::SignInFederated)?;

        let account = {
            let mut inner = self.lock();
            let Some((email, display_name)) = inner.federated.clone() else {
                return Err(ServiceError::new(
                    codes::POPUP_CLOSED,
                    "The federated sign-in was cancelled.",
                ));
            };
            let id = match inner.accounts.get(&email) {
                Some(stored) => stored.id.clone(),
                None => {
                    let id = new_account_id();
                    inner.accounts.insert(
                        email.clone(),
                        StoredAccount {
                            id: id.clone(),
                            password: None,
                            display_name: display_name.clone(),
                        },
                    );
                    id
                }
            };
            Account {
                id,
                email,
                display_name,
            }
        };

        self.publish(Some(account.clone()));
        Ok(account)
    }

    async fn sign_out(&self) -> ServiceResult<()> {
        self.record(ServiceCall::SignOut)?;
        self.publish(None);
        Ok(())
    }

    async fn read_profile(&self, id: &AccountId) -> ServiceResult<Option<ProfileDocument>> {
        self.record(ServiceCall::ReadProfile { id: id.clone() })?;
        Ok(self.lock().profiles.get(id).cloned())
    }

    async fn write_profile(&self, id: &AccountId, doc: &ProfileDocument) -> ServiceResult<()> {
        self.record(ServiceCall::WriteProfile {
            id: id.clone(),
            doc: doc.clone(),
        })?;
        self.lock().profiles.insert(id.clone(), doc.clone());
        Ok(())
    }

    fn auth_state(&self) -> watch::Receiver<Option<Account>> {
        self.current.subscribe()
    }
}

fn new_account_id() -> AccountId {
    AccountId::new(uuid::Uuid::new_v4().simple().to_string())
}

fn looks_like_email(email: &str) -> bool {
    email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'))
}
