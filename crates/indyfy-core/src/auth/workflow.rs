//! Auth workflow controller.
//!
//! Three steps: role choice, registration, sign-in. Submits are split in
//! three phases so a UI can run the network part on another task:
//!
//! 1. `begin_*` validates locally, marks the workflow busy and returns an
//!    owned [`AuthRequest`]
//! 2. [`execute`] talks to the [`IdentityService`]
//! 3. [`AuthWorkflow::finish`] clears the busy flag and either reports
//!    completion or retains the error message
//!
//! `submit_*` chains the three for callers that can hold `&mut self` across
//! the await.

use chrono::Utc;
use zeroize::Zeroizing;

use super::error::{AuthError, AuthOperation};
use super::form::{AuthForm, Field};
use crate::identity::IdentityService;
use crate::profile::{Account, ProfileDocument, Role, default_username};

/// Minimum password length accepted before calling the service.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Current step of the auth modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    RoleChoice,
    Registration,
    SignIn,
}

impl Step {
    /// Fields shown on this step, in focus order.
    pub fn fields(self) -> &'static [Field] {
        match self {
            Step::RoleChoice => &[],
            Step::Registration => &[
                Field::Username,
                Field::Email,
                Field::Password,
                Field::ConfirmPassword,
            ],
            Step::SignIn => &[Field::Email, Field::Password],
        }
    }
}

/// Validated account creation request.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub username: String,
    pub password: Zeroizing<String>,
    pub role: Role,
}

/// Validated credential sign-in request.
#[derive(Debug, Clone)]
pub struct SignInRequest {
    pub email: String,
    pub password: Zeroizing<String>,
}

/// Work handed from the workflow to whoever performs the external calls.
#[derive(Debug, Clone)]
pub enum AuthRequest {
    Register(RegistrationRequest),
    SignIn(SignInRequest),
    Federated { role: Role },
}

impl AuthRequest {
    pub fn operation(&self) -> AuthOperation {
        match self {
            AuthRequest::Register(_) => AuthOperation::Registration,
            AuthRequest::SignIn(_) => AuthOperation::SignIn,
            AuthRequest::Federated { .. } => AuthOperation::Federated,
        }
    }
}

/// Client-side state of the auth modal.
#[derive(Debug, Clone, Default)]
pub struct AuthWorkflow {
    step: Step,
    role: Option<Role>,
    form: AuthForm,
    error: Option<AuthError>,
    busy: bool,
}

impl AuthWorkflow {
    /// Fresh workflow at the role choice step.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn form(&self) -> &AuthForm {
        &self.form
    }

    /// The retained error, if the last attempt failed.
    pub fn error(&self) -> Option<AuthError> {
        self.error
    }

    /// True while a request is in flight; submits are rejected.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    /// Chooses the account type and moves to registration.
    ///
    /// # Errors
    /// Returns `InvalidStep` outside the role choice step.
    pub fn select_role(&mut self, role: Role) -> Result<(), AuthError> {
        if self.step != Step::RoleChoice {
            return Err(AuthError::InvalidStep);
        }
        self.role = Some(role);
        self.move_to(Step::Registration);
        Ok(())
    }

    /// Returns to the role choice step. Ignored while a request is in flight.
    pub fn go_back(&mut self) {
        if self.busy {
            return;
        }
        self.move_to(Step::RoleChoice);
    }

    /// Toggles between registration and sign-in.
    ///
    /// Sign-in leads back to registration only when a role was chosen;
    /// otherwise it returns to the role choice. Ignored while a request is
    /// in flight, so a failure is retained on the step that issued it.
    pub fn switch_mode(&mut self) {
        if self.busy {
            return;
        }
        let next = match self.step {
            Step::RoleChoice | Step::Registration => Step::SignIn,
            Step::SignIn if self.role.is_some() => Step::Registration,
            Step::SignIn => Step::RoleChoice,
        };
        self.move_to(next);
    }

    fn move_to(&mut self, step: Step) {
        tracing::debug!(from = ?self.step, to = ?step, "auth step");
        self.step = step;
        self.error = None;
    }

    // ------------------------------------------------------------------
    // Form editing
    // ------------------------------------------------------------------

    pub fn set_field(&mut self, field: Field, value: &str) {
        self.form.set(field, value);
        self.error = None;
    }

    pub fn push_char(&mut self, field: Field, c: char) {
        self.form.push_char(field, c);
        self.error = None;
    }

    pub fn pop_char(&mut self, field: Field) {
        self.form.pop_char(field);
        self.error = None;
    }

    // ------------------------------------------------------------------
    // Submits
    // ------------------------------------------------------------------

    /// Validates the registration form and marks the workflow busy.
    ///
    /// Checks run in order and stop at the first failure: matching
    /// passwords, then minimum length.
    ///
    /// # Errors
    /// `InvalidStep`/`Busy` when the submit is not allowed right now,
    /// otherwise the retained validation error.
    pub fn begin_registration(&mut self) -> Result<AuthRequest, AuthError> {
        self.ensure_ready(&[Step::Registration])?;
        let Some(role) = self.role else {
            return Err(self.reject(AuthError::RoleRequired));
        };
        if *self.form.password != *self.form.confirm_password {
            return Err(self.reject(AuthError::PasswordMismatch));
        }
        if self.form.password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(self.reject(AuthError::WeakPassword));
        }

        self.start();
        Ok(AuthRequest::Register(RegistrationRequest {
            email: self.form.email.trim().to_string(),
            username: self.form.username.trim().to_string(),
            password: self.form.password.clone(),
            role,
        }))
    }

    /// Marks the workflow busy for a credential sign-in.
    ///
    /// # Errors
    /// `InvalidStep`/`Busy` when the submit is not allowed right now.
    pub fn begin_sign_in(&mut self) -> Result<AuthRequest, AuthError> {
        self.ensure_ready(&[Step::SignIn])?;
        self.start();
        Ok(AuthRequest::SignIn(SignInRequest {
            email: self.form.email.trim().to_string(),
            password: self.form.password.clone(),
        }))
    }

    /// Marks the workflow busy for a federated sign-in.
    ///
    /// # Errors
    /// `RoleRequired` (retained) when no role was chosen in this session.
    pub fn begin_federated(&mut self) -> Result<AuthRequest, AuthError> {
        self.ensure_ready(&[Step::Registration, Step::SignIn])?;
        let Some(role) = self.role else {
            return Err(self.reject(AuthError::RoleRequired));
        };
        self.start();
        Ok(AuthRequest::Federated { role })
    }

    /// Records the outcome of an executed request.
    ///
    /// Returns the account when the workflow is complete and the modal
    /// should close. On failure the step and the form are left as they were.
    pub fn finish(&mut self, result: Result<Account, AuthError>) -> Option<Account> {
        self.busy = false;
        match result {
            Ok(account) => {
                tracing::info!(account = %account.id, "auth workflow complete");
                self.error = None;
                Some(account)
            }
            Err(error) => {
                if error.is_retained() {
                    self.error = Some(error);
                }
                None
            }
        }
    }

    /// Runs a full registration against `service`.
    ///
    /// # Errors
    /// Any local or mapped service error.
    pub async fn submit_registration(
        &mut self,
        service: &dyn IdentityService,
    ) -> Result<Account, AuthError> {
        let request = self.begin_registration()?;
        self.run(service, &request).await
    }

    /// Runs a credential sign-in against `service`.
    ///
    /// # Errors
    /// Any mapped service error.
    pub async fn submit_sign_in(
        &mut self,
        service: &dyn IdentityService,
    ) -> Result<Account, AuthError> {
        let request = self.begin_sign_in()?;
        self.run(service, &request).await
    }

    /// Runs a federated sign-in against `service`.
    ///
    /// # Errors
    /// `RoleRequired` or `FederatedSignInFailed`.
    pub async fn submit_federated_sign_in(
        &mut self,
        service: &dyn IdentityService,
    ) -> Result<Account, AuthError> {
        let request = self.begin_federated()?;
        self.run(service, &request).await
    }

    async fn run(
        &mut self,
        service: &dyn IdentityService,
        request: &AuthRequest,
    ) -> Result<Account, AuthError> {
        let result = execute(service, request).await;
        self.finish(result.clone());
        result
    }

    fn ensure_ready(&self, steps: &[Step]) -> Result<(), AuthError> {
        if !steps.contains(&self.step) {
            return Err(AuthError::InvalidStep);
        }
        if self.busy {
            return Err(AuthError::Busy);
        }
        Ok(())
    }

    fn reject(&mut self, error: AuthError) -> AuthError {
        tracing::debug!(?error, "auth submit rejected locally");
        self.error = Some(error);
        error
    }

    fn start(&mut self) {
        self.busy = true;
        self.error = None;
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Performs the external calls for `request`.
///
/// Never panics and never lets a service error escape untranslated.
///
/// # Errors
/// The mapped [`AuthError`] for the failing call.
pub async fn execute(
    service: &dyn IdentityService,
    request: &AuthRequest,
) -> Result<Account, AuthError> {
    match request {
        AuthRequest::Register(req) => register(service, req).await,
        AuthRequest::SignIn(req) => sign_in(service, req).await,
        AuthRequest::Federated { role } => federated_sign_in(service, *role).await,
    }
}

async fn register(
    service: &dyn IdentityService,
    req: &RegistrationRequest,
) -> Result<Account, AuthError> {
    let op = AuthOperation::Registration;
    let account = service
        .create_account(&req.email, &req.password)
        .await
        .map_err(|e| AuthError::from_service(op, &e))?;

    let doc = ProfileDocument::new(&req.email, &req.username, req.role, Utc::now());
    service
        .write_profile(&account.id, &doc)
        .await
        .map_err(|e| AuthError::from_service(op, &e))?;

    tracing::info!(account = %account.id, role = %req.role, "registered");
    Ok(account)
}

async fn sign_in(service: &dyn IdentityService, req: &SignInRequest) -> Result<Account, AuthError> {
    let account = service
        .sign_in(&req.email, &req.password)
        .await
        .map_err(|e| AuthError::from_service(AuthOperation::SignIn, &e))?;
    tracing::info!(account = %account.id, "signed in");
    Ok(account)
}

/// Federated sign-in followed by a create-if-missing profile write.
async fn federated_sign_in(
    service: &dyn IdentityService,
    role: Role,
) -> Result<Account, AuthError> {
    let op = AuthOperation::Federated;
    let account = service
        .sign_in_federated()
        .await
        .map_err(|e| AuthError::from_service(op, &e))?;

    match service.read_profile(&account.id).await {
        Ok(Some(_)) => {
            tracing::debug!(account = %account.id, "profile exists; not overwriting");
        }
        Ok(None) => {
            let username = account
                .display_name
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map_or_else(|| default_username(&account.email), ToString::to_string);
            let doc = ProfileDocument::new(&account.email, username, role, Utc::now());
            service
                .write_profile(&account.id, &doc)
                .await
                .map_err(|e| AuthError::from_service(op, &e))?;
        }
        Err(error) => {
            tracing::warn!(
                account = %account.id,
                code = %error.code,
                "profile lookup failed; skipping profile write"
            );
        }
    }

    tracing::info!(account = %account.id, "signed in with federated identity");
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::memory::{Operation, ServiceCall};
    use crate::identity::{MemoryIdentityService, ServiceError, codes};

    fn registration(role: Role, username: &str, email: &str, pw: &str, confirm: &str) -> AuthWorkflow {
        let mut wf = AuthWorkflow::new();
        wf.select_role(role).unwrap();
        wf.set_field(Field::Username, username);
        wf.set_field(Field::Email, email);
        wf.set_field(Field::Password, pw);
        wf.set_field(Field::ConfirmPassword, confirm);
        wf
    }

    #[test]
    fn test_starts_at_role_choice() {
        let wf = AuthWorkflow::new();
        assert_eq!(wf.step(), Step::RoleChoice);
        assert_eq!(wf.role(), None);
        assert!(!wf.is_busy());
    }

    #[test]
    fn test_select_role_only_from_role_choice() {
        let mut wf = AuthWorkflow::new();
        wf.select_role(Role::Fan).unwrap();
        assert_eq!(wf.step(), Step::Registration);
        assert_eq!(
            wf.select_role(Role::Artist).unwrap_err(),
            AuthError::InvalidStep
        );
        assert_eq!(wf.role(), Some(Role::Fan));
    }

    #[test]
    fn test_go_back_and_switch_mode_clear_error() {
        let mut wf = registration(Role::Fan, "Sam", "sam@x.com", "abc", "abd");
        assert!(wf.begin_registration().is_err());
        assert!(wf.error().is_some());

        wf.switch_mode();
        assert_eq!(wf.step(), Step::SignIn);
        assert_eq!(wf.error(), None);

        wf.switch_mode();
        assert_eq!(wf.step(), Step::Registration);

        wf.go_back();
        assert_eq!(wf.step(), Step::RoleChoice);
    }

    #[test]
    fn test_switch_mode_from_sign_in_without_role_returns_to_choice() {
        let mut wf = AuthWorkflow::new();
        wf.switch_mode();
        assert_eq!(wf.step(), Step::SignIn);
        wf.switch_mode();
        assert_eq!(wf.step(), Step::RoleChoice);
    }

    #[test]
    fn test_editing_clears_error() {
        let mut wf = registration(Role::Fan, "Sam", "sam@x.com", "abc", "abc");
        assert_eq!(wf.begin_registration().unwrap_err(), AuthError::WeakPassword);
        wf.push_char(Field::Password, 'd');
        assert_eq!(wf.error(), None);
    }

    #[tokio::test]
    async fn test_password_mismatch_makes_no_external_call() {
        let service = MemoryIdentityService::new();
        let mut wf = registration(Role::Artist, "Luna", "luna@x.com", "secret1", "secret2");

        let err = wf.submit_registration(&service).await.unwrap_err();

        assert_eq!(err, AuthError::PasswordMismatch);
        assert_eq!(wf.error(), Some(AuthError::PasswordMismatch));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mismatch_is_checked_before_length() {
        let service = MemoryIdentityService::new();
        let mut wf = registration(Role::Artist, "Luna", "luna@x.com", "abc", "abd");
        let err = wf.submit_registration(&service).await.unwrap_err();
        assert_eq!(err, AuthError::PasswordMismatch);
    }

    #[tokio::test]
    async fn test_short_password_is_weak_without_external_call() {
        let service = MemoryIdentityService::new();
        let mut wf = registration(Role::Artist, "Luna", "luna@x.com", "abc", "abc");

        let err = wf.submit_registration(&service).await.unwrap_err();

        assert_eq!(err, AuthError::WeakPassword);
        assert!(service.calls().is_empty());
        assert!(!wf.is_busy());
    }

    #[tokio::test]
    async fn test_artist_registration_writes_artist_profile() {
        let service = MemoryIdentityService::new();
        let mut wf = registration(Role::Artist, "Luna", "luna@x.com", "secret1", "secret1");

        let account = wf.submit_registration(&service).await.unwrap();

        let calls = service.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0],
            ServiceCall::CreateAccount {
                email: "luna@x.com".to_string()
            }
        );
        let ServiceCall::WriteProfile { id, doc } = &calls[1] else {
            panic!("expected profile write, got {:?}", calls[1]);
        };
        assert_eq!(id, &account.id);

        let value = serde_json::to_value(doc).unwrap();
        assert_eq!(value["email"], "luna@x.com");
        assert_eq!(value["username"], "Luna");
        assert_eq!(value["role"], "artist");
        assert_eq!(value["followerCount"], 0);
        assert_eq!(value["releaseList"], serde_json::json!([]));
        assert!(value.get("followingList").is_none());
        assert!(wf.error().is_none());
        assert!(!wf.is_busy());
    }

    #[tokio::test]
    async fn test_fan_registration_writes_fan_profile_once() {
        let service = MemoryIdentityService::new();
        let mut wf = registration(Role::Fan, "Sam", "sam@x.com", "secret1", "secret1");

        let account = wf.submit_registration(&service).await.unwrap();

        assert_eq!(service.call_count(Operation::WriteProfile), 1);
        let doc = service.profile(&account.id).unwrap();
        assert_eq!(doc.role, Role::Fan);
        assert_eq!(doc.following_list, Some(Vec::new()));
        assert_eq!(doc.follower_count, None);
        assert_eq!(doc.release_list, None);
    }

    #[tokio::test]
    async fn test_email_in_use_keeps_step_and_form() {
        let service = MemoryIdentityService::new().with_account("luna@x.com", "other12", None);
        let mut wf = registration(Role::Artist, "Luna", "luna@x.com", "secret1", "secret1");

        let err = wf.submit_registration(&service).await.unwrap_err();

        assert_eq!(err, AuthError::EmailAlreadyInUse);
        assert_eq!(wf.error(), Some(AuthError::EmailAlreadyInUse));
        assert_eq!(wf.step(), Step::Registration);
        assert_eq!(wf.form().value(Field::Username), "Luna");
        assert_eq!(wf.form().value(Field::Email), "luna@x.com");
        assert_eq!(wf.form().value(Field::Password), "secret1");
        assert_eq!(wf.form().value(Field::ConfirmPassword), "secret1");
        assert_eq!(service.call_count(Operation::WriteProfile), 0);
    }

    #[tokio::test]
    async fn test_profile_write_failure_is_generic_registration_error() {
        let service = MemoryIdentityService::new();
        service.fail_next(
            Operation::WriteProfile,
            ServiceError::new(codes::PERMISSION_DENIED, "denied"),
        );
        let mut wf = registration(Role::Artist, "Luna", "luna@x.com", "secret1", "secret1");

        let err = wf.submit_registration(&service).await.unwrap_err();

        assert_eq!(err, AuthError::Generic(AuthOperation::Registration));
        assert_eq!(wf.step(), Step::Registration);
    }

    #[tokio::test]
    async fn test_sign_in_failure_stays_on_sign_in() {
        let service = MemoryIdentityService::new().with_account("luna@x.com", "secret1", None);
        let mut wf = AuthWorkflow::new();
        wf.switch_mode();
        wf.set_field(Field::Email, "luna@x.com");
        wf.set_field(Field::Password, "wrong12");

        let err = wf.submit_sign_in(&service).await.unwrap_err();

        assert_eq!(err, AuthError::WrongPassword);
        assert_eq!(wf.step(), Step::SignIn);
        assert_eq!(wf.error(), Some(AuthError::WrongPassword));

        wf.set_field(Field::Password, "secret1");
        let account = wf.submit_sign_in(&service).await.unwrap();
        assert_eq!(account.email, "luna@x.com");
        assert_eq!(wf.error(), None);
    }

    #[tokio::test]
    async fn test_unknown_account_maps_to_account_not_found() {
        let service = MemoryIdentityService::new();
        let mut wf = AuthWorkflow::new();
        wf.switch_mode();
        wf.set_field(Field::Email, "ghost@x.com");
        wf.set_field(Field::Password, "secret1");

        let err = wf.submit_sign_in(&service).await.unwrap_err();
        assert_eq!(err, AuthError::AccountNotFound);
    }

    #[tokio::test]
    async fn test_federated_requires_role() {
        let service = MemoryIdentityService::new().with_federated_identity("g@x.com", None);
        let mut wf = AuthWorkflow::new();
        wf.switch_mode();

        let err = wf.submit_federated_sign_in(&service).await.unwrap_err();

        assert_eq!(err, AuthError::RoleRequired);
        assert_eq!(wf.error(), Some(AuthError::RoleRequired));
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_federated_creates_missing_profile() {
        let service =
            MemoryIdentityService::new().with_federated_identity("luna@x.com", Some("Luna Waves"));
        let mut wf = AuthWorkflow::new();
        wf.select_role(Role::Artist).unwrap();

        let account = wf.submit_federated_sign_in(&service).await.unwrap();

        let doc = service.profile(&account.id).unwrap();
        assert_eq!(doc.username, "Luna Waves");
        assert_eq!(doc.email, "luna@x.com");
        assert_eq!(doc.role, Role::Artist);
        assert!(doc.has_consistent_role_fields());
    }

    #[tokio::test]
    async fn test_federated_derives_username_without_display_name() {
        let service = MemoryIdentityService::new().with_federated_identity("sam.k@x.com", None);
        let mut wf = AuthWorkflow::new();
        wf.select_role(Role::Fan).unwrap();

        let account = wf.submit_federated_sign_in(&service).await.unwrap();

        assert_eq!(service.profile(&account.id).unwrap().username, "sam.k");
    }

    #[tokio::test]
    async fn test_federated_keeps_existing_profile() {
        let existing = ProfileDocument::new("luna@x.com", "Luna", Role::Artist, Utc::now());
        let service = MemoryIdentityService::new()
            .with_account("luna@x.com", "secret1", Some(existing.clone()))
            .with_federated_identity("luna@x.com", Some("Someone Else"));
        let mut wf = AuthWorkflow::new();
        wf.select_role(Role::Fan).unwrap();

        let account = wf.submit_federated_sign_in(&service).await.unwrap();

        assert_eq!(service.call_count(Operation::WriteProfile), 0);
        assert_eq!(service.profile(&account.id), Some(existing));
    }

    #[tokio::test]
    async fn test_federated_skips_write_when_lookup_fails() {
        let service = MemoryIdentityService::new().with_federated_identity("g@x.com", None);
        service.fail_next(Operation::ReadProfile, ServiceError::network("timeout"));
        let mut wf = AuthWorkflow::new();
        wf.select_role(Role::Fan).unwrap();

        assert!(wf.submit_federated_sign_in(&service).await.is_ok());
        assert_eq!(service.call_count(Operation::WriteProfile), 0);
    }

    #[tokio::test]
    async fn test_federated_failure_is_mapped() {
        let service = MemoryIdentityService::new();
        let mut wf = AuthWorkflow::new();
        wf.select_role(Role::Fan).unwrap();

        let err = wf.submit_federated_sign_in(&service).await.unwrap_err();

        assert_eq!(err, AuthError::FederatedSignInFailed);
        assert_eq!(wf.step(), Step::Registration);
    }

    #[test]
    fn test_busy_rejects_second_submit_without_touching_error() {
        let mut wf = registration(Role::Fan, "Sam", "sam@x.com", "secret1", "secret1");
        assert!(wf.begin_registration().is_ok());
        assert!(wf.is_busy());

        assert_eq!(wf.begin_registration().unwrap_err(), AuthError::Busy);
        assert_eq!(wf.begin_federated().unwrap_err(), AuthError::Busy);
        assert_eq!(wf.error(), None);

        assert!(wf.finish(Err(AuthError::EmailAlreadyInUse)).is_none());
        assert!(!wf.is_busy());
        assert_eq!(wf.error(), Some(AuthError::EmailAlreadyInUse));
    }

    #[tokio::test]
    async fn test_navigation_is_ignored_while_registration_runs() {
        let service = MemoryIdentityService::new().with_account("luna@x.com", "other12", None);
        let mut wf = registration(Role::Artist, "Luna", "luna@x.com", "secret1", "secret1");
        let request = wf.begin_registration().unwrap();

        wf.go_back();
        wf.switch_mode();
        assert_eq!(wf.step(), Step::Registration);

        let result = execute(&service, &request).await;
        assert!(wf.finish(result).is_none());

        assert_eq!(wf.step(), Step::Registration);
        assert_eq!(wf.error(), Some(AuthError::EmailAlreadyInUse));
        assert_eq!(wf.form().value(Field::Email), "luna@x.com");

        wf.switch_mode();
        assert_eq!(wf.step(), Step::SignIn);
    }

    #[test]
    fn test_submit_outside_step_is_invalid() {
        let mut wf = AuthWorkflow::new();
        assert_eq!(wf.begin_registration().unwrap_err(), AuthError::InvalidStep);
        assert_eq!(wf.begin_sign_in().unwrap_err(), AuthError::InvalidStep);
        assert_eq!(wf.begin_federated().unwrap_err(), AuthError::InvalidStep);
        assert_eq!(wf.error(), None);
    }
}
