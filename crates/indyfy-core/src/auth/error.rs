//! Client-visible authentication errors and the service code tables.

use crate::identity::{ServiceError, codes};

/// Which external call failed; selects the code table and generic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOperation {
    Registration,
    SignIn,
    Federated,
}

/// Error surfaced to the user by the auth workflow.
///
/// Every variant maps to one fixed message. `Busy` and `InvalidStep` are
/// rejections of a submit that never started and are not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    WeakPassword,
    #[error("This email is already in use")]
    EmailAlreadyInUse,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("No account exists for this email")]
    AccountNotFound,
    #[error("Incorrect password")]
    WrongPassword,
    #[error("Incorrect email or password")]
    InvalidCredentials,
    #[error("Google sign-in failed. Please try again.")]
    FederatedSignInFailed,
    #[error("Choose an account type first")]
    RoleRequired,
    #[error("{}", generic_message(.0))]
    Generic(AuthOperation),
    #[error("A request is already in progress")]
    Busy,
    #[error("This action is not available here")]
    InvalidStep,
}

fn generic_message(operation: &AuthOperation) -> &'static str {
    match *operation {
        AuthOperation::Registration => "Something went wrong. Please try again.",
        AuthOperation::SignIn => "Sign-in failed. Please try again.",
        AuthOperation::Federated => "Google sign-in failed. Please try again.",
    }
}

impl AuthError {
    /// Translates a service failure code for the given operation.
    ///
    /// Unknown codes fall back to [`AuthError::Generic`].
    pub fn from_code(operation: AuthOperation, code: &str) -> Self {
        match operation {
            AuthOperation::Registration => match code {
                codes::EMAIL_ALREADY_IN_USE => AuthError::EmailAlreadyInUse,
                codes::INVALID_EMAIL => AuthError::InvalidEmail,
                codes::WEAK_PASSWORD => AuthError::WeakPassword,
                _ => AuthError::Generic(operation),
            },
            AuthOperation::SignIn => match code {
                codes::USER_NOT_FOUND => AuthError::AccountNotFound,
                codes::WRONG_PASSWORD => AuthError::WrongPassword,
                codes::INVALID_CREDENTIAL => AuthError::InvalidCredentials,
                codes::INVALID_EMAIL => AuthError::InvalidEmail,
                _ => AuthError::Generic(operation),
            },
            AuthOperation::Federated => AuthError::FederatedSignInFailed,
        }
    }

    /// Translates a service error, logging the raw failure.
    pub fn from_service(operation: AuthOperation, error: &ServiceError) -> Self {
        let mapped = Self::from_code(operation, &error.code);
        tracing::warn!(
            ?operation,
            code = %error.code,
            detail = %error.message,
            mapped = ?mapped,
            "auth call failed"
        );
        mapped
    }

    /// Returns true for errors that are shown to the user.
    pub fn is_retained(self) -> bool {
        !matches!(self, AuthError::Busy | AuthError::InvalidStep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_table() {
        let op = AuthOperation::Registration;
        assert_eq!(
            AuthError::from_code(op, codes::EMAIL_ALREADY_IN_USE),
            AuthError::EmailAlreadyInUse
        );
        assert_eq!(
            AuthError::from_code(op, codes::INVALID_EMAIL),
            AuthError::InvalidEmail
        );
        assert_eq!(
            AuthError::from_code(op, codes::WEAK_PASSWORD),
            AuthError::WeakPassword
        );
        assert_eq!(
            AuthError::from_code(op, codes::USER_NOT_FOUND),
            AuthError::Generic(op)
        );
    }

    #[test]
    fn test_sign_in_table() {
        let op = AuthOperation::SignIn;
        assert_eq!(
            AuthError::from_code(op, codes::USER_NOT_FOUND),
            AuthError::AccountNotFound
        );
        assert_eq!(
            AuthError::from_code(op, codes::WRONG_PASSWORD),
            AuthError::WrongPassword
        );
        assert_eq!(
            AuthError::from_code(op, codes::INVALID_CREDENTIAL),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            AuthError::from_code(op, "auth/something-new"),
            AuthError::Generic(op)
        );
    }

    #[test]
    fn test_federated_always_maps_to_federated_failure() {
        for code in [codes::NETWORK, codes::POPUP_CLOSED, "whatever"] {
            assert_eq!(
                AuthError::from_code(AuthOperation::Federated, code),
                AuthError::FederatedSignInFailed
            );
        }
    }

    #[test]
    fn test_generic_message_depends_on_operation() {
        assert_eq!(
            AuthError::Generic(AuthOperation::Registration).to_string(),
            "Something went wrong. Please try again."
        );
        assert_eq!(
            AuthError::Generic(AuthOperation::SignIn).to_string(),
            "Sign-in failed. Please try again."
        );
    }
}
