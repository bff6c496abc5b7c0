//! Sign-in and registration workflow.

pub mod error;
pub mod form;
pub mod workflow;

pub use error::{AuthError, AuthOperation};
pub use form::{AuthForm, Field};
pub use workflow::{AuthRequest, AuthWorkflow, Step, execute};
