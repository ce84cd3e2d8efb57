//! Error types for the view models.

use areg_client::ApiError;
use areg_core::ValidationError;
use areg_session::StoreError;

/// Errors from the create/edit form.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Unknown field, read-only field, or unknown verification method.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("telephone number {index} does not exist (the form has {len})")]
    PhoneIndexOutOfRange { index: usize, len: usize },

    /// Submitting a new record before the server issued its code.
    #[error("the register code has not been issued yet")]
    CodePending,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from account flows.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("business name cannot be empty")]
    EmptyBusinessName,

    /// An account already exists, or the existence check failed.
    #[error("registration is closed")]
    RegistrationClosed,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
