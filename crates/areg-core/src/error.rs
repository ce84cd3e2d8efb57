//! # Validation Errors
//!
//! Local validation failures raised before anything reaches the network.

use thiserror::Error;

/// A value supplied by the user could not be applied to a domain type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field name is not part of the record form.
    #[error("unknown record field: {0}")]
    UnknownField(String),

    /// The field is assigned by the server and cannot be edited.
    #[error("field {0} is read-only")]
    ReadOnlyField(String),

    /// The verification method is not one of the accepted documents.
    #[error("unknown verification method: {0}")]
    UnknownVerificationMethod(String),

    /// The sort order is neither ascending nor descending.
    #[error("unknown sort order: {0} (expected \"asc\" or \"desc\")")]
    UnknownSortOrder(String),
}
