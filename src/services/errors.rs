use thiserror::Error;

use crate::forms::FieldErrors;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// A language code outside the configured set, or the default language
    /// where a translation is required.
    #[error("invalid language: {0}")]
    InvalidLanguage(String),
    /// Submitted data failed validation; nothing was written.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    /// A form could not be interpreted.
    #[error("invalid form: {0}")]
    Form(String),
    /// A value violated a domain type constraint.
    #[error("invalid value: {0}")]
    TypeConstraint(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
