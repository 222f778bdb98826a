//! Conversions from domain and form errors into [`ServiceError`].
//!
//! Kept apart from the domain so that `data`-only consumers do not pull in
//! the service layer.

use crate::domain::language::LanguageError;
use crate::domain::types::TypeConstraintError;
use crate::forms::FieldErrors;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}

impl From<LanguageError> for ServiceError {
    fn from(val: LanguageError) -> Self {
        ServiceError::InvalidLanguage(val.to_string())
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(val: FieldErrors) -> Self {
        ServiceError::Validation(val)
    }
}
