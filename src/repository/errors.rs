use thiserror::Error;

use crate::domain::language::LanguageError;
use crate::domain::types::TypeConstraintError;

/// Errors raised by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The record to update or delete does not exist.
    #[error("not found")]
    NotFound,
    /// A unique constraint rejected the write.
    #[error("duplicate: {0}")]
    Duplicate(String),
    /// A check, not-null or foreign-key constraint rejected the write.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    /// A stored value could not be turned into its domain type.
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => RepositoryError::NotFound,
            Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                RepositoryError::Duplicate(info.message().to_string())
            }
            Error::DatabaseError(
                kind @ (DatabaseErrorKind::ForeignKeyViolation
                | DatabaseErrorKind::CheckViolation
                | DatabaseErrorKind::NotNullViolation),
                info,
            ) => RepositoryError::ConstraintViolation(format!("{kind:?}: {}", info.message())),
            other => RepositoryError::Database(other),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

impl From<LanguageError> for RepositoryError {
    fn from(val: LanguageError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
