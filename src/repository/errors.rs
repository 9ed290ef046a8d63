use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Failures raised by the persistence layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A connection could not be checked out of the pool.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// The query itself failed.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// A stored row no longer satisfies the domain constraints.
    #[error("stored data is invalid: {0}")]
    ValidationError(String),
    /// The row targeted by a write disappeared.
    #[error("not found")]
    NotFound,
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}

/// Convenient alias for repository return values.
pub type RepositoryResult<T> = Result<T, RepositoryError>;
