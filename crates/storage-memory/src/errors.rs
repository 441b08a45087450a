//! Storage-specific error types.
//!
//! These wrap failures of the in-memory store and convert them to the
//! database-agnostic error types defined in `finsight_core`.

use finsight_core::errors::{DatabaseError, Error};
use thiserror::Error;

/// Storage-layer errors, converted to `finsight_core::Error` before they
/// reach callers.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid stored value in {table}: {message}")]
    Corrupt { table: &'static str, message: String },
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => {
                Error::Database(DatabaseError::Serialization(e.to_string()))
            }
            StorageError::Corrupt { table, message } => {
                Error::Database(DatabaseError::Internal(format!("{}: {}", table, message)))
            }
        }
    }
}

/// Extension trait to convert storage results to core results.
pub trait IntoCore<T> {
    fn into_core(self) -> finsight_core::Result<T>;
}

impl<T> IntoCore<T> for std::result::Result<T, StorageError> {
    fn into_core(self) -> finsight_core::Result<T> {
        self.map_err(Error::from)
    }
}
