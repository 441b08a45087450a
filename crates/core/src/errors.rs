//! Core error types for the Finsight engine.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! are converted to these types by the storage layer.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the insight engine.
///
/// Storage failures are wrapped in string form to keep this type independent
/// of any particular persistence technology.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),
}

/// Storage-agnostic error type for repository operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// A stored record could not be (de)serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Internal/unexpected store error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Failed to parse number: {0}")]
    NumberParse(#[from] ParseFloatError),

    #[error("Failed to parse integer: {0}")]
    IntegerParse(#[from] ParseIntError),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}
