//! Error types for the savings calculator

use thiserror::Error;

use crate::fields::Field;
use crate::validation::ValidationErrors;

/// Result type alias for calculator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the savings calculator
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The form failed validation; nothing was computed
    #[error("invalid input: {}", .errors.summary())]
    InvalidInput { errors: ValidationErrors },

    /// A numeric field reached the calculator without parsing
    #[error("malformed value {value:?} for {field}")]
    Malformed { field: Field, value: String },

    /// A computed figure does not fit in a finite number
    #[error("{figure} is out of range")]
    OutOfRange { figure: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
