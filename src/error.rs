//! Error types for the vietsent library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`VietsentError`] enum.
//!
//! # Examples
//!
//! ```
//! use vietsent::error::{Result, VietsentError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(VietsentError::invalid_argument("confidence must be within [0, 1]"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for vietsent operations.
#[derive(Error, Debug)]
pub enum VietsentError {
    /// I/O errors (reading tag tables, lexicons, configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed tag table resource or a table that does not fit the token classifier
    #[error("Tag table error: {0}")]
    TagTable(String),

    /// A token classifier produced a label that the tag table does not define
    #[error("Label index {index} is out of range for a tag table of {size} rules")]
    LabelOutOfRange { index: usize, size: usize },

    /// External classifier failures (unavailable model, malformed response)
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An external call exceeded its deadline
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Operation cancelled between pipeline stages
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// Invalid argument passed by the caller
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with VietsentError.
pub type Result<T> = std::result::Result<T, VietsentError>;

impl VietsentError {
    /// Create a new tag table error.
    pub fn tag_table<S: Into<String>>(msg: S) -> Self {
        VietsentError::TagTable(msg.into())
    }

    /// Create a new classifier error.
    pub fn classifier<S: Into<String>>(msg: S) -> Self {
        VietsentError::Classifier(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        VietsentError::Analysis(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        VietsentError::Config(msg.into())
    }

    /// Create a new timeout error.
    pub fn timeout<S: Into<String>>(msg: S) -> Self {
        VietsentError::Timeout(msg.into())
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        VietsentError::Cancelled(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        VietsentError::InvalidArgument(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = VietsentError::tag_table("empty resource");
        assert_eq!(error.to_string(), "Tag table error: empty resource");

        let error = VietsentError::classifier("model unavailable");
        assert_eq!(error.to_string(), "Classifier error: model unavailable");

        let error = VietsentError::LabelOutOfRange { index: 7, size: 3 };
        assert_eq!(
            error.to_string(),
            "Label index 7 is out of range for a tag table of 3 rules"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = VietsentError::from(io_error);

        match error {
            VietsentError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
