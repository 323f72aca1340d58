//! Error types for manifest pipeline operations

use std::io;
use thiserror::Error;

/// Result type for manifest pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or packaging a manifest
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Manifest byte stream is not well-formed YAML
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Schema validation failed; carries every violation found
    #[error("Validation failed:\n  - {}", violations.join("\n  - "))]
    Validation { violations: Vec<String> },

    /// Required manifest field is empty
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Inheritance chain exceeds the bounded depth
    #[error("Inheritance chain too deep (max {max} levels)")]
    ChainTooDeep { max: usize },

    /// Inheritance chain revisits a manifest it already fetched
    #[error("Inheritance cycle detected at {reference}")]
    InheritanceCycle { reference: String },

    /// Fetching an ancestor manifest failed
    #[error("Failed to load parent manifest from {reference}: {message}")]
    Fetch { reference: String, message: String },

    /// A declared variable has no supplied value
    #[error("Missing required variable: {name}")]
    MissingVariable { name: String },

    /// A `--var` flag is not of the form `key=value`
    #[error("Invalid variable format: {flag} (expected key=value)")]
    InvalidVarFlag { flag: String },
}

impl Error {
    /// Create a validation error from an aggregate violation list
    pub fn validation(violations: Vec<String>) -> Self {
        Error::Validation { violations }
    }

    /// Create a missing field error
    pub fn missing_field<S: Into<String>>(field: S) -> Self {
        Error::MissingField {
            field: field.into(),
        }
    }

    /// Create an ancestor fetch error
    pub fn fetch<S: Into<String>, M: Into<String>>(reference: S, message: M) -> Self {
        Error::Fetch {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Create a missing variable error
    pub fn missing_variable<S: Into<String>>(name: S) -> Self {
        Error::MissingVariable { name: name.into() }
    }
}
