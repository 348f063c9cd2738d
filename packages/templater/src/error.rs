//! Error types for the templater.
//!
//! Uses the dual-error pattern: `TemplaterError` for library consumers
//! with detailed error context, and the crate-wide `Result` alias for
//! internal use.

use thiserror::Error;

/// Main error type for the templater library.
#[derive(Debug, Error)]
pub enum TemplaterError {
    /// The template source could not be read (missing file, network failure, empty body).
    #[error("Template source unavailable: {location}: {reason}")]
    SourceUnavailable { location: String, reason: String },

    /// The template content is empty.
    #[error("The template is empty")]
    EmptyTemplate,

    /// The template stopped being well-formed XML at `position` (byte offset).
    #[error("Malformed template at byte {position}: {reason}")]
    MalformedTemplate { position: u64, reason: String },

    /// An attribute value could not be converted to its target type.
    #[error("Invalid value '{value}' for attribute {attribute} on <{element}>: expected {expected}")]
    InvalidFieldValue {
        element: String,
        attribute: String,
        value: String,
        expected: &'static str,
    },

    /// HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl TemplaterError {
    /// Build a `SourceUnavailable` error for a source location.
    pub fn unavailable(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for templater operations.
pub type Result<T> = std::result::Result<T, TemplaterError>;
