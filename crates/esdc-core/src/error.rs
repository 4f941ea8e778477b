//! Error types for esdc

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EsdcError {
    // Pattern errors
    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Group '{group}' is not defined in pattern '{pattern}'")]
    UnknownGroup { pattern: String, group: String },

    #[error("Pattern '{pattern}' matched an empty value in '{input}'")]
    EmptyCapture { pattern: String, input: String },

    #[error("Unmatch group names and expressions for fields: {groups} vs {patterns}")]
    GroupCountMismatch { groups: String, patterns: String },

    #[error("Invalid ISO-8601 date-time '{token}': {reason}")]
    InvalidDateTime { token: String, reason: String },

    // Collection errors
    #[error("Cannot read dataset list {}: {source}", .path.display())]
    ListFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Metadata provider errors
    #[error("Unsupported or unrecognised data format: {dataset}")]
    UnsupportedFormat { dataset: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EsdcError {
    pub(crate) fn invalid_pattern(pattern: &str, source: regex::Error) -> Self {
        EsdcError::InvalidPattern { pattern: pattern.to_string(), source }
    }
}

pub type Result<T> = std::result::Result<T, EsdcError>;
