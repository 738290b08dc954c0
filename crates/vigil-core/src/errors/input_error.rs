//! Input normalization errors.

use std::path::PathBuf;

use super::error_code::{self, VigilErrorCode};

/// Errors that can occur while resolving and parsing an input document.
///
/// These are the only fatal errors in a run: everything past normalization
/// is best-effort and always yields a report.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("no input channel supplied; expected exactly one of: {expected}")]
    NoSource { expected: &'static str },

    #[error("multiple input channels supplied ({supplied}); expected exactly one")]
    MultipleSources { supplied: String },

    #[error("input file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read parameters from stdin: {source}")]
    StdinUnreadable { source: std::io::Error },

    #[error("malformed JSON input: {message}")]
    MalformedJson { message: String },

    #[error("malformed YAML input: {message}")]
    MalformedYaml { message: String },
}

impl VigilErrorCode for InputError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedJson { .. } | Self::MalformedYaml { .. } => error_code::PARSE_ERROR,
            _ => error_code::INPUT_ERROR,
        }
    }
}
