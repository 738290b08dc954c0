//! Top-level audit error.

use super::error_code::VigilErrorCode;
use super::{ConfigError, InputError};

/// Any fatal error an audit invocation can surface.
///
/// Aggregates the per-subsystem errors so callers (the CLI envelope) handle
/// a single type. Rule evaluation never contributes here: rule failures are
/// contained by the engine and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl VigilErrorCode for AuditError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Input(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
