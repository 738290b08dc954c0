//! Error types for the Vigil risk auditor.

pub mod error_code;

mod audit_error;
mod config_error;
mod input_error;

pub use audit_error::AuditError;
pub use config_error::ConfigError;
pub use error_code::VigilErrorCode;
pub use input_error::InputError;
