//! Audit configuration.

mod audit_options;
mod file_config;

pub use audit_options::{AuditOptions, Ruleset};
pub use file_config::VigilConfig;
