//! vigil-core: shared foundation for the Vigil risk auditor
//!
//! This crate provides everything below the rule engine:
//! - Document: normalized, read-only representation of an audited input
//! - Normalizers: Terraform plan, Kubernetes manifest, token contract
//! - Findings: severity-ordered observations produced by rules
//! - Report: aggregated summary, risk score, and risk level
//! - Config: audit options with layered defaults
//! - Errors: per-subsystem error enums with stable envelope codes
//! - Tracing: logging initialization

pub mod config;
pub mod constants;
pub mod document;
pub mod errors;
pub mod findings;
pub mod report;
pub mod tracing;

// Re-exports for convenience
pub use config::{AuditOptions, Ruleset, VigilConfig};
pub use document::{Action, Document, DocumentKind, DocumentSource, Entry};
pub use errors::{AuditError, ConfigError, InputError};
pub use findings::{Finding, Severity};
pub use report::{ActionCounts, Report, RiskLevel, SeverityCounts, Summary};
