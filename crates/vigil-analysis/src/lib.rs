//! vigil-analysis: deterministic rule evaluation and report aggregation
//!
//! The pipeline is one-way with no feedback loop:
//! normalized Document → ordered Finding list → aggregated Report.
//!
//! Rules are pure and independent; the explicit registration order of each
//! domain registry, then document entry order, fixes the finding order that
//! truncation later depends on.

pub mod aggregate;
pub mod audit;
pub mod engine;
pub mod rules;

pub use aggregate::build_report;
pub use audit::run_audit;
pub use engine::RuleEngine;
pub use rules::{Rule, RuleContext, RuleRegistry};
