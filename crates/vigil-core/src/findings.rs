//! Findings and severities produced by rule evaluation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity levels for findings, ordered LOW < MEDIUM < HIGH < CRITICAL.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Risk-score weight in half points: LOW counts 0.5, MEDIUM 1,
    /// HIGH 2, CRITICAL 4. Kept doubled so scoring stays in integers.
    pub fn weight_half_points(&self) -> u64 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 4,
            Self::Critical => 8,
        }
    }

    /// One step up the severity ladder, saturating at CRITICAL.
    /// Used by hardening rules under the restricted ruleset.
    pub fn escalated(&self) -> Severity {
        match self {
            Self::Low => Self::Medium,
            Self::Medium => Self::High,
            Self::High | Self::Critical => Self::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding produced by exactly one rule evaluation.
///
/// Findings are immutable value records: created by a rule, never mutated
/// afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Identifier of the rule that raised this finding.
    pub rule_id: String,
    pub severity: Severity,
    /// Which document entry triggered the finding.
    pub resource_id: String,
    pub message: String,
    /// Optional structured payload for programmatic inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl Finding {
    pub fn new(
        rule_id: &str,
        severity: Severity,
        resource_id: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            resource_id: resource_id.to_string(),
            message: message.into(),
            detail: None,
        }
    }

    /// Attach a structured detail payload.
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.detail = Some(detail);
        self
    }
}
