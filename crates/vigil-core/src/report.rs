//! Report types: severity counts, risk score, risk level, summary.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::MAX_RISK_SCORE;
use crate::document::{Action, Document, DocumentKind};
use crate::findings::{Finding, Severity};

/// Finding counts per severity level, serialized with a fixed field order
/// so repeated runs are byte-identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub critical: u32,
}

impl SeverityCounts {
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Low => self.low += 1,
            Severity::Medium => self.medium += 1,
            Severity::High => self.high += 1,
            Severity::Critical => self.critical += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high + self.critical
    }

    /// Weighted risk score in [0, 10].
    ///
    /// Sums half-point severity weights (LOW=0.5, MEDIUM=1, HIGH=2,
    /// CRITICAL=4), rounds up, and caps at 10. Monotonically non-decreasing
    /// in the count at every severity.
    pub fn risk_score(&self) -> u8 {
        let half_points = u64::from(self.low) * Severity::Low.weight_half_points()
            + u64::from(self.medium) * Severity::Medium.weight_half_points()
            + u64::from(self.high) * Severity::High.weight_half_points()
            + u64::from(self.critical) * Severity::Critical.weight_half_points();
        let score = half_points.div_ceil(2);
        score.min(u64::from(MAX_RISK_SCORE)) as u8
    }
}

/// Categorical bucketing of the risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Fixed bucket boundaries: 0-2 LOW, 3-5 MEDIUM, 6-8 HIGH, 9-10 CRITICAL.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Low,
            3..=5 => Self::Medium,
            6..=8 => Self::High,
            _ => Self::Critical,
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

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-action change counts for Terraform plan summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCounts {
    pub create: u32,
    pub update: u32,
    pub delete: u32,
    pub replace: u32,
    pub no_op: u32,
}

impl ActionCounts {
    pub fn record(&mut self, action: Action) {
        match action {
            Action::Create => self.create += 1,
            Action::Update => self.update += 1,
            Action::Delete => self.delete += 1,
            Action::Replace => self.replace += 1,
            Action::NoOp => self.no_op += 1,
        }
    }
}

/// Structural summary of the audited document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Entries that survived normalization and were rule-evaluated.
    pub resources_scanned: u32,
    /// Malformed input records excluded during normalization.
    pub skipped_entries: u32,
    /// Terraform only: number of change records in the plan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_changes: Option<u32>,
    /// Terraform only: change counts per action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionCounts>,
}

impl Summary {
    pub fn for_document(document: &Document) -> Self {
        let mut summary = Summary {
            resources_scanned: document.entries().len() as u32,
            skipped_entries: document.skipped_entries(),
            total_changes: None,
            actions: None,
        };
        if document.kind() == DocumentKind::TerraformPlan {
            let mut actions = ActionCounts::default();
            for entry in document.entries() {
                for action in &entry.actions {
                    actions.record(*action);
                }
            }
            summary.total_changes = Some(document.entries().len() as u32);
            summary.actions = Some(actions);
        }
        summary
    }
}

/// The terminal artifact of one audit invocation.
///
/// Constructed once from the document and the engine's findings; never
/// mutated after emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    pub by_severity: SeverityCounts,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    /// True finding count before truncation, so truncation is never silent.
    pub total_findings: usize,
    /// First `max_findings` findings in evaluation order.
    pub findings: Vec<Finding>,
}

impl Report {
    pub fn is_truncated(&self) -> bool {
        self.total_findings > self.findings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counts_score_zero_low() {
        let counts = SeverityCounts::default();
        assert_eq!(counts.risk_score(), 0);
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
    }

    #[test]
    fn single_critical_scores_four() {
        let mut counts = SeverityCounts::default();
        counts.record(Severity::Critical);
        assert_eq!(counts.risk_score(), 4);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::Medium);
    }

    #[test]
    fn single_low_rounds_up_to_one() {
        let mut counts = SeverityCounts::default();
        counts.record(Severity::Low);
        assert_eq!(counts.risk_score(), 1);
    }

    #[test]
    fn score_caps_at_ten() {
        let counts = SeverityCounts {
            critical: 5,
            ..Default::default()
        };
        assert_eq!(counts.risk_score(), 10);
        assert_eq!(RiskLevel::from_score(10), RiskLevel::Critical);
    }

    #[test]
    fn bucket_boundaries() {
        assert_eq!(RiskLevel::from_score(2), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(3), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(8), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(9), RiskLevel::Critical);
    }
}
