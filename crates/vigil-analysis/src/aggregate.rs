//! Aggregator — folds findings into the terminal report.

use vigil_core::{Document, Finding, Report, RiskLevel, SeverityCounts, Summary};

/// Build the report from the document's structural summary and the engine's
/// ordered findings.
///
/// Pure transform: counts every finding (truncation never hides severity
/// mass from the score), truncates the list to `max_findings` in evaluation
/// order, and reports the untruncated total alongside.
pub fn build_report(document: &Document, mut findings: Vec<Finding>, max_findings: usize) -> Report {
    let mut by_severity = SeverityCounts::default();
    for finding in &findings {
        by_severity.record(finding.severity);
    }

    let total_findings = findings.len();
    findings.truncate(max_findings);

    let risk_score = by_severity.risk_score();
    Report {
        summary: Summary::for_document(document),
        by_severity,
        risk_score,
        risk_level: RiskLevel::from_score(risk_score),
        total_findings,
        findings,
    }
}
