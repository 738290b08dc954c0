//! Top-level audit orchestration: normalize → evaluate → aggregate.

use vigil_core::document::{self, DocumentKind, DocumentSource};
use vigil_core::{AuditError, AuditOptions, Report};

use crate::aggregate::build_report;
use crate::engine::RuleEngine;

/// Run one complete audit invocation.
///
/// Only the input stage can fail; once a document is normalized the run
/// always yields a report.
pub fn run_audit(
    kind: DocumentKind,
    source: &DocumentSource,
    options: &AuditOptions,
) -> Result<Report, AuditError> {
    options.validate()?;

    let document = document::normalize(kind, source)?;
    tracing::debug!(
        kind = %kind,
        entries = document.entries().len(),
        skipped = document.skipped_entries(),
        "document normalized"
    );

    let engine = RuleEngine::for_domain(kind);
    let findings = engine.evaluate(&document, options.effective_ruleset());
    tracing::debug!(findings = findings.len(), "rule evaluation complete");

    Ok(build_report(
        &document,
        findings,
        options.effective_max_findings(),
    ))
}
