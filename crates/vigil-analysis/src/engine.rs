//! Rule engine — evaluates a registry against a normalized document.

use std::panic::{catch_unwind, AssertUnwindSafe};

use vigil_core::{Document, DocumentKind, Finding, Ruleset};

use crate::rules::{RuleContext, RuleRegistry};

/// Evaluates every applicable rule against every document entry.
///
/// Findings come out in registration order, then document order — the
/// canonical order the aggregator's truncation depends on.
pub struct RuleEngine {
    registry: RuleRegistry,
}

impl RuleEngine {
    /// Engine with the built-in registry for a domain.
    pub fn for_domain(kind: DocumentKind) -> Self {
        Self {
            registry: RuleRegistry::for_domain(kind),
        }
    }

    /// Engine over an explicit registry (tests, custom rule sets).
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Evaluate the document under the given ruleset.
    ///
    /// A panicking rule must never abort the run: its result is dropped for
    /// the offending entry and evaluation continues with the remaining
    /// rules and entries.
    pub fn evaluate(&self, document: &Document, ruleset: Ruleset) -> Vec<Finding> {
        let ctx = RuleContext { ruleset };
        let mut findings = Vec::new();

        for rule in self.registry.rules() {
            if !rule.applies_to(ruleset) {
                continue;
            }
            for entry in document.entries() {
                match catch_unwind(AssertUnwindSafe(|| rule.evaluate(entry, &ctx))) {
                    Ok(mut raised) => findings.append(&mut raised),
                    Err(_) => {
                        tracing::warn!(
                            rule = rule.id(),
                            entry = %entry.id,
                            "rule evaluation panicked; dropping its result for this entry"
                        );
                    }
                }
            }
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use vigil_core::{DocumentSource, Entry, Severity};

    struct AlwaysRule;

    impl Rule for AlwaysRule {
        fn id(&self) -> &'static str {
            "TEST-ALWAYS"
        }
        fn default_severity(&self) -> Severity {
            Severity::Low
        }
        fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
            vec![Finding::new(self.id(), Severity::Low, &entry.id, "always")]
        }
    }

    struct PanickingRule;

    impl Rule for PanickingRule {
        fn id(&self) -> &'static str {
            "TEST-PANIC"
        }
        fn default_severity(&self) -> Severity {
            Severity::Low
        }
        fn evaluate(&self, _entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
            panic!("rule bug");
        }
    }

    struct RestrictedOnlyRule;

    impl Rule for RestrictedOnlyRule {
        fn id(&self) -> &'static str {
            "TEST-RESTRICTED"
        }
        fn default_severity(&self) -> Severity {
            Severity::Low
        }
        fn applies_to(&self, ruleset: Ruleset) -> bool {
            ruleset == Ruleset::Restricted
        }
        fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
            vec![Finding::new(self.id(), Severity::Low, &entry.id, "restricted")]
        }
    }

    fn two_entry_document() -> Document {
        let source = DocumentSource::from_inline(serde_json::json!([
            {"address": "a.one", "type": "aws_s3_bucket", "change": {"actions": ["create"]}},
            {"address": "a.two", "type": "aws_s3_bucket", "change": {"actions": ["create"]}}
        ]));
        vigil_core::document::normalize(DocumentKind::TerraformPlan, &source).unwrap()
    }

    #[test]
    fn panicking_rule_does_not_abort_the_run() {
        let engine = RuleEngine::with_registry(RuleRegistry::new(vec![
            Box::new(PanickingRule),
            Box::new(AlwaysRule),
        ]));
        let document = two_entry_document();
        let findings = engine.evaluate(&document, Ruleset::Baseline);
        // The panicking rule contributes nothing; the healthy rule still
        // fires for both entries.
        assert_eq!(findings.len(), 2);
        assert!(findings.iter().all(|f| f.rule_id == "TEST-ALWAYS"));
    }

    #[test]
    fn ruleset_applicability_filters_rules() {
        let build = || {
            RuleEngine::with_registry(RuleRegistry::new(vec![
                Box::new(AlwaysRule),
                Box::new(RestrictedOnlyRule),
            ]))
        };
        let document = two_entry_document();

        let baseline = build().evaluate(&document, Ruleset::Baseline);
        assert!(baseline.iter().all(|f| f.rule_id == "TEST-ALWAYS"));

        let restricted = build().evaluate(&document, Ruleset::Restricted);
        assert!(restricted.iter().any(|f| f.rule_id == "TEST-RESTRICTED"));
    }

    #[test]
    fn findings_follow_registration_then_document_order() {
        struct OtherRule;
        impl Rule for OtherRule {
            fn id(&self) -> &'static str {
                "TEST-OTHER"
            }
            fn default_severity(&self) -> Severity {
                Severity::Low
            }
            fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
                vec![Finding::new(self.id(), Severity::Low, &entry.id, "other")]
            }
        }

        let engine = RuleEngine::with_registry(RuleRegistry::new(vec![
            Box::new(AlwaysRule),
            Box::new(OtherRule),
        ]));
        let document = two_entry_document();
        let findings = engine.evaluate(&document, Ruleset::Baseline);

        let keys: Vec<(String, String)> = findings
            .iter()
            .map(|f| (f.rule_id.clone(), f.resource_id.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("TEST-ALWAYS".into(), "a.one".into()),
                ("TEST-ALWAYS".into(), "a.two".into()),
                ("TEST-OTHER".into(), "a.one".into()),
                ("TEST-OTHER".into(), "a.two".into()),
            ]
        );
    }
}
