//! Rule trait and evaluation context.

use vigil_core::{Entry, Finding, Ruleset, Severity};

/// Evaluation context shared by every rule in a run.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext {
    pub ruleset: Ruleset,
}

impl RuleContext {
    /// Severity for hardening findings: the restricted ruleset escalates
    /// one level, baseline keeps the rule's base severity.
    pub fn hardening_severity(&self, base: Severity) -> Severity {
        match self.ruleset {
            Ruleset::Baseline => base,
            Ruleset::Restricted => base.escalated(),
        }
    }
}

/// Trait that every rule must implement.
///
/// Rules are pure functions over a single entry: total (never panic on a
/// well-formed entry, absent attributes read as `None`), independent of
/// other rules, and free of side effects.
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule, reported in findings.
    fn id(&self) -> &'static str;

    /// Severity this rule raises at under the baseline ruleset.
    fn default_severity(&self) -> Severity;

    /// Whether this rule participates under the given ruleset.
    fn applies_to(&self, ruleset: Ruleset) -> bool {
        let _ = ruleset;
        true
    }

    /// Evaluate one document entry, producing zero or more findings.
    fn evaluate(&self, entry: &Entry, ctx: &RuleContext) -> Vec<Finding>;
}
