//! Rule registry — explicit ordered rule lists per domain.

use vigil_core::DocumentKind;

use super::{kubernetes, terraform, token, Rule};

/// An ordered list of rules. Evaluation order is registration order, which
/// together with document order makes truncation deterministic.
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Build a registry from an explicit rule list (mainly for tests).
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// The registry for an audited domain, built fresh at startup.
    pub fn for_domain(kind: DocumentKind) -> Self {
        let rules = match kind {
            DocumentKind::TerraformPlan => terraform::rules(),
            DocumentKind::KubernetesManifest => kubernetes::rules(),
            DocumentKind::TokenContract => token::rules(),
        };
        Self { rules }
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
