//! Per-invocation audit options.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_MAX_FINDINGS;
use crate::errors::ConfigError;

/// Named severity policy selecting which rules apply and at what level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ruleset {
    /// Default policy: hardening rules at their base severity.
    #[default]
    Baseline,
    /// Stricter policy: hardening severities escalate one level and
    /// restricted-only rules are enabled.
    Restricted,
}

impl Ruleset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Restricted => "restricted",
        }
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options common to every audit invocation.
///
/// All fields are optional; effective values fall back to compiled defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditOptions {
    /// Maximum findings kept in the report. Default: 100.
    pub max_findings: Option<usize>,
    /// Severity policy. Default: "baseline".
    pub ruleset: Option<Ruleset>,
}

impl AuditOptions {
    /// Returns the effective findings cap, defaulting to 100.
    pub fn effective_max_findings(&self) -> usize {
        self.max_findings.unwrap_or(DEFAULT_MAX_FINDINGS)
    }

    /// Returns the effective ruleset, defaulting to baseline.
    pub fn effective_ruleset(&self) -> Ruleset {
        self.ruleset.unwrap_or_default()
    }

    /// Fill unset fields from a lower-priority layer (project config file).
    pub fn overlaid_on(mut self, base: &AuditOptions) -> Self {
        if self.max_findings.is_none() {
            self.max_findings = base.max_findings;
        }
        if self.ruleset.is_none() {
            self.ruleset = base.ruleset;
        }
        self
    }

    /// Validate the resolved option values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(max) = self.max_findings {
            if max == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: "max_findings".to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let options = AuditOptions::default();
        assert_eq!(options.effective_max_findings(), 100);
        assert_eq!(options.effective_ruleset(), Ruleset::Baseline);
    }

    #[test]
    fn zero_max_findings_fails_validation() {
        let options = AuditOptions {
            max_findings: Some(0),
            ruleset: None,
        };
        assert!(matches!(
            options.validate(),
            Err(ConfigError::ValidationFailed { .. })
        ));
    }

    #[test]
    fn overlay_keeps_higher_priority_values() {
        let params = AuditOptions {
            max_findings: Some(5),
            ruleset: None,
        };
        let file = AuditOptions {
            max_findings: Some(50),
            ruleset: Some(Ruleset::Restricted),
        };
        let merged = params.overlaid_on(&file);
        assert_eq!(merged.max_findings, Some(5));
        assert_eq!(merged.ruleset, Some(Ruleset::Restricted));
    }

    #[test]
    fn ruleset_parses_from_lowercase() {
        let options: AuditOptions =
            serde_json::from_str(r#"{"ruleset": "restricted"}"#).unwrap();
        assert_eq!(options.ruleset, Some(Ruleset::Restricted));
    }
}
