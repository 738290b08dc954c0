//! Token contract rules — honeypot, tax, approval, and scam-list checks.

use regex::Regex;
use rustc_hash::FxHashSet;
use serde_json::{json, Value};

use vigil_core::{Entry, Finding, Ruleset, Severity};

use super::{Rule, RuleContext};

/// The token rule pack in registration order.
pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(HoneypotRule),
        Box::new(TaxManipulationRule),
        Box::new(UnlimitedApprovalRule::new()),
        Box::new(ScamListRule::new()),
        Box::new(OwnerControlRule),
    ]
}

/// Sell tax at or above this percentage is treated as a confirmed
/// honeypot signature rather than a heuristic.
const HONEYPOT_SELL_TAX_PERCENT: f64 = 50.0;

/// Buy/sell tax at or above this percentage is flagged as elevated.
const ELEVATED_TAX_PERCENT: f64 = 10.0;

/// The unlimited-approval amount as a decimal string (2^256 - 1).
const MAX_UINT256_DECIMAL: &str =
    "115792089237316195423570985008687907853269984665640564039457584007913129639935";

/// Known scam contract addresses (lowercase). Illustrative built-in list;
/// a production deployment would refresh this from a feed. Entries must be
/// synthetic placeholders, never real or devnet-default deployment addresses.
const KNOWN_SCAM_ADDRESSES: [&str; 3] = [
    "0xdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
    "0xbadbadbadbadbadbadbadbadbadbadbadbadbad0",
    "0xfacefeedfacefeedfacefeedfacefeedfacefeed",
];

/// Flags confirmed honeypot signatures: the token cannot be sold, or the
/// sell tax effectively confiscates the position.
pub struct HoneypotRule;

impl Rule for HoneypotRule {
    fn id(&self) -> &'static str {
        "TOKEN-HONEYPOT"
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let cannot_sell = entry.bool_at("can_sell") == Some(false)
            || entry.bool_at("cannot_sell") == Some(true);
        let sell_tax = entry.num_at("sell_tax_percent").unwrap_or(0.0);

        if cannot_sell {
            return vec![Finding::new(
                self.id(),
                Severity::Critical,
                &entry.id,
                "token cannot be sold (honeypot signature)",
            )];
        }
        if sell_tax >= HONEYPOT_SELL_TAX_PERCENT {
            return vec![Finding::new(
                self.id(),
                Severity::Critical,
                &entry.id,
                format!("sell tax of {sell_tax}% confiscates the position (honeypot signature)"),
            )
            .with_detail(json!({ "sell_tax_percent": sell_tax }))];
        }
        Vec::new()
    }
}

/// Heuristic: mutable tax parameters or elevated trading taxes.
pub struct TaxManipulationRule;

impl Rule for TaxManipulationRule {
    fn id(&self) -> &'static str {
        "TOKEN-TAX-MANIPULATION"
    }

    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        if entry.bool_at("tax_mutable") == Some(true) {
            return vec![Finding::new(
                self.id(),
                Severity::Medium,
                &entry.id,
                "tax parameters are owner-mutable",
            )];
        }

        let buy_tax = entry.num_at("buy_tax_percent").unwrap_or(0.0);
        let sell_tax = entry.num_at("sell_tax_percent").unwrap_or(0.0);
        let highest = buy_tax.max(sell_tax);
        // The honeypot rule owns the confiscatory range.
        if highest >= ELEVATED_TAX_PERCENT && highest < HONEYPOT_SELL_TAX_PERCENT {
            return vec![Finding::new(
                self.id(),
                Severity::Medium,
                &entry.id,
                format!("elevated trading tax ({highest}%)"),
            )
            .with_detail(json!({ "buy_tax_percent": buy_tax, "sell_tax_percent": sell_tax }))];
        }
        Vec::new()
    }
}

/// Flags unlimited-approval allowances. A max-uint amount is a confirmed
/// pattern; a declared unlimited approval style is a heuristic match.
pub struct UnlimitedApprovalRule {
    hex_max: Regex,
}

impl UnlimitedApprovalRule {
    pub fn new() -> Self {
        Self {
            hex_max: Regex::new(r"^0x[fF]{64}$").unwrap(),
        }
    }

    fn is_max_uint(&self, amount: &str) -> bool {
        amount == MAX_UINT256_DECIMAL || self.hex_max.is_match(amount)
    }
}

impl Default for UnlimitedApprovalRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for UnlimitedApprovalRule {
    fn id(&self) -> &'static str {
        "TOKEN-UNLIMITED-APPROVAL"
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if let Some(allowances) = entry.seq_at("allowances") {
            for allowance in allowances.iter().filter_map(Value::as_object) {
                let Some(amount) = allowance.get("amount").and_then(Value::as_str) else {
                    continue;
                };
                if !self.is_max_uint(amount) {
                    continue;
                }
                let spender = allowance
                    .get("spender")
                    .and_then(Value::as_str)
                    .unwrap_or("<unknown>");
                findings.push(
                    Finding::new(
                        self.id(),
                        Severity::Critical,
                        &entry.id,
                        format!("unlimited approval granted to {spender}"),
                    )
                    .with_detail(json!({ "spender": spender })),
                );
            }
        }

        if findings.is_empty() && entry.str_at("approval_pattern") == Some("unlimited") {
            findings.push(Finding::new(
                self.id(),
                Severity::Medium,
                &entry.id,
                "contract requests unlimited approvals (heuristic)",
            ));
        }

        findings
    }
}

/// Flags tokens whose address or associated domains match known scam lists.
pub struct ScamListRule {
    addresses: FxHashSet<&'static str>,
    domain_patterns: Vec<Regex>,
}

impl ScamListRule {
    pub fn new() -> Self {
        Self {
            addresses: KNOWN_SCAM_ADDRESSES.iter().copied().collect(),
            domain_patterns: vec![
                Regex::new(r"(?i)(airdrop|claim[-_]?reward|free[-_]?mint)[a-z0-9-]*\.(xyz|top|live|click)$").unwrap(),
                Regex::new(r"(?i)^[a-z0-9-]*-(drop|bonus)\.(site|online)$").unwrap(),
            ],
        }
    }
}

impl Default for ScamListRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for ScamListRule {
    fn id(&self) -> &'static str {
        "TOKEN-SCAM-LIST"
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();

        if let Some(address) = entry.str_at("address") {
            if self.addresses.contains(address.to_lowercase().as_str()) {
                findings.push(Finding::new(
                    self.id(),
                    Severity::Critical,
                    &entry.id,
                    "token address is on a known scam list",
                ));
            }
        }

        if let Some(domains) = entry.seq_at("domains") {
            for domain in domains.iter().filter_map(Value::as_str) {
                if self.domain_patterns.iter().any(|p| p.is_match(domain)) {
                    findings.push(
                        Finding::new(
                            self.id(),
                            Severity::Critical,
                            &entry.id,
                            format!("associated domain {domain} matches a scam pattern"),
                        )
                        .with_detail(json!({ "domain": domain })),
                    );
                }
            }
        }

        findings
    }
}

/// Restricted-only heuristic: ownership retained together with mint
/// authority.
pub struct OwnerControlRule;

impl Rule for OwnerControlRule {
    fn id(&self) -> &'static str {
        "TOKEN-OWNER-CONTROL"
    }

    fn default_severity(&self) -> Severity {
        Severity::Medium
    }

    fn applies_to(&self, ruleset: Ruleset) -> bool {
        ruleset == Ruleset::Restricted
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let owner_retained = entry.bool_at("owner_renounced") == Some(false);
        let has_mint_authority = match entry.value_at("mint_authority") {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => !s.is_empty(),
            _ => false,
        };
        if owner_retained && has_mint_authority {
            return vec![Finding::new(
                self.id(),
                Severity::Medium,
                &entry.id,
                "owner retains control and mint authority",
            )];
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_uint_detection() {
        let rule = UnlimitedApprovalRule::new();
        assert!(rule.is_max_uint(MAX_UINT256_DECIMAL));
        assert!(rule.is_max_uint(&format!("0x{}", "f".repeat(64))));
        assert!(!rule.is_max_uint("1000000"));
        assert!(!rule.is_max_uint("0xff"));
    }

    #[test]
    fn scam_domain_patterns() {
        let rule = ScamListRule::new();
        assert!(rule
            .domain_patterns
            .iter()
            .any(|p| p.is_match("airdrop-event.xyz")));
        assert!(rule
            .domain_patterns
            .iter()
            .any(|p| p.is_match("claim-reward.top")));
        assert!(!rule
            .domain_patterns
            .iter()
            .any(|p| p.is_match("example.com")));
    }
}
