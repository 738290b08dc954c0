//! Terraform plan rules — destructive changes, public exposure, IAM, tags.

use serde_json::{json, Value};

use vigil_core::constants::{ANY_IPV4, ANY_IPV6};
use vigil_core::{Action, Entry, Finding, Severity};

use super::{Rule, RuleContext};

/// The Terraform rule pack in registration order.
pub(super) fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(DestructiveChangeRule),
        Box::new(PublicIngressRule),
        Box::new(PublicStorageAclRule),
        Box::new(IamResourceRule),
        Box::new(MissingTagsRule),
    ]
}

fn is_public_cidr(cidr: &str) -> bool {
    cidr == ANY_IPV4 || cidr == ANY_IPV6
}

/// Flags resources the plan destroys or replaces. Always raised
/// regardless of ruleset.
pub struct DestructiveChangeRule;

impl Rule for DestructiveChangeRule {
    fn id(&self) -> &'static str {
        "TF-DESTRUCTIVE-CHANGE"
    }

    fn default_severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let mut findings = Vec::new();
        if entry.has_action(Action::Delete) {
            findings.push(Finding::new(
                self.id(),
                Severity::High,
                &entry.id,
                format!("{} will be destroyed", entry.id),
            ));
        }
        if entry.has_action(Action::Replace) {
            findings.push(Finding::new(
                self.id(),
                Severity::High,
                &entry.id,
                format!("{} will be replaced (destroy then create)", entry.id),
            ));
        }
        findings
    }
}

/// Flags inbound network rules open to the whole internet.
pub struct PublicIngressRule;

impl PublicIngressRule {
    fn collect_from_block(block: &Value, open: &mut Vec<String>) {
        for key in ["cidr_blocks", "ipv6_cidr_blocks"] {
            let Some(cidrs) = block.get(key).and_then(Value::as_array) else {
                continue;
            };
            for cidr in cidrs.iter().filter_map(Value::as_str) {
                if is_public_cidr(cidr) {
                    open.push(cidr.to_string());
                }
            }
        }
    }
}

impl Rule for PublicIngressRule {
    fn id(&self) -> &'static str {
        "TF-PUBLIC-INGRESS"
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let mut open = Vec::new();

        // Inline security-group ingress blocks.
        if let Some(blocks) = entry.seq_at("change.after.ingress") {
            for block in blocks {
                Self::collect_from_block(block, &mut open);
            }
        }

        // Standalone rule resources carry the direction in `type`.
        if entry.str_at("change.after.type") == Some("ingress") {
            if let Some(after) = entry.value_at("change.after") {
                Self::collect_from_block(after, &mut open);
            }
        }

        // GCP firewall rules: source_ranges applies to ingress (the default
        // direction when unset).
        if entry.str_at("change.after.direction") != Some("EGRESS") {
            if let Some(ranges) = entry.seq_at("change.after.source_ranges") {
                for cidr in ranges.iter().filter_map(Value::as_str) {
                    if is_public_cidr(cidr) {
                        open.push(cidr.to_string());
                    }
                }
            }
        }

        open.into_iter()
            .map(|cidr| {
                Finding::new(
                    self.id(),
                    Severity::Critical,
                    &entry.id,
                    format!("{} allows ingress from {cidr}", entry.id),
                )
                .with_detail(json!({ "cidr": cidr }))
            })
            .collect()
    }
}

/// Flags storage resources with a public ACL.
pub struct PublicStorageAclRule;

impl Rule for PublicStorageAclRule {
    fn id(&self) -> &'static str {
        "TF-PUBLIC-STORAGE-ACL"
    }

    fn default_severity(&self) -> Severity {
        Severity::Critical
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        let Some(acl) = entry.str_at("change.after.acl") else {
            return Vec::new();
        };
        if acl != "public-read" && acl != "public-read-write" {
            return Vec::new();
        }
        vec![Finding::new(
            self.id(),
            Severity::Critical,
            &entry.id,
            format!("{} grants public access via ACL {acl}", entry.id),
        )
        .with_detail(json!({ "acl": acl }))]
    }
}

/// Flags identity/permission resources; wildcard policies escalate to
/// CRITICAL.
pub struct IamResourceRule;

const IAM_KIND_MARKERS: [&str; 4] = ["iam", "role_assignment", "role_binding", "access_policy"];

impl IamResourceRule {
    fn is_iam_kind(kind: &str) -> bool {
        IAM_KIND_MARKERS.iter().any(|marker| kind.contains(marker))
    }

    /// True when a policy document allows `Action: *` on `Resource: *`.
    /// Policies arrive either JSON-encoded in a string or as a plain object.
    fn has_wildcard_policy(entry: &Entry) -> bool {
        for path in ["change.after.policy", "change.after.assume_role_policy"] {
            let parsed;
            let doc = match entry.value_at(path) {
                Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
                    Ok(value) => {
                        parsed = value;
                        &parsed
                    }
                    Err(_) => continue,
                },
                Some(value @ Value::Object(_)) => value,
                _ => continue,
            };

            let statements = match doc.get("Statement") {
                Some(Value::Array(list)) => list.as_slice(),
                Some(single @ Value::Object(_)) => std::slice::from_ref(single),
                _ => continue,
            };
            for statement in statements {
                let allow = matches!(
                    statement.get("Effect").and_then(Value::as_str),
                    None | Some("Allow")
                );
                if allow
                    && Self::grants_star(statement.get("Action"))
                    && Self::grants_star(statement.get("Resource"))
                {
                    return true;
                }
            }
        }
        false
    }

    fn grants_star(value: Option<&Value>) -> bool {
        match value {
            Some(Value::String(s)) => s == "*",
            Some(Value::Array(items)) => items.iter().any(|v| v.as_str() == Some("*")),
            _ => false,
        }
    }
}

impl Rule for IamResourceRule {
    fn id(&self) -> &'static str {
        "TF-IAM-RESOURCE"
    }

    fn default_severity(&self) -> Severity {
        Severity::High
    }

    fn evaluate(&self, entry: &Entry, _ctx: &RuleContext) -> Vec<Finding> {
        if !Self::is_iam_kind(&entry.kind) {
            return Vec::new();
        }
        if entry.actions == [Action::NoOp] {
            return Vec::new();
        }
        if Self::has_wildcard_policy(entry) {
            return vec![Finding::new(
                self.id(),
                Severity::Critical,
                &entry.id,
                format!("{} grants wildcard actions on all resources", entry.id),
            )];
        }
        vec![Finding::new(
            self.id(),
            Severity::High,
            &entry.id,
            format!("{} changes an identity/permission resource", entry.id),
        )]
    }
}

/// Flags taggable cloud resources created without tags. Hardening rule:
/// severity scales with the ruleset.
pub struct MissingTagsRule;

const TAGGABLE_PREFIXES: [&str; 3] = ["aws_", "azurerm_", "google_"];

impl Rule for MissingTagsRule {
    fn id(&self) -> &'static str {
        "TF-MISSING-TAGS"
    }

    fn default_severity(&self) -> Severity {
        Severity::Low
    }

    fn evaluate(&self, entry: &Entry, ctx: &RuleContext) -> Vec<Finding> {
        if !entry.has_action(Action::Create) {
            return Vec::new();
        }
        if !TAGGABLE_PREFIXES
            .iter()
            .any(|prefix| entry.kind.starts_with(prefix))
        {
            return Vec::new();
        }
        let tagged = entry
            .map_at("change.after.tags")
            .is_some_and(|tags| !tags.is_empty());
        if tagged {
            return Vec::new();
        }
        vec![Finding::new(
            self.id(),
            ctx.hardening_severity(Severity::Low),
            &entry.id,
            format!("{} is created without tags", entry.id),
        )]
    }
}
