//! Invocation parameters: one JSON object per subcommand.
//!
//! Each domain exposes three mutually exclusive input channels plus the
//! common audit options. Unknown fields are rejected so a typoed channel
//! name fails loudly instead of silently auditing nothing.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use vigil_core::{AuditOptions, DocumentKind, DocumentSource, InputError, Ruleset};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TerraformParams {
    plan_json: Option<Value>,
    plan_json_text: Option<String>,
    plan_path: Option<PathBuf>,
    max_findings: Option<usize>,
    ruleset: Option<Ruleset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct KubernetesParams {
    manifest_json: Option<Value>,
    manifest_json_text: Option<String>,
    manifest_path: Option<PathBuf>,
    max_findings: Option<usize>,
    ruleset: Option<Ruleset>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct TokenParams {
    token_json: Option<Value>,
    token_json_text: Option<String>,
    token_path: Option<PathBuf>,
    max_findings: Option<usize>,
    ruleset: Option<Ruleset>,
}

fn parse<T: DeserializeOwned>(raw: &str) -> Result<T, InputError> {
    serde_json::from_str(raw).map_err(|e| InputError::MalformedJson {
        message: format!("invalid params object: {e}"),
    })
}

/// Parse the raw params JSON for a domain into its input source and
/// audit options.
pub fn resolve(kind: DocumentKind, raw: &str) -> Result<(DocumentSource, AuditOptions), InputError> {
    match kind {
        DocumentKind::TerraformPlan => {
            let p: TerraformParams = parse(raw)?;
            Ok((
                DocumentSource::from_channels(p.plan_json, p.plan_json_text, p.plan_path),
                AuditOptions {
                    max_findings: p.max_findings,
                    ruleset: p.ruleset,
                },
            ))
        }
        DocumentKind::KubernetesManifest => {
            let p: KubernetesParams = parse(raw)?;
            Ok((
                DocumentSource::from_channels(p.manifest_json, p.manifest_json_text, p.manifest_path),
                AuditOptions {
                    max_findings: p.max_findings,
                    ruleset: p.ruleset,
                },
            ))
        }
        DocumentKind::TokenContract => {
            let p: TokenParams = parse(raw)?;
            Ok((
                DocumentSource::from_channels(p.token_json, p.token_json_text, p.token_path),
                AuditOptions {
                    max_findings: p.max_findings,
                    ruleset: p.ruleset,
                },
            ))
        }
    }
}
