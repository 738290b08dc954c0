//! Terraform plan normalization.

use serde_json::{Map, Value};

use super::{Action, Document, DocumentKind, DocumentSource, Entry};
use crate::errors::InputError;

/// Normalize a Terraform plan JSON into a `Document`.
///
/// A bare JSON list is accepted as shorthand and wrapped into a
/// `{"resource_changes": [...]}` envelope. Change records that are not JSON
/// objects are counted as skipped and excluded; one bad record never aborts
/// the run.
pub(super) fn normalize(source: &DocumentSource) -> Result<Document, InputError> {
    let root = source.resolve_json()?;

    let root = match root {
        Value::Array(changes) => {
            let mut wrapped = Map::new();
            wrapped.insert("resource_changes".to_string(), Value::Array(changes));
            Value::Object(wrapped)
        }
        other => other,
    };

    let empty = Vec::new();
    let changes = match root.get("resource_changes") {
        None | Some(Value::Null) => &empty,
        Some(Value::Array(changes)) => changes,
        Some(_) => {
            return Err(InputError::MalformedJson {
                message: "resource_changes must be a list".to_string(),
            })
        }
    };

    let mut entries = Vec::with_capacity(changes.len());
    let mut skipped = 0u32;
    for change in changes {
        match normalize_change(change) {
            Some(entry) => entries.push(entry),
            None => {
                skipped += 1;
                tracing::debug!("skipping malformed resource change record");
            }
        }
    }

    Ok(Document::new(DocumentKind::TerraformPlan, entries, skipped))
}

fn normalize_change(change: &Value) -> Option<Entry> {
    let attrs = change.as_object()?.clone();
    let id = attrs
        .get("address")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();
    let kind = attrs
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let actions = attrs
        .get("change")
        .and_then(|c| c.get("actions"))
        .and_then(Value::as_array)
        .map(|raw| parse_actions(raw))
        .unwrap_or_default();
    Some(Entry::new(id, kind, actions, attrs))
}

/// Canonicalize a plan's action list. A delete+create pair is a replace;
/// unrecognized action strings are ignored.
fn parse_actions(raw: &[Value]) -> Vec<Action> {
    let names: Vec<&str> = raw.iter().filter_map(Value::as_str).collect();
    if names.contains(&"delete") && names.contains(&"create") {
        return vec![Action::Replace];
    }
    names
        .iter()
        .filter_map(|name| match *name {
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            "no-op" => Some(Action::NoOp),
            "read" => None,
            _ => None,
        })
        .collect()
}
