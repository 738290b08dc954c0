//! Kubernetes manifest normalization.

use serde_json::Value;

use super::{Document, DocumentKind, DocumentSource, Entry};
use crate::errors::InputError;

/// Normalize Kubernetes manifests into a `Document`.
///
/// Accepts multi-document YAML (or JSON, or an inline list of resources);
/// each resource document becomes one entry. Documents without a `kind` or
/// that are not objects are counted as skipped.
pub(super) fn normalize(source: &DocumentSource) -> Result<Document, InputError> {
    let docs = source.resolve_yaml_documents()?;

    let mut entries = Vec::with_capacity(docs.len());
    let mut skipped = 0u32;
    for doc in docs {
        match normalize_resource(&doc) {
            Some(entry) => entries.push(entry),
            None => {
                skipped += 1;
                tracing::debug!("skipping manifest document without an object kind");
            }
        }
    }

    Ok(Document::new(
        DocumentKind::KubernetesManifest,
        entries,
        skipped,
    ))
}

fn normalize_resource(doc: &Value) -> Option<Entry> {
    let attrs = doc.as_object()?.clone();
    let kind = attrs.get("kind")?.as_str()?.to_string();
    let name = attrs
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("unnamed");
    let id = format!("{kind}/{name}");
    Some(Entry::new(id, kind, Vec::new(), attrs))
}
