//! Document entries and their attribute accessors.

use serde_json::{Map, Value};

/// Declared action for a Terraform change record. Entries from other
/// domains carry no actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Create,
    Update,
    Delete,
    Replace,
    NoOp,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Replace => "replace",
            Self::NoOp => "no-op",
        }
    }
}

/// One record of the normalized document: a resource change, a manifest
/// resource, or a token attribute set.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Stable identifier (resource address, `Kind/name`, token address).
    pub id: String,
    /// Type tag (Terraform resource type, Kubernetes kind, "token").
    pub kind: String,
    /// Canonical actions for this entry, empty outside Terraform.
    pub actions: Vec<Action>,
    attrs: Map<String, Value>,
}

impl Entry {
    pub fn new(id: String, kind: String, actions: Vec<Action>, attrs: Map<String, Value>) -> Self {
        Self {
            id,
            kind,
            actions,
            attrs,
        }
    }

    /// Look up a dot-separated attribute path, descending through nested
    /// objects. Returns `None` on any absent segment or non-object parent.
    pub fn value_at(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.attrs.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    pub fn str_at(&self, path: &str) -> Option<&str> {
        self.value_at(path)?.as_str()
    }

    pub fn bool_at(&self, path: &str) -> Option<bool> {
        self.value_at(path)?.as_bool()
    }

    pub fn num_at(&self, path: &str) -> Option<f64> {
        self.value_at(path)?.as_f64()
    }

    pub fn seq_at(&self, path: &str) -> Option<&Vec<Value>> {
        self.value_at(path)?.as_array()
    }

    pub fn map_at(&self, path: &str) -> Option<&Map<String, Value>> {
        self.value_at(path)?.as_object()
    }

    pub fn has(&self, path: &str) -> bool {
        self.value_at(path).is_some()
    }

    pub fn has_action(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry_with(attrs: Value) -> Entry {
        let map = attrs.as_object().cloned().unwrap();
        Entry::new("test.id".into(), "test".into(), vec![], map)
    }

    #[test]
    fn nested_path_lookup() {
        let entry = entry_with(json!({
            "change": {"after": {"acl": "public-read", "port": 443}}
        }));
        assert_eq!(entry.str_at("change.after.acl"), Some("public-read"));
        assert_eq!(entry.num_at("change.after.port"), Some(443.0));
        assert!(entry.has("change.after"));
    }

    #[test]
    fn absent_path_is_none_not_error() {
        let entry = entry_with(json!({"spec": {"containers": []}}));
        assert_eq!(entry.str_at("spec.missing.deeper"), None);
        assert_eq!(entry.bool_at("nope"), None);
        assert!(!entry.has("spec.containers.0"));
    }

    #[test]
    fn wrong_type_at_path_is_none() {
        let entry = entry_with(json!({"tags": "not-an-object"}));
        assert_eq!(entry.value_at("tags.env"), None);
        assert_eq!(entry.seq_at("tags"), None);
        assert_eq!(entry.str_at("tags"), Some("not-an-object"));
    }
}
