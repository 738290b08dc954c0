//! Token contract attribute normalization.

use serde_json::Value;

use super::{Document, DocumentKind, DocumentSource, Entry};
use crate::errors::InputError;

/// Normalize a token's on-chain attribute object into a one-entry `Document`.
pub(super) fn normalize(source: &DocumentSource) -> Result<Document, InputError> {
    let root = source.resolve_json()?;

    let attrs = match root {
        Value::Object(attrs) => attrs,
        _ => {
            return Err(InputError::MalformedJson {
                message: "token attributes must be a JSON object".to_string(),
            })
        }
    };

    let id = attrs
        .get("address")
        .or_else(|| attrs.get("symbol"))
        .and_then(Value::as_str)
        .unwrap_or("<unknown token>")
        .to_string();

    let entry = Entry::new(id, "token".to_string(), Vec::new(), attrs);
    Ok(Document::new(DocumentKind::TokenContract, vec![entry], 0))
}
