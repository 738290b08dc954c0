//! Input channel resolution.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::errors::InputError;

/// The three mutually exclusive input channels for a document.
///
/// Exactly one channel must be populated; anything else is an
/// `InputError` before any parsing happens.
#[derive(Debug, Clone, Default)]
pub struct DocumentSource {
    inline: Option<Value>,
    text: Option<String>,
    path: Option<PathBuf>,
}

impl DocumentSource {
    pub fn from_inline(value: Value) -> Self {
        Self {
            inline: Some(value),
            ..Self::default()
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Assemble a source from optional channels as they arrive from params.
    pub fn from_channels(
        inline: Option<Value>,
        text: Option<String>,
        path: Option<PathBuf>,
    ) -> Self {
        Self { inline, text, path }
    }

    /// Resolve the source to a single JSON value.
    pub fn resolve_json(&self) -> Result<Value, InputError> {
        self.ensure_exactly_one()?;
        if let Some(value) = &self.inline {
            return Ok(value.clone());
        }
        let text = self.read_text()?;
        serde_json::from_str(&text).map_err(|e| InputError::MalformedJson {
            message: e.to_string(),
        })
    }

    /// Resolve the source to a list of YAML documents as JSON values.
    ///
    /// Accepts multi-document YAML streams; JSON input parses as a single
    /// document since YAML is a superset. An inline array is treated as a
    /// pre-split document list, null documents are dropped.
    pub fn resolve_yaml_documents(&self) -> Result<Vec<Value>, InputError> {
        self.ensure_exactly_one()?;
        if let Some(value) = &self.inline {
            return Ok(match value {
                Value::Array(items) => items.clone(),
                other => vec![other.clone()],
            });
        }

        let text = self.read_text()?;
        let mut documents = Vec::new();
        for deserializer in serde_yaml::Deserializer::from_str(&text) {
            let doc = serde_yaml::Value::deserialize(deserializer).map_err(|e| {
                InputError::MalformedYaml {
                    message: e.to_string(),
                }
            })?;
            if doc.is_null() {
                continue;
            }
            let json = serde_json::to_value(doc).map_err(|e| InputError::MalformedYaml {
                message: e.to_string(),
            })?;
            documents.push(json);
        }
        Ok(documents)
    }

    fn ensure_exactly_one(&self) -> Result<(), InputError> {
        let mut supplied = Vec::new();
        if self.inline.is_some() {
            supplied.push("inline object");
        }
        if self.text.is_some() {
            supplied.push("raw text");
        }
        if self.path.is_some() {
            supplied.push("file path");
        }
        match supplied.len() {
            1 => Ok(()),
            0 => Err(InputError::NoSource {
                expected: "inline object, raw text, file path",
            }),
            _ => Err(InputError::MultipleSources {
                supplied: supplied.join(", "),
            }),
        }
    }

    fn read_text(&self) -> Result<String, InputError> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        let Some(path) = self.path.as_deref() else {
            return Err(InputError::NoSource {
                expected: "inline object, raw text, file path",
            });
        };
        if !path.exists() {
            return Err(InputError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        std::fs::read_to_string(path).map_err(|source| InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
    }
}
