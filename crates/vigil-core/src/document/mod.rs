//! Normalized document model.
//!
//! A `Document` is the read-only subject of an audit: whatever channel the
//! input arrived through, normalization produces the same internal shape.
//! Rules only ever read it through explicit optional-field accessors, so a
//! missing attribute is `None` — never an error and never a truthy/falsy
//! coercion.

mod entry;
mod kubernetes;
mod source;
mod terraform;
mod token;

pub use entry::{Action, Entry};
pub use source::DocumentSource;

use std::fmt;

use crate::errors::InputError;

/// The audited domains, one rule registry each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    TerraformPlan,
    KubernetesManifest,
    TokenContract,
}

impl DocumentKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::TerraformPlan => "terraform_plan",
            Self::KubernetesManifest => "kubernetes_manifest",
            Self::TokenContract => "token_contract",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The normalized subject of an audit.
///
/// Immutable once constructed: rules only read it.
#[derive(Debug)]
pub struct Document {
    kind: DocumentKind,
    entries: Vec<Entry>,
    skipped_entries: u32,
}

impl Document {
    pub(crate) fn new(kind: DocumentKind, entries: Vec<Entry>, skipped_entries: u32) -> Self {
        Self {
            kind,
            entries,
            skipped_entries,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Entries in input order. Rule evaluation iterates this order, which is
    /// load-bearing for deterministic truncation downstream.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Count of malformed input records excluded during normalization.
    pub fn skipped_entries(&self) -> u32 {
        self.skipped_entries
    }
}

/// Normalize an input source into a `Document` for the given domain.
pub fn normalize(kind: DocumentKind, source: &DocumentSource) -> Result<Document, InputError> {
    match kind {
        DocumentKind::TerraformPlan => terraform::normalize(source),
        DocumentKind::KubernetesManifest => kubernetes::normalize(source),
        DocumentKind::TokenContract => token::normalize(source),
    }
}
