//! Imported document records.
//!
//! An importer produces one [`ImportResult`] per source file. Successful
//! imports become [`ImportedNode`]s; everything else is an
//! [`ImportFailure`] listing every problem found in that file.
//!
//! # Key Convention
//!
//! A document key is the file stem of a Dendron-style note:
//! - `"cs"` - top-level note (`cs.md`)
//! - `"cs.web"` - nested note (`cs.web.md`)
//! - `"cs.web.jamstack"` - deeper note
//!
//! The hierarchy is implied by the dots; the importer does not build it.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Navigation order assigned when a document has no explicit `nav_order`.
pub const DEFAULT_ORDER: i64 = 999;

/// A successfully imported document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportedNode {
    /// Dot-delimited document key (e.g., "cs.web.jamstack").
    pub key: String,
    /// Stable document id from frontmatter.
    pub uid: String,
    /// Display title from frontmatter.
    pub title: String,
    /// Sibling ordering, ascending.
    pub order: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Raw entry configuration payload, interpreted by the resolver.
    #[serde(skip)]
    pub entry_config_raw: Option<serde_json::Value>,
    /// Site link (`"/" + key`).
    pub link: String,
    /// Source file name (e.g., "cs.web.md").
    pub file_name: String,
}

impl ImportedNode {
    /// Create a node with default order, no entry configuration, and the
    /// link and file name derived from `key`.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        uid: impl Into<String>,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        let key = key.into();
        Self {
            link: format!("/{key}"),
            file_name: format!("{key}.md"),
            key,
            uid: uid.into(),
            title: title.into(),
            order: DEFAULT_ORDER,
            created_at,
            updated_at,
            entry_config_raw: None,
        }
    }

    /// Set the navigation order.
    #[must_use]
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Attach a raw entry configuration payload.
    #[must_use]
    pub fn with_entry_config(mut self, raw: serde_json::Value) -> Self {
        self.entry_config_raw = Some(raw);
        self
    }

    /// Override the source file name.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

/// A document that could not be imported.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportFailure {
    /// Document key derived from the file name.
    pub key: String,
    /// Source file name.
    pub file_name: String,
    /// Every problem found, in detection order.
    pub errors: Vec<String>,
}

impl ImportFailure {
    /// Create a failure record.
    #[must_use]
    pub fn new(key: impl Into<String>, file_name: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            key: key.into(),
            file_name: file_name.into(),
            errors,
        }
    }
}

/// Outcome of importing one source file.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ImportResult {
    /// Document parsed and validated.
    Success(ImportedNode),
    /// Document rejected.
    Failure(ImportFailure),
}

impl ImportResult {
    /// Document key of either variant.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Success(node) => &node.key,
            Self::Failure(failure) => &failure.key,
        }
    }
}
