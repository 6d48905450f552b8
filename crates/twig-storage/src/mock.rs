//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use chrono::{DateTime, Utc};

use crate::document::{ImportFailure, ImportResult, ImportedNode};
use crate::storage::{Storage, StorageError, StorageErrorKind};

/// Mock storage for testing.
///
/// Holds import results in memory. Use the builder methods to configure the
/// mock with test data.
///
/// # Example
///
/// ```ignore
/// use twig_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_document("guide", "User Guide")
///     .with_failure("broken", &["Field missing: id"]);
///
/// let results = storage.scan().unwrap();
/// assert_eq!(results.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    results: Vec<ImportResult>,
    unavailable: bool,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document with the given key and title.
    ///
    /// The uid is derived from the key (`"id-" + key`) and both timestamps
    /// are the Unix epoch.
    #[must_use]
    pub fn with_document(self, key: &str, title: &str) -> Self {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        self.with_node(ImportedNode::new(key, format!("id-{key}"), title, epoch, epoch))
    }

    /// Add a fully configured node.
    #[must_use]
    pub fn with_node(mut self, node: ImportedNode) -> Self {
        self.results.push(ImportResult::Success(node));
        self
    }

    /// Add a failed import for `key`.
    #[must_use]
    pub fn with_failure(mut self, key: &str, errors: &[&str]) -> Self {
        self.results.push(ImportResult::Failure(ImportFailure::new(
            key,
            format!("{key}.md"),
            errors.iter().map(|e| (*e).to_owned()).collect(),
        )));
        self
    }

    /// Make every scan fail with [`StorageErrorKind::Other`].
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<ImportResult>, StorageError> {
        if self.unavailable {
            return Err(StorageError::new(StorageErrorKind::Other).with_backend("Mock"));
        }
        let mut results = self.results.clone();
        results.sort_by(|a, b| a.key().cmp(b.key()));
        Ok(results)
    }
}
