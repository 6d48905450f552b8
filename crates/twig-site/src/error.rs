//! Resolution error types.

use twig_storage::StorageError;

/// Fatal resolution error.
///
/// Per-document import failures are not errors; they go to the
/// [`DiagnosticSink`](crate::DiagnosticSink).
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// No document survived import.
    #[error("No valid documents found to build the navigation")]
    EmptyCorpus,
    /// Storage could not be scanned.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
