//! Diagnostic sink for per-document import failures.
//!
//! Failed documents never stop a resolution run; each one is handed to a
//! [`DiagnosticSink`] and the run continues with the rest.

use std::sync::{Mutex, PoisonError};

use twig_storage::ImportFailure;

/// Receiver for import failures.
pub trait DiagnosticSink: Send + Sync {
    /// Report one failed document.
    fn report(&self, failure: &ImportFailure);
}

/// Logs every failure at `WARN` level.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, failure: &ImportFailure) {
        tracing::warn!(
            key = %failure.key,
            file = %failure.file_name,
            errors = %failure.errors.join(", "),
            "Document import failed"
        );
    }
}

/// Keeps failures in memory for later inspection.
#[derive(Debug, Default)]
pub struct CollectingSink {
    failures: Mutex<Vec<ImportFailure>>,
}

impl CollectingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures reported so far, in report order.
    #[must_use]
    pub fn failures(&self) -> Vec<ImportFailure> {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True when nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, failure: &ImportFailure) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(failure.clone());
    }
}
