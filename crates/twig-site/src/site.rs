//! Resolution pipeline.
//!
//! [`Site`] ties the pieces together for one import snapshot:
//!
//! 1. report failed imports to the [`DiagnosticSink`]
//! 2. abort with [`ResolveError::EmptyCorpus`] if nothing survived
//! 3. build the [`NodeRepository`] (synthesizing missing ancestors)
//! 4. traverse it into a [`Resolution`]
//!
//! A `Site` is immutable once built; every run starts from scratch.

use std::time::Instant;

use twig_storage::{ImportResult, Storage};

use crate::diagnostics::DiagnosticSink;
use crate::error::ResolveError;
use crate::repository::NodeRepository;
use crate::resolver::{Resolution, resolve};

/// Convert Duration to milliseconds as f64.
fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Resolved site: the frozen node set and the navigation tables built from it.
#[derive(Debug)]
pub struct Site {
    repository: NodeRepository,
    resolution: Resolution,
    failed: usize,
}

impl Site {
    /// Resolve navigation from import results.
    ///
    /// # Arguments
    ///
    /// * `results` - One result per source document
    /// * `base_url` - Prefix for redirect targets (e.g., "/my-vault/")
    /// * `sink` - Receiver for failed imports
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::EmptyCorpus`] if no document was imported
    /// successfully.
    pub fn resolve(
        results: Vec<ImportResult>,
        base_url: &str,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ResolveError> {
        let start = Instant::now();

        let mut imported = Vec::with_capacity(results.len());
        let mut failed = 0;
        for result in results {
            match result {
                ImportResult::Success(node) => imported.push(node),
                ImportResult::Failure(failure) => {
                    sink.report(&failure);
                    failed += 1;
                }
            }
        }

        if imported.is_empty() {
            return Err(ResolveError::EmptyCorpus);
        }

        let repository = NodeRepository::new(imported);
        let resolution = resolve(&repository, base_url);

        tracing::info!(
            documents = repository.len() - repository.virtual_count(),
            virtual_nodes = repository.virtual_count(),
            failed,
            leaves = resolution.leaf_nodes.len(),
            sidebars = resolution.sidebar.len(),
            elapsed_ms = elapsed_ms(start),
            "Navigation resolved"
        );

        Ok(Self {
            repository,
            resolution,
            failed,
        })
    }

    /// Import from storage, then resolve.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Storage`] if the scan fails, or
    /// [`ResolveError::EmptyCorpus`] if no document was imported.
    pub fn load(
        storage: &dyn Storage,
        base_url: &str,
        sink: &dyn DiagnosticSink,
    ) -> Result<Self, ResolveError> {
        let scan_start = Instant::now();
        let results = storage.scan()?;
        tracing::debug!(
            results = results.len(),
            scan_ms = elapsed_ms(scan_start),
            "Storage scanned"
        );
        Self::resolve(results, base_url, sink)
    }

    /// The frozen resolved node set.
    #[must_use]
    pub fn repository(&self) -> &NodeRepository {
        &self.repository
    }

    /// Navigation tables.
    #[must_use]
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Number of documents that failed to import.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.failed
    }

    /// Take the navigation tables.
    #[must_use]
    pub fn into_resolution(self) -> Resolution {
        self.resolution
    }
}
