//! Document import boundary for the twig navigation resolver.
//!
//! This crate defines the data exchanged between a document importer and the
//! resolver core, and a [`Storage`] trait that importers implement:
//!
//! - [`ImportResult`]: per-file outcome, either an [`ImportedNode`] or an
//!   [`ImportFailure`] carrying the reasons
//! - [`Storage`] trait with a single `scan()` method
//! - [`StorageError`] for backend failures that abort a whole scan
//! - [`MockStorage`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use twig_storage::{ImportResult, Storage};
//! use twig_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("notes"));
//! for result in storage.scan()? {
//!     match result {
//!         ImportResult::Success(node) => println!("{}: {}", node.key, node.title),
//!         ImportResult::Failure(failure) => println!("{}: {:?}", failure.key, failure.errors),
//!     }
//! }
//! ```

mod document;
#[cfg(feature = "mock")]
mod mock;
mod storage;

pub use document::{DEFAULT_ORDER, ImportFailure, ImportResult, ImportedNode};
#[cfg(feature = "mock")]
pub use mock::MockStorage;
pub use storage::{Storage, StorageError, StorageErrorKind};
