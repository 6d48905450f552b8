//! Filesystem importer for Dendron-style vaults.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](twig_storage::Storage) trait. It handles:
//!
//! - Listing note files in a flat vault directory
//! - Frontmatter parsing with `serde_yaml`
//! - Field validation and timestamp parsing
//! - Parallel import with `rayon`
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use twig_storage::Storage;
//! use twig_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("notes"));
//! let results = storage.scan()?;
//! println!("{} notes", results.len());
//! ```

mod frontmatter;
mod import;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use import::{import_note, note_key};
use twig_storage::{ImportFailure, ImportResult, Storage, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Note files that never become documents.
const SKIPPED_FILES: [&str; 3] = ["root.md", "index.md", "README.md"];

/// Filesystem storage implementation.
///
/// Dendron vaults are flat: hierarchy lives in the dotted file names, so only
/// the top level of `source_dir` is listed.
#[derive(Debug, Clone)]
pub struct FsStorage {
    /// Vault directory containing `*.md` notes.
    source_dir: PathBuf,
}

impl FsStorage {
    /// Create a new filesystem storage.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Vault directory containing the notes
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// List candidate note file names.
    fn list_notes(&self) -> Result<Vec<String>, StorageError> {
        if !self.source_dir.is_dir() {
            let kind = if self.source_dir.exists() {
                StorageErrorKind::InvalidPath
            } else {
                StorageErrorKind::NotFound
            };
            return Err(StorageError::new(kind)
                .with_path(self.source_dir.clone())
                .with_backend(BACKEND));
        }

        let entries = fs::read_dir(&self.source_dir)
            .map_err(|e| StorageError::io(e, Some(self.source_dir.clone())).with_backend(BACKEND))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        dir = %self.source_dir.display(),
                        error = %e,
                        "Unreadable directory entry skipped"
                    );
                    continue;
                }
            };

            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != "md") {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!(path = %path.display(), "Note with non-UTF-8 file name skipped");
                continue;
            };
            if !is_note_file(&name) {
                continue;
            }

            // metadata() follows symlinks, so linked notes are imported
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => names.push(name),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Note skipped");
                }
            }
        }
        Ok(names)
    }

    /// Read and import one note.
    fn import_file(&self, file_name: &str) -> ImportResult {
        let path = self.source_dir.join(file_name);
        match fs::read_to_string(&path) {
            Ok(content) => import_note(file_name, &content),
            Err(e) => ImportResult::Failure(ImportFailure::new(
                note_key(file_name),
                file_name,
                vec![format!("Error when reading file {e}")],
            )),
        }
    }
}

/// Whether a directory entry name is an importable note.
fn is_note_file(name: &str) -> bool {
    Path::new(name).extension().is_some_and(|ext| ext == "md")
        && !name.starts_with('.')
        && !SKIPPED_FILES.contains(&name)
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<ImportResult>, StorageError> {
        let start = Instant::now();
        let names = self.list_notes()?;

        let mut results: Vec<ImportResult> = names
            .par_iter()
            .map(|name| self.import_file(name))
            .collect();
        results.sort_by(|a, b| a.key().cmp(b.key()));

        let failed = results
            .iter()
            .filter(|r| matches!(r, ImportResult::Failure(_)))
            .count();
        tracing::debug!(
            source_dir = %self.source_dir.display(),
            notes = results.len(),
            failed,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Vault imported"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn note(id: &str, title: &str) -> String {
        format!("---\nid: {id}\ntitle: {title}\ncreated: 1636492098692\nupdated: 1636492098692\n---\n\nBody\n")
    }

    fn keys(results: &[ImportResult]) -> Vec<&str> {
        results.iter().map(ImportResult::key).collect()
    }

    #[test]
    fn test_scan_sorted_by_key() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("b.md"), note("2", "B")).unwrap();
        fs::write(temp_dir.path().join("a.z.md"), note("3", "AZ")).unwrap();
        fs::write(temp_dir.path().join("a.md"), note("1", "A")).unwrap();

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let results = storage.scan().unwrap();

        assert_eq!(keys(&results), vec!["a", "a.z", "b"]);
        assert!(results.iter().all(|r| matches!(r, ImportResult::Success(_))));
    }

    #[test]
    fn test_scan_skips_reserved_hidden_and_non_markdown() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join("root.md"), note("r", "Root")).unwrap();
        fs::write(dir.join("index.md"), note("i", "Index")).unwrap();
        fs::write(dir.join("README.md"), note("m", "Readme")).unwrap();
        fs::write(dir.join(".draft.md"), note("d", "Draft")).unwrap();
        fs::write(dir.join("notes.txt"), "text").unwrap();
        fs::write(dir.join("real.md"), note("x", "Real")).unwrap();

        let results = FsStorage::new(dir.to_path_buf()).scan().unwrap();

        assert_eq!(keys(&results), vec!["real"]);
    }

    #[test]
    fn test_scan_ignores_subdirectories() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        fs::create_dir(dir.join("assets")).unwrap();
        fs::write(dir.join("assets").join("nested.md"), note("n", "Nested")).unwrap();
        fs::create_dir(dir.join("folder.md")).unwrap();
        fs::write(dir.join("top.md"), note("t", "Top")).unwrap();

        let results = FsStorage::new(dir.to_path_buf()).scan().unwrap();

        assert_eq!(keys(&results), vec!["top"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_follows_symlinked_notes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let vault = temp_dir.path().join("vault");
        let shared = temp_dir.path().join("shared");
        fs::create_dir(&vault).unwrap();
        fs::create_dir(&shared).unwrap();
        fs::write(shared.join("linked.md"), note("l", "Linked")).unwrap();
        std::os::unix::fs::symlink(shared.join("linked.md"), vault.join("linked.md")).unwrap();
        std::os::unix::fs::symlink(shared.join("gone.md"), vault.join("dangling.md")).unwrap();
        fs::write(vault.join("local.md"), note("o", "Local")).unwrap();

        let results = FsStorage::new(vault).scan().unwrap();

        assert_eq!(keys(&results), vec!["linked", "local"]);
        assert!(results.iter().all(|r| matches!(r, ImportResult::Success(_))));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = tempfile::tempdir().unwrap();
        let dir = temp_dir.path();
        fs::write(dir.join(OsStr::from_bytes(b"bad\xff.md")), note("b", "Bad")).unwrap();
        fs::write(dir.join("good.md"), note("g", "Good")).unwrap();

        let results = FsStorage::new(dir.to_path_buf()).scan().unwrap();

        assert_eq!(keys(&results), vec!["good"]);
    }

    #[test]
    fn test_scan_reports_invalid_notes_as_failures() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("ok.md"), note("1", "Ok")).unwrap();
        fs::write(temp_dir.path().join("broken.md"), "---\ntitle: Broken\n---\n").unwrap();

        let results = FsStorage::new(temp_dir.path().to_path_buf()).scan().unwrap();

        let ImportResult::Failure(failure) = &results[0] else {
            panic!("expected failure for broken.md");
        };
        assert_eq!(failure.key, "broken");
        assert_eq!(failure.errors, vec![
            "Field missing: id",
            "Field missing: created",
            "Field missing: updated",
        ]);
        assert!(matches!(results[1], ImportResult::Success(_)));
    }

    #[test]
    fn test_scan_reports_unreadable_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        fs::write(temp_dir.path().join("binary.md"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();

        let results = FsStorage::new(temp_dir.path().to_path_buf()).scan().unwrap();

        let ImportResult::Failure(failure) = &results[0] else {
            panic!("expected failure for binary.md");
        };
        assert!(failure.errors[0].starts_with("Error when reading file "));
    }

    #[test]
    fn test_scan_empty_vault() {
        let temp_dir = tempfile::tempdir().unwrap();

        let results = FsStorage::new(temp_dir.path().to_path_buf()).scan().unwrap();

        assert!(results.is_empty());
    }

    #[test]
    fn test_missing_source_dir_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = FsStorage::new(missing.clone()).scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.path, Some(missing));
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_file_as_source_dir_is_invalid_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file = temp_dir.path().join("note.md");
        fs::write(&file, note("1", "One")).unwrap();

        let err = FsStorage::new(file).scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_is_note_file() {
        assert!(is_note_file("cs.web.md"));
        assert!(!is_note_file("root.md"));
        assert!(!is_note_file(".hidden.md"));
        assert!(!is_note_file("image.png"));
        assert!(!is_note_file("md"));
    }
}
