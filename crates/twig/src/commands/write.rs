//! JSON output of navigation tables.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use twig_site::Resolution;

use crate::error::CliError;

/// Write one pretty-printed JSON file.
fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> Result<PathBuf, CliError> {
    let path = dir.join(name);
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(&path, json)?;
    Ok(path)
}

/// Write every table to `dir`, creating it if needed.
///
/// Returns the written paths in a fixed order.
pub(super) fn write_tables(dir: &Path, resolution: &Resolution) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(dir)?;

    Ok(vec![
        write_json(dir, "nav.json", &resolution.nav)?,
        write_json(dir, "sidebar.json", &resolution.sidebar)?,
        write_json(dir, "linksVocabulary.json", &resolution.links_vocabulary)?,
        write_json(dir, "leafNodes.json", &resolution.leaf_nodes)?,
        write_json(dir, "redirects.json", &resolution.redirects)?,
        write_json(dir, "srcExclude.json", &resolution.src_exclude)?,
        write_json(dir, "site.json", resolution)?,
    ])
}
