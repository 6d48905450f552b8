//! Frontmatter extraction.
//!
//! A note starts with a YAML block fenced by `---` lines. Everything after
//! the closing fence is body content and is never read here.

use serde_json::{Map, Value};

/// Fence line opening and closing the YAML block.
const DELIMITER: &str = "---";

/// Return the raw YAML between the fences.
///
/// Returns `None` if the content does not open with a fence or the block is
/// never closed.
pub(crate) fn split_frontmatter(content: &str) -> Option<&str> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }

    let start = first.len();
    let mut end = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some(&content[start..end]);
        }
        end += line.len();
    }
    None
}

/// Parse note content into a frontmatter mapping.
///
/// Content without frontmatter yields an empty mapping, as does a block
/// whose top level is not a mapping.
///
/// # Errors
///
/// Returns an error if the YAML block is malformed.
pub(crate) fn parse_frontmatter(content: &str) -> Result<Map<String, Value>, serde_yaml::Error> {
    let Some(yaml) = split_frontmatter(content) else {
        return Ok(Map::new());
    };
    if yaml.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_yaml::from_str(yaml)? {
        Value::Object(fields) => Ok(fields),
        _ => Ok(Map::new()),
    }
}
