//! Dot-delimited document key helpers.
//!
//! A key such as `"cs.web.jamstack"` names a node and its position: the
//! segment count is the node's level and every strict prefix names an
//! ancestor.

/// Key separator.
pub const SEPARATOR: char = '.';

/// Number of segments in `key`. Root-level keys have level 1.
#[must_use]
pub fn level(key: &str) -> usize {
    key.split(SEPARATOR).count()
}

/// Key of the parent node, `None` for root-level keys.
#[must_use]
pub fn parent_key(key: &str) -> Option<&str> {
    key.rsplit_once(SEPARATOR).map(|(parent, _)| parent)
}

/// Last segment of `key`.
#[must_use]
pub fn last_segment(key: &str) -> &str {
    key.rsplit_once(SEPARATOR).map_or(key, |(_, last)| last)
}

/// All strict prefixes of `key`, shortest first.
///
/// `"a.b.c"` yields `["a", "a.b"]`.
pub fn ancestor_keys(key: &str) -> impl Iterator<Item = &str> {
    key.match_indices(SEPARATOR).map(move |(idx, _)| &key[..idx])
}
