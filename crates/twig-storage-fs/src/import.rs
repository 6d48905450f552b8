//! Per-note validation.
//!
//! Turns one note's frontmatter into an [`ImportResult`]. Every problem in a
//! note is collected so authors can fix a file in one pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use twig_storage::{DEFAULT_ORDER, ImportFailure, ImportResult, ImportedNode};

use crate::frontmatter::parse_frontmatter;

/// Prefix of a missing-field error.
const FIELD_MISSING: &str = "Field missing: ";

/// Frontmatter mapping holding vault-specific settings.
const VPD_FIELD: &str = "vpd";

/// Entry configuration payload inside [`VPD_FIELD`].
const DOC_FIELD: &str = "doc";

/// Import one note from its file name and content.
pub(crate) fn import_note(file_name: &str, content: &str) -> ImportResult {
    let key = note_key(file_name);

    let fields = match parse_frontmatter(content) {
        Ok(fields) => fields,
        Err(e) => {
            return ImportResult::Failure(ImportFailure::new(
                key,
                file_name,
                vec![format!("Invalid frontmatter: {e}")],
            ));
        }
    };

    let mut errors = Vec::new();

    let uid = required_text(&fields, "id", &mut errors);
    let title = required_text(&fields, "title", &mut errors);
    let created_at = required_date(&fields, "created", &mut errors);
    let updated_at = required_date(&fields, "updated", &mut errors);

    let (Some(uid), Some(title), Some(created_at), Some(updated_at)) =
        (uid, title, created_at, updated_at)
    else {
        return ImportResult::Failure(ImportFailure::new(key, file_name, errors));
    };

    let order = match fields.get("nav_order") {
        None => DEFAULT_ORDER,
        Some(value) => nav_order(value).unwrap_or_else(|| {
            tracing::debug!(key, nav_order = %value, "Unusable nav_order, default applied");
            DEFAULT_ORDER
        }),
    };

    let mut node = ImportedNode::new(key, uid, title, created_at, updated_at)
        .with_order(order)
        .with_file_name(file_name);
    if let Some(raw) = entry_payload(&fields) {
        node = node.with_entry_config(raw.clone());
    }
    ImportResult::Success(node)
}

/// Document key of a note file: the file name without `.md`.
pub(crate) fn note_key(file_name: &str) -> &str {
    file_name.strip_suffix(".md").unwrap_or(file_name)
}

/// Read `nav_order` as an integer. Whole-number floats (`2.0`) are accepted.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
fn nav_order(value: &Value) -> Option<i64> {
    if let Some(order) = value.as_i64() {
        return Some(order);
    }
    let float = value.as_f64()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.fract() == 0.0 && in_range).then_some(float as i64)
}

/// Locate the raw entry payload (`vpd.doc`).
fn entry_payload(fields: &Map<String, Value>) -> Option<&Value> {
    fields.get(VPD_FIELD)?.as_object()?.get(DOC_FIELD)
}

/// A field counts as missing when absent, null, empty, `false` or zero.
fn present<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    fields.get(name).filter(|value| match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() != Some(0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn required_text(fields: &Map<String, Value>, name: &str, errors: &mut Vec<String>) -> Option<String> {
    let Some(value) = present(fields, name) else {
        errors.push(format!("{FIELD_MISSING}{name}"));
        return None;
    };
    match value {
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn required_date(
    fields: &Map<String, Value>,
    name: &str,
    errors: &mut Vec<String>,
) -> Option<DateTime<Utc>> {
    let Some(value) = present(fields, name) else {
        errors.push(format!("{FIELD_MISSING}{name}"));
        return None;
    };
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        errors.push(format!("Invalid {name} date"));
    }
    parsed
}

/// Parse a frontmatter timestamp.
///
/// Accepted forms:
/// - epoch milliseconds, as an integer or a numeric string
/// - RFC 3339 (`2024-03-01T10:00:00Z`)
/// - `YYYY-MM-DD HH:MM:SS` (UTC)
/// - `YYYY-MM-DD` (midnight UTC)
pub(crate) fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => DateTime::from_timestamp_millis(n.as_i64()?),
        Value::String(s) => parse_timestamp_str(s.trim()),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(millis) = s.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}
