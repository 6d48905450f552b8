//! Entry configuration resolution.
//!
//! A document becomes a sidebar root when its raw entry payload resolves to a
//! [`DocEntryConfig`]. The payload is loosely typed (it comes straight from
//! frontmatter), so resolution never fails: unrecognized shapes either mean
//! "not an entry" or fall back to defaults.
//!
//! | Payload                         | Result                        |
//! |---------------------------------|-------------------------------|
//! | absent, `null`, `false`         | not an entry                  |
//! | string, number, array           | not an entry                  |
//! | `true`                          | entry with defaults           |
//! | object                          | entry, recognized fields read |

use serde::Serialize;
use serde_json::Value;

/// Field selecting the landing point in the object form.
const LANDING_POINT_FIELD: &str = "leafLandingPoint";

/// Fields enabling collapse of non-landing children, in lookup order.
const COLLAPSE_FIELDS: [&str; 2] = ["collapseOtherFirstLevels", "collapseNonLandingChildren"];

/// Which reachable leaf represents a sidebar root in the top navigation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LandingPoint {
    /// First leaf in traversal order.
    #[default]
    First,
    /// Last leaf in traversal order.
    Last,
}

impl LandingPoint {
    /// Parse `"first"` or `"last"`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            _ => None,
        }
    }
}

/// Sidebar root configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocEntryConfig {
    /// Landing leaf selection policy.
    pub landing_point: LandingPoint,
    /// Collapse every direct sidebar child except the one holding the landing leaf.
    pub collapse_non_landing_children: bool,
}

/// Interpret a raw entry payload.
#[must_use]
pub fn resolve_entry_config(raw: Option<&Value>) -> Option<DocEntryConfig> {
    match raw? {
        Value::Bool(true) => Some(DocEntryConfig::default()),
        Value::Object(fields) => {
            let landing_point = fields
                .get(LANDING_POINT_FIELD)
                .and_then(Value::as_str)
                .and_then(LandingPoint::parse)
                .unwrap_or_default();
            let collapse_non_landing_children = COLLAPSE_FIELDS
                .iter()
                .find_map(|field| fields.get(*field).and_then(Value::as_bool))
                .unwrap_or(false);
            Some(DocEntryConfig {
                landing_point,
                collapse_non_landing_children,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_absent_is_not_entry() {
        assert_eq!(resolve_entry_config(None), None);
    }

    #[test]
    fn test_false_and_null_are_not_entry() {
        assert_eq!(resolve_entry_config(Some(&json!(false))), None);
        assert_eq!(resolve_entry_config(Some(&Value::Null)), None);
    }

    #[test]
    fn test_scalar_and_array_are_not_entry() {
        assert_eq!(resolve_entry_config(Some(&json!("yes"))), None);
        assert_eq!(resolve_entry_config(Some(&json!(1))), None);
        assert_eq!(resolve_entry_config(Some(&json!([true]))), None);
    }

    #[test]
    fn test_true_uses_defaults() {
        let config = resolve_entry_config(Some(&json!(true))).unwrap();

        assert_eq!(config.landing_point, LandingPoint::First);
        assert!(!config.collapse_non_landing_children);
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = resolve_entry_config(Some(&json!({}))).unwrap();

        assert_eq!(config, DocEntryConfig::default());
    }

    #[test]
    fn test_object_reads_landing_point_and_collapse() {
        let raw = json!({"leafLandingPoint": "last", "collapseOtherFirstLevels": true});

        let config = resolve_entry_config(Some(&raw)).unwrap();

        assert_eq!(config.landing_point, LandingPoint::Last);
        assert!(config.collapse_non_landing_children);
    }

    #[test]
    fn test_object_accepts_collapse_alias() {
        let raw = json!({"collapseNonLandingChildren": true});

        let config = resolve_entry_config(Some(&raw)).unwrap();

        assert!(config.collapse_non_landing_children);
    }

    #[test]
    fn test_unknown_landing_point_falls_back_to_first() {
        let raw = json!({"leafLandingPoint": "middle"});

        let config = resolve_entry_config(Some(&raw)).unwrap();

        assert_eq!(config.landing_point, LandingPoint::First);
    }

    #[test]
    fn test_non_string_landing_point_falls_back_to_first() {
        let raw = json!({"leafLandingPoint": true});

        let config = resolve_entry_config(Some(&raw)).unwrap();

        assert_eq!(config.landing_point, LandingPoint::First);
    }

    #[test]
    fn test_non_boolean_collapse_falls_back_to_false() {
        let raw = json!({"collapseOtherFirstLevels": "true"});

        let config = resolve_entry_config(Some(&raw)).unwrap();

        assert!(!config.collapse_non_landing_children);
    }

    #[test]
    fn test_landing_point_serializes_lowercase() {
        assert_eq!(serde_json::to_value(LandingPoint::Last).unwrap(), json!("last"));
    }
}
