//! Two-phase hierarchy traversal.
//!
//! Walks a [`NodeRepository`] from its level-1 nodes and produces every
//! navigation table in one pass:
//!
//! - **pre-entry** phase: above any sidebar root, nodes become nested
//!   [`NavItem::Branch`]es.
//! - **post-entry** phase: below a sidebar root (a node with a
//!   [`DocEntryConfig`](crate::DocEntryConfig)), nodes become
//!   [`SidebarItem`]s, and leaves feed the vocabulary, leaf list, redirect
//!   table and the root's landing link. The root itself collapses to a single
//!   [`NavItem::Link`] pointing at its landing leaf.
//!
//! All side tables live in one accumulator threaded through the recursion,
//! so [`resolve`] is a pure function of the repository and base URL.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use twig_storage::ImportedNode;

use crate::entry::LandingPoint;
use crate::repository::NodeRepository;

/// Top navigation item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NavItem {
    /// Sidebar root collapsed to its landing link.
    Link {
        /// Display title.
        #[serde(rename = "text")]
        title: String,
        /// Landing leaf link; `None` when the root has no reachable leaf.
        #[serde(skip_serializing_if = "Option::is_none")]
        link: Option<String>,
    },
    /// Grouping node above any sidebar root.
    Branch {
        /// Display title.
        #[serde(rename = "text")]
        title: String,
        /// Nested items.
        #[serde(rename = "items")]
        children: Vec<NavItem>,
    },
}

impl NavItem {
    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Link { title, .. } | Self::Branch { title, .. } => title,
        }
    }
}

/// Sidebar tree item below a sidebar root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Document key.
    pub key: String,
    /// Display title.
    #[serde(rename = "text")]
    pub title: String,
    /// Page link, set for leaves only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Nested items, set for branches only.
    #[serde(rename = "items", skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<SidebarItem>>,
    /// Expand/collapse state, set on direct children of roots that collapse
    /// non-landing children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl SidebarItem {
    /// True when the item links to a page.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Leaf document with its breadcrumb trail (ancestor titles, then its own).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LeafDocument {
    /// Imported document.
    #[serde(flatten)]
    pub node: ImportedNode,
    /// Titles from the level-1 ancestor down to this document.
    pub breadcrumbs: Vec<String>,
}

/// Leaf key → title lookup used to label wiki links.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LinkVocabulary(BTreeMap<String, String>);

impl LinkVocabulary {
    /// Title registered for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Title registered for `key`, or the key itself when unknown.
    #[must_use]
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no leaf was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Output tables of one resolution run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// Top navigation tree.
    pub nav: Vec<NavItem>,
    /// Sidebar trees keyed by sidebar root key.
    pub sidebar: BTreeMap<String, Vec<SidebarItem>>,
    /// Leaf key → title.
    pub links_vocabulary: LinkVocabulary,
    /// Leaves in traversal order.
    pub leaf_nodes: Vec<LeafDocument>,
    /// Leaf uid → absolute link.
    pub redirects: BTreeMap<String, String>,
    /// Source files represented only through navigation.
    pub src_exclude: Vec<String>,
}

/// Side tables filled during traversal.
struct Accumulator<'a> {
    base_url: &'a str,
    sidebar: BTreeMap<String, Vec<SidebarItem>>,
    vocabulary: BTreeMap<String, String>,
    leaves: Vec<LeafDocument>,
    redirects: BTreeMap<String, String>,
    excluded: Vec<String>,
    landing_links: HashMap<String, String>,
}

impl<'a> Accumulator<'a> {
    fn new(base_url: &'a str) -> Self {
        Self {
            base_url,
            sidebar: BTreeMap::new(),
            vocabulary: BTreeMap::new(),
            leaves: Vec::new(),
            redirects: BTreeMap::new(),
            excluded: Vec::new(),
            landing_links: HashMap::new(),
        }
    }

    fn exclude(&mut self, node: &ImportedNode) {
        self.excluded.push(node.file_name.clone());
    }

    fn record_leaf(
        &mut self,
        node: &ImportedNode,
        root_key: &str,
        landing_point: LandingPoint,
        breadcrumbs: &[String],
    ) {
        self.vocabulary.insert(node.key.clone(), node.title.clone());

        let mut trail = breadcrumbs.to_vec();
        trail.push(node.title.clone());
        self.leaves.push(LeafDocument {
            node: node.clone(),
            breadcrumbs: trail,
        });

        match landing_point {
            LandingPoint::Last => {
                self.landing_links
                    .insert(root_key.to_owned(), node.link.clone());
            }
            LandingPoint::First => {
                self.landing_links
                    .entry(root_key.to_owned())
                    .or_insert_with(|| node.link.clone());
            }
        }

        let target = format!("{}{}", self.base_url, node.key);
        if let Some(previous) = self.redirects.insert(node.uid.clone(), target) {
            tracing::warn!(uid = %node.uid, %previous, "Duplicate document uid, redirect replaced");
        }
    }

    fn finish(self, nav: Vec<NavItem>) -> Resolution {
        Resolution {
            nav,
            sidebar: self.sidebar,
            links_vocabulary: LinkVocabulary(self.vocabulary),
            leaf_nodes: self.leaves,
            redirects: self.redirects,
            src_exclude: self.excluded,
        }
    }
}

/// Resolve navigation tables from a frozen repository.
///
/// `base_url` is prepended verbatim to leaf keys to build redirect targets.
#[must_use]
pub fn resolve(repo: &NodeRepository, base_url: &str) -> Resolution {
    let mut acc = Accumulator::new(base_url);

    let nav = repo
        .root_indices()
        .iter()
        .map(|&idx| pre_entry(repo, idx, &[], &mut acc))
        .collect();

    let resolution = acc.finish(nav);
    tracing::debug!(
        nav = resolution.nav.len(),
        sidebars = resolution.sidebar.len(),
        leaves = resolution.leaf_nodes.len(),
        vocabulary = resolution.links_vocabulary.len(),
        excluded = resolution.src_exclude.len(),
        "Hierarchy traversed"
    );
    resolution
}

/// Traverse above sidebar roots.
fn pre_entry(
    repo: &NodeRepository,
    idx: usize,
    breadcrumbs: &[String],
    acc: &mut Accumulator<'_>,
) -> NavItem {
    let node = repo.node(idx);
    let mut trail = breadcrumbs.to_vec();
    trail.push(node.title().to_owned());

    if let Some(imported) = node.as_imported() {
        acc.exclude(imported);
    }

    let children = repo.child_indices(idx);

    let Some(entry) = node.entry() else {
        let children = children
            .iter()
            .map(|&child| pre_entry(repo, child, &trail, acc))
            .collect();
        return NavItem::Branch {
            title: node.title().to_owned(),
            children,
        };
    };

    let mut items: Vec<SidebarItem> = children
        .iter()
        .map(|&child| post_entry(repo, child, node.key(), entry.landing_point, &trail, acc))
        .collect();

    let landing = acc.landing_links.get(node.key()).cloned();
    if landing.is_none() {
        tracing::warn!(key = node.key(), "Sidebar root has no reachable leaf");
    }

    if entry.collapse_non_landing_children {
        apply_collapse(&mut items, landing.as_deref());
    }

    acc.sidebar.insert(node.key().to_owned(), items);

    NavItem::Link {
        title: node.title().to_owned(),
        link: landing,
    }
}

/// Traverse below a sidebar root.
fn post_entry(
    repo: &NodeRepository,
    idx: usize,
    root_key: &str,
    landing_point: LandingPoint,
    breadcrumbs: &[String],
    acc: &mut Accumulator<'_>,
) -> SidebarItem {
    let node = repo.node(idx);
    let children = repo.child_indices(idx);

    let mut item = SidebarItem {
        key: node.key().to_owned(),
        title: node.title().to_owned(),
        link: None,
        children: None,
        collapsed: None,
    };

    if let Some(imported) = node.as_imported()
        && children.is_empty()
    {
        item.link = Some(imported.link.clone());
        acc.record_leaf(imported, root_key, landing_point, breadcrumbs);
        return item;
    }

    let mut trail = breadcrumbs.to_vec();
    trail.push(node.title().to_owned());

    item.children = Some(
        children
            .iter()
            .map(|&child| post_entry(repo, child, root_key, landing_point, &trail, acc))
            .collect(),
    );

    if let Some(imported) = node.as_imported() {
        acc.exclude(imported);
    }

    item
}

/// Expand the direct item holding the landing leaf and collapse its siblings.
///
/// The holder is the item whose key strictly prefixes the landing link; if
/// the landing leaf is itself a direct item, that item is the holder. With
/// no holder every item is collapsed.
fn apply_collapse(items: &mut [SidebarItem], landing: Option<&str>) {
    let expanded = landing.and_then(|landing| {
        items
            .iter()
            .position(|item| landing.starts_with(&format!("/{}.", item.key)))
            .or_else(|| {
                items
                    .iter()
                    .position(|item| item.link.as_deref() == Some(landing))
            })
    });

    for (i, item) in items.iter_mut().enumerate() {
        item.collapsed = Some(expanded != Some(i));
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    const BASE_URL: &str = "/my-vault/";

    fn doc(key: &str, order: i64) -> ImportedNode {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        ImportedNode::new(key, format!("id-{key}"), format!("T {key}"), epoch, epoch)
            .with_order(order)
    }

    fn entry(key: &str, order: i64, raw: serde_json::Value) -> ImportedNode {
        doc(key, order).with_entry_config(raw)
    }

    fn run(nodes: Vec<ImportedNode>) -> Resolution {
        resolve(&NodeRepository::new(nodes), BASE_URL)
    }

    fn leaf_keys(resolution: &Resolution) -> Vec<&str> {
        resolution
            .leaf_nodes
            .iter()
            .map(|leaf| leaf.node.key.as_str())
            .collect()
    }

    #[test]
    fn test_entry_root_with_two_leaves() {
        let resolution = run(vec![
            entry("a", 1, json!({"leafLandingPoint": "first"})),
            doc("a.b", 1),
            doc("a.c", 2),
        ]);

        assert_eq!(
            resolution.nav,
            vec![NavItem::Link {
                title: "T a".to_owned(),
                link: Some("/a.b".to_owned()),
            }]
        );
        let sidebar = &resolution.sidebar["a"];
        assert_eq!(sidebar.len(), 2);
        assert_eq!(sidebar[0].key, "a.b");
        assert_eq!(sidebar[0].link.as_deref(), Some("/a.b"));
        assert_eq!(sidebar[1].key, "a.c");
        assert!(sidebar.iter().all(SidebarItem::is_leaf));
        assert!(sidebar.iter().all(|item| item.collapsed.is_none()));
    }

    #[test]
    fn test_gapped_key_builds_virtual_branches() {
        let resolution = run(vec![doc("x.y.z", 1)]);

        assert_eq!(
            resolution.nav,
            vec![NavItem::Branch {
                title: "x".to_owned(),
                children: vec![NavItem::Branch {
                    title: "y".to_owned(),
                    children: vec![NavItem::Branch {
                        title: "T x.y.z".to_owned(),
                        children: Vec::new(),
                    }],
                }],
            }]
        );
        assert!(resolution.sidebar.is_empty());
        assert_eq!(resolution.src_exclude, vec!["x.y.z.md"]);
    }

    #[test]
    fn test_landing_first_is_leftmost_leaf() {
        let resolution = run(vec![
            entry("a", 1, json!(true)),
            doc("a.m", 2),
            doc("a.m.deep", 1),
            doc("a.k", 1),
            doc("a.z", 3),
        ]);

        assert_eq!(resolution.nav[0], NavItem::Link {
            title: "T a".to_owned(),
            link: Some("/a.k".to_owned()),
        });
    }

    #[test]
    fn test_landing_last_is_rightmost_leaf() {
        let resolution = run(vec![
            entry("a", 1, json!({"leafLandingPoint": "last"})),
            doc("a.b", 1),
            doc("a.c", 2),
            doc("a.c.d", 1),
            doc("a.c.e", 2),
        ]);

        assert_eq!(resolution.nav[0], NavItem::Link {
            title: "T a".to_owned(),
            link: Some("/a.c.e".to_owned()),
        });
    }

    #[test]
    fn test_landing_links_are_tracked_per_root() {
        let resolution = run(vec![
            entry("a", 1, json!(true)),
            doc("a.x", 1),
            entry("b", 2, json!({"leafLandingPoint": "last"})),
            doc("b.y", 1),
            doc("b.z", 2),
        ]);

        let links: Vec<_> = resolution
            .nav
            .iter()
            .map(|item| match item {
                NavItem::Link { link, .. } => link.clone(),
                NavItem::Branch { .. } => None,
            })
            .collect();
        assert_eq!(links, vec![Some("/a.x".to_owned()), Some("/b.z".to_owned())]);
    }

    #[test]
    fn test_collapse_expands_child_holding_landing_leaf() {
        let resolution = run(vec![
            entry("a", 1, json!({"collapseOtherFirstLevels": true})),
            doc("a.b", 1),
            doc("a.b.c", 1),
            doc("a.d", 2),
            doc("a.d.e", 1),
            doc("a.f", 3),
        ]);

        let states: Vec<_> = resolution.sidebar["a"]
            .iter()
            .map(|item| (item.key.as_str(), item.collapsed))
            .collect();
        assert_eq!(
            states,
            vec![("a.b", Some(false)), ("a.d", Some(true)), ("a.f", Some(true))]
        );
    }

    #[test]
    fn test_collapse_with_last_landing_point() {
        let resolution = run(vec![
            entry(
                "a",
                1,
                json!({"leafLandingPoint": "last", "collapseOtherFirstLevels": true}),
            ),
            doc("a.b", 1),
            doc("a.b.c", 1),
            doc("a.d", 2),
            doc("a.d.e", 1),
        ]);

        let states: Vec<_> = resolution.sidebar["a"]
            .iter()
            .map(|item| item.collapsed)
            .collect();
        assert_eq!(states, vec![Some(true), Some(false)]);
    }

    #[test]
    fn test_collapse_when_landing_is_direct_child() {
        let resolution = run(vec![
            entry("a", 1, json!({"collapseOtherFirstLevels": true})),
            doc("a.b", 1),
            doc("a.c", 2),
            doc("a.c.d", 1),
        ]);

        let states: Vec<_> = resolution.sidebar["a"]
            .iter()
            .map(|item| item.collapsed)
            .collect();
        assert_eq!(states, vec![Some(false), Some(true)]);
    }

    #[test]
    fn test_collapse_without_landing_leaf_collapses_everything() {
        let mut items = vec![SidebarItem {
            key: "r.v".to_owned(),
            title: "v".to_owned(),
            link: None,
            children: Some(Vec::new()),
            collapsed: None,
        }];

        apply_collapse(&mut items, None);

        assert_eq!(items[0].collapsed, Some(true));
    }

    #[test]
    fn test_entry_without_leaves_has_no_link() {
        let resolution = run(vec![entry("a", 1, json!(true))]);

        assert_eq!(resolution.nav[0], NavItem::Link {
            title: "T a".to_owned(),
            link: None,
        });
        assert!(resolution.sidebar["a"].is_empty());
    }

    #[test]
    fn test_virtual_nodes_below_entry_become_branches() {
        let resolution = run(vec![entry("a", 1, json!(true)), doc("a.v.leaf", 1)]);

        let sidebar = &resolution.sidebar["a"];
        assert_eq!(sidebar[0].key, "a.v");
        assert_eq!(sidebar[0].title, "v");
        let children = sidebar[0].children.as_ref().unwrap();
        assert_eq!(children[0].key, "a.v.leaf");
        assert_eq!(children[0].link.as_deref(), Some("/a.v.leaf"));
        assert_eq!(resolution.src_exclude, vec!["a.md"]);
    }

    #[test]
    fn test_imported_branch_below_entry_is_excluded() {
        let resolution = run(vec![
            entry("a", 1, json!(true)),
            doc("a.b", 1),
            doc("a.b.c", 1),
        ]);

        assert_eq!(resolution.src_exclude, vec!["a.md", "a.b.md"]);
        assert!(resolution.links_vocabulary.get("a.b").is_none());
        assert_eq!(resolution.links_vocabulary.get("a.b.c"), Some("T a.b.c"));
    }

    #[test]
    fn test_breadcrumbs_include_ancestors_and_self() {
        let resolution = run(vec![
            doc("top", 1),
            entry("top.doc", 1, json!(true)),
            doc("top.doc.part.page", 1),
        ]);

        let leaf = &resolution.leaf_nodes[0];
        assert_eq!(
            leaf.breadcrumbs,
            vec!["T top", "T top.doc", "part", "T top.doc.part.page"]
        );
    }

    #[test]
    fn test_leaf_list_in_traversal_order() {
        let resolution = run(vec![
            entry("a", 2, json!(true)),
            doc("a.z", 1),
            doc("a.y", 2),
            entry("b", 1, json!(true)),
            doc("b.x", 1),
        ]);

        assert_eq!(leaf_keys(&resolution), vec!["b.x", "a.z", "a.y"]);
    }

    #[test]
    fn test_redirects_one_per_leaf() {
        let resolution = run(vec![
            entry("a", 1, json!(true)),
            doc("a.b", 1),
            doc("a.c", 2),
            doc("a.c.d", 1),
        ]);

        assert_eq!(resolution.redirects.len(), resolution.leaf_nodes.len());
        assert_eq!(resolution.redirects["id-a.b"], "/my-vault/a.b");
        assert_eq!(resolution.redirects["id-a.c.d"], "/my-vault/a.c.d");
        assert!(!resolution.redirects.contains_key("id-a.c"));
    }

    #[test]
    fn test_nodes_outside_entries_are_not_leaves() {
        let resolution = run(vec![doc("a", 1), doc("a.b", 1)]);

        assert!(resolution.leaf_nodes.is_empty());
        assert!(resolution.redirects.is_empty());
        assert!(resolution.links_vocabulary.is_empty());
        assert_eq!(resolution.src_exclude, vec!["a.md", "a.b.md"]);
    }

    #[test]
    fn test_nested_entry_config_below_root_is_ignored() {
        let resolution = run(vec![
            entry("a", 1, json!(true)),
            entry("a.b", 1, json!(true)),
            doc("a.b.c", 1),
        ]);

        assert_eq!(resolution.sidebar.len(), 1);
        assert!(resolution.sidebar.contains_key("a"));
    }

    #[test]
    fn test_nav_serializes_like_theme_config() {
        let resolution = run(vec![
            doc("g", 1),
            entry("g.a", 1, json!(true)),
            doc("g.a.b", 1),
        ]);

        let json = serde_json::to_value(&resolution.nav).unwrap();

        assert_eq!(
            json,
            json!([{"text": "T g", "items": [{"text": "T g.a", "link": "/g.a.b"}]}])
        );
    }

    #[test]
    fn test_sidebar_serialization_skips_unset_fields() {
        let resolution = run(vec![entry("a", 1, json!(true)), doc("a.b", 1)]);

        let json = serde_json::to_value(&resolution.sidebar).unwrap();

        assert_eq!(json, json!({"a": [{"key": "a.b", "text": "T a.b", "link": "/a.b"}]}));
    }

    #[test]
    fn test_leaf_serialization_flattens_node() {
        let resolution = run(vec![entry("a", 1, json!(true)), doc("a.b", 1)]);

        let json = serde_json::to_value(&resolution.leaf_nodes[0]).unwrap();

        assert_eq!(json["key"], "a.b");
        assert_eq!(json["uid"], "id-a.b");
        assert_eq!(json["breadcrumbs"], json!(["T a", "T a.b"]));
    }

    #[test]
    fn test_vocabulary_label_falls_back_to_key() {
        let resolution = run(vec![entry("a", 1, json!(true)), doc("a.b", 1)]);

        assert_eq!(resolution.links_vocabulary.label("a.b"), "T a.b");
        assert_eq!(resolution.links_vocabulary.label("unknown.key"), "unknown.key");
    }

    #[test]
    fn test_duplicate_uid_keeps_last_redirect() {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let resolution = run(vec![
            entry("a", 1, json!(true)),
            ImportedNode::new("a.b", "same", "B", epoch, epoch).with_order(1),
            ImportedNode::new("a.c", "same", "C", epoch, epoch).with_order(2),
        ]);

        assert_eq!(resolution.redirects.len(), 1);
        assert_eq!(resolution.redirects["same"], "/my-vault/a.c");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let nodes = vec![
            entry("a", 1, json!(true)),
            doc("a.b", 5),
            doc("a.c", 5),
            doc("d.e.f", 1),
        ];
        let mut reversed = nodes.clone();
        reversed.reverse();

        assert_eq!(run(nodes), run(reversed));
    }
}
