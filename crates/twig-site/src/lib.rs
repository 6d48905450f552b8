//! Navigation resolution for twig.
//!
//! Turns a flat set of documents keyed by dot-delimited paths (`a.b.c`) into
//! the tables a documentation theme needs:
//!
//! - [`NavItem`] tree for the top navigation
//! - [`SidebarItem`] trees per sidebar root
//! - [`LinkVocabulary`] for wiki-link labels
//! - [`LeafDocument`] list with breadcrumbs
//! - redirect table (uid → link) and the list of source files that are only
//!   represented through navigation
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use twig_site::{Site, TracingSink};
//! use twig_storage::MockStorage;
//!
//! let storage = MockStorage::new().with_document("guide.intro", "Intro");
//! let site = Site::load(&storage, "/docs/", &TracingSink)?;
//!
//! for item in &site.resolution().nav {
//!     println!("{}", item.title());
//! }
//! # Ok(())
//! # }
//! ```

mod diagnostics;
mod entry;
mod error;
pub mod key;
mod node;
mod repository;
mod resolver;
mod site;
mod virtual_nodes;

pub use diagnostics::{CollectingSink, DiagnosticSink, TracingSink};
pub use entry::{DocEntryConfig, LandingPoint, resolve_entry_config};
pub use error::ResolveError;
pub use node::ResolvedNode;
pub use repository::NodeRepository;
pub use resolver::{LeafDocument, LinkVocabulary, NavItem, Resolution, SidebarItem, resolve};
pub use site::Site;
pub use virtual_nodes::{VirtualNode, synthesize_virtual_nodes};
