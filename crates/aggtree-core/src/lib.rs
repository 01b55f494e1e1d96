//! aggtree core - path-addressable aggregation trees
//!
//! Aggregation builders are normally write-only: once a sub-aggregation is
//! attached it cannot be found again from the root. This crate keeps every
//! node addressable by a path of names so callers can:
//! - inject a node at any depth (overwriting, or only if absent)
//! - select a node by path, read-only or for mutation
//! - pop a node out of the tree, taking ownership of it
//! - export a node, or a whole collection, for rendering
//!
//! Concrete aggregation kinds live in [`aggs`], rendering in [`render`].

pub mod aggs;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;
pub mod tree;

pub use aggtree_core_types as core_types;

// Re-export commonly used types
pub use errors::{AggTreeError, ExError, ExErrorKind, Result};
pub use model::{Metadata, Query, Script};
pub use render::{render_aggregation, render_aggregations, to_json_string};
pub use tree::{is_nil_tree, Aggregation, Aggregations, Leaf, Source, Subs, Tree};
