//! Path-addressable aggregation trees
//!
//! Every aggregation kind owns a [`Tree`] (or a [`Leaf`] when it can never
//! hold children) and exposes it through the [`Aggregation`] trait. A path is
//! a slice of child names walked one hop at a time from the node the call is
//! made on.
//!
//! None of the structures here lock. Structural mutation requires `&mut`
//! access, so callers that share a tree across threads must provide their
//! own synchronization around it.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

use crate::errors::{join_path, AggTreeError, Result};
use crate::model::Metadata;
use aggtree_core_types::schema::{KEY_AGGREGATIONS, KEY_META};

pub mod aggregations;

pub use aggregations::Aggregations;

/// Child storage of a single node
pub type Subs = HashMap<String, Box<dyn Aggregation>>;

/// The plain, non-addressable representation consumed by rendering
pub trait Source: fmt::Debug {
    /// Render this node's configuration, children included, as a JSON fragment
    ///
    /// # Errors
    ///
    /// Returns an error if the node's own configuration cannot be rendered,
    /// or if any child fails to render.
    fn source(&self) -> Result<Value>;
}

/// An aggregation node that knows how to navigate its own sub-tree
pub trait Aggregation: Source {
    /// The live child map of this node
    fn get_all_subs(&self) -> &Subs;

    /// Insert or overwrite a node at `path`
    ///
    /// # Errors
    ///
    /// * `NoPath` - If `path` is empty
    /// * `PathNotSelectable` - If a parent segment does not resolve to a present node
    /// * `AggIsNotInjectable` - If the receiving node cannot hold children
    fn inject(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()>;

    /// Insert a node at `path` only if nothing present is there yet
    ///
    /// # Errors
    ///
    /// Same as [`Aggregation::inject`].
    fn inject_x(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()>;

    /// Look up a descendant by path
    fn select(&self, path: &[&str]) -> Option<&dyn Aggregation>;

    /// Look up a descendant by path for mutation
    fn select_mut(&mut self, path: &[&str]) -> Option<&mut dyn Aggregation>;

    /// Remove a descendant by path and hand ownership to the caller
    fn pop(&mut self, path: &[&str]) -> Option<Box<dyn Aggregation>>;

    /// The plain representation of this node, if it wraps one
    fn export(&self) -> Option<&dyn Source>;
}

/// True when there is no node, or the node exports nothing
pub fn is_nil_tree(node: Option<&dyn Aggregation>) -> bool {
    match node {
        None => true,
        Some(node) => node.export().is_none(),
    }
}

/// Child map and navigation shared by every aggregation that nests
#[derive(Debug, Default)]
pub struct Tree {
    subs: Subs,
}

impl Tree {
    /// Create an adapter with no children
    pub fn new() -> Self {
        Self {
            subs: HashMap::new(),
        }
    }

    pub fn get_all_subs(&self) -> &Subs {
        &self.subs
    }

    /// Single-level insert used by the builder-style `sub_aggregation` setters
    pub fn insert(&mut self, name: impl Into<String>, sub: Box<dyn Aggregation>) {
        self.subs.insert(name.into(), sub);
    }

    pub fn inject(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        let Some((last, parents)) = path.split_last() else {
            return Err(AggTreeError::NoPath);
        };

        if parents.is_empty() {
            tracing::debug!(path = %last, "inject");
            self.subs.insert((*last).to_string(), sub);
            return Ok(());
        }

        let Some(cursor) = self.select_mut(parents) else {
            return Err(AggTreeError::path_not_selectable(parents));
        };
        if is_nil_tree(Some(&*cursor)) {
            return Err(AggTreeError::path_not_selectable(parents));
        }
        cursor.inject(sub, &[*last])
    }

    pub fn inject_x(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        if path.is_empty() {
            return Err(AggTreeError::NoPath);
        }

        if is_nil_tree(self.select(path)) {
            return self.inject(sub, path);
        }

        tracing::debug!(path = %join_path(path), "inject_x skipped, node present");
        Ok(())
    }

    pub fn select(&self, path: &[&str]) -> Option<&dyn Aggregation> {
        let (first, rest) = path.split_first()?;
        let sub = self.subs.get(*first)?;
        if rest.is_empty() {
            return Some(&**sub);
        }
        sub.select(rest)
    }

    pub fn select_mut(&mut self, path: &[&str]) -> Option<&mut dyn Aggregation> {
        let (first, rest) = path.split_first()?;
        let sub = self.subs.get_mut(*first)?;
        if rest.is_empty() {
            return Some(&mut **sub);
        }
        sub.select_mut(rest)
    }

    pub fn pop(&mut self, path: &[&str]) -> Option<Box<dyn Aggregation>> {
        let (first, rest) = path.split_first()?;
        if rest.is_empty() {
            let popped = self.subs.remove(*first);
            if popped.is_some() {
                tracing::debug!(path = %first, "pop");
            }
            return popped;
        }
        self.subs.get_mut(*first)?.pop(rest)
    }

    /// Render the children under the reserved `aggregations` key
    ///
    /// Nothing is written when there are no children.
    ///
    /// # Errors
    ///
    /// Propagates the first child rendering error unchanged.
    pub fn render_subs(&self, source: &mut Map<String, Value>) -> Result<()> {
        if self.subs.is_empty() {
            return Ok(());
        }

        let mut aggs = Map::new();
        for (name, sub) in &self.subs {
            aggs.insert(name.clone(), sub.source()?);
        }
        source.insert(KEY_AGGREGATIONS.to_string(), Value::Object(aggs));
        Ok(())
    }
}

/// Navigation for aggregations that never hold children
///
/// Pipeline aggregations sit beside the buckets they read from, so there is
/// nothing beneath them to address. Lookups always miss and injection fails.
#[derive(Debug, Default)]
pub struct Leaf {
    subs: Subs,
}

impl Leaf {
    pub fn new() -> Self {
        Self {
            subs: HashMap::new(),
        }
    }

    pub fn get_all_subs(&self) -> &Subs {
        &self.subs
    }

    pub fn inject(&mut self, _sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        if path.is_empty() {
            return Err(AggTreeError::NoPath);
        }
        Err(AggTreeError::not_injectable(path))
    }

    pub fn inject_x(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        self.inject(sub, path)
    }

    pub fn select(&self, _path: &[&str]) -> Option<&dyn Aggregation> {
        None
    }

    pub fn select_mut(&mut self, _path: &[&str]) -> Option<&mut dyn Aggregation> {
        None
    }

    pub fn pop(&mut self, _path: &[&str]) -> Option<Box<dyn Aggregation>> {
        None
    }
}

/// Render a non-empty metadata block under the reserved `meta` key
pub fn render_meta(source: &mut Map<String, Value>, meta: &Metadata) {
    if !meta.is_empty() {
        source.insert(KEY_META.to_string(), meta.to_value());
    }
}

/// Implement [`Aggregation`] for a kind by forwarding to its adapter field
///
/// The adapter is either a [`Tree`] or a [`Leaf`]. `export` always yields
/// the kind itself.
#[macro_export]
macro_rules! impl_aggregation {
    ($kind:ty, $adapter:ident) => {
        impl $crate::tree::Aggregation for $kind {
            fn get_all_subs(&self) -> &$crate::tree::Subs {
                self.$adapter.get_all_subs()
            }

            fn inject(
                &mut self,
                sub: Box<dyn $crate::tree::Aggregation>,
                path: &[&str],
            ) -> $crate::errors::Result<()> {
                self.$adapter.inject(sub, path)
            }

            fn inject_x(
                &mut self,
                sub: Box<dyn $crate::tree::Aggregation>,
                path: &[&str],
            ) -> $crate::errors::Result<()> {
                self.$adapter.inject_x(sub, path)
            }

            fn select(&self, path: &[&str]) -> Option<&dyn $crate::tree::Aggregation> {
                self.$adapter.select(path)
            }

            fn select_mut(
                &mut self,
                path: &[&str],
            ) -> Option<&mut dyn $crate::tree::Aggregation> {
                self.$adapter.select_mut(path)
            }

            fn pop(&mut self, path: &[&str]) -> Option<Box<dyn $crate::tree::Aggregation>> {
                self.$adapter.pop(path)
            }

            fn export(&self) -> Option<&dyn $crate::tree::Source> {
                Some(self)
            }
        }
    };
}
