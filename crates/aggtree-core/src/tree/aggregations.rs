//! Named top-level aggregations without a shared parent node
//!
//! A search request usually carries several independent aggregations side by
//! side. [`Aggregations`] addresses them with the same paths a node uses for
//! its children, with one difference: there is no node above the collection
//! to create entries through, so deep injection requires the first segment
//! to exist already.

use std::collections::{BTreeMap, HashMap};

use super::{is_nil_tree, Aggregation, Source, Subs};
use crate::errors::{AggTreeError, Result};

/// Collection of independently owned aggregation trees keyed by name
#[derive(Debug, Default)]
pub struct Aggregations {
    aggs: Subs,
}

impl Aggregations {
    pub fn new() -> Self {
        Self {
            aggs: HashMap::new(),
        }
    }

    /// Builder-style single-level insert
    pub fn with(mut self, name: impl Into<String>, agg: Box<dyn Aggregation>) -> Self {
        self.aggs.insert(name.into(), agg);
        self
    }

    /// The live top-level map
    pub fn get_all(&self) -> &Subs {
        &self.aggs
    }

    pub fn len(&self) -> usize {
        self.aggs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aggs.is_empty()
    }

    /// Top-level names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.aggs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Export every entry, see [`export`]
    pub fn export(&self) -> BTreeMap<String, Option<&dyn Source>> {
        export(Some(self))
    }

    /// Look up an aggregation, descending through the entry named by the first segment
    pub fn select(&self, path: &[&str]) -> Option<&dyn Aggregation> {
        let (first, rest) = path.split_first()?;
        let base = self.aggs.get(*first)?;
        if rest.is_empty() {
            return Some(&**base);
        }
        base.select(rest)
    }

    pub fn select_mut(&mut self, path: &[&str]) -> Option<&mut dyn Aggregation> {
        let (first, rest) = path.split_first()?;
        let base = self.aggs.get_mut(*first)?;
        if rest.is_empty() {
            return Some(&mut **base);
        }
        base.select_mut(rest)
    }

    /// Remove an aggregation and hand ownership to the caller
    ///
    /// Only a single-segment path removes a top-level entry. Longer paths are
    /// forwarded to the entry's own `pop`, so the entry itself always stays.
    pub fn pop(&mut self, path: &[&str]) -> Option<Box<dyn Aggregation>> {
        let (first, rest) = path.split_first()?;
        if rest.is_empty() {
            return self.aggs.remove(*first);
        }
        self.aggs.get_mut(*first)?.pop(rest)
    }

    /// See [`inject`]
    ///
    /// # Errors
    ///
    /// * `NoPath` - If `path` is empty
    /// * `AggIsNotInjectable` - If the first segment of a deep path is absent or
    ///   names an entry that exports nothing
    /// * any error returned by the entry's own `inject`
    pub fn inject(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        inject(Some(self), sub, path)
    }

    /// See [`inject_x`]
    ///
    /// # Errors
    ///
    /// Same as [`Aggregations::inject`].
    pub fn inject_x(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        inject_x(Some(self), sub, path)
    }
}

/// Export every entry of a possibly absent collection
///
/// Each key maps to the entry's own [`Aggregation::export`], so a degenerate
/// entry keeps its key with `None`. An absent collection exports an empty map.
pub fn export(aggs: Option<&Aggregations>) -> BTreeMap<String, Option<&dyn Source>> {
    let Some(aggs) = aggs else {
        return BTreeMap::new();
    };

    aggs.aggs
        .iter()
        .map(|(name, agg)| (name.clone(), agg.export()))
        .collect()
}

/// Insert or overwrite an aggregation in a possibly absent collection
///
/// # Errors
///
/// * `AggIsNotInjectable` - If the collection is absent, or a deep path starts
///   at a name the collection does not hold or whose entry exports nothing
/// * `NoPath` - If `path` is empty
/// * any error returned by the entry's own `inject`
pub fn inject(
    aggs: Option<&mut Aggregations>,
    sub: Box<dyn Aggregation>,
    path: &[&str],
) -> Result<()> {
    let Some(aggs) = aggs else {
        return Err(AggTreeError::not_injectable(path));
    };
    let Some((first, rest)) = path.split_first() else {
        return Err(AggTreeError::NoPath);
    };

    if rest.is_empty() {
        tracing::debug!(path = %first, "inject top-level aggregation");
        aggs.aggs.insert((*first).to_string(), sub);
        return Ok(());
    }

    match aggs.aggs.get_mut(*first) {
        Some(base) if !is_nil_tree(Some(&**base)) => base.inject(sub, rest),
        _ => Err(AggTreeError::not_injectable(&path[..1])),
    }
}

/// Like [`inject`], but leaves an existing entry untouched
///
/// At the top level only key presence counts. Deeper paths defer to the
/// entry's own `inject_x` and, like [`inject`], refuse an entry that
/// exports nothing.
///
/// # Errors
///
/// Same as [`inject`].
pub fn inject_x(
    aggs: Option<&mut Aggregations>,
    sub: Box<dyn Aggregation>,
    path: &[&str],
) -> Result<()> {
    let Some(aggs) = aggs else {
        return Err(AggTreeError::not_injectable(path));
    };
    let Some((first, rest)) = path.split_first() else {
        return Err(AggTreeError::NoPath);
    };

    if rest.is_empty() {
        aggs.aggs.entry((*first).to_string()).or_insert(sub);
        return Ok(());
    }

    match aggs.aggs.get_mut(*first) {
        Some(base) if !is_nil_tree(Some(&**base)) => base.inject_x(sub, rest),
        _ => Err(AggTreeError::not_injectable(&path[..1])),
    }
}
