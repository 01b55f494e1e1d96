use aggtree_core::aggs::{FilterAggregation, StatsAggregation, ValueCountAggregation};
use aggtree_core::model::RangeQuery;
use aggtree_core::{Aggregation, Result, Source, Subs, Tree};
use serde_json::Value;

/// A filter aggregation on `stock > 0`, the usual root for nesting tests
#[allow(dead_code)]
pub fn in_stock_filter() -> Box<FilterAggregation> {
    Box::new(FilterAggregation::new().filter(RangeQuery::new("stock").gt(0)))
}

#[allow(dead_code)]
pub fn stats(field: &str) -> Box<StatsAggregation> {
    Box::new(StatsAggregation::new().field(field))
}

#[allow(dead_code)]
pub fn value_count(field: &str) -> Box<ValueCountAggregation> {
    Box::new(ValueCountAggregation::new().field(field))
}

/// Address of the exported representation, used as node identity
///
/// Boxed nodes never move while the box is moved between maps, so the
/// address taken before an inject still identifies the node afterwards.
#[allow(dead_code)]
pub fn identity(agg: &dyn Aggregation) -> Option<*const ()> {
    agg.export()
        .map(|source| std::ptr::from_ref(source).cast::<()>())
}

/// A node that is present in a tree but wraps nothing exportable
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct HollowAggregation {
    tree: Tree,
}

impl Source for HollowAggregation {
    fn source(&self) -> Result<Value> {
        Ok(Value::Null)
    }
}

impl Aggregation for HollowAggregation {
    fn get_all_subs(&self) -> &Subs {
        self.tree.get_all_subs()
    }

    fn inject(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        self.tree.inject(sub, path)
    }

    fn inject_x(&mut self, sub: Box<dyn Aggregation>, path: &[&str]) -> Result<()> {
        self.tree.inject_x(sub, path)
    }

    fn select(&self, path: &[&str]) -> Option<&dyn Aggregation> {
        self.tree.select(path)
    }

    fn select_mut(&mut self, path: &[&str]) -> Option<&mut dyn Aggregation> {
        self.tree.select_mut(path)
    }

    fn pop(&mut self, path: &[&str]) -> Option<Box<dyn Aggregation>> {
        self.tree.pop(path)
    }

    fn export(&self) -> Option<&dyn Source> {
        None
    }
}
