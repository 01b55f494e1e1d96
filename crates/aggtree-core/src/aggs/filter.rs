use serde_json::{Map, Value};

use crate::errors::{AggTreeError, Result};
use crate::impl_aggregation;
use crate::model::{Metadata, Query};
use crate::tree::{render_meta, Aggregation, Source, Tree};

/// Single bucket of all documents in the current context that match a filter
///
/// Often used to narrow the context of its sub-aggregations.
///
/// ```json
/// { "filter": { "range": { "stock": { "gt": 0 } } } }
/// ```
#[derive(Debug, Default)]
pub struct FilterAggregation {
    tree: Tree,
    filter: Option<Box<dyn Query>>,
    meta: Metadata,
}

impl FilterAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: impl Query + 'static) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn sub_aggregation(mut self, name: impl Into<String>, sub: Box<dyn Aggregation>) -> Self {
        self.tree.insert(name, sub);
        self
    }

    pub fn meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }
}

impl Source for FilterAggregation {
    fn source(&self) -> Result<Value> {
        let filter = self.filter.as_ref().ok_or_else(|| AggTreeError::MissingFilter {
            kind: "filter".to_string(),
        })?;

        let mut source = Map::new();
        source.insert("filter".to_string(), filter.source()?);
        self.tree.render_subs(&mut source)?;
        render_meta(&mut source, &self.meta);

        Ok(Value::Object(source))
    }
}

impl_aggregation!(FilterAggregation, tree);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggs::StatsAggregation;
    use crate::model::RangeQuery;
    use serde_json::json;

    #[test]
    fn test_filter_source_with_children() {
        let agg = FilterAggregation::new()
            .filter(RangeQuery::new("stock").gt(0))
            .sub_aggregation("avg_price", Box::new(StatsAggregation::new().field("price")));

        assert_eq!(
            agg.source().unwrap(),
            json!({
                "filter": { "range": { "stock": { "gt": 0 } } },
                "aggregations": {
                    "avg_price": { "stats": { "field": "price" } }
                }
            })
        );
    }

    #[test]
    fn test_missing_filter_fails() {
        let result = FilterAggregation::new().source();
        assert_eq!(
            result,
            Err(AggTreeError::MissingFilter {
                kind: "filter".to_string()
            })
        );
    }
}
