use serde_json::{Map, Value};

use crate::errors::Result;
use crate::impl_aggregation;
use crate::model::Metadata;
use crate::tree::{render_meta, Leaf, Source};

/// What a pipeline aggregation does when a bucket in the series has no value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GapPolicy {
    InsertZeros,
    Skip,
}

impl GapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapPolicy::InsertZeros => "insert_zeros",
            GapPolicy::Skip => "skip",
        }
    }
}

/// Sibling pipeline aggregation summing a metric across the buckets of another aggregation
///
/// The metric must be numeric and the sibling must be multi-bucket. Being a
/// pipeline aggregation it never has children of its own.
#[derive(Debug, Default)]
pub struct SumBucketAggregation {
    leaf: Leaf,
    format: Option<String>,
    gap_policy: Option<GapPolicy>,
    buckets_paths: Vec<String>,
    meta: Metadata,
}

impl SumBucketAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn gap_policy(mut self, gap_policy: GapPolicy) -> Self {
        self.gap_policy = Some(gap_policy);
        self
    }

    pub fn gap_insert_zeros(self) -> Self {
        self.gap_policy(GapPolicy::InsertZeros)
    }

    pub fn gap_skip(self) -> Self {
        self.gap_policy(GapPolicy::Skip)
    }

    /// Append paths to the buckets this aggregation reads
    pub fn buckets_path<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.buckets_paths.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }
}

impl Source for SumBucketAggregation {
    fn source(&self) -> Result<Value> {
        let mut params = Map::new();
        if let Some(ref format) = self.format {
            params.insert("format".to_string(), format.clone().into());
        }
        if let Some(gap_policy) = self.gap_policy {
            params.insert("gap_policy".to_string(), gap_policy.as_str().into());
        }
        match self.buckets_paths.as_slice() {
            [] => {}
            [single] => {
                params.insert("buckets_path".to_string(), single.clone().into());
            }
            many => {
                params.insert("buckets_path".to_string(), many.to_vec().into());
            }
        }

        let mut source = Map::new();
        source.insert("sum_bucket".to_string(), Value::Object(params));
        render_meta(&mut source, &self.meta);

        Ok(Value::Object(source))
    }
}

impl_aggregation!(SumBucketAggregation, leaf);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggs::StatsAggregation;
    use crate::errors::AggTreeError;
    use crate::tree::Aggregation;
    use serde_json::json;

    #[test]
    fn test_single_buckets_path_is_a_string() {
        let agg = SumBucketAggregation::new()
            .buckets_path(["sales_per_month>sales"])
            .gap_skip();
        assert_eq!(
            agg.source().unwrap(),
            json!({
                "sum_bucket": {
                    "gap_policy": "skip",
                    "buckets_path": "sales_per_month>sales"
                }
            })
        );
    }

    #[test]
    fn test_many_buckets_paths_are_an_array() {
        let agg = SumBucketAggregation::new()
            .buckets_path(["a>x"])
            .buckets_path(["b>y"])
            .format("0.0")
            .gap_insert_zeros();
        assert_eq!(
            agg.source().unwrap(),
            json!({
                "sum_bucket": {
                    "format": "0.0",
                    "gap_policy": "insert_zeros",
                    "buckets_path": ["a>x", "b>y"]
                }
            })
        );
    }

    #[test]
    fn test_sum_bucket_holds_no_children() {
        let mut agg = SumBucketAggregation::new();
        let result = agg.inject(Box::new(StatsAggregation::new()), &["inner"]);
        assert!(matches!(result, Err(AggTreeError::AggIsNotInjectable { .. })));
        assert!(agg.get_all_subs().is_empty());
        assert!(agg.select(&["inner"]).is_none());
        assert!(agg.export().is_some());
    }
}
