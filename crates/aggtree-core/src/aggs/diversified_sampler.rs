use serde_json::{Map, Value};

use crate::errors::Result;
use crate::impl_aggregation;
use crate::model::{Metadata, Script};
use crate::tree::{render_meta, Aggregation, Source, Tree};

/// Filtering aggregation that limits sub-aggregations to a sample of top-scoring documents
///
/// Unlike a plain sampler, it caps how many matches may share a common value
/// (such as an author), which keeps the sample diverse.
///
/// ```json
/// { "diversified_sampler": { "shard_size": 200, "field": "author" } }
/// ```
#[derive(Debug, Default)]
pub struct DiversifiedSamplerAggregation {
    tree: Tree,
    field: Option<String>,
    script: Option<Script>,
    shard_size: Option<u32>,
    max_docs_per_value: Option<u32>,
    execution_hint: Option<String>,
    meta: Metadata,
}

impl DiversifiedSamplerAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field whose values are used to de-duplicate the sample
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn script(mut self, script: Script) -> Self {
        self.script = Some(script);
        self
    }

    /// Maximum number of docs sampled on each shard
    pub fn shard_size(mut self, shard_size: u32) -> Self {
        self.shard_size = Some(shard_size);
        self
    }

    pub fn max_docs_per_value(mut self, max_docs_per_value: u32) -> Self {
        self.max_docs_per_value = Some(max_docs_per_value);
        self
    }

    /// One of `map`, `global_ordinals`, `bytes_hash`
    pub fn execution_hint(mut self, hint: impl Into<String>) -> Self {
        self.execution_hint = Some(hint.into());
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

impl Source for DiversifiedSamplerAggregation {
    fn source(&self) -> Result<Value> {
        let mut opts = Map::new();
        if let Some(ref field) = self.field {
            opts.insert("field".to_string(), field.clone().into());
        }
        if let Some(ref script) = self.script {
            opts.insert("script".to_string(), script.source()?);
        }
        if let Some(shard_size) = self.shard_size {
            opts.insert("shard_size".to_string(), shard_size.into());
        }
        if let Some(max_docs_per_value) = self.max_docs_per_value {
            opts.insert("max_docs_per_value".to_string(), max_docs_per_value.into());
        }
        if let Some(ref hint) = self.execution_hint {
            opts.insert("execution_hint".to_string(), hint.clone().into());
        }

        let mut source = Map::new();
        source.insert("diversified_sampler".to_string(), Value::Object(opts));
        self.tree.render_subs(&mut source)?;
        render_meta(&mut source, &self.meta);

        Ok(Value::Object(source))
    }
}

impl_aggregation!(DiversifiedSamplerAggregation, tree);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggs::ValueCountAggregation;
    use serde_json::json;

    #[test]
    fn test_sampler_source() {
        let agg = DiversifiedSamplerAggregation::new()
            .field("author")
            .shard_size(200)
            .max_docs_per_value(3)
            .execution_hint("map")
            .sub_aggregation("count", Box::new(ValueCountAggregation::new().field("id")));

        assert_eq!(
            agg.source().unwrap(),
            json!({
                "diversified_sampler": {
                    "field": "author",
                    "shard_size": 200,
                    "max_docs_per_value": 3,
                    "execution_hint": "map"
                },
                "aggregations": {
                    "count": { "value_count": { "field": "id" } }
                }
            })
        );
    }

    #[test]
    fn test_zero_shard_size_is_rendered() {
        let agg = DiversifiedSamplerAggregation::new().shard_size(0);
        assert_eq!(
            agg.source().unwrap(),
            json!({ "diversified_sampler": { "shard_size": 0 } })
        );
    }
}
