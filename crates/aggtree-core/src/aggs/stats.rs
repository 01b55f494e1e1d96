use serde_json::{Map, Value};

use super::values_source::ValuesSource;
use crate::errors::Result;
use crate::impl_aggregation;
use crate::model::{Metadata, Script};
use crate::tree::{render_meta, Aggregation, Source, Tree};

/// Multi-value metrics aggregation computing min, max, sum, count and avg
///
/// Values come either from a numeric field or from a script.
///
/// ```json
/// { "stats": { "field": "grade" } }
/// ```
#[derive(Debug, Default)]
pub struct StatsAggregation {
    tree: Tree,
    values: ValuesSource,
    meta: Metadata,
}

impl StatsAggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.values.field = Some(field.into());
        self
    }

    pub fn script(mut self, script: Script) -> Self {
        self.values.script = Some(script);
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.values.format = Some(format.into());
        self
    }

    pub fn sub_aggregation(mut self, name: impl Into<String>, sub: Box<dyn Aggregation>) -> Self {
        self.tree.insert(name, sub);
        self
    }

    /// Metadata echoed back in the response
    pub fn meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }
}

impl Source for StatsAggregation {
    fn source(&self) -> Result<Value> {
        let mut opts = Map::new();
        self.values.render_into(&mut opts)?;

        let mut source = Map::new();
        source.insert("stats".to_string(), Value::Object(opts));
        self.tree.render_subs(&mut source)?;
        render_meta(&mut source, &self.meta);

        Ok(Value::Object(source))
    }
}

impl_aggregation!(StatsAggregation, tree);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_stats_source() {
        let agg = StatsAggregation::new().field("grade").format("0.00");
        assert_eq!(
            agg.source().unwrap(),
            json!({ "stats": { "field": "grade", "format": "0.00" } })
        );
    }

    #[test]
    fn test_stats_with_script_and_meta() {
        let agg = StatsAggregation::new()
            .script(Script::new("doc['grade'].value"))
            .meta(Metadata::new().with("k", "v"));
        assert_eq!(
            agg.source().unwrap(),
            json!({
                "stats": { "script": "doc['grade'].value" },
                "meta": { "k": "v" }
            })
        );
    }
}
