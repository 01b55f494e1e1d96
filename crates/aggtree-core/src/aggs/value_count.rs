use serde_json::{Map, Value};

use super::values_source::ValuesSource;
use crate::errors::Result;
use crate::impl_aggregation;
use crate::model::{Metadata, Script};
use crate::tree::{render_meta, Aggregation, Source, Tree};

/// Single-value metrics aggregation counting the values extracted from documents
///
/// Typically paired with another single-value metric, e.g. to know how many
/// values an average was computed over.
///
/// ```json
/// { "value_count": { "field": "grade" } }
/// ```
#[derive(Debug, Default)]
pub struct ValueCountAggregation {
    tree: Tree,
    values: ValuesSource,
    meta: Metadata,
}

impl ValueCountAggregation {
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

    pub fn meta(mut self, meta: Metadata) -> Self {
        self.meta = meta;
        self
    }
}

impl Source for ValueCountAggregation {
    fn source(&self) -> Result<Value> {
        let mut opts = Map::new();
        self.values.render_into(&mut opts)?;

        let mut source = Map::new();
        source.insert("value_count".to_string(), Value::Object(opts));
        self.tree.render_subs(&mut source)?;
        render_meta(&mut source, &self.meta);

        Ok(Value::Object(source))
    }
}

impl_aggregation!(ValueCountAggregation, tree);
