use std::fmt;

use serde_json::{json, Map, Value};

use crate::errors::{AggTreeError, Result};

/// A query usable as the filter of a bucket aggregation
pub trait Query: fmt::Debug {
    /// Render the query DSL fragment
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` if the query is not fully configured.
    fn source(&self) -> Result<Value>;
}

/// Matches every document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchAllQuery;

impl Query for MatchAllQuery {
    fn source(&self) -> Result<Value> {
        Ok(json!({ "match_all": {} }))
    }
}

/// Exact match of a single field value
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    field: String,
    value: Value,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl Query for TermQuery {
    fn source(&self) -> Result<Value> {
        if self.field.is_empty() {
            return Err(AggTreeError::InvalidQuery {
                reason: "term query requires a field".to_string(),
            });
        }
        Ok(json!({ "term": single_field(&self.field, self.value.clone()) }))
    }
}

/// Bounded range over a single field
#[derive(Debug, Clone, PartialEq)]
pub struct RangeQuery {
    field: String,
    bounds: Map<String, Value>,
}

impl RangeQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            bounds: Map::new(),
        }
    }

    pub fn gt(self, value: impl Into<Value>) -> Self {
        self.bound("gt", value)
    }

    pub fn gte(self, value: impl Into<Value>) -> Self {
        self.bound("gte", value)
    }

    pub fn lt(self, value: impl Into<Value>) -> Self {
        self.bound("lt", value)
    }

    pub fn lte(self, value: impl Into<Value>) -> Self {
        self.bound("lte", value)
    }

    fn bound(mut self, op: &str, value: impl Into<Value>) -> Self {
        self.bounds.insert(op.to_string(), value.into());
        self
    }
}

impl Query for RangeQuery {
    fn source(&self) -> Result<Value> {
        if self.field.is_empty() {
            return Err(AggTreeError::InvalidQuery {
                reason: "range query requires a field".to_string(),
            });
        }
        if self.bounds.is_empty() {
            return Err(AggTreeError::InvalidQuery {
                reason: format!("range query on {} has no bounds", self.field),
            });
        }
        Ok(json!({ "range": single_field(&self.field, Value::Object(self.bounds.clone())) }))
    }
}

fn single_field(field: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(field.to_string(), value);
    Value::Object(map)
}

/// A pre-built query DSL fragment passed through untouched
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery(pub Value);

impl Query for RawQuery {
    fn source(&self) -> Result<Value> {
        match self.0 {
            Value::Object(_) => Ok(self.0.clone()),
            _ => Err(AggTreeError::InvalidQuery {
                reason: "raw query must be a JSON object".to_string(),
            }),
        }
    }
}
