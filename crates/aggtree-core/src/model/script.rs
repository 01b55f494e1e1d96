use serde_json::{Map, Value};

use crate::errors::{AggTreeError, Result};

/// Whether a script carries its body inline or refers to a stored script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScriptType {
    #[default]
    Inline,
    Stored,
}

/// A script attached to a values-source aggregation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    script: String,
    typ: ScriptType,
    lang: Option<String>,
    params: Map<String, Value>,
}

impl Script {
    /// Inline script with the given body
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    /// Reference to a stored script by id
    pub fn stored(id: impl Into<String>) -> Self {
        Self {
            script: id.into(),
            typ: ScriptType::Stored,
            ..Self::default()
        }
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn script_type(&self) -> ScriptType {
        self.typ
    }

    /// Render the script
    ///
    /// An inline script without lang or params collapses to its bare body.
    ///
    /// # Errors
    ///
    /// Returns `InvalidScript` if the body (or stored id) is blank.
    pub fn source(&self) -> Result<Value> {
        if self.script.trim().is_empty() {
            return Err(AggTreeError::InvalidScript {
                reason: "script body cannot be empty".to_string(),
            });
        }

        if self.typ == ScriptType::Inline && self.lang.is_none() && self.params.is_empty() {
            return Ok(Value::String(self.script.clone()));
        }

        let mut source = Map::new();
        match self.typ {
            ScriptType::Inline => source.insert("source".to_string(), self.script.clone().into()),
            ScriptType::Stored => source.insert("id".to_string(), self.script.clone().into()),
        };
        if let Some(ref lang) = self.lang {
            source.insert("lang".to_string(), lang.clone().into());
        }
        if !self.params.is_empty() {
            source.insert("params".to_string(), Value::Object(self.params.clone()));
        }
        Ok(Value::Object(source))
    }
}
