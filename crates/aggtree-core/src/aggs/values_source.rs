use serde_json::{Map, Value};

use crate::errors::Result;
use crate::model::Script;

/// Options shared by metrics aggregations that read values from documents
#[derive(Debug, Clone, Default)]
pub(crate) struct ValuesSource {
    pub(crate) field: Option<String>,
    pub(crate) script: Option<Script>,
    pub(crate) format: Option<String>,
}

impl ValuesSource {
    /// Write the configured options into `opts`
    pub(crate) fn render_into(&self, opts: &mut Map<String, Value>) -> Result<()> {
        if let Some(ref field) = self.field {
            opts.insert("field".to_string(), field.clone().into());
        }
        if let Some(ref script) = self.script {
            opts.insert("script".to_string(), script.source()?);
        }
        if let Some(ref format) = self.format {
            opts.insert("format".to_string(), format.clone().into());
        }
        Ok(())
    }
}
