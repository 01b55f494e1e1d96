pub mod metadata;
pub mod query;
pub mod script;

pub use metadata::Metadata;
pub use query::{MatchAllQuery, Query, RangeQuery, RawQuery, TermQuery};
pub use script::{Script, ScriptType};
