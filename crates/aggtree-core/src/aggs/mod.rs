//! Concrete aggregation kinds
//!
//! Each kind stores its typed options, owns a navigation adapter, and renders
//! `{ "<kind>": { options }, "aggregations": { .. }, "meta": { .. } }`, where
//! the last two keys only appear when there is something to put in them.

pub mod diversified_sampler;
pub mod filter;
pub mod stats;
pub mod sum_bucket;
pub mod value_count;

mod values_source;

pub use diversified_sampler::DiversifiedSamplerAggregation;
pub use filter::FilterAggregation;
pub use stats::StatsAggregation;
pub use sum_bucket::{GapPolicy, SumBucketAggregation};
pub use value_count::ValueCountAggregation;
