//! Rendering of aggregation trees into the JSON the search engine expects
//!
//! This is the operation boundary of the crate: each entry point logs
//! `start` / `end` / `end_error` events with the elapsed time. Rendering
//! errors from individual nodes propagate unchanged.

use serde_json::{Map, Value};

use crate::errors::Result;
use crate::tree::{aggregations, Aggregation, Aggregations};
use crate::{log_op_end, log_op_error, log_op_start};

/// Render every exported entry of a collection into a JSON object keyed by name
///
/// Entries that export nothing are skipped.
///
/// # Errors
///
/// Returns the first error produced by an entry's `source`.
pub fn render_aggregations(aggs: &Aggregations) -> Result<Value> {
    log_op_start!("render_aggregations", agg_count = aggs.len() as u64);
    let start = std::time::Instant::now();

    let result = render_aggregations_impl(aggs).map_err(|e| {
        log_op_error!(
            "render_aggregations",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "render_aggregations",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(result)
}

fn render_aggregations_impl(aggs: &Aggregations) -> Result<Value> {
    let mut rendered = Map::new();
    for (name, exported) in aggregations::export(Some(aggs)) {
        let Some(source) = exported else {
            tracing::debug!(agg_name = %name, "skipping aggregation that exports nothing");
            continue;
        };
        rendered.insert(name, source.source()?);
    }
    Ok(Value::Object(rendered))
}

/// Render a single aggregation through its exported representation
///
/// A node that exports nothing renders as `null`.
///
/// # Errors
///
/// Returns the error produced by the node's `source`.
pub fn render_aggregation(agg: &dyn Aggregation) -> Result<Value> {
    log_op_start!("render_aggregation", subs_len = agg.get_all_subs().len() as u64);
    let start = std::time::Instant::now();

    let result = match agg.export() {
        Some(source) => source.source(),
        None => Ok(Value::Null),
    }
    .map_err(|e| {
        log_op_error!(
            "render_aggregation",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64
        );
        e
    })?;

    log_op_end!(
        "render_aggregation",
        duration_ms = start.elapsed().as_millis() as u64
    );

    Ok(result)
}

/// Render a collection to a JSON string
///
/// # Errors
///
/// Returns rendering errors from [`render_aggregations`] or a
/// `Serialization` error if the document cannot be written.
pub fn to_json_string(aggs: &Aggregations, pretty: bool) -> Result<String> {
    let value = render_aggregations(aggs)?;
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}
