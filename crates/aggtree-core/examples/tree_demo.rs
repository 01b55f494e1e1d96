//! Aggregation Tree Demonstration
//!
//! Builds a request's aggregations, then reshapes them by path after
//! construction, which plain write-only builders cannot do.
//!
//! Key concepts illustrated:
//! 1. Injecting at depth into an existing tree
//! 2. Idempotent `inject_x`
//! 3. Moving a node with `pop` + `inject`
//! 4. Rendering the final document
//!
//! Run with `RUST_LOG=aggtree_core=debug` to see the navigation events.

use aggtree_core::aggs::{
    DiversifiedSamplerAggregation, FilterAggregation, StatsAggregation, SumBucketAggregation,
    ValueCountAggregation,
};
use aggtree_core::logging_facility::{init, Profile};
use aggtree_core::model::{Metadata, RangeQuery};
use aggtree_core::{to_json_string, Aggregations};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::Development);

    println!("=== Aggregation Tree Demo ===\n");

    // ===== Part 1: Build =====
    let mut aggs = Aggregations::new()
        .with(
            "in_stock",
            Box::new(FilterAggregation::new().filter(RangeQuery::new("stock").gt(0))),
        )
        .with(
            "sample",
            Box::new(
                DiversifiedSamplerAggregation::new()
                    .field("author")
                    .shard_size(200),
            ),
        );
    println!("Top-level aggregations: {:?}", aggs.names());

    // ===== Part 2: Inject at depth =====
    aggs.inject(
        Box::new(StatsAggregation::new().field("price")),
        &["in_stock", "price_stats"],
    )?;
    aggs.inject(
        Box::new(ValueCountAggregation::new().field("id")),
        &["sample", "count"],
    )?;

    // A second ensure-present call leaves the first node in place
    aggs.inject_x(
        Box::new(ValueCountAggregation::new().field("other")),
        &["sample", "count"],
    )?;

    // Missing first segment is refused rather than created
    if let Err(err) = aggs.inject(Box::new(StatsAggregation::new()), &["missing", "x"]) {
        println!("Refused: {err}");
    }

    // ===== Part 3: Move a node =====
    if let Some(node) = aggs.pop(&["in_stock", "price_stats"]) {
        aggs.inject(node, &["sample", "price_stats"])?;
        println!("Moved price_stats under sample");
    }

    aggs.inject(
        Box::new(
            SumBucketAggregation::new()
                .buckets_path(["sample>price_stats.sum"])
                .meta(Metadata::new().with("note", "demo")),
        ),
        &["total_price"],
    )?;

    if let Some(sample) = aggs.select(&["sample"]) {
        println!("sample has {} children", sample.get_all_subs().len());
    }

    // ===== Part 4: Render =====
    println!("\n{}", to_json_string(&aggs, true)?);

    Ok(())
}
