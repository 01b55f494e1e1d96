mod common;

use aggtree_core::{Aggregation, Aggregations};
use common::{identity, in_stock_filter, stats};
use proptest::prelude::*;

fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}", 1..5)
}

/// Build filter nodes along every proper prefix so the full path is injectable
fn scaffold(root: &mut dyn Aggregation, path: &[&str]) {
    for depth in 1..path.len() {
        root.inject_x(in_stock_filter(), &path[..depth]).unwrap();
    }
}

proptest! {
    #[test]
    fn prop_inject_then_select_returns_same_node(path in path_strategy()) {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        let mut root = in_stock_filter();
        scaffold(&mut *root, &path);

        let node = stats("x");
        let id = identity(&*node);
        root.inject(node, &path).unwrap();

        prop_assert_eq!(identity(root.select(&path).unwrap()), id);
    }

    #[test]
    fn prop_inject_x_is_idempotent(path in path_strategy()) {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        let mut root = in_stock_filter();
        scaffold(&mut *root, &path);

        let first = stats("first");
        let first_id = identity(&*first);
        root.inject_x(first, &path).unwrap();
        root.inject_x(stats("second"), &path).unwrap();

        prop_assert_eq!(identity(root.select(&path).unwrap()), first_id);
    }

    #[test]
    fn prop_pop_after_inject_removes_node(path in path_strategy()) {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        let mut root = in_stock_filter();
        scaffold(&mut *root, &path);

        let node = stats("x");
        let id = identity(&*node);
        root.inject(node, &path).unwrap();

        let popped = root.pop(&path).unwrap();
        prop_assert_eq!(identity(&*popped), id);
        prop_assert!(root.select(&path).is_none());
    }

    #[test]
    fn prop_collection_inject_select_pop(path in path_strategy()) {
        let path: Vec<&str> = path.iter().map(String::as_str).collect();
        let mut aggs = Aggregations::new();
        for depth in 1..path.len() {
            aggs.inject_x(in_stock_filter(), &path[..depth]).unwrap();
        }

        let node = stats("x");
        let id = identity(&*node);
        aggs.inject(node, &path).unwrap();
        prop_assert_eq!(identity(aggs.select(&path).unwrap()), id);

        let popped = aggs.pop(&path).unwrap();
        prop_assert_eq!(identity(&*popped), id);
        prop_assert!(aggs.select(&path).is_none());
    }
}
