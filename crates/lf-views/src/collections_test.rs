use super::*;
use crate::test_utils::column_map as columns;
use std::collections::BTreeSet;

fn keys<V>(map: &BTreeMap<ColumnPath, V>) -> Vec<&str> {
    map.keys().map(|k| k.as_str()).collect()
}

fn p(path: &str) -> ColumnPath {
    ColumnPath::new(path)
}

#[test]
fn test_simple_main_view() {
    let cols = columns(&[("id", "INT64"), ("name", "STRING")]);
    let collections = ColumnCollections::from_columns(&cols, &[]);
    assert_eq!(keys(&collections.main), vec!["id", "name"]);
    assert!(collections.nested.is_empty());
    assert!(collections.excluded.is_empty());
}

#[test]
fn test_excluded_struct_parent() {
    let cols = columns(&[
        ("address", "STRUCT<city STRING, state STRING>"),
        ("address.city", "STRING"),
        ("address.state", "STRING"),
    ]);
    let collections = ColumnCollections::from_columns(&cols, &[]);
    assert_eq!(keys(&collections.excluded), vec!["address"]);
    assert_eq!(keys(&collections.main), vec!["address.city", "address.state"]);
    assert!(collections.nested.is_empty());
}

#[test]
fn test_array_with_children() {
    let cols = columns(&[
        ("items", "ARRAY<STRUCT<id INT64, sku STRING>>"),
        ("items.id", "INT64"),
        ("items.sku", "STRING"),
    ]);
    let collections = ColumnCollections::from_columns(&cols, &[]);
    assert_eq!(keys(&collections.nested), vec!["items"]);
    assert_eq!(
        keys(&collections.nested[&p("items")]),
        vec!["items", "items.id", "items.sku"]
    );
    assert!(collections.main.is_empty());
}

#[test]
fn test_nested_array_appears_in_both_bags() {
    let cols = columns(&[
        ("orders", "ARRAY<STRUCT<items ARRAY<STRUCT<sku STRING>>>>"),
        ("orders.items", "ARRAY<STRUCT<sku STRING>>"),
        ("orders.items.sku", "STRING"),
    ]);
    let collections = ColumnCollections::from_columns(&cols, &[]);

    assert_eq!(
        keys(&collections.nested[&p("orders.items")]),
        vec!["orders.items", "orders.items.sku"]
    );
    assert_eq!(
        keys(&collections.nested[&p("orders")]),
        vec!["orders", "orders.items"]
    );
    assert!(!collections.nested[&p("orders")].contains_key(&p("orders.items.sku")));
}

#[test]
fn test_childless_array() {
    let cols = columns(&[("tags", "ARRAY<STRING>")]);
    let collections = ColumnCollections::from_columns(&cols, &[]);
    assert_eq!(keys(&collections.nested[&p("tags")]), vec!["tags"]);
}

#[test]
fn test_depth_filtering_keeps_bags() {
    let cols = columns(&[
        ("a", "STRUCT<b STRUCT<c ARRAY<INT64>>>"),
        ("a.b", "STRUCT<c ARRAY<INT64>>"),
        ("a.b.c", "ARRAY<INT64>"),
        ("w", "STRUCT<x STRUCT<y STRUCT<z ARRAY<INT64>>>>"),
        ("w.x", "STRUCT<y STRUCT<z ARRAY<INT64>>>"),
        ("w.x.y", "STRUCT<z ARRAY<INT64>>"),
        ("w.x.y.z", "ARRAY<INT64>"),
    ]);
    let collections = ColumnCollections::from_columns(&cols, &[]);

    assert_eq!(keys(&collections.nested), vec!["a.b.c", "w.x.y.z"]);
    let emitted: Vec<&str> = collections.emitted_owners(3).map(|o| o.as_str()).collect();
    assert_eq!(emitted, vec!["a.b.c"]);
    let skipped: Vec<&str> = collections.skipped_owners(3).map(|o| o.as_str()).collect();
    assert_eq!(skipped, vec!["w.x.y.z"]);
}

#[test]
fn test_partition_invariant() {
    let cols = columns(&[
        ("id", "INT64"),
        ("customer", "STRUCT<name STRING>"),
        ("customer.name", "STRING"),
        ("orders", "ARRAY<STRUCT<items ARRAY<STRUCT<sku STRING>>>>"),
        ("orders.status", "STRING"),
        ("orders.items", "ARRAY<STRUCT<sku STRING>>"),
        ("orders.items.sku", "STRING"),
        ("orders.items.meta.note", "STRING"),
        ("tags", "ARRAY<STRING>"),
    ]);
    let collections = ColumnCollections::from_columns(&cols, &[]);

    let all: BTreeSet<&ColumnPath> = cols.keys().collect();
    let mut seen: BTreeSet<&ColumnPath> = BTreeSet::new();
    let mut placements = 0;
    for path in collections.main.keys().chain(collections.excluded.keys()) {
        seen.insert(path);
        placements += 1;
    }
    for (owner, bag) in &collections.nested {
        for path in bag.keys() {
            // a child array's copy in its parent's bag is the only duplicate
            if path != owner && collections.nested.contains_key(path) {
                continue;
            }
            assert!(seen.insert(path), "{path} placed twice");
            placements += 1;
        }
    }
    assert_eq!(seen, all);
    assert_eq!(placements, cols.len());
    assert_eq!(collections.column_count(), cols.len());
}
