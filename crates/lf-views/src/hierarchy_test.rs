use super::*;
use crate::test_utils::column_map as columns;

#[test]
fn test_synthesizes_missing_parents() {
    let cols = columns(&[("customer.address.city", "STRING"), ("id", "INT64")]);
    let tree = ColumnHierarchy::build(&cols);

    assert_eq!(tree.len(), 4);
    let customer = tree.get(&ColumnPath::new("customer")).unwrap();
    assert!(customer.is_synthesized());
    assert!(!customer.is_array);
    assert_eq!(customer.children, vec![ColumnPath::new("customer.address")]);

    let city = tree.get(&ColumnPath::new("customer.address.city")).unwrap();
    assert!(!city.is_synthesized());
    assert!(city.children.is_empty());
}

#[test]
fn test_children_are_immediate_and_unique() {
    let cols = columns(&[
        ("items", "ARRAY<STRUCT<id INT64, sku STRING>>"),
        ("items.id", "INT64"),
        ("items.sku", "STRING"),
        ("items.dims.w", "INT64"),
        ("items.dims.h", "INT64"),
    ]);
    let tree = ColumnHierarchy::build(&cols);

    let items = ColumnPath::new("items");
    assert_eq!(
        tree.children(&items),
        &[
            ColumnPath::new("items.dims"),
            ColumnPath::new("items.id"),
            ColumnPath::new("items.sku")
        ]
    );
    assert!(tree.get(&items).unwrap().is_array);
    assert_eq!(tree.children(&ColumnPath::new("items.dims")).len(), 2);
}

#[test]
fn test_array_paths() {
    let cols = columns(&[
        ("orders", "ARRAY<STRUCT<x INT64>>"),
        ("orders.items", "ARRAY<STRUCT<sku STRING>>"),
        ("orders.items.sku", "STRING"),
        ("tags", "ARRAY<STRING>"),
        ("name", "STRING"),
    ]);
    let tree = ColumnHierarchy::build(&cols);
    assert_eq!(
        tree.array_paths(),
        vec![
            ColumnPath::new("orders"),
            ColumnPath::new("orders.items"),
            ColumnPath::new("tags")
        ]
    );
    assert_eq!(tree.roots().count(), 3);
}

#[test]
fn test_malformed_paths_not_inserted() {
    let cols = columns(&[("a..b", "STRING"), ("c.", "STRING"), ("ok", "STRING")]);
    let tree = ColumnHierarchy::build(&cols);
    assert_eq!(tree.len(), 1);
    assert!(tree.contains(&ColumnPath::new("ok")));
    assert!(!tree.contains(&ColumnPath::new("a")));
}

#[test]
fn test_empty() {
    let cols = BTreeMap::new();
    let tree = ColumnHierarchy::build(&cols);
    assert!(tree.is_empty());
    assert!(tree.array_paths().is_empty());
}
