use super::*;
use crate::lookml::{Dimension, DimensionType, TimeDatatype};
use lf_core::meta::Timeframe;

fn view_with_group(timeframes: Vec<Timeframe>) -> View {
    let mut view = View::new("orders", "`p`.`d`.`orders`");
    let mut group = DimensionGroup::new("created", "${TABLE}.created_at", TimeDatatype::Timestamp);
    group.timeframes = timeframes;
    view.dimension_groups.push(group);
    view
}

#[test]
fn test_scalar_colliding_with_timeframe_is_renamed() {
    let mut view = view_with_group(vec![Timeframe::Date, Timeframe::Time]);
    let mut created_date = Dimension::new("created_date", DimensionType::String, "${TABLE}.created_date");
    created_date.label = Some("Created Date (raw)".to_string());
    view.dimensions.push(created_date);
    view.dimensions
        .push(Dimension::new("status", DimensionType::String, "${TABLE}.status"));

    let renamed = resolve_conflicts(&mut view, "orders", "_conflict", true);

    assert_eq!(renamed, 1);
    let dim = view.dimension("created_date_conflict").unwrap();
    assert_eq!(dim.hidden, Some(true));
    assert_eq!(dim.sql, "${TABLE}.created_date");
    assert_eq!(dim.label.as_deref(), Some("Created Date (raw)"));
    assert_eq!(dim.dimension_type, DimensionType::String);
    assert!(view.dimension("status").unwrap().hidden.is_none());
    assert_eq!(view.dimension_groups[0].name, "created");
}

#[test]
fn test_group_base_name_is_reserved() {
    let mut view = view_with_group(vec![Timeframe::Date]);
    view.dimensions
        .push(Dimension::new("created", DimensionType::String, "${TABLE}.created"));

    resolve_conflicts(&mut view, "orders", "_conflict", true);
    assert!(view.dimension("created_conflict").is_some());
}

#[test]
fn test_custom_suffix_without_hiding() {
    let mut view = view_with_group(vec![Timeframe::Date]);
    view.dimensions
        .push(Dimension::new("created_date", DimensionType::String, "${TABLE}.x"));

    resolve_conflicts(&mut view, "orders", "_scalar", false);
    let dim = view.dimension("created_date_scalar").unwrap();
    assert_eq!(dim.hidden, None);
}

#[test]
fn test_numeric_suffix_when_still_colliding() {
    let mut view = view_with_group(vec![Timeframe::Date]);
    view.dimensions
        .push(Dimension::new("created_date", DimensionType::String, "${TABLE}.a"));
    view.dimensions.push(Dimension::new(
        "created_date_conflict",
        DimensionType::String,
        "${TABLE}.b",
    ));

    resolve_conflicts(&mut view, "orders", "_conflict", true);
    let names: Vec<&str> = view.dimensions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["created_date_conflict_2", "created_date_conflict"]);
}

#[test]
fn test_duplicate_names_made_unique() {
    let mut view = View::new("v", "t");
    view.dimensions
        .push(Dimension::new("zip_code", DimensionType::String, "${TABLE}.`Zip Code`"));
    view.dimensions
        .push(Dimension::new("zip_code", DimensionType::String, "${TABLE}.zip_code"));

    assert_eq!(resolve_conflicts(&mut view, "m", "_conflict", true), 1);
    assert!(view.dimension("zip_code").is_some());
    assert!(view.dimension("zip_code_2").is_some());
}

#[test]
fn test_no_dimension_left_in_reserved_set() {
    let mut view = view_with_group(Timeframe::ALL.to_vec());
    for tf in Timeframe::ALL {
        let name = format!("created_{}", tf.as_str());
        view.dimensions
            .push(Dimension::new(&name, DimensionType::String, format!("${{TABLE}}.{name}")));
    }

    resolve_conflicts(&mut view, "orders", "_conflict", true);
    let reserved = reserved_names(&view.dimension_groups);
    for dim in &view.dimensions {
        assert!(!reserved.contains(&dim.name), "{}", dim.name);
        assert!(dim.is_hidden());
    }
}
