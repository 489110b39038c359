use super::*;
use crate::composer::{build_model_views, ViewOptions};
use crate::lookml::{DimensionType, TimeDatatype};
use crate::test_utils::model;
use lf_core::meta::{MeasureType, Timeframe};

#[test]
fn test_quote_escapes() {
    assert_eq!(quote("plain"), "\"plain\"");
    assert_eq!(quote(r#"say "hi""#), r#""say \"hi\"""#);
    assert_eq!(quote(r"C:\tmp"), r#""C:\\tmp""#);
}

#[test]
fn test_render_dimension() {
    let mut view = View::new("orders", "`proj`.`shop`.`orders`");
    let mut id = Dimension::new("id", DimensionType::Number, "${TABLE}.id");
    id.primary_key = Some(true);
    id.description = Some("Order \"id\"".to_string());
    view.dimensions.push(id);
    view.dimensions
        .push(Dimension::hidden("items", DimensionType::String, "${TABLE}.items"));

    let expected = r#"view: orders {
  sql_table_name: `proj`.`shop`.`orders` ;;

  dimension: id {
    type: number
    sql: ${TABLE}.id ;;
    primary_key: yes
    description: "Order \"id\""
  }

  dimension: items {
    type: string
    sql: ${TABLE}.items ;;
    hidden: yes
  }
}
"#;
    assert_eq!(render_view(&view), expected);
}

#[test]
fn test_render_dimension_group() {
    let mut group = DimensionGroup::new("order", "${TABLE}.order_date", TimeDatatype::Date);
    group.timeframes = vec![Timeframe::Raw, Timeframe::Date, Timeframe::Week];
    group.convert_tz = Some(false);

    let expected = "  dimension_group: order {
    type: time
    datatype: date
    timeframes: [raw, date, week]
    sql: ${TABLE}.order_date ;;
    convert_tz: no
  }
";
    assert_eq!(render_dimension_group(&group), expected);
}

#[test]
fn test_render_measure() {
    let mut measure = Measure::new("completed_revenue", MeasureType::Sum);
    measure.sql = Some("${amount}".to_string());
    measure.filters = vec![
        MeasureFilter {
            field: "status".to_string(),
            value: "complete".to_string(),
        },
        MeasureFilter {
            field: "region".to_string(),
            value: "-EU".to_string(),
        },
    ];
    measure.precision = Some(2);
    measure.value_format_name = Some("usd".to_string());

    let expected = "  measure: completed_revenue {
    type: sum
    sql: ${amount} ;;
    filters: [status: \"complete\", region: \"-EU\"]
    precision: 2
    value_format_name: usd
  }
";
    assert_eq!(render_measure(&measure), expected);
}

#[test]
fn test_count_without_sql() {
    let measure = Measure::new("count", MeasureType::Count);
    assert_eq!(render_measure(&measure), "  measure: count {\n    type: count\n  }\n");
}

#[test]
fn test_render_model_without_nested_has_no_explore() {
    let model = model("orders", &[("id", "INT64")]);
    let views = build_model_views(&model, &ViewOptions::default()).unwrap();
    let text = render_model(&views);

    assert!(text.starts_with("view: orders {\n"));
    assert!(!text.contains("explore:"));
    assert_eq!(file_name(&views.principal.name), "orders.view.lkml");
}

#[test]
fn test_render_model_with_nested() {
    let model = model(
        "orders",
        &[
            ("id", "INT64"),
            ("items", "ARRAY<STRUCT<sku STRING>>"),
            ("items.sku", "STRING"),
            ("items.parts", "ARRAY<STRING>"),
        ],
    );
    let views = build_model_views(&model, &ViewOptions::default()).unwrap();
    let text = render_model(&views);

    assert!(text.contains("view: orders__items {\n  sql_table_name: UNNEST(${orders.items}) ;;"));
    assert!(text.contains("view: orders__items__parts {"));

    let explore = text.split("explore: orders {\n").nth(1).unwrap();
    let expected = "  join: orders__items {
    sql: LEFT JOIN UNNEST(${orders.items}) AS orders__items ;;
    relationship: one_to_many
  }
  join: orders__items__parts {
    sql: LEFT JOIN UNNEST(${orders__items.parts}) AS orders__items__parts ;;
    relationship: one_to_many
  }
}
";
    assert_eq!(explore, expected);
}

#[test]
fn test_render_is_deterministic() {
    let model = model(
        "orders",
        &[
            ("created_at", "TIMESTAMP"),
            ("items", "ARRAY<STRUCT<sku STRING>>"),
            ("items.sku", "STRING"),
        ],
    );
    let first = render_model(&build_model_views(&model, &ViewOptions::default()).unwrap());
    let second = render_model(&build_model_views(&model, &ViewOptions::default()).unwrap());
    assert_eq!(first, second);
}
