use super::*;
use crate::types::recognize;
use lf_core::meta::{MeasureMeta, MeasureType};

fn build(options: &ViewOptions, owner: Option<&ColumnPath>, columns: &[Column]) -> ViewFields {
    let mut builder = FieldBuilder::new(options, owner);
    for column in columns {
        builder.add_column(column);
    }
    builder.finish()
}

fn col(name: &str, ty: &str) -> Column {
    Column::new(name, Some(ty))
}

#[test]
fn test_scalar_dimensions() {
    let options = ViewOptions::default();
    let fields = build(
        &options,
        None,
        &[
            col("id", "INT64"),
            col("name", "STRING"),
            col("IsActive", "BOOL"),
            col("payload", "JSON"),
        ],
    );

    let dims: Vec<(&str, DimensionType, &str)> = fields
        .dimensions
        .iter()
        .map(|d| (d.name.as_str(), d.dimension_type, d.sql.as_str()))
        .collect();
    assert_eq!(
        dims,
        vec![
            ("id", DimensionType::Number, "${TABLE}.id"),
            ("name", DimensionType::String, "${TABLE}.name"),
            ("is_active", DimensionType::YesNo, "${TABLE}.IsActive"),
            ("payload", DimensionType::String, "${TABLE}.payload"),
        ]
    );
    assert!(fields.dimension_groups.is_empty());
    assert!(fields.measures.is_empty());
}

#[test]
fn test_case_preserving_sql() {
    let options = ViewOptions::default();
    let fields = build(&options, None, &[col("BuyingItem_GTIN", "STRING")]);
    let dim = &fields.dimensions[0];
    assert_eq!(dim.name, "buying_item_gtin");
    assert_eq!(dim.sql, "${TABLE}.BuyingItem_GTIN");
}

#[test]
fn test_special_characters_are_quoted() {
    let options = ViewOptions::default();
    let fields = build(
        &options,
        None,
        &[col("Zip Code", "STRING"), col("Adresse.Straße", "STRING")],
    );
    assert_eq!(fields.dimensions[0].name, "zip_code");
    assert_eq!(fields.dimensions[0].sql, "${TABLE}.`Zip Code`");
    assert_eq!(fields.dimensions[1].sql, "${TABLE}.`Adresse`.`Straße`");
}

#[test]
fn test_record_fields_get_group_labels() {
    let options = ViewOptions::default();
    let fields = build(&options, None, &[col("ShippingAddress.ZipCode", "STRING")]);
    let dim = &fields.dimensions[0];
    assert_eq!(dim.name, "shipping_address__zip_code");
    assert_eq!(dim.sql, "${TABLE}.ShippingAddress.ZipCode");
    assert_eq!(dim.group_label.as_deref(), Some("Shipping Address"));
    assert_eq!(dim.group_item_label.as_deref(), Some("Zip Code"));
}

#[test]
fn test_timestamp_group() {
    let options = ViewOptions::default();
    let fields = build(&options, None, &[col("created_at", "TIMESTAMP")]);
    assert!(fields.dimensions.is_empty());

    let group = &fields.dimension_groups[0];
    assert_eq!(group.name, "created");
    assert_eq!(group.sql, "${TABLE}.created_at");
    assert_eq!(group.datatype, TimeDatatype::Timestamp);
    assert_eq!(group.convert_tz, None);
    assert_eq!(
        group.timeframes,
        vec![
            Timeframe::Raw,
            Timeframe::Time,
            Timeframe::Date,
            Timeframe::Week,
            Timeframe::Month,
            Timeframe::Quarter,
            Timeframe::Year
        ]
    );
}

#[test]
fn test_date_and_datetime_groups() {
    let options = ViewOptions::default();
    let fields = build(
        &options,
        None,
        &[col("order_date", "DATE"), col("shipped", "DATETIME")],
    );

    let order = &fields.dimension_groups[0];
    assert_eq!(order.name, "order");
    assert_eq!(order.datatype, TimeDatatype::Date);
    assert_eq!(order.convert_tz, Some(false));
    assert!(!order.timeframes.contains(&Timeframe::Time));

    let shipped = &fields.dimension_groups[1];
    assert_eq!(shipped.name, "shipped");
    assert_eq!(shipped.datatype, TimeDatatype::Datetime);
    assert_eq!(shipped.convert_tz, Some(false));
    assert!(shipped.timeframes.contains(&Timeframe::Time));
}

#[test]
fn test_group_name_not_stripped_when_taken() {
    let options = ViewOptions::default();
    let fields = build(
        &options,
        None,
        &[col("created_at", "TIMESTAMP"), col("created_date", "DATE")],
    );
    let names: Vec<&str> = fields
        .dimension_groups
        .iter()
        .map(|g| g.name.as_str())
        .collect();
    assert_eq!(names, vec!["created", "created_date"]);
}

#[test]
fn test_custom_timeframes() {
    let options = ViewOptions {
        custom_timeframes: vec![Timeframe::Hour, Timeframe::DayOfWeek, Timeframe::Date],
        ..Default::default()
    };
    let fields = build(
        &options,
        None,
        &[col("created_at", "TIMESTAMP"), col("birthday", "DATE")],
    );

    let created = &fields.dimension_groups[0];
    assert_eq!(
        created.timeframes,
        vec![
            Timeframe::Raw,
            Timeframe::Time,
            Timeframe::Date,
            Timeframe::Week,
            Timeframe::Month,
            Timeframe::Quarter,
            Timeframe::Year,
            Timeframe::Hour,
            Timeframe::DayOfWeek
        ]
    );

    let birthday = &fields.dimension_groups[1];
    assert!(birthday.timeframes.contains(&Timeframe::DayOfWeek));
    assert!(!birthday.timeframes.contains(&Timeframe::Hour));
}

#[test]
fn test_column_timeframes_replace_defaults() {
    let options = ViewOptions {
        custom_timeframes: vec![Timeframe::Hour],
        ..Default::default()
    };
    let mut column = col("created_at", "TIMESTAMP");
    column.dimension.timeframes = Some(vec![Timeframe::Month, Timeframe::Date, Timeframe::Date]);
    let fields = build(&options, None, &[column]);
    assert_eq!(
        fields.dimension_groups[0].timeframes,
        vec![Timeframe::Date, Timeframe::Month]
    );
}

#[test]
fn test_iso_fields() {
    let options = ViewOptions {
        include_iso_fields: true,
        ..Default::default()
    };
    let fields = build(&options, None, &[col("created_at", "TIMESTAMP")]);

    let names: Vec<&str> = fields.dimensions.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["created_iso_year", "created_iso_week_of_year"]);
    assert_eq!(
        fields.dimensions[0].sql,
        "EXTRACT(ISOYEAR FROM ${TABLE}.created_at)"
    );
    assert_eq!(
        fields.dimensions[1].sql,
        "EXTRACT(ISOWEEK FROM ${TABLE}.created_at)"
    );
    assert_eq!(fields.dimensions[0].dimension_type, DimensionType::Number);
    assert_eq!(fields.dimensions[0].group_label.as_deref(), Some("Created"));
    assert!(!fields.dimensions[0].is_hidden());
}

#[test]
fn test_meta_overrides_and_primary_key() {
    let options = ViewOptions::default();
    let mut column = col("Amount", "NUMERIC");
    column.description = Some("from catalog".to_string());
    column.dimension = DimensionMeta {
        label: Some("Order Amount".to_string()),
        description: Some("Total order amount".to_string()),
        value_format_name: Some("usd".to_string()),
        hidden: Some(false),
        ..Default::default()
    };
    let mut id = col("id", "INT64");
    id.primary_key = true;

    let fields = build(&options, None, &[column, id]);
    let amount = &fields.dimensions[0];
    assert_eq!(amount.label.as_deref(), Some("Order Amount"));
    assert_eq!(amount.description.as_deref(), Some("Total order amount"));
    assert_eq!(amount.value_format_name.as_deref(), Some("usd"));
    assert_eq!(amount.hidden, Some(false));
    assert_eq!(amount.primary_key, None);
    assert_eq!(fields.dimensions[1].primary_key, Some(true));
}

#[test]
fn test_column_measures() {
    let options = ViewOptions::default();
    let mut amount = col("amount", "NUMERIC");
    amount.measures = vec![MeasureMeta::of_type(MeasureType::Sum)];
    let mut created = col("created_at", "TIMESTAMP");
    created.measures = vec![MeasureMeta::of_type(MeasureType::Max)];

    let fields = build(&options, None, &[amount, created]);
    assert_eq!(fields.measures[0].name, "m_sum_amount");
    assert_eq!(fields.measures[0].sql.as_deref(), Some("${amount}"));
    assert_eq!(fields.measures[1].name, "m_max_created");
    assert_eq!(fields.measures[1].sql.as_deref(), Some("${created_raw}"));
}

#[test]
fn test_nested_scope_uses_relative_paths() {
    let options = ViewOptions::default();
    let owner = ColumnPath::new("Orders.LineItems");
    let fields = build(
        &options,
        Some(&owner),
        &[
            col("Orders.LineItems.SKU", "STRING"),
            col("Orders.LineItems.Dims.Width", "FLOAT64"),
        ],
    );

    assert_eq!(fields.dimensions[0].name, "sku");
    assert_eq!(fields.dimensions[0].sql, "${TABLE}.SKU");
    assert_eq!(fields.dimensions[0].group_label, None);
    assert_eq!(fields.dimensions[1].name, "dims__width");
    assert_eq!(fields.dimensions[1].sql, "${TABLE}.Dims.Width");
    assert_eq!(fields.dimensions[1].group_label.as_deref(), Some("Dims"));
}

#[test]
fn test_element_dimension() {
    let options = ViewOptions::default();
    let tags = col("Tags", "ARRAY<STRING>");
    let owner = tags.path.clone();

    let mut builder = FieldBuilder::new(&options, Some(&owner));
    builder.add_element(&tags, false);
    let fields = builder.finish();
    let element = &fields.dimensions[0];
    assert_eq!(element.name, "tags");
    assert_eq!(element.sql, "${TABLE}");
    assert_eq!(element.dimension_type, DimensionType::String);
    assert!(!element.is_hidden());

    let items = col("items", "ARRAY<STRUCT<id INT64>>");
    let owner = items.path.clone();
    let mut builder = FieldBuilder::new(&options, Some(&owner));
    builder.add_element(&items, true);
    let fields = builder.finish();
    assert!(fields.dimensions[0].is_hidden());
}

#[test]
fn test_element_of_numeric_and_date_arrays() {
    let options = ViewOptions::default();
    let scores = col("scores", "ARRAY<INT64>");
    assert_eq!(recognize(Some("ARRAY<INT64>")).element_kind(), Some(ScalarKind::Number));
    let owner = scores.path.clone();
    let mut builder = FieldBuilder::new(&options, Some(&owner));
    builder.add_element(&scores, false);
    assert_eq!(builder.finish().dimensions[0].dimension_type, DimensionType::Number);

    let dates = col("holiday_dates", "ARRAY<DATE>");
    let owner = dates.path.clone();
    let mut builder = FieldBuilder::new(&options, Some(&owner));
    builder.add_element(&dates, false);
    let fields = builder.finish();
    assert!(fields.dimensions.is_empty());
    assert_eq!(fields.dimension_groups[0].name, "holiday_dates");
    assert_eq!(fields.dimension_groups[0].sql, "${TABLE}");
}

#[test]
fn test_anchor_dimension() {
    let options = ViewOptions::default();
    let owner = ColumnPath::new("orders");
    let mut builder = FieldBuilder::new(&options, Some(&owner));
    let name = builder.add_anchor(&col("orders.LineItems", "ARRAY<STRUCT<sku STRING>>"));
    assert_eq!(name, "line_items");

    let fields = builder.finish();
    let anchor = &fields.dimensions[0];
    assert!(anchor.is_hidden());
    assert_eq!(anchor.sql, "${TABLE}.LineItems");
}
