//! LookML text output
//!
//! One file per model: the principal view, its nested views and, when
//! there are nested views, an explore joining them back with `UNNEST`.
//! Rendering is a pure function of [`ModelViews`], so equal input gives
//! byte-identical output.

use crate::composer::{ModelViews, NestedView};
use crate::lookml::{Dimension, DimensionGroup, Measure, View};
use lf_core::meta::MeasureFilter;

/// File extension of generated view files
pub const VIEW_FILE_SUFFIX: &str = ".view.lkml";

/// `<principal view>.view.lkml`
pub fn file_name(principal_view: &str) -> String {
    format!("{}{}", principal_view, VIEW_FILE_SUFFIX)
}

/// Render every view of a model, plus the explore when nested views exist
pub fn render_model(views: &ModelViews) -> String {
    let mut blocks: Vec<String> = views.views().map(render_view).collect();
    if !views.nested.is_empty() {
        blocks.push(render_explore(&views.principal.name, &views.nested));
    }
    blocks.join("\n")
}

/// Render a single `view:` block
pub fn render_view(view: &View) -> String {
    let mut out = format!("view: {} {{\n", view.name);
    out.push_str(&format!("  sql_table_name: {} ;;\n", view.sql_table_name));
    push_opt_str(&mut out, 1, "label", view.label.as_deref());
    push_opt_str(&mut out, 1, "description", view.description.as_deref());
    push_opt_bool(&mut out, 1, "hidden", view.hidden);

    for dimension in &view.dimensions {
        out.push('\n');
        out.push_str(&render_dimension(dimension));
    }
    for group in &view.dimension_groups {
        out.push('\n');
        out.push_str(&render_dimension_group(group));
    }
    for measure in &view.measures {
        out.push('\n');
        out.push_str(&render_measure(measure));
    }

    out.push_str("}\n");
    out
}

fn render_dimension(dimension: &Dimension) -> String {
    let mut out = format!("  dimension: {} {{\n", dimension.name);
    out.push_str(&format!("    type: {}\n", dimension.dimension_type));
    out.push_str(&format!("    sql: {} ;;\n", dimension.sql));
    push_opt_bool(&mut out, 2, "primary_key", dimension.primary_key);
    push_opt_str(&mut out, 2, "label", dimension.label.as_deref());
    push_opt_str(&mut out, 2, "description", dimension.description.as_deref());
    push_opt_str(&mut out, 2, "group_label", dimension.group_label.as_deref());
    push_opt_str(&mut out, 2, "group_item_label", dimension.group_item_label.as_deref());
    push_opt_raw(&mut out, 2, "value_format_name", dimension.value_format_name.as_deref());
    push_opt_bool(&mut out, 2, "can_filter", dimension.can_filter);
    push_opt_bool(&mut out, 2, "convert_tz", dimension.convert_tz);
    push_opt_bool(&mut out, 2, "hidden", dimension.hidden);
    out.push_str("  }\n");
    out
}

fn render_dimension_group(group: &DimensionGroup) -> String {
    let timeframes: Vec<&str> = group.timeframes.iter().map(|tf| tf.as_str()).collect();

    let mut out = format!("  dimension_group: {} {{\n", group.name);
    out.push_str("    type: time\n");
    out.push_str(&format!("    datatype: {}\n", group.datatype.as_str()));
    out.push_str(&format!("    timeframes: [{}]\n", timeframes.join(", ")));
    out.push_str(&format!("    sql: {} ;;\n", group.sql));
    push_opt_bool(&mut out, 2, "convert_tz", group.convert_tz);
    push_opt_str(&mut out, 2, "label", group.label.as_deref());
    push_opt_str(&mut out, 2, "description", group.description.as_deref());
    push_opt_str(&mut out, 2, "group_label", group.group_label.as_deref());
    push_opt_bool(&mut out, 2, "hidden", group.hidden);
    out.push_str("  }\n");
    out
}

fn render_measure(measure: &Measure) -> String {
    let mut out = format!("  measure: {} {{\n", measure.name);
    out.push_str(&format!("    type: {}\n", measure.measure_type.as_str()));
    if let Some(sql) = &measure.sql {
        out.push_str(&format!("    sql: {} ;;\n", sql));
    }
    if !measure.filters.is_empty() {
        out.push_str(&format!("    filters: [{}]\n", render_filters(&measure.filters)));
    }
    push_opt_bool(&mut out, 2, "approximate", measure.approximate);
    push_opt_raw(
        &mut out,
        2,
        "approximate_threshold",
        measure.approximate_threshold.map(|t| t.to_string()).as_deref(),
    );
    if let Some(key) = &measure.sql_distinct_key {
        out.push_str(&format!("    sql_distinct_key: {} ;;\n", key));
    }
    push_opt_raw(&mut out, 2, "precision", measure.precision.map(|p| p.to_string()).as_deref());
    push_opt_raw(&mut out, 2, "percentile", measure.percentile.map(|p| p.to_string()).as_deref());
    push_opt_str(&mut out, 2, "label", measure.label.as_deref());
    push_opt_str(&mut out, 2, "description", measure.description.as_deref());
    push_opt_str(&mut out, 2, "group_label", measure.group_label.as_deref());
    push_opt_raw(&mut out, 2, "value_format_name", measure.value_format_name.as_deref());
    push_opt_bool(&mut out, 2, "hidden", measure.hidden);
    out.push_str("  }\n");
    out
}

fn render_filters(filters: &[MeasureFilter]) -> String {
    filters
        .iter()
        .map(|f| format!("{}: {}", f.field, quote(&f.value)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the explore joining nested views to their parents
pub fn render_explore(principal: &str, nested: &[NestedView]) -> String {
    let mut out = format!("explore: {} {{\n", principal);
    for join in nested {
        out.push_str(&format!("  join: {} {{\n", join.view.name));
        out.push_str(&format!(
            "    sql: LEFT JOIN UNNEST(${{{}.{}}}) AS {} ;;\n",
            join.parent_view, join.anchor_dimension, join.view.name
        ));
        out.push_str("    relationship: one_to_many\n");
        out.push_str("  }\n");
    }
    out.push_str("}\n");
    out
}

/// Double-quote a LookML string, escaping `"` and `\`
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn push_opt_str(out: &mut String, level: usize, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!("{}{}: {}\n", indent(level), key, quote(value)));
    }
}

fn push_opt_raw(out: &mut String, level: usize, key: &str, value: Option<&str>) {
    if let Some(value) = value {
        out.push_str(&format!("{}{}: {}\n", indent(level), key, value));
    }
}

fn push_opt_bool(out: &mut String, level: usize, key: &str, value: Option<bool>) {
    if let Some(value) = value {
        let text = if value { "yes" } else { "no" };
        out.push_str(&format!("{}{}: {}\n", indent(level), key, text));
    }
}

#[cfg(test)]
#[path = "emit_test.rs"]
mod tests;
