//! Measures from `meta.looker.measures`

use crate::lookml::Measure;
use lf_core::meta::{MeasureMeta, MeasureType};

/// Name of the count measure added to every principal view
pub const IMPLICIT_COUNT_NAME: &str = "count";

/// Build a measure from metadata, filling name and sql when absent
pub fn from_meta(meta: &MeasureMeta, default_name: String, default_sql: Option<String>) -> Measure {
    Measure {
        name: meta.name.clone().unwrap_or(default_name),
        measure_type: meta.measure_type,
        sql: meta.sql.clone().or(default_sql),
        filters: meta.filters.clone(),
        approximate: meta.approximate,
        approximate_threshold: meta.approximate_threshold,
        sql_distinct_key: meta.sql_distinct_key.clone(),
        precision: meta.precision,
        percentile: meta.percentile,
        label: meta.label.clone(),
        description: meta.description.clone(),
        hidden: meta.hidden,
        group_label: meta.group_label.clone(),
        value_format_name: meta.value_format_name.clone(),
    }
}

/// Measures declared on a column
///
/// Defaults: name `m_<type>_<field>`, sql `field_ref` (none for `count`).
pub fn column_measures(metas: &[MeasureMeta], field_name: &str, field_ref: &str) -> Vec<Measure> {
    metas
        .iter()
        .map(|meta| {
            let default_sql = match meta.measure_type {
                MeasureType::Count => None,
                _ => Some(field_ref.to_string()),
            };
            from_meta(
                meta,
                format!("m_{}_{}", meta.measure_type.as_str(), field_name),
                default_sql,
            )
        })
        .collect()
}

/// Measures declared on the model; unnamed ones are named after their type
pub fn model_measures(metas: &[MeasureMeta]) -> Vec<Measure> {
    metas
        .iter()
        .map(|meta| from_meta(meta, meta.measure_type.as_str().to_string(), None))
        .collect()
}

pub fn implicit_count() -> Measure {
    Measure::new(IMPLICIT_COUNT_NAME, MeasureType::Count)
}

#[cfg(test)]
#[path = "measure_test.rs"]
mod tests;
