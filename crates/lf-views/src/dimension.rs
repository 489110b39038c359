//! Dimensions and dimension groups from columns
//!
//! A [`FieldBuilder`] collects the fields of one view. Columns of the
//! principal view reference `${TABLE}.<path>`; columns of a nested view
//! reference the path below the array that owns the view.

use crate::column::{Column, ColumnPath};
use crate::composer::ViewOptions;
use crate::lookml::{Dimension, DimensionGroup, DimensionType, Measure, TimeDatatype};
use crate::measure::column_measures;
use crate::naming::{long_name, short_name, title_case, title_case_path};
use crate::types::{ColumnKind, ScalarKind};
use lf_core::meta::{DimensionMeta, Timeframe};
use lf_core::sql_utils::quote_path;
use std::collections::HashSet;

/// Suffixes dropped from time column names to form the group name
const GROUP_NAME_SUFFIXES: [&str; 5] = ["_date", "_time", "_timestamp", "_datetime", "_at"];

/// Default timeframes for every time column; `time` is added unless the column is a DATE
const DEFAULT_TIMEFRAMES: [Timeframe; 6] = [
    Timeframe::Raw,
    Timeframe::Date,
    Timeframe::Week,
    Timeframe::Month,
    Timeframe::Quarter,
    Timeframe::Year,
];

/// Fields produced for one view
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewFields {
    pub dimensions: Vec<Dimension>,
    pub dimension_groups: Vec<DimensionGroup>,
    pub measures: Vec<Measure>,
}

/// Accumulates the fields of a single view
pub struct FieldBuilder<'a> {
    options: &'a ViewOptions,
    owner: Option<&'a ColumnPath>,
    group_names: HashSet<String>,
    fields: ViewFields,
}

impl<'a> FieldBuilder<'a> {
    /// Builder for the principal view (`owner = None`) or a nested view
    pub fn new(options: &'a ViewOptions, owner: Option<&'a ColumnPath>) -> Self {
        Self {
            options,
            owner,
            group_names: HashSet::new(),
            fields: ViewFields::default(),
        }
    }

    /// SQL reference to a column relative to this view
    pub fn sql_ref(&self, column: &Column) -> String {
        let segments = column.segments_below(self.owner);
        format!("${{TABLE}}.{}", quote_path(&segments.join(".")))
    }

    /// Field name of a column relative to this view
    pub fn field_name(&self, column: &Column) -> String {
        long_name(&column.segments_below(self.owner))
    }

    /// Add the dimension (or dimension group) for a member column
    pub fn add_column(&mut self, column: &Column) {
        let segments = column.segments_below(self.owner);
        let sql = self.sql_ref(column);
        let name = long_name(&segments);

        let (group_label, group_item_label) = if segments.len() > 1 {
            (
                Some(title_case_path(&segments[..segments.len() - 1])),
                segments.last().map(|s| title_case(s)),
            )
        } else {
            (None, None)
        };

        match column.kind() {
            ColumnKind::Scalar(kind) if kind.is_time() => {
                let group = self.add_group(column, &name, sql, kind, group_label);
                let field_ref = if group.timeframes.contains(&Timeframe::Raw) {
                    format!("${{{}_raw}}", group.name)
                } else {
                    group.sql.clone()
                };
                let measures = column_measures(&column.measures, &group.name, &field_ref);
                self.fields.measures.extend(measures);
            }
            kind => {
                let mut dimension = Dimension::new(&name, dimension_type(kind), sql);
                dimension.description = column.description.clone();
                dimension.group_label = group_label;
                dimension.group_item_label = group_item_label;
                if column.primary_key {
                    dimension.primary_key = Some(true);
                }
                apply_dimension_meta(&mut dimension, &column.dimension);

                let measures =
                    column_measures(&column.measures, &dimension.name, &format!("${{{}}}", dimension.name));
                self.fields.dimensions.push(dimension);
                self.fields.measures.extend(measures);
            }
        }
    }

    /// Add a hidden dimension pointing at a child array; returns its name
    pub fn add_anchor(&mut self, array: &Column) -> String {
        let name = self.field_name(array);
        let mut anchor = Dimension::hidden(&name, DimensionType::String, self.sql_ref(array));
        anchor.description = array.description.clone();
        self.fields.dimensions.push(anchor);
        name
    }

    /// Add the element dimension of a nested view
    ///
    /// Arrays of records expose their element only as a hidden reference;
    /// arrays of scalars get a visible dimension typed by the element.
    pub fn add_element(&mut self, array: &Column, has_members: bool) {
        let name = short_name(&array.original_segments());
        let sql = "${TABLE}".to_string();

        if has_members {
            self.fields
                .dimensions
                .push(Dimension::hidden(name, DimensionType::String, sql));
            return;
        }

        match array.type_info.element_kind() {
            Some(kind) if kind.is_time() => {
                self.add_group(array, &name, sql, kind, None);
            }
            element => {
                let kind = element
                    .map(ColumnKind::Scalar)
                    .unwrap_or(ColumnKind::Scalar(ScalarKind::String));
                let mut dimension = Dimension::new(name, dimension_type(kind), sql);
                dimension.description = array.description.clone();
                apply_dimension_meta(&mut dimension, &array.dimension);
                self.fields.dimensions.push(dimension);
            }
        }
    }

    fn add_group(
        &mut self,
        column: &Column,
        long: &str,
        sql: String,
        kind: ScalarKind,
        group_label: Option<String>,
    ) -> DimensionGroup {
        let meta = &column.dimension;
        let name = self.group_name(long);
        let datatype = match kind {
            ScalarKind::Date => TimeDatatype::Date,
            ScalarKind::DateTime => TimeDatatype::Datetime,
            _ => TimeDatatype::Timestamp,
        };

        let mut group = DimensionGroup::new(name, sql, datatype);
        group.timeframes = self.timeframes(meta, kind);
        group.convert_tz = meta.convert_tz.or(match kind {
            ScalarKind::Date | ScalarKind::DateTime => Some(false),
            _ => None,
        });
        group.label = meta.label.clone();
        group.description = meta.description.clone().or_else(|| column.description.clone());
        group.hidden = meta.hidden;
        group.group_label = meta.group_label.clone().or(group_label);

        if self.options.include_iso_fields {
            self.add_iso_fields(&group);
        }

        self.fields.dimension_groups.push(group.clone());
        group
    }

    /// Long name minus a trailing time suffix, unless another group took it
    fn group_name(&mut self, long: &str) -> String {
        let stripped = GROUP_NAME_SUFFIXES.iter().find_map(|suffix| {
            long.strip_suffix(suffix)
                .filter(|rest| !rest.is_empty() && !rest.ends_with('_'))
        });
        let name = match stripped {
            Some(rest) if !self.group_names.contains(rest) => rest.to_string(),
            _ => long.to_string(),
        };
        self.group_names.insert(name.clone());
        name
    }

    fn timeframes(&self, meta: &DimensionMeta, kind: ScalarKind) -> Vec<Timeframe> {
        let mut timeframes: Vec<Timeframe> = match &meta.timeframes {
            Some(explicit) => explicit.clone(),
            None => {
                let mut defaults = DEFAULT_TIMEFRAMES.to_vec();
                if kind != ScalarKind::Date {
                    defaults.push(Timeframe::Time);
                }
                for tf in &self.options.custom_timeframes {
                    if kind == ScalarKind::Date && tf.needs_time_of_day() {
                        log::debug!("Skipping timeframe '{}' for DATE column", tf);
                        continue;
                    }
                    defaults.push(*tf);
                }
                defaults
            }
        };
        timeframes.sort();
        timeframes.dedup();
        timeframes
    }

    fn add_iso_fields(&mut self, group: &DimensionGroup) {
        let label = group
            .group_label
            .clone()
            .or_else(|| group.label.clone())
            .unwrap_or_else(|| title_case(&group.name));

        for (suffix, part, item_label) in [
            ("iso_year", "ISOYEAR", "ISO Year"),
            ("iso_week_of_year", "ISOWEEK", "ISO Week of Year"),
        ] {
            let mut dimension = Dimension::new(
                format!("{}_{}", group.name, suffix),
                DimensionType::Number,
                format!("EXTRACT({} FROM {})", part, group.sql),
            );
            dimension.group_label = Some(label.clone());
            dimension.group_item_label = Some(item_label.to_string());
            self.fields.dimensions.push(dimension);
        }
    }

    pub fn finish(self) -> ViewFields {
        self.fields
    }
}

fn dimension_type(kind: ColumnKind) -> DimensionType {
    match kind {
        ColumnKind::Scalar(ScalarKind::Number) => DimensionType::Number,
        ColumnKind::Scalar(ScalarKind::YesNo) => DimensionType::YesNo,
        _ => DimensionType::String,
    }
}

fn apply_dimension_meta(dimension: &mut Dimension, meta: &DimensionMeta) {
    if meta.label.is_some() {
        dimension.label = meta.label.clone();
    }
    if meta.description.is_some() {
        dimension.description = meta.description.clone();
    }
    if meta.hidden.is_some() {
        dimension.hidden = meta.hidden;
    }
    if meta.group_label.is_some() {
        dimension.group_label = meta.group_label.clone();
    }
    if meta.group_item_label.is_some() {
        dimension.group_item_label = meta.group_item_label.clone();
    }
    if meta.value_format_name.is_some() {
        dimension.value_format_name = meta.value_format_name.clone();
    }
    if meta.can_filter.is_some() {
        dimension.can_filter = meta.can_filter;
    }
    if meta.convert_tz.is_some() {
        dimension.convert_tz = meta.convert_tz;
    }
    if let Some(primary_key) = meta.primary_key {
        dimension.primary_key = Some(primary_key);
    }
}

#[cfg(test)]
#[path = "dimension_test.rs"]
mod tests;
