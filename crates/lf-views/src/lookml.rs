//! LookML view structures and their well-formedness rules

use crate::error::{ViewError, ViewResult};
use lf_core::meta::{MeasureFilter, MeasureType, Timeframe};
use std::collections::HashSet;
use std::fmt;

/// Dimension types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionType {
    String,
    Number,
    YesNo,
    Time,
    Tier,
    Location,
    Duration,
    Distance,
}

impl DimensionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DimensionType::String => "string",
            DimensionType::Number => "number",
            DimensionType::YesNo => "yesno",
            DimensionType::Time => "time",
            DimensionType::Tier => "tier",
            DimensionType::Location => "location",
            DimensionType::Duration => "duration",
            DimensionType::Distance => "distance",
        }
    }
}

impl fmt::Display for DimensionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plain dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    pub name: String,
    pub dimension_type: DimensionType,
    pub sql: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub hidden: Option<bool>,
    pub group_label: Option<String>,
    pub group_item_label: Option<String>,
    pub value_format_name: Option<String>,
    pub can_filter: Option<bool>,
    pub convert_tz: Option<bool>,
    pub primary_key: Option<bool>,
}

impl Dimension {
    pub fn new(name: impl Into<String>, dimension_type: DimensionType, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dimension_type,
            sql: sql.into(),
            label: None,
            description: None,
            hidden: None,
            group_label: None,
            group_item_label: None,
            value_format_name: None,
            can_filter: None,
            convert_tz: None,
            primary_key: None,
        }
    }

    /// A hidden dimension
    pub fn hidden(name: impl Into<String>, dimension_type: DimensionType, sql: impl Into<String>) -> Self {
        Self {
            hidden: Some(true),
            ..Self::new(name, dimension_type, sql)
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden.unwrap_or(false)
    }

    pub fn validate(&self, view: &str) -> ViewResult<()> {
        let fail = |reason: &str| ViewError::Validation {
            element: "dimension",
            name: self.name.clone(),
            view: view.to_string(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(fail("name is empty"));
        }
        if self.sql.trim().is_empty() {
            return Err(fail("sql is empty"));
        }
        if self.dimension_type == DimensionType::Time {
            return Err(fail("time dimensions must be dimension groups"));
        }
        Ok(())
    }
}

/// Underlying value type of a time dimension group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeDatatype {
    Date,
    Datetime,
    Timestamp,
}

impl TimeDatatype {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeDatatype::Date => "date",
            TimeDatatype::Datetime => "datetime",
            TimeDatatype::Timestamp => "timestamp",
        }
    }
}

/// A time dimension expanded over timeframes
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGroup {
    pub name: String,
    pub sql: String,
    pub timeframes: Vec<Timeframe>,
    pub datatype: TimeDatatype,
    pub convert_tz: Option<bool>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub hidden: Option<bool>,
    pub group_label: Option<String>,
}

impl DimensionGroup {
    pub fn new(name: impl Into<String>, sql: impl Into<String>, datatype: TimeDatatype) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
            timeframes: Vec::new(),
            datatype,
            convert_tz: None,
            label: None,
            description: None,
            hidden: None,
            group_label: None,
        }
    }

    /// `name` plus `name_<timeframe>` for every timeframe
    pub fn generated_names(&self) -> Vec<String> {
        std::iter::once(self.name.clone())
            .chain(
                self.timeframes
                    .iter()
                    .map(|tf| format!("{}_{}", self.name, tf.as_str())),
            )
            .collect()
    }

    pub fn validate(&self, view: &str) -> ViewResult<()> {
        let fail = |reason: &str| ViewError::Validation {
            element: "dimension_group",
            name: self.name.clone(),
            view: view.to_string(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(fail("name is empty"));
        }
        if self.sql.trim().is_empty() {
            return Err(fail("sql is empty"));
        }
        if self.timeframes.is_empty() {
            return Err(fail("no timeframes"));
        }
        Ok(())
    }
}

/// A measure
#[derive(Debug, Clone, PartialEq)]
pub struct Measure {
    pub name: String,
    pub measure_type: MeasureType,
    pub sql: Option<String>,
    pub filters: Vec<MeasureFilter>,
    pub approximate: Option<bool>,
    pub approximate_threshold: Option<u64>,
    pub sql_distinct_key: Option<String>,
    pub precision: Option<u32>,
    pub percentile: Option<u32>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub hidden: Option<bool>,
    pub group_label: Option<String>,
    pub value_format_name: Option<String>,
}

impl Measure {
    pub fn new(name: impl Into<String>, measure_type: MeasureType) -> Self {
        Self {
            name: name.into(),
            measure_type,
            sql: None,
            filters: Vec::new(),
            approximate: None,
            approximate_threshold: None,
            sql_distinct_key: None,
            precision: None,
            percentile: None,
            label: None,
            description: None,
            hidden: None,
            group_label: None,
            value_format_name: None,
        }
    }

    /// Check the per-type parameter rules
    pub fn validate(&self, view: &str) -> ViewResult<()> {
        let fail = |reason: String| ViewError::Validation {
            element: "measure",
            name: self.name.clone(),
            view: view.to_string(),
            reason,
        };
        let ty = self.measure_type;

        if self.name.trim().is_empty() {
            return Err(fail("name is empty".to_string()));
        }
        let has_sql = self.sql.as_deref().is_some_and(|s| !s.trim().is_empty());
        if ty != MeasureType::Count && !has_sql {
            return Err(fail(format!("{ty} measures require sql")));
        }
        if ty != MeasureType::CountDistinct {
            if self.approximate.is_some() {
                return Err(fail(format!("approximate is not valid for {ty}")));
            }
            if self.approximate_threshold.is_some() {
                return Err(fail(format!("approximate_threshold is not valid for {ty}")));
            }
            if self.sql_distinct_key.is_some() {
                return Err(fail(format!("sql_distinct_key is not valid for {ty}")));
            }
        }
        if self.precision.is_some() && !matches!(ty, MeasureType::Average | MeasureType::Sum) {
            return Err(fail(format!("precision is not valid for {ty}")));
        }
        match (ty.is_percentile(), self.percentile) {
            (true, None) => return Err(fail(format!("{ty} measures require percentile"))),
            (true, Some(p)) if p > 100 => {
                return Err(fail(format!("percentile {p} is outside 0..=100")))
            }
            (false, Some(_)) => return Err(fail(format!("percentile is not valid for {ty}"))),
            _ => {}
        }
        for filter in &self.filters {
            if filter.field.trim().is_empty() {
                return Err(fail("filter with empty field".to_string()));
            }
        }
        Ok(())
    }
}

/// A LookML view
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub name: String,
    pub sql_table_name: String,
    pub label: Option<String>,
    pub description: Option<String>,
    pub hidden: Option<bool>,
    pub dimensions: Vec<Dimension>,
    pub dimension_groups: Vec<DimensionGroup>,
    pub measures: Vec<Measure>,
}

impl View {
    pub fn new(name: impl Into<String>, sql_table_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_table_name: sql_table_name.into(),
            label: None,
            description: None,
            hidden: None,
            dimensions: Vec::new(),
            dimension_groups: Vec::new(),
            measures: Vec::new(),
        }
    }

    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn dimension_group(&self, name: &str) -> Option<&DimensionGroup> {
        self.dimension_groups.iter().find(|g| g.name == name)
    }

    pub fn measure(&self, name: &str) -> Option<&Measure> {
        self.measures.iter().find(|m| m.name == name)
    }

    pub fn has_count_measure(&self) -> bool {
        self.measures
            .iter()
            .any(|m| m.measure_type == MeasureType::Count)
    }

    /// Every field name the view exposes, including timeframe variants
    pub fn field_names(&self) -> HashSet<String> {
        self.dimensions
            .iter()
            .map(|d| d.name.clone())
            .chain(self.dimension_groups.iter().flat_map(|g| g.generated_names()))
            .chain(self.measures.iter().map(|m| m.name.clone()))
            .collect()
    }

    pub fn validate(&self) -> ViewResult<()> {
        let fail = |reason: &str| ViewError::Validation {
            element: "view",
            name: self.name.clone(),
            view: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(fail("name is empty"));
        }
        if self.sql_table_name.trim().is_empty() {
            return Err(fail("sql_table_name is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "lookml_test.rs"]
mod tests;
