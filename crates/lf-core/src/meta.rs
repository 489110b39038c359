//! Looker overrides carried in dbt `meta.looker` blocks
//!
//! Models and columns in a dbt project can customise the generated views
//! through their `meta` section:
//!
//! ```yaml
//! models:
//!   - name: orders
//!     meta:
//!       looker:
//!         view:
//!           label: Orders
//!         measures:
//!           - type: sum
//!             name: total_revenue
//!             sql: ${revenue}
//!     columns:
//!       - name: revenue
//!         meta:
//!           looker:
//!             dimension:
//!               value_format_name: usd
//!             measures:
//!               - type: sum
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Timeframes a time dimension group can expand into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Raw,
    Time,
    Date,
    Week,
    Month,
    Quarter,
    Year,
    Hour,
    Minute,
    DayOfWeek,
    DayOfMonth,
    DayOfYear,
    WeekOfYear,
    MonthName,
    MonthNum,
    QuarterOfYear,
    HourOfDay,
}

impl Timeframe {
    /// Every timeframe, in the order they are emitted
    pub const ALL: [Timeframe; 17] = [
        Timeframe::Raw,
        Timeframe::Time,
        Timeframe::Date,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Quarter,
        Timeframe::Year,
        Timeframe::Hour,
        Timeframe::Minute,
        Timeframe::DayOfWeek,
        Timeframe::DayOfMonth,
        Timeframe::DayOfYear,
        Timeframe::WeekOfYear,
        Timeframe::MonthName,
        Timeframe::MonthNum,
        Timeframe::QuarterOfYear,
        Timeframe::HourOfDay,
    ];

    /// LookML keyword for this timeframe
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Raw => "raw",
            Timeframe::Time => "time",
            Timeframe::Date => "date",
            Timeframe::Week => "week",
            Timeframe::Month => "month",
            Timeframe::Quarter => "quarter",
            Timeframe::Year => "year",
            Timeframe::Hour => "hour",
            Timeframe::Minute => "minute",
            Timeframe::DayOfWeek => "day_of_week",
            Timeframe::DayOfMonth => "day_of_month",
            Timeframe::DayOfYear => "day_of_year",
            Timeframe::WeekOfYear => "week_of_year",
            Timeframe::MonthName => "month_name",
            Timeframe::MonthNum => "month_num",
            Timeframe::QuarterOfYear => "quarter_of_year",
            Timeframe::HourOfDay => "hour_of_day",
        }
    }

    /// Parse a timeframe keyword (case-insensitive)
    pub fn parse(s: &str) -> Option<Timeframe> {
        let lower = s.trim().to_lowercase();
        Timeframe::ALL.into_iter().find(|tf| tf.as_str() == lower)
    }

    /// Whether this timeframe only makes sense for values carrying a time of day
    pub fn needs_time_of_day(&self) -> bool {
        matches!(
            self,
            Timeframe::Time | Timeframe::Hour | Timeframe::Minute | Timeframe::HourOfDay
        )
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// LookML measure aggregation types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureType {
    Count,
    CountDistinct,
    Sum,
    Average,
    Min,
    Max,
    Median,
    List,
    SumDistinct,
    AverageDistinct,
    MedianDistinct,
    Number,
    Percentile,
    PercentileDistinct,
}

impl MeasureType {
    /// LookML keyword for this aggregation
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasureType::Count => "count",
            MeasureType::CountDistinct => "count_distinct",
            MeasureType::Sum => "sum",
            MeasureType::Average => "average",
            MeasureType::Min => "min",
            MeasureType::Max => "max",
            MeasureType::Median => "median",
            MeasureType::List => "list",
            MeasureType::SumDistinct => "sum_distinct",
            MeasureType::AverageDistinct => "average_distinct",
            MeasureType::MedianDistinct => "median_distinct",
            MeasureType::Number => "number",
            MeasureType::Percentile => "percentile",
            MeasureType::PercentileDistinct => "percentile_distinct",
        }
    }

    /// Percentile-family aggregations take a `percentile` parameter
    pub fn is_percentile(&self) -> bool {
        matches!(self, MeasureType::Percentile | MeasureType::PercentileDistinct)
    }
}

impl fmt::Display for MeasureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `meta.looker` on a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLookerMeta {
    /// Overrides for the principal view
    #[serde(default)]
    pub view: Option<ViewMeta>,

    /// View-level measures
    #[serde(default)]
    pub measures: Vec<MeasureMeta>,
}

/// View-level overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewMeta {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub hidden: Option<bool>,
}

/// `meta.looker` on a column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnLookerMeta {
    /// Overrides applied to the generated dimension (or dimension group)
    #[serde(default)]
    pub dimension: Option<DimensionMeta>,

    /// Measures derived from this column
    #[serde(default)]
    pub measures: Vec<MeasureMeta>,
}

/// Per-column dimension overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionMeta {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub hidden: Option<bool>,

    #[serde(default)]
    pub group_label: Option<String>,

    #[serde(default)]
    pub group_item_label: Option<String>,

    #[serde(default)]
    pub value_format_name: Option<String>,

    #[serde(default)]
    pub can_filter: Option<bool>,

    #[serde(default)]
    pub convert_tz: Option<bool>,

    /// Replaces the default timeframes of a time dimension group
    #[serde(default)]
    pub timeframes: Option<Vec<Timeframe>>,

    #[serde(default)]
    pub primary_key: Option<bool>,
}

/// A measure declared in metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureMeta {
    /// Aggregation type
    #[serde(rename = "type")]
    pub measure_type: MeasureType,

    /// Measure name; derived from the column when omitted
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub sql: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub hidden: Option<bool>,

    #[serde(default)]
    pub group_label: Option<String>,

    #[serde(default)]
    pub value_format_name: Option<String>,

    #[serde(default)]
    pub filters: Vec<MeasureFilter>,

    #[serde(default)]
    pub approximate: Option<bool>,

    #[serde(default)]
    pub approximate_threshold: Option<u64>,

    #[serde(default)]
    pub sql_distinct_key: Option<String>,

    #[serde(default)]
    pub precision: Option<u32>,

    #[serde(default)]
    pub percentile: Option<u32>,
}

impl MeasureMeta {
    /// A bare measure of the given type (convenient for defaults and tests)
    pub fn of_type(measure_type: MeasureType) -> Self {
        Self {
            measure_type,
            name: None,
            sql: None,
            label: None,
            description: None,
            hidden: None,
            group_label: None,
            value_format_name: None,
            filters: Vec::new(),
            approximate: None,
            approximate_threshold: None,
            sql_distinct_key: None,
            precision: None,
            percentile: None,
        }
    }
}

/// A `filters: [field: value]` entry on a measure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureFilter {
    pub field: String,
    pub value: String,
}

#[cfg(test)]
#[path = "meta_test.rs"]
mod tests;
