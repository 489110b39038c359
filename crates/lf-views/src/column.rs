//! Column paths and canonicalized columns
//!
//! Paths are keyed by their lowercase form; the warehouse casing lives in
//! [`Column::original_path`] and is what generated SQL references.

use crate::types::{recognize, ColumnKind, TypeInfo};
use lf_core::meta::{DimensionMeta, MeasureMeta};
use lf_core::SourceColumn;
use std::collections::BTreeMap;
use std::fmt;

/// Lowercase dot-separated column path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnPath(String);

impl ColumnPath {
    /// Canonicalize a path (lowercased)
    pub fn new(path: &str) -> Self {
        Self(path.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of segments
    pub fn depth(&self) -> usize {
        self.0.split('.').count()
    }

    /// Empty path, empty segment, or a leading/trailing dot
    pub fn is_malformed(&self) -> bool {
        self.0.split('.').any(str::is_empty)
    }

    /// Immediate parent path, `None` for top-level columns
    pub fn parent(&self) -> Option<ColumnPath> {
        self.0.rfind('.').map(|pos| Self(self.0[..pos].to_string()))
    }

    /// Every prefix of this path, shortest first, including the path itself
    pub fn prefixes(&self) -> Vec<ColumnPath> {
        let mut prefixes = Vec::with_capacity(self.depth());
        for (i, c) in self.0.char_indices() {
            if c == '.' {
                prefixes.push(Self(self.0[..i].to_string()));
            }
        }
        prefixes.push(self.clone());
        prefixes
    }

    /// Whether this path lies strictly below `ancestor`
    pub fn is_descendant_of(&self, ancestor: &ColumnPath) -> bool {
        self.0.len() > ancestor.0.len()
            && self.0.starts_with(&ancestor.0)
            && self.0.as_bytes()[ancestor.0.len()] == b'.'
    }
}

impl fmt::Display for ColumnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ColumnPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A column prepared for classification
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub path: ColumnPath,

    /// Path with the warehouse casing preserved
    pub original_path: String,

    pub raw_type: Option<String>,
    pub type_info: TypeInfo,
    pub description: Option<String>,

    /// Dimension overrides from `meta.looker.dimension`
    pub dimension: DimensionMeta,

    /// Measures from `meta.looker.measures`
    pub measures: Vec<MeasureMeta>,

    pub primary_key: bool,
}

impl Column {
    /// A bare column
    pub fn new(original_path: &str, raw_type: Option<&str>) -> Self {
        Self {
            path: ColumnPath::new(original_path),
            original_path: original_path.to_string(),
            raw_type: raw_type.map(String::from),
            type_info: recognize(raw_type),
            description: None,
            dimension: DimensionMeta::default(),
            measures: Vec::new(),
            primary_key: false,
        }
    }

    pub fn from_source(source: &SourceColumn) -> Self {
        Self {
            description: source.description.clone(),
            dimension: source.looker.dimension.clone().unwrap_or_default(),
            measures: source.looker.measures.clone(),
            primary_key: source.primary_key
                || source
                    .looker
                    .dimension
                    .as_ref()
                    .and_then(|d| d.primary_key)
                    .unwrap_or(false),
            ..Self::new(&source.name, source.data_type.as_deref())
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.type_info.kind
    }

    pub fn is_array(&self) -> bool {
        self.type_info.is_array()
    }

    /// Original-case segments
    pub fn original_segments(&self) -> Vec<&str> {
        self.original_path.split('.').collect()
    }

    /// Original-case segments below `owner`
    ///
    /// The whole path when `owner` is `None` or not an ancestor.
    pub fn segments_below(&self, owner: Option<&ColumnPath>) -> Vec<&str> {
        let segments = self.original_segments();
        match owner {
            Some(owner) if self.path.is_descendant_of(owner) => {
                segments[owner.depth()..].to_vec()
            }
            _ => segments,
        }
    }
}

/// Canonicalize source columns into a sorted map keyed by lowercase path
///
/// When two columns share a lowercase path the first one wins.
pub fn canonicalize(model: &str, columns: &[SourceColumn]) -> BTreeMap<ColumnPath, Column> {
    let mut canonical = BTreeMap::new();
    for source in columns {
        let column = Column::from_source(source);
        if canonical.contains_key(&column.path) {
            log::warn!(
                "Model '{}': duplicate column path '{}' (case-insensitive), keeping the first",
                model,
                source.name
            );
            continue;
        }
        canonical.insert(column.path.clone(), column);
    }
    canonical
}

#[cfg(test)]
#[path = "column_test.rs"]
mod tests;
