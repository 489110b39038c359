//! Column classification
//!
//! Decides whether each column lands in the principal view, in the nested
//! view of an array, or is dropped because its fields are inlined.
//!
//! - A non-repeated record whose fields are present is excluded; its
//!   fields are flattened into the enclosing view.
//! - Arrays own a nested view. A column below several arrays belongs to
//!   the deepest one.

use crate::column::{Column, ColumnPath};
use crate::error::ViewError;
use crate::hierarchy::ColumnHierarchy;
use crate::types::{is_struct_type, ColumnKind};
use std::collections::{BTreeMap, BTreeSet};

/// Where a column goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Excluded,
    MainView,
    /// Member of the nested view owned by the given array
    NestedView(ColumnPath),
}

/// Classifier over one model's columns
#[derive(Debug)]
pub struct Classifier<'a> {
    columns: &'a BTreeMap<ColumnPath, Column>,
    array_owners: BTreeSet<ColumnPath>,
}

impl<'a> Classifier<'a> {
    /// Array owners are the hierarchy's array nodes plus `extra_owners`
    pub fn new(
        columns: &'a BTreeMap<ColumnPath, Column>,
        hierarchy: &ColumnHierarchy<'_>,
        extra_owners: &[ColumnPath],
    ) -> Self {
        let array_owners = hierarchy
            .array_paths()
            .into_iter()
            .chain(extra_owners.iter().cloned())
            .filter(|p| !p.is_malformed())
            .collect();
        Self {
            columns,
            array_owners,
        }
    }

    /// Every array owner, sorted
    pub fn array_owners(&self) -> &BTreeSet<ColumnPath> {
        &self.array_owners
    }

    pub fn classify(&self, column: &Column) -> Classification {
        if column.path.is_malformed() {
            let err = ViewError::ClassificationAmbiguity {
                path: column.original_path.clone(),
                reason: "empty path segment".to_string(),
            };
            log::warn!("{}", err);
            return Classification::Excluded;
        }
        if self.should_exclude(column) {
            return Classification::Excluded;
        }
        if self.array_owners.contains(&column.path) {
            return Classification::NestedView(column.path.clone());
        }
        match self.array_owner_of(&column.path) {
            Some(owner) => Classification::NestedView(owner.clone()),
            None => Classification::MainView,
        }
    }

    /// A non-array STRUCT (or RECORD) with at least one column below it
    pub fn should_exclude(&self, column: &Column) -> bool {
        let is_record =
            is_struct_type(column.raw_type.as_deref()) || column.kind() == ColumnKind::Record;
        is_record && self.has_descendants(&column.path)
    }

    fn has_descendants(&self, path: &ColumnPath) -> bool {
        let lower = ColumnPath::new(&format!("{}.", path.as_str()));
        self.columns
            .range(lower..)
            .take_while(|(candidate, _)| candidate.is_descendant_of(path))
            .any(|(candidate, _)| !candidate.is_malformed())
    }

    /// Deepest array owner strictly above `path`
    pub fn array_owner_of(&self, path: &ColumnPath) -> Option<&ColumnPath> {
        self.array_owners
            .iter()
            .filter(|owner| path.is_descendant_of(owner))
            .max_by_key(|owner| owner.as_str().len())
    }
}

#[cfg(test)]
#[path = "classifier_test.rs"]
mod tests;
