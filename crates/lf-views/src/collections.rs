//! Column collections
//!
//! Splits a model's columns into the principal-view bag, one bag per array
//! owner and the excluded record parents. An array below another array is
//! stored in its own bag and in its parent array's bag; the parent's copy
//! becomes the join anchor for the child view.

use crate::classifier::{Classification, Classifier};
use crate::column::{Column, ColumnPath};
use crate::hierarchy::ColumnHierarchy;
use std::collections::BTreeMap;

/// Columns grouped by destination
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnCollections {
    pub main: BTreeMap<ColumnPath, Column>,

    /// Array owner -> members (including the owner itself)
    pub nested: BTreeMap<ColumnPath, BTreeMap<ColumnPath, Column>>,

    pub excluded: BTreeMap<ColumnPath, Column>,
}

impl ColumnCollections {
    /// Classify and distribute columns, iterating in sorted path order
    pub fn assemble(columns: &BTreeMap<ColumnPath, Column>, classifier: &Classifier<'_>) -> Self {
        let mut collections = Self::default();

        for (path, column) in columns {
            match classifier.classify(column) {
                Classification::Excluded => {
                    collections.excluded.insert(path.clone(), column.clone());
                }
                Classification::MainView => {
                    collections.main.insert(path.clone(), column.clone());
                }
                Classification::NestedView(owner) => {
                    if *path == owner {
                        if let Some(parent) = classifier.array_owner_of(&owner) {
                            collections
                                .nested
                                .entry(parent.clone())
                                .or_default()
                                .insert(path.clone(), column.clone());
                        }
                    }
                    collections
                        .nested
                        .entry(owner)
                        .or_default()
                        .insert(path.clone(), column.clone());
                }
            }
        }

        collections
    }

    /// Build hierarchy and classifier, then assemble
    pub fn from_columns(columns: &BTreeMap<ColumnPath, Column>, extra_owners: &[ColumnPath]) -> Self {
        let hierarchy = ColumnHierarchy::build(columns);
        let classifier = Classifier::new(columns, &hierarchy, extra_owners);
        Self::assemble(columns, &classifier)
    }

    /// Owners whose nested view is within the depth limit
    pub fn emitted_owners(&self, max_depth: usize) -> impl Iterator<Item = &ColumnPath> {
        self.nested.keys().filter(move |owner| owner.depth() <= max_depth)
    }

    /// Owners deeper than the limit
    pub fn skipped_owners(&self, max_depth: usize) -> impl Iterator<Item = &ColumnPath> {
        self.nested.keys().filter(move |owner| owner.depth() > max_depth)
    }

    /// Total number of distinct columns across bags
    pub fn column_count(&self) -> usize {
        let nested: std::collections::BTreeSet<&ColumnPath> =
            self.nested.values().flat_map(|bag| bag.keys()).collect();
        self.main.len() + nested.len() + self.excluded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.nested.is_empty() && self.excluded.is_empty()
    }
}

#[cfg(test)]
#[path = "collections_test.rs"]
mod tests;
