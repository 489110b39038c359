//! Column hierarchy
//!
//! Builds a tree over the flat column map, one node per path prefix.
//! Intermediate nodes missing from the schema are synthesized: they have
//! no column and are never arrays.

use crate::column::{Column, ColumnPath};
use std::collections::BTreeMap;

/// A node in the column tree
#[derive(Debug, Clone)]
pub struct HierarchyNode<'a> {
    pub path: ColumnPath,
    pub is_array: bool,

    /// `None` for synthesized intermediates
    pub column: Option<&'a Column>,

    /// Immediate children, in insertion order, without duplicates
    pub children: Vec<ColumnPath>,
}

impl<'a> HierarchyNode<'a> {
    fn synthesized(path: ColumnPath) -> Self {
        Self {
            path,
            is_array: false,
            column: None,
            children: Vec::new(),
        }
    }

    pub fn is_synthesized(&self) -> bool {
        self.column.is_none()
    }
}

/// Tree of column paths
#[derive(Debug, Clone, Default)]
pub struct ColumnHierarchy<'a> {
    nodes: BTreeMap<ColumnPath, HierarchyNode<'a>>,
}

impl<'a> ColumnHierarchy<'a> {
    /// Build the hierarchy in three passes: prefixes, columns, child edges
    ///
    /// Malformed paths are left out of the tree.
    pub fn build(columns: &'a BTreeMap<ColumnPath, Column>) -> Self {
        let mut nodes: BTreeMap<ColumnPath, HierarchyNode<'a>> = BTreeMap::new();
        let well_formed: Vec<&'a Column> = columns
            .values()
            .filter(|c| !c.path.is_malformed())
            .collect();

        for column in &well_formed {
            for prefix in column.path.prefixes() {
                nodes
                    .entry(prefix.clone())
                    .or_insert_with(|| HierarchyNode::synthesized(prefix));
            }
        }

        for &column in &well_formed {
            if let Some(node) = nodes.get_mut(&column.path) {
                node.column = Some(column);
                node.is_array = column.is_array();
            }
        }

        for column in &well_formed {
            let prefixes = column.path.prefixes();
            for pair in prefixes.windows(2) {
                let (parent, child) = (&pair[0], &pair[1]);
                if let Some(node) = nodes.get_mut(parent) {
                    if !node.children.contains(child) {
                        node.children.push(child.clone());
                    }
                }
            }
        }

        Self { nodes }
    }

    pub fn get(&self, path: &ColumnPath) -> Option<&HierarchyNode<'a>> {
        self.nodes.get(path)
    }

    pub fn contains(&self, path: &ColumnPath) -> bool {
        self.nodes.contains_key(path)
    }

    /// Immediate children of `path` (empty when unknown)
    pub fn children(&self, path: &ColumnPath) -> &[ColumnPath] {
        self.nodes
            .get(path)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Paths of every array node, sorted
    pub fn array_paths(&self) -> Vec<ColumnPath> {
        self.nodes
            .values()
            .filter(|n| n.is_array)
            .map(|n| n.path.clone())
            .collect()
    }

    /// Top-level nodes
    pub fn roots(&self) -> impl Iterator<Item = &HierarchyNode<'a>> {
        self.nodes.values().filter(|n| n.path.depth() == 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode<'a>> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
#[path = "hierarchy_test.rs"]
mod tests;
