//! Models assembled from the manifest and the catalog
//!
//! A [`DbtModel`] is the per-model unit of work handed to the view engine.
//! The catalog is authoritative for which physical columns exist and for
//! their types; the manifest is authoritative for documentation, Looker
//! overrides and primary keys.

use crate::catalog::{Catalog, CatalogNode};
use crate::manifest::{ManifestColumn, ManifestNode};
use crate::meta::{ColumnLookerMeta, ModelLookerMeta};
use crate::model_name::ModelName;
use std::collections::{BTreeMap, HashMap};

/// A model ready for view generation
#[derive(Debug, Clone)]
pub struct DbtModel {
    /// Model name
    pub name: ModelName,

    /// Manifest unique id
    pub unique_id: String,

    /// Fully qualified relation (`sql_table_name` of the principal view)
    pub relation_name: String,

    /// Target schema (dataset)
    pub schema: Option<String>,

    /// Model description
    pub description: Option<String>,

    /// Model tags
    pub tags: Vec<String>,

    /// Model-level Looker overrides
    pub looker: ModelLookerMeta,

    /// Merged columns, sorted by lowercase name
    pub columns: Vec<SourceColumn>,
}

/// A column merged from catalog and manifest
#[derive(Debug, Clone, PartialEq)]
pub struct SourceColumn {
    /// Column name (dot path for nested fields) with original casing
    pub name: String,

    /// Warehouse type string
    pub data_type: Option<String>,

    /// Column description (manifest first, catalog comment second)
    pub description: Option<String>,

    /// Column-level Looker overrides
    pub looker: ColumnLookerMeta,

    /// Whether the column is the model's primary key
    pub primary_key: bool,
}

impl SourceColumn {
    /// A bare column with a name and type
    pub fn new(name: impl Into<String>, data_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.map(String::from),
            description: None,
            looker: ColumnLookerMeta::default(),
            primary_key: false,
        }
    }
}

impl DbtModel {
    /// Merge a manifest node with its catalog entry (if any)
    pub fn from_artifacts(node: &ManifestNode, catalog_node: Option<&CatalogNode>) -> Self {
        let manifest_columns: HashMap<String, &ManifestColumn> = node
            .columns
            .values()
            .map(|c| (c.name.to_lowercase(), c))
            .collect();

        let mut merged: BTreeMap<String, SourceColumn> = BTreeMap::new();

        match catalog_node {
            Some(catalog_node) => {
                for (key, catalog_column) in catalog_node.ordered_columns() {
                    let name = catalog_column.name.clone().unwrap_or_else(|| key.clone());
                    let lower = name.to_lowercase();
                    if merged.contains_key(&lower) {
                        log::warn!(
                            "Model '{}': duplicate catalog column '{}' (case-insensitive), keeping the first",
                            node.name,
                            name
                        );
                        continue;
                    }
                    let documented = manifest_columns.get(&lower).copied();
                    let column = SourceColumn {
                        name,
                        data_type: catalog_column.data_type.clone(),
                        description: documented
                            .and_then(|c| non_empty(&c.description))
                            .or_else(|| catalog_column.comment.clone().filter(|c| !c.is_empty())),
                        looker: documented
                            .and_then(|c| c.looker().cloned())
                            .unwrap_or_default(),
                        primary_key: documented.is_some_and(|c| c.is_primary_key()),
                    };
                    merged.insert(lower, column);
                }
            }
            None => {
                log::warn!(
                    "Model '{}' is missing from the catalog; using manifest column types only",
                    node.name
                );
            }
        }

        let mut manifest_only: Vec<&&ManifestColumn> = manifest_columns
            .iter()
            .filter(|(lower, _)| !merged.contains_key(*lower))
            .map(|(_, c)| c)
            .collect();
        manifest_only.sort_by(|a, b| a.name.cmp(&b.name));

        for documented in manifest_only {
            match documented.data_type.as_deref().filter(|t| !t.is_empty()) {
                Some(data_type) => {
                    merged.insert(
                        documented.name.to_lowercase(),
                        SourceColumn {
                            name: documented.name.clone(),
                            data_type: Some(data_type.to_string()),
                            description: non_empty(&documented.description),
                            looker: documented.looker().cloned().unwrap_or_default(),
                            primary_key: documented.is_primary_key(),
                        },
                    );
                }
                None => log::warn!(
                    "Model '{}': column '{}' is documented but not in the catalog and has no data_type; skipping",
                    node.name,
                    documented.name
                ),
            }
        }

        Self {
            name: node.model_name(),
            unique_id: node.unique_id.clone(),
            relation_name: node
                .relation_name
                .clone()
                .unwrap_or_else(|| default_relation(node)),
            schema: node.schema.clone(),
            description: non_empty(&node.description),
            tags: node.tags.clone(),
            looker: node.looker().cloned().unwrap_or_default(),
            columns: merged.into_values().collect(),
        }
    }

    /// Whether the model carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Build a `DbtModel` for each of the given manifest nodes
pub fn assemble_models(nodes: &[&ManifestNode], catalog: &Catalog) -> Vec<DbtModel> {
    nodes
        .iter()
        .map(|node| DbtModel::from_artifacts(node, catalog.node(&node.unique_id)))
        .collect()
}

fn default_relation(node: &ManifestNode) -> String {
    let table = node.alias.as_deref().unwrap_or(&node.name);
    [node.database.as_deref(), node.schema.as_deref(), Some(table)]
        .into_iter()
        .flatten()
        .map(|part| format!("`{part}`"))
        .collect::<Vec<_>>()
        .join(".")
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[path = "model_test.rs"]
mod tests;
