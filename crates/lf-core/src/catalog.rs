//! dbt `catalog.json` types
//!
//! The catalog records the physical schema the warehouse reports for each
//! relation. For BigQuery, nested fields appear as separate entries whose
//! names are dot paths (`items`, `items.sku`, ...), and column names keep
//! the casing of the warehouse schema.

use crate::error::{CoreError, CoreResult};
use crate::manifest::read_artifact;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Physical schema information for compiled nodes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog entries keyed by node unique id
    #[serde(default)]
    pub nodes: HashMap<String, CatalogNode>,
}

/// Physical schema of a single relation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogNode {
    #[serde(default)]
    pub unique_id: Option<String>,

    /// Columns keyed by (original-case) name
    #[serde(default)]
    pub columns: HashMap<String, CatalogColumn>,
}

/// A physical column as observed in the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogColumn {
    /// Column name with original casing
    #[serde(default)]
    pub name: Option<String>,

    /// Warehouse type string, e.g. `ARRAY<STRUCT<sku STRING>>`
    #[serde(rename = "type", default)]
    pub data_type: Option<String>,

    /// Column comment
    #[serde(default)]
    pub comment: Option<String>,

    /// Ordinal position
    #[serde(default)]
    pub index: Option<u32>,
}

impl Catalog {
    /// Load a catalog from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = read_artifact(path)?;
        Self::from_json(&content).map_err(|e| match e {
            CoreError::Json(err) => CoreError::ArtifactParseError {
                artifact: "catalog".to_string(),
                path: path.display().to_string(),
                message: err.to_string(),
            },
            other => other,
        })
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Catalog entry for a node
    pub fn node(&self, unique_id: &str) -> Option<&CatalogNode> {
        self.nodes.get(unique_id)
    }
}

impl CatalogNode {
    /// Columns in warehouse order
    ///
    /// Ordered by `index`; columns without one come last, by key.
    pub fn ordered_columns(&self) -> Vec<(&String, &CatalogColumn)> {
        let mut columns: Vec<_> = self.columns.iter().collect();
        columns.sort_by(|a, b| {
            let position = |c: &CatalogColumn| c.index.unwrap_or(u32::MAX);
            position(a.1).cmp(&position(b.1)).then_with(|| a.0.cmp(b.0))
        });
        columns
    }
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
