//! dbt `manifest.json` types
//!
//! Only the subset of the manifest that view generation needs is modelled;
//! everything else in the document is ignored during deserialization.

use crate::error::{CoreError, CoreResult};
use crate::meta::{ColumnLookerMeta, ModelLookerMeta};
use crate::model_name::ModelName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// The only warehouse adapter we generate views for
pub const SUPPORTED_ADAPTER: &str = "bigquery";

/// Compiled dbt project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Manifest metadata (adapter, dbt version)
    pub metadata: ManifestMetadata,

    /// All nodes keyed by unique id (models, tests, seeds, ...)
    #[serde(default)]
    pub nodes: HashMap<String, ManifestNode>,

    /// Exposures keyed by unique id
    #[serde(default)]
    pub exposures: HashMap<String, ManifestExposure>,
}

/// Manifest metadata block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    /// Warehouse adapter that produced the manifest
    pub adapter_type: String,

    #[serde(default)]
    pub dbt_version: Option<String>,

    #[serde(default)]
    pub project_name: Option<String>,
}

/// A node in the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestNode {
    /// Unique identifier, e.g. `model.shop.orders`
    pub unique_id: String,

    /// Node name
    pub name: String,

    /// Node kind (`model`, `test`, `seed`, ...)
    pub resource_type: String,

    /// Fully qualified relation, e.g. `` `project`.`dataset`.`orders` ``
    #[serde(default)]
    pub relation_name: Option<String>,

    /// Target schema (dataset)
    #[serde(default)]
    pub schema: Option<String>,

    /// Target database (project)
    #[serde(default)]
    pub database: Option<String>,

    /// Physical table name if different from `name`
    #[serde(default)]
    pub alias: Option<String>,

    /// Model description
    #[serde(default)]
    pub description: String,

    /// Model tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Node meta
    #[serde(default)]
    pub meta: NodeMeta,

    /// Node config
    #[serde(default)]
    pub config: NodeConfig,

    /// Documented columns keyed by name
    #[serde(default)]
    pub columns: HashMap<String, ManifestColumn>,

    /// Path of the model file relative to the model directory
    #[serde(default)]
    pub path: Option<String>,
}

impl ManifestNode {
    /// Whether this node is a model
    pub fn is_model(&self) -> bool {
        self.resource_type == "model"
    }

    /// Whether the node is enabled in its config
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Typed model name
    pub fn model_name(&self) -> ModelName {
        ModelName::new(self.name.clone())
    }

    /// Looker overrides declared on the model
    pub fn looker(&self) -> Option<&ModelLookerMeta> {
        self.meta.looker.as_ref()
    }
}

/// `meta` block on a node
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMeta {
    #[serde(default)]
    pub looker: Option<ModelLookerMeta>,
}

/// Subset of the node `config` block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
    #[serde(default = "crate::serde_helpers::default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub materialized: Option<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            materialized: None,
        }
    }
}

/// A column documented in the project's YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestColumn {
    /// Column name as written in the YAML
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Declared data type, if any
    #[serde(default)]
    pub data_type: Option<String>,

    #[serde(default)]
    pub meta: ColumnMeta,

    /// Model contract constraints
    #[serde(default)]
    pub constraints: Vec<ColumnConstraint>,
}

impl ManifestColumn {
    /// Looker overrides declared on the column
    pub fn looker(&self) -> Option<&ColumnLookerMeta> {
        self.meta.looker.as_ref()
    }

    /// Whether the column is declared as the primary key
    pub fn is_primary_key(&self) -> bool {
        let from_meta = self
            .looker()
            .and_then(|l| l.dimension.as_ref())
            .and_then(|d| d.primary_key)
            .unwrap_or(false);
        from_meta || self.constraints.iter().any(|c| c.constraint_type == "primary_key")
    }
}

/// `meta` block on a column
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnMeta {
    #[serde(default)]
    pub looker: Option<ColumnLookerMeta>,
}

/// A column constraint from a model contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnConstraint {
    #[serde(rename = "type")]
    pub constraint_type: String,
}

/// An exposure (dashboard, application, ...) that consumes models
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestExposure {
    pub name: String,

    /// Referenced models
    #[serde(default)]
    pub refs: Vec<ExposureRef>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// A `ref()` made by an exposure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "RawExposureRef")]
pub struct ExposureRef {
    pub name: String,

    #[serde(default)]
    pub package: Option<String>,
}

/// Older manifests store refs as `["model"]` or `["package", "model"]`
#[derive(Deserialize)]
#[serde(untagged)]
enum RawExposureRef {
    Legacy(Vec<String>),
    Named {
        name: String,
        #[serde(default)]
        package: Option<String>,
    },
}

impl From<RawExposureRef> for ExposureRef {
    fn from(raw: RawExposureRef) -> Self {
        match raw {
            RawExposureRef::Named { name, package } => ExposureRef { name, package },
            RawExposureRef::Legacy(mut parts) => {
                let name = parts.pop().unwrap_or_default();
                ExposureRef {
                    name,
                    package: parts.pop(),
                }
            }
        }
    }
}

impl Manifest {
    /// Load and validate a manifest from a file
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = read_artifact(path)?;
        Self::from_json(&content).map_err(|e| match e {
            CoreError::Json(err) => CoreError::ArtifactParseError {
                artifact: "manifest".to_string(),
                path: path.display().to_string(),
                message: err.to_string(),
            },
            other => other,
        })
    }

    /// Parse and validate a manifest from a JSON string
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        manifest.validate_adapter()?;
        Ok(manifest)
    }

    fn validate_adapter(&self) -> CoreResult<()> {
        if !self
            .metadata
            .adapter_type
            .eq_ignore_ascii_case(SUPPORTED_ADAPTER)
        {
            return Err(CoreError::UnsupportedAdapter {
                found: self.metadata.adapter_type.clone(),
                expected: SUPPORTED_ADAPTER.to_string(),
            });
        }
        Ok(())
    }

    /// All enabled model nodes, sorted by unique id
    pub fn models(&self) -> Vec<&ManifestNode> {
        let mut models: Vec<&ManifestNode> = self
            .nodes
            .values()
            .filter(|n| n.is_model() && n.is_enabled())
            .collect();
        models.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        models
    }

    /// Find a model node by name
    pub fn get_model(&self, name: &str) -> Option<&ManifestNode> {
        self.nodes
            .values()
            .find(|n| n.is_model() && n.name == name)
    }

    /// Total number of enabled models
    pub fn model_count(&self) -> usize {
        self.models().len()
    }
}

/// Read an artifact file, distinguishing "missing" from other IO failures
pub(crate) fn read_artifact(path: &Path) -> CoreResult<String> {
    if !path.exists() {
        return Err(CoreError::ArtifactNotFound {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
#[path = "manifest_test.rs"]
mod tests;
