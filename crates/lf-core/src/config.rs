//! Configuration types and parsing for lookforge.yml

use crate::error::{CoreError, CoreResult};
use crate::meta::Timeframe;
use crate::selector::ModelSelection;
use crate::serde_helpers::default_true;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "lookforge.yml";

/// Nested views whose array path has more segments than this are not emitted
pub const DEFAULT_MAX_NESTED_DEPTH: usize = 3;

/// Suffix appended to dimensions that collide with a dimension group timeframe
pub const DEFAULT_CONFLICT_SUFFIX: &str = "_conflict";

/// Generator configuration
///
/// Every key is optional; unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to dbt's manifest.json
    #[serde(default = "default_manifest_path")]
    pub manifest_path: PathBuf,

    /// Path to dbt's catalog.json
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// Directory the .view.lkml files are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Name principal views after the physical table instead of the model
    #[serde(default)]
    pub use_table_name: bool,

    /// Timeframes added to every dimension group
    #[serde(default)]
    pub custom_timeframes: Vec<Timeframe>,

    /// Emit ISO year / ISO week dimensions next to each dimension group
    #[serde(default)]
    pub include_iso_fields: bool,

    /// Prefix removed from schema names when building output directories
    #[serde(default)]
    pub remove_schema_prefix: Option<String>,

    /// Suffix for dimensions renamed because of a timeframe collision
    #[serde(default = "default_conflict_suffix")]
    pub conflict_suffix: String,

    /// Hide dimensions renamed because of a timeframe collision
    #[serde(default = "default_true")]
    pub hide_conflicts: bool,

    /// Deepest array path (in segments) that still gets its own view
    #[serde(default = "default_max_nested_depth")]
    pub max_nested_depth: usize,

    /// Keep going when a model fails
    #[serde(default)]
    pub continue_on_error: bool,

    /// Abort a model when any generated element fails validation
    #[serde(default)]
    pub strict_validation: bool,

    /// Log level (error, warn, info, debug, trace)
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Only generate these models
    #[serde(default)]
    pub select: Vec<String>,

    /// Never generate these models
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Only generate models with this tag
    #[serde(default)]
    pub tag: Option<String>,

    /// Only generate models referenced by exposures
    #[serde(default)]
    pub exposures_only: bool,

    /// Only consider exposures with this tag
    #[serde(default)]
    pub exposures_tag: Option<String>,

    /// Worker threads (default: available parallelism)
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Log verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_path: default_manifest_path(),
            catalog_path: default_catalog_path(),
            output_dir: default_output_dir(),
            use_table_name: false,
            custom_timeframes: Vec::new(),
            include_iso_fields: false,
            remove_schema_prefix: None,
            conflict_suffix: default_conflict_suffix(),
            hide_conflicts: true,
            max_nested_depth: default_max_nested_depth(),
            continue_on_error: false,
            strict_validation: false,
            log_level: None,
            select: Vec::new(),
            exclude: Vec::new(),
            tag: None,
            exposures_only: false,
            exposures_tag: None,
            threads: None,
        }
    }
}

fn default_manifest_path() -> PathBuf {
    PathBuf::from("target/manifest.json")
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("target/catalog.json")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("lookml/views")
}

fn default_conflict_suffix() -> String {
    DEFAULT_CONFLICT_SUFFIX.to_string()
}

fn default_max_nested_depth() -> usize {
    DEFAULT_MAX_NESTED_DEPTH
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> CoreResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config =
            serde_yaml::from_str(yaml).map_err(|e| CoreError::ConfigParseError {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `lookforge.yml` from `dir` if present, defaults otherwise
    pub fn load_from_dir_or_default(dir: &Path) -> CoreResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check value constraints serde cannot express
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_nested_depth == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "max_nested_depth must be at least 1".to_string(),
            });
        }
        if self.conflict_suffix.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "conflict_suffix cannot be empty".to_string(),
            });
        }
        if !self
            .conflict_suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "conflict_suffix '{}' may only contain letters, digits and underscores",
                    self.conflict_suffix
                ),
            });
        }
        if self.threads == Some(0) {
            return Err(CoreError::ConfigInvalid {
                message: "threads must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Model selection described by this configuration
    pub fn selection(&self) -> ModelSelection {
        ModelSelection {
            select: self.select.clone(),
            exclude: self.exclude.clone(),
            tag: self.tag.clone(),
            exposures_only: self.exposures_only,
            exposures_tag: self.exposures_tag.clone(),
        }
    }

    /// Output subdirectory for a model's schema
    ///
    /// `remove_schema_prefix` is stripped from the start of the schema name.
    pub fn schema_dir(&self, schema: Option<&str>) -> PathBuf {
        let Some(schema) = schema.filter(|s| !s.is_empty()) else {
            return self.output_dir.clone();
        };
        let stripped = match self.remove_schema_prefix.as_deref() {
            Some(prefix) if !prefix.is_empty() => schema.strip_prefix(prefix).unwrap_or(schema),
            _ => schema,
        };
        if stripped.is_empty() {
            self.output_dir.clone()
        } else {
            self.output_dir.join(stripped)
        }
    }

    /// Worker count, falling back to the machine's available parallelism
    pub fn worker_threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
