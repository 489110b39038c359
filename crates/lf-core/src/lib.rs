//! lf-core - Core library for lookforge
//!
//! This crate provides configuration parsing, dbt artifact loading
//! (manifest and catalog), model selection and the per-model input
//! handed to the view engine.

pub mod catalog;
pub mod config;
pub mod error;
pub mod manifest;
pub mod meta;
pub mod model;
pub mod model_name;
pub mod selector;
pub(crate) mod serde_helpers;
pub mod sql_utils;
pub mod summary;

pub use catalog::{Catalog, CatalogColumn, CatalogNode};
pub use config::{Config, LogLevel, DEFAULT_CONFLICT_SUFFIX, DEFAULT_MAX_NESTED_DEPTH};
pub use error::{CoreError, CoreResult};
pub use manifest::{Manifest, ManifestColumn, ManifestExposure, ManifestNode};
pub use meta::{
    ColumnLookerMeta, DimensionMeta, MeasureFilter, MeasureMeta, MeasureType, ModelLookerMeta,
    Timeframe, ViewMeta,
};
pub use model::{assemble_models, DbtModel, SourceColumn};
pub use model_name::ModelName;
pub use selector::ModelSelection;
pub use summary::{FailedModel, GeneratedModel, GenerationSummary};
