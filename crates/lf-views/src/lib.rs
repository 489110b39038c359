//! lf-views - LookML view generation for lookforge
//!
//! Turns the flattened column list of one dbt model into LookML views.
//! Records are inlined into their parent view; every array becomes its
//! own view that is unnested from the view holding it.
//!
//! The pipeline for one model, in order: [`types`] recognizes column
//! types, [`hierarchy`] builds the column tree, [`classifier`] assigns
//! each column a view, [`collections`] groups the columns per view,
//! [`dimension`] materializes fields, [`conflict`] resolves name clashes
//! and [`composer`] ties these together. [`emit`] renders the result.

pub mod classifier;
pub mod collections;
pub mod column;
pub mod composer;
pub mod conflict;
pub mod dimension;
pub mod emit;
pub mod error;
pub mod hierarchy;
pub mod lookml;
pub mod measure;
pub mod naming;
pub mod types;

#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;

pub use column::{Column, ColumnPath};
pub use composer::{build_model_views, principal_view_name, ModelViews, NestedView, ViewOptions};
pub use emit::{file_name, render_model};
pub use error::{ViewError, ViewResult};
pub use lookml::{Dimension, DimensionGroup, DimensionType, Measure, TimeDatatype, View};
