//! Shared test utilities for lf-views

use crate::column::{Column, ColumnPath};
use lf_core::{DbtModel, ModelName, SourceColumn};
use std::collections::BTreeMap;

/// Canonical column map from `(name, type)` pairs
pub fn column_map(defs: &[(&str, &str)]) -> BTreeMap<ColumnPath, Column> {
    defs.iter()
        .map(|(name, ty)| {
            let column = Column::new(name, Some(ty));
            (column.path.clone(), column)
        })
        .collect()
}

/// Source columns from `(name, type)` pairs
pub fn source_columns(defs: &[(&str, &str)]) -> Vec<SourceColumn> {
    defs.iter()
        .map(|(name, ty)| SourceColumn::new(*name, Some(ty)))
        .collect()
}

/// A model in `proj.shop` with the given columns
pub fn model(name: &str, defs: &[(&str, &str)]) -> DbtModel {
    model_with_columns(name, source_columns(defs))
}

pub fn model_with_columns(name: &str, columns: Vec<SourceColumn>) -> DbtModel {
    DbtModel {
        name: ModelName::new(name),
        unique_id: format!("model.shop.{name}"),
        relation_name: format!("`proj`.`shop`.`{name}`"),
        schema: Some("shop".to_string()),
        description: None,
        tags: Vec::new(),
        looker: Default::default(),
        columns,
    }
}
