//! Ls command implementation

use anyhow::{Context, Result};
use lf_core::DbtModel;
use lf_views::{build_model_views, ViewOptions};
use serde::Serialize;

use crate::cli::{GlobalArgs, LsArgs, LsOutput};
use crate::commands::common::{apply_selection_args, init_logging, load_config, load_models, print_table};

/// One row of `lf ls`
#[derive(Debug, Serialize)]
pub(crate) struct ModelListing {
    pub name: String,
    pub view: String,
    pub schema: Option<String>,
    pub columns: usize,
    pub nested_views: usize,

    /// Arrays deeper than `max_nested_depth`
    pub skipped_arrays: usize,
    pub tags: Vec<String>,
}

/// Execute the ls command
pub async fn execute(args: &LsArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    apply_selection_args(&mut config, &args.selection);
    config.validate().context("Invalid configuration")?;
    init_logging(global, &config);

    let models = load_models(&config)?;
    let options = ViewOptions::from(&config);
    let listings = models
        .iter()
        .map(|model| list_model(model, &options))
        .collect::<Result<Vec<_>>>()?;

    match args.output {
        LsOutput::Json => {
            let json = serde_json::to_string_pretty(&listings).context("Failed to serialize models")?;
            println!("{}", json);
        }
        LsOutput::Table => {
            let rows: Vec<Vec<String>> = listings
                .iter()
                .map(|l| {
                    vec![
                        l.name.clone(),
                        l.view.clone(),
                        l.schema.clone().unwrap_or_else(|| "-".to_string()),
                        l.columns.to_string(),
                        l.nested_views.to_string(),
                        l.tags.join(","),
                    ]
                })
                .collect();
            print_table(&["MODEL", "VIEW", "SCHEMA", "COLUMNS", "NESTED", "TAGS"], &rows);
            println!("\n{} models", listings.len());
        }
    }
    Ok(())
}

pub(crate) fn list_model(model: &DbtModel, options: &ViewOptions) -> Result<ModelListing> {
    let views = build_model_views(model, options)
        .with_context(|| format!("Failed to build views for model '{}'", model.name))?;
    Ok(ModelListing {
        name: model.name.to_string(),
        view: views.principal.name.clone(),
        schema: model.schema.clone(),
        columns: model.columns.len(),
        nested_views: views.nested.len(),
        skipped_arrays: views.skipped_owners.len(),
        tags: model.tags.clone(),
    })
}
