//! Generate command implementation
//!
//! Models are independent, so each one runs as a blocking task on a
//! worker pool bounded by a semaphore. A shared stop flag is raised by
//! Ctrl-C, or by the first failure unless `continue_on_error` is set;
//! models that have not started by then are skipped.

use anyhow::{Context, Result};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use lf_core::{Config, CoreError, DbtModel, GenerationSummary};
use lf_views::{build_model_views, file_name, principal_view_name, render_model, ViewOptions};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

use crate::cli::{GenerateArgs, GlobalArgs};
use crate::commands::common::{
    apply_selection_args, init_logging, load_config, load_models, print_table, write_atomic,
    ExitCode,
};

/// Result of one model's task
#[derive(Debug)]
pub(crate) enum ModelOutcome {
    Generated {
        name: String,
        views: usize,
        path: PathBuf,
        duration_ms: u64,
    },
    Failed {
        name: String,
        reason: String,
    },
    Skipped {
        name: String,
    },
}

/// Execute the generate command
pub async fn execute(args: &GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let mut config = load_config(global)?;
    apply_generate_args(&mut config, args);
    config.validate().context("Invalid configuration")?;
    init_logging(global, &config);

    let models = load_models(&config)?;
    if models.is_empty() {
        if !args.quiet {
            println!("No models selected");
        }
        let mut summary = GenerationSummary::new();
        summary.finish();
        return write_report(args, &summary);
    }

    check_output_collisions(&models, &ViewOptions::from(&config), &config)
        .context("Invalid configuration")?;

    let threads = config.worker_threads();
    log::info!(
        "Generating views for {} models on {} threads",
        models.len(),
        threads
    );

    let stopped = Arc::new(AtomicBool::new(false));
    let interrupt = {
        let stopped = Arc::clone(&stopped);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted, finishing models in progress");
                stopped.store(true, Ordering::SeqCst);
            }
        })
    };

    let progress = if args.quiet {
        None
    } else {
        let pb = ProgressBar::new(models.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(Arc::new(pb))
    };

    let outcomes = run_models(models, Arc::new(config), threads, &stopped, progress.clone()).await;
    interrupt.abort();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let summary = summarize(&outcomes);
    if !args.quiet {
        print_summary(&summary);
    }
    write_report(args, &summary)?;

    if !summary.models_failed.is_empty() {
        return Err(ExitCode(1).into());
    }
    if summary.cancelled {
        return Err(ExitCode(130).into());
    }
    Ok(())
}

/// Apply generate flags on top of the config file
fn apply_generate_args(config: &mut Config, args: &GenerateArgs) {
    apply_selection_args(config, &args.selection);
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.into();
    }
    if args.use_table_name {
        config.use_table_name = true;
    }
    if !args.timeframes.is_empty() {
        config.custom_timeframes = args.timeframes.clone();
    }
    if args.include_iso_fields {
        config.include_iso_fields = true;
    }
    if args.remove_schema_prefix.is_some() {
        config.remove_schema_prefix = args.remove_schema_prefix.clone();
    }
    if args.continue_on_error {
        config.continue_on_error = true;
    }
    if args.strict {
        config.strict_validation = true;
    }
    if let Some(depth) = args.max_nested_depth {
        config.max_nested_depth = depth;
    }
    if args.threads.is_some() {
        config.threads = args.threads;
    }
}

/// Output file of a model
pub(crate) fn output_path(model: &DbtModel, options: &ViewOptions, config: &Config) -> PathBuf {
    config
        .schema_dir(model.schema.as_deref())
        .join(file_name(&principal_view_name(model, options)))
}

/// Reject two models writing the same view file
pub(crate) fn check_output_collisions(
    models: &[DbtModel],
    options: &ViewOptions,
    config: &Config,
) -> Result<(), CoreError> {
    let mut owners: HashMap<PathBuf, &str> = HashMap::new();
    for model in models {
        let path = output_path(model, options, config);
        if let Some(first) = owners.get(&path) {
            return Err(CoreError::ConfigInvalid {
                message: format!(
                    "models '{}' and '{}' both write {}",
                    first,
                    model.unique_id,
                    path.display()
                ),
            });
        }
        owners.insert(path, &model.unique_id);
    }
    Ok(())
}

/// Run every model on the pool; outcomes are in input order
async fn run_models(
    models: Vec<DbtModel>,
    config: Arc<Config>,
    threads: usize,
    stopped: &Arc<AtomicBool>,
    progress: Option<Arc<ProgressBar>>,
) -> Vec<ModelOutcome> {
    let semaphore = Arc::new(Semaphore::new(threads.max(1)));
    let options = Arc::new(ViewOptions::from(config.as_ref()));

    let handles: Vec<_> = models
        .into_iter()
        .map(|model| {
            let semaphore = Arc::clone(&semaphore);
            let stopped = Arc::clone(stopped);
            let config = Arc::clone(&config);
            let options = Arc::clone(&options);
            let progress = progress.clone();

            tokio::spawn(async move {
                let name = model.name.to_string();
                let Ok(_permit) = semaphore.acquire().await else {
                    return ModelOutcome::Skipped { name };
                };
                if stopped.load(Ordering::SeqCst) {
                    return ModelOutcome::Skipped { name };
                }

                let task_config = Arc::clone(&config);
                let outcome = tokio::task::spawn_blocking(move || {
                    generate_model(&model, &options, &task_config)
                })
                .await
                .unwrap_or_else(|e| ModelOutcome::Failed {
                    name: name.clone(),
                    reason: format!("task panicked: {}", e),
                });

                if let ModelOutcome::Failed { reason, .. } = &outcome {
                    log::error!("Model '{}' failed: {}", name, reason);
                    if !config.continue_on_error {
                        stopped.store(true, Ordering::SeqCst);
                    }
                }
                if let Some(pb) = &progress {
                    pb.set_message(name);
                    pb.inc(1);
                }
                outcome
            })
        })
        .collect();

    join_all(handles)
        .await
        .into_iter()
        .map(|joined| {
            joined.unwrap_or_else(|e| ModelOutcome::Failed {
                name: "<unknown>".to_string(),
                reason: format!("task join error: {}", e),
            })
        })
        .collect()
}

/// Build, render and write the views of one model
pub(crate) fn generate_model(model: &DbtModel, options: &ViewOptions, config: &Config) -> ModelOutcome {
    let start = Instant::now();
    let name = model.name.to_string();

    let views = match build_model_views(model, options) {
        Ok(views) => views,
        Err(e) => {
            return ModelOutcome::Failed {
                name,
                reason: e.to_string(),
            }
        }
    };
    for owner in &views.skipped_owners {
        log::debug!("Model '{}': no view for '{}' (too deep)", name, owner);
    }

    let path = output_path(model, options, config);
    if let Err(e) = write_atomic(&path, &render_model(&views)) {
        return ModelOutcome::Failed {
            name,
            reason: format!("{:#}", e),
        };
    }
    log::debug!("Model '{}': wrote {}", name, path.display());

    ModelOutcome::Generated {
        name,
        views: views.view_count(),
        path,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

/// Fold task outcomes into the run summary
pub(crate) fn summarize(outcomes: &[ModelOutcome]) -> GenerationSummary {
    let mut summary = GenerationSummary::new();
    for outcome in outcomes {
        match outcome {
            ModelOutcome::Generated {
                name,
                views,
                path,
                duration_ms,
            } => summary.mark_ok(name, *views, path, *duration_ms),
            ModelOutcome::Failed { name, reason } => summary.mark_failed(name, reason),
            ModelOutcome::Skipped { name } => {
                log::debug!("Model '{}' skipped", name);
                summary.mark_cancelled();
            }
        }
    }
    summary.finish();
    summary
}

fn print_summary(summary: &GenerationSummary) {
    if !summary.models_failed.is_empty() {
        let rows: Vec<Vec<String>> = summary
            .models_failed
            .iter()
            .map(|f| vec![f.name.clone(), f.reason.clone()])
            .collect();
        print_table(&["FAILED MODEL", "REASON"], &rows);
        println!();
    }

    println!(
        "Generated {} files ({} models ok, {} failed){} in {:.2}s",
        summary.files_generated,
        summary.models_ok.len(),
        summary.models_failed.len(),
        if summary.cancelled { ", run cancelled" } else { "" },
        summary.elapsed_secs().unwrap_or(0.0)
    );
}

fn write_report(args: &GenerateArgs, summary: &GenerationSummary) -> Result<()> {
    if let Some(report) = &args.report {
        summary
            .save(Path::new(report))
            .with_context(|| format!("Failed to write report '{}'", report))?;
        log::info!("Wrote report to {}", report);
    }
    Ok(())
}

#[cfg(test)]
#[path = "generate_test.rs"]
mod tests;
