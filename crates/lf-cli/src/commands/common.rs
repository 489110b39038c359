//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use lf_core::{
    assemble_models, Catalog, Config, DbtModel, LogLevel, Manifest, ModelSelection,
};
use std::fmt;
use std::path::Path;

use crate::cli::{GlobalArgs, SelectionArgs};

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that destructors run before the process ends.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Control flow only; never shown to the user.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Load `--config`, or `./lookforge.yml` when present, or defaults
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path)),
        None => Config::load_from_dir_or_default(Path::new(".")).context("Failed to load config"),
    }
}

/// Initialize `env_logger`
///
/// Precedence: `--log-level`, then `--verbose`, then the config file. With
/// none of them set, `RUST_LOG` applies and defaults to `warn`.
pub(crate) fn init_logging(global: &GlobalArgs, config: &Config) {
    let level: Option<LogLevel> = global
        .log_level
        .map(LogLevel::from)
        .or(global.verbose.then_some(LogLevel::Debug))
        .or(config.log_level);

    let mut builder = match level {
        Some(level) => {
            let mut builder = env_logger::Builder::new();
            builder.filter_level(level_filter(level));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")),
    };
    if builder.try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}

fn level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Warn => log::LevelFilter::Warn,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Debug => log::LevelFilter::Debug,
        LogLevel::Trace => log::LevelFilter::Trace,
    }
}

/// Apply input and selection flags on top of the config file
pub(crate) fn apply_selection_args(config: &mut Config, args: &SelectionArgs) {
    if let Some(manifest) = &args.manifest {
        config.manifest_path = manifest.into();
    }
    if let Some(catalog) = &args.catalog {
        config.catalog_path = catalog.into();
    }
    if let Some(select) = &args.select {
        config.select = ModelSelection::parse_list(select);
    }
    if let Some(exclude) = &args.exclude {
        config.exclude = ModelSelection::parse_list(exclude);
    }
    if args.tag.is_some() {
        config.tag = args.tag.clone();
    }
    if args.exposures_only {
        config.exposures_only = true;
    }
    if args.exposures_tag.is_some() {
        config.exposures_tag = args.exposures_tag.clone();
    }
}

/// Load the artifacts and build the selected models, sorted by unique id
pub(crate) fn load_models(config: &Config) -> Result<Vec<DbtModel>> {
    let manifest = Manifest::load(&config.manifest_path).context("Failed to load manifest")?;
    let catalog = Catalog::load(&config.catalog_path).context("Failed to load catalog")?;

    let selected = config
        .selection()
        .apply(&manifest)
        .context("Failed to select models")?;
    log::info!(
        "Selected {} of {} models",
        selected.len(),
        manifest.model_count()
    );

    Ok(assemble_models(&selected, &catalog))
}

/// Write `content` to a sibling temp file, then rename it into place
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let temp_path = path.with_extension("lkml.tmp");
    std::fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move {} into place", path.display()))?;
    Ok(())
}

/// Column widths wide enough for every header and cell
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }
    widths
}

/// Print a left-aligned table with a dashed separator under the header
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);
    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", format_row(headers.to_vec()));
    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", separator.join("  "));
    for row in rows {
        println!("{}", format_row(row.iter().map(String::as_str).collect()));
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
