//! Generation summary
//!
//! Records which models produced views, which failed and why, and how
//! many files were written. The summary is printed at the end of a
//! `generate` run and can be saved as a JSON report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::error::CoreResult;

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSummary {
    /// Short identifier for this run
    pub run_id: String,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,

    /// Number of .view.lkml files written
    pub files_generated: usize,

    /// Models whose views were generated
    pub models_ok: Vec<GeneratedModel>,

    /// Models that failed
    pub models_failed: Vec<FailedModel>,

    /// Whether the run was interrupted before every model was processed
    #[serde(default)]
    pub cancelled: bool,
}

/// A model whose views were generated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedModel {
    pub name: String,

    /// Number of views (principal plus nested)
    pub views: usize,

    /// Output file
    pub path: String,

    pub duration_ms: u64,
}

/// A model that failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedModel {
    pub name: String,
    pub reason: String,
}

impl Default for GenerationSummary {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSummary {
    /// Start a new summary
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string()[..8].to_string(),
            started_at: Utc::now(),
            finished_at: None,
            files_generated: 0,
            models_ok: Vec::new(),
            models_failed: Vec::new(),
            cancelled: false,
        }
    }

    /// Record a generated model
    pub fn mark_ok(&mut self, name: &str, views: usize, path: &Path, duration_ms: u64) {
        self.models_ok.push(GeneratedModel {
            name: name.to_string(),
            views,
            path: path.display().to_string(),
            duration_ms,
        });
        self.files_generated += 1;
    }

    /// Record a failed model
    pub fn mark_failed(&mut self, name: &str, reason: &str) {
        self.models_failed.push(FailedModel {
            name: name.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Mark the run as interrupted
    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    /// Close the summary and sort entries by model name
    pub fn finish(&mut self) {
        self.models_ok.sort_by(|a, b| a.name.cmp(&b.name));
        self.models_failed.sort_by(|a, b| a.name.cmp(&b.name));
        self.finished_at = Some(Utc::now());
    }

    /// True when no model failed and the run was not interrupted
    pub fn is_success(&self) -> bool {
        self.models_failed.is_empty() && !self.cancelled
    }

    /// Wall-clock duration in seconds, if finished
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds() as f64 / 1000.0)
    }

    /// Load a saved summary
    pub fn load(path: &Path) -> CoreResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Save the summary as JSON, atomically
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
