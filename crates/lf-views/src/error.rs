//! Error types for lf-views

use thiserror::Error;

/// View generation error type
///
/// These use the `V` prefix to keep them apart from the `E` codes of
/// lf-core.
#[derive(Error, Debug)]
pub enum ViewError {
    /// V001: A generated element failed its well-formedness check
    #[error("[V001] Invalid {element} '{name}' in view '{view}': {reason}")]
    Validation {
        element: &'static str,
        name: String,
        view: String,
        reason: String,
    },

    /// V002: A column path cannot be placed in the column hierarchy
    #[error("[V002] Cannot classify column '{path}': {reason}")]
    ClassificationAmbiguity { path: String, reason: String },

    /// V003: A nested array is deeper than the configured limit
    #[error("[V003] Nested view for '{owner}' skipped: depth {depth} exceeds max_nested_depth {max}")]
    DepthExceeded {
        owner: String,
        depth: usize,
        max: usize,
    },

    /// V004: Renaming a conflicting dimension needed a numeric suffix
    #[error("[V004] Dimension '{name}' in view '{view}' still collides after adding '{suffix}', renamed to '{resolved}'")]
    NameCollision {
        name: String,
        view: String,
        suffix: String,
        resolved: String,
    },

    /// V005: Core error propagation
    #[error("[V005] Core error: {0}")]
    Core(#[from] lf_core::CoreError),
}

/// Result type alias for ViewError
pub type ViewResult<T> = Result<T, ViewError>;
