//! Error types for lf-core

use thiserror::Error;

/// Core error type for lookforge
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Input artifact (manifest or catalog) not found
    #[error("[E004] Artifact not found: {path}")]
    ArtifactNotFound { path: String },

    /// E005: Input artifact is not valid JSON or misses a required field
    #[error("[E005] Failed to parse {artifact} '{path}': {message}")]
    ArtifactParseError {
        artifact: String,
        path: String,
        message: String,
    },

    /// E006: Manifest was produced by an adapter we cannot generate views for
    #[error("[E006] Unsupported adapter '{found}': only '{expected}' manifests are supported")]
    UnsupportedAdapter { found: String, expected: String },

    /// E007: Model not found in the manifest
    #[error("[E007] Model not found: {name}")]
    ModelNotFound { name: String },

    /// E008: Invalid model selection
    #[error("[E008] Invalid selection '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// E014: IO error
    #[error("[E014] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// E016: IO error with file path context
    #[error("[E016] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// E015: YAML parse error
    #[error("[E015] YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
