//! Error types for the WebP variant converter.
//!
//! Errors are split by when they can happen: `InputError` before a batch
//! starts (nothing touched on disk yet), `PipelineError` while the batch is
//! running (aborts the remaining work), `ConfigError` while loading settings.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for converter operations.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Rejected before any processing started
    #[error("Invalid input: {0}")]
    Input(#[from] InputError),

    /// Failure inside the processing loop
    #[error("Processing failed: {0}")]
    Pipeline(#[from] PipelineError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Problems with the source folder or the user-entered variant fields.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// Source folder was not given or does not exist
    #[error("Source folder does not exist: {0}")]
    MissingFolder(PathBuf),

    /// Source path exists but is a file
    #[error("Source path is not a folder: {0}")]
    NotAFolder(PathBuf),

    /// A single configuration field failed to parse or is out of range
    #[error("{field}: {reason} (got {value:?})")]
    InvalidField {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl InputError {
    pub(crate) fn field(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field, if this is a field error.
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            Self::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Processing loop errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// WebP encoder rejected the image
    #[error("Encode error for {path} ({variant}): {message}")]
    Encode {
        path: PathBuf,
        variant: String,
        message: String,
    },

    /// Writing an encoded variant failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output folder could not be created
    #[error("Cannot create output folder {path}: {source}")]
    OutputFolder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Blocking work panicked or was cancelled by the runtime
    #[error("Background task failed in {stage} stage: {message}")]
    Task { stage: &'static str, message: String },
}

/// Convenience type alias for converter results.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
