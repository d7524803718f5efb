//! Error types for the Prism classification pipeline.
//!
//! Errors split along the fault line that matters to a caller: startup
//! errors (config, catalog) abort initialization and must never be served
//! around, while pipeline errors are per-request and leave the process
//! healthy for the next request.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Prism operations.
#[derive(Error, Debug)]
pub enum PrismError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Label catalog loading errors (startup-fatal)
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Per-request pipeline errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

/// Label catalog errors. All of these are fatal at startup: a process that
/// cannot map model output indices to labels must not begin serving.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The synset file could not be read
    #[error("Failed to read catalog file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line in the synset file could not be parsed
    #[error("Malformed catalog line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// The synset file parsed but contained no labels
    #[error("Catalog file {path} contains no labels")]
    Empty { path: PathBuf },

    /// The catalog length does not match the model's output width
    #[error("Catalog has {catalog_len} labels but model produces {model_len} classes")]
    ModelMismatch {
        catalog_len: usize,
        model_len: usize,
    },
}

/// Per-request pipeline errors, organized by stage.
///
/// `Decode`, `UnsupportedFormat` are client-caused; `Inference` is
/// backend-caused; `CatalogAlignment` is an internal invariant violation
/// and is logged distinctly from the others at the pipeline boundary.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Image bytes could not be decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Image container or color mode cannot be normalized to 3-channel RGB
    #[error("Unsupported image format: {message}")]
    UnsupportedFormat { message: String },

    /// The model backend failed. Never retried: the computation is
    /// deterministic, so the same input would fail the same way.
    #[error("Inference backend error: {message}")]
    Inference { message: String },

    /// The model returned a different number of scores than the catalog
    /// has labels. A defect in catalog/model alignment, never downgraded
    /// to an empty result.
    #[error("Model returned {scores_len} scores but catalog has {catalog_len} labels")]
    ScoreLengthMismatch {
        scores_len: usize,
        catalog_len: usize,
    },

    /// Postprocessing produced a class index with no catalog entry.
    /// A defect in catalog/model alignment, never downgraded to an
    /// empty result.
    #[error("Class index {index} has no catalog entry (catalog length {catalog_len})")]
    CatalogAlignment { index: usize, catalog_len: usize },
}

impl PipelineError {
    /// Whether this error was caused by the client's input rather than
    /// the backend or an internal defect. An enclosing serving layer maps
    /// this to its 4xx/5xx split.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            PipelineError::Decode { .. } | PipelineError::UnsupportedFormat { .. }
        )
    }
}

/// Convenience type alias for Prism results.
pub type Result<T> = std::result::Result<T, PrismError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
