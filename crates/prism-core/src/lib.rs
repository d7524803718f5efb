//! Prism Core - JPEG image classification pipeline.
//!
//! Prism classifies a single image into one of a fixed set of categories
//! by running it through a pretrained ONNX classification model and
//! returning the most probable labels with confidence scores.
//!
//! # Architecture
//!
//! One request flows strictly left to right:
//!
//! ```text
//! Bytes → Preprocess (decode, 224×224, CHW, normalize) → Infer → Postprocess → Predictions
//! ```
//!
//! The label catalog is loaded once at startup and consulted only by the
//! postprocessing stage; its line order must match the model's output
//! index order exactly.
//!
//! # Usage
//!
//! ```rust,ignore
//! use prism_core::{Classifier, Config};
//!
//! fn main() -> prism_core::Result<()> {
//!     let config = Config::load()?;
//!     let classifier = Classifier::load(&config.model.path, &config.catalog.path)?;
//!
//!     let bytes = std::fs::read("./image.jpg")?;
//!     let predictions = classifier.classify(&bytes)?;
//!     println!("Top prediction: {:?}", predictions.first());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod postprocess;
pub mod preprocess;
pub mod types;

// Re-exports for convenient access
pub use catalog::{Catalog, Label};
pub use classifier::Classifier;
pub use config::Config;
pub use error::{CatalogError, ConfigError, PipelineError, PipelineResult, PrismError, Result};
pub use model::{OnnxModel, ScoreModel};
pub use types::{Classification, Prediction};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
