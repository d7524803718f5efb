//! The classification pipeline entry point.
//!
//! A [`Classifier`] owns everything a request needs: the label catalog and
//! the scoring model, both loaded once at startup. It is an explicitly
//! constructed context object, not ambient global state, so an enclosing
//! serving layer holds one (typically behind an `Arc`) and the pipeline
//! stays testable against a stub model.

use std::path::Path;

use crate::catalog::Catalog;
use crate::error::{CatalogError, PipelineResult, PrismError};
use crate::model::{OnnxModel, ScoreModel};
use crate::postprocess::postprocess;
use crate::preprocess::preprocess;
use crate::types::{Classification, Prediction};

/// Process-wide classification context: catalog plus model.
///
/// Immutable after construction and safe to share across concurrent
/// requests; the only serialization point is the mutex around the ONNX
/// call inside [`OnnxModel`].
pub struct Classifier {
    catalog: Catalog,
    model: Box<dyn ScoreModel>,
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("catalog", &self.catalog)
            .field("model", &"<dyn ScoreModel>")
            .finish()
    }
}

impl Classifier {
    /// Assemble a classifier from an already-loaded catalog and model.
    ///
    /// Fails when the model declares an output width that disagrees with
    /// the catalog length. That mismatch means every prediction would name
    /// the wrong class, so it is fatal at startup rather than detectable
    /// per request.
    pub fn new(catalog: Catalog, model: Box<dyn ScoreModel>) -> Result<Self, PrismError> {
        if let Some(model_len) = model.num_classes() {
            if model_len != catalog.len() {
                return Err(CatalogError::ModelMismatch {
                    catalog_len: catalog.len(),
                    model_len,
                }
                .into());
            }
        }

        tracing::info!("Classifier ready: {} classes", catalog.len());

        Ok(Self { catalog, model })
    }

    /// Load the catalog and ONNX model from disk and assemble a classifier.
    pub fn load(model_path: &Path, catalog_path: &Path) -> Result<Self, PrismError> {
        let catalog = Catalog::load(catalog_path)?;
        let model = OnnxModel::load(model_path)?;
        Self::new(catalog, Box::new(model))
    }

    /// Classify raw encoded image bytes.
    ///
    /// Runs preprocess, inference, and postprocess for one image; each call
    /// is independent and leaves no residual state. Errors terminate this
    /// request only and are surfaced for the caller to map to a response.
    pub fn classify(&self, image_bytes: &[u8]) -> PipelineResult<Vec<Prediction>> {
        let tensor = preprocess(image_bytes)?;
        let scores = self.model.evaluate(&tensor)?;
        postprocess(&scores, &self.catalog)
    }

    /// Classify and wrap the result in the response envelope.
    pub fn classify_to_response(&self, image_bytes: &[u8]) -> PipelineResult<Classification> {
        Ok(Classification {
            predictions: self.classify(image_bytes)?,
        })
    }

    /// Readiness signal for an enclosing serving layer.
    ///
    /// A `Classifier` only exists once the catalog and model have loaded,
    /// so this is `true` for any live instance; a layer that is still
    /// initializing holds no classifier yet and reports not-ready itself.
    pub fn ready(&self) -> bool {
        !self.catalog.is_empty()
    }

    /// Number of classes this classifier distinguishes.
    pub fn num_classes(&self) -> usize {
        self.catalog.len()
    }
}
