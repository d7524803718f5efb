//! Classification model invocation.
//!
//! The pipeline sees the model through the [`ScoreModel`] trait: a tensor
//! goes in, one raw score per class comes out. [`OnnxModel`] is the real
//! backend, wrapping an ONNX Runtime session; tests substitute a
//! deterministic stub.

use std::path::Path;

use ndarray::Array3;
use ort::session::Session;
use ort::value::{Value, ValueType};

use crate::error::PipelineError;

/// Fallback input slot name when the model metadata does not declare one.
/// Matches the ResNet ONNX export this pipeline was built for.
const DEFAULT_INPUT_NAME: &str = "data";

/// The opaque scoring capability the pipeline depends on.
///
/// Implementations must be safe for concurrent calls; the pipeline shares
/// one instance across requests and never retries a failed call.
pub trait ScoreModel: Send + Sync {
    /// Run the model on one preprocessed image and return raw
    /// (unnormalized) scores, one per class index.
    fn evaluate(&self, tensor: &Array3<f32>) -> Result<Vec<f32>, PipelineError>;

    /// Number of classes the model produces, when statically known.
    /// `None` when the model declares a dynamic output width.
    fn num_classes(&self) -> Option<usize>;
}

/// Wraps an ONNX Runtime session for image classification.
///
/// Uses a `Mutex` because `Session::run` requires `&mut self`; the lock
/// covers only the model call, never preprocessing or postprocessing.
pub struct OnnxModel {
    session: std::sync::Mutex<Session>,
    /// Name of the input tensor (detected from model metadata).
    input_name: String,
    /// Output width from model metadata, if statically declared.
    num_classes: Option<usize>,
}

impl OnnxModel {
    /// Load a classification model from an ONNX file.
    pub fn load(model_path: &Path) -> Result<Self, PipelineError> {
        let session = Session::builder()
            .map_err(|e| PipelineError::Inference {
                message: format!("Failed to create ONNX session builder: {e}"),
            })?
            .commit_from_file(model_path)
            .map_err(|e| PipelineError::Inference {
                message: format!("Failed to load ONNX model from {model_path:?}: {e}"),
            })?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| DEFAULT_INPUT_NAME.to_string());

        // The output is (batch, num_classes); a negative last dimension
        // means the width is dynamic and can only be checked per request.
        let num_classes = session
            .outputs()
            .first()
            .and_then(|o| match o.dtype() {
                ValueType::Tensor { shape, .. } => shape.iter().copied().last(),
                _ => None,
            })
            .and_then(|d| usize::try_from(d).ok());

        tracing::debug!(
            "Loaded ONNX model from {:?} (input: {:?}, classes: {:?})",
            model_path,
            input_name,
            num_classes
        );

        Ok(Self {
            session: std::sync::Mutex::new(session),
            input_name,
            num_classes,
        })
    }
}

impl ScoreModel for OnnxModel {
    /// Run inference on one preprocessed image tensor.
    ///
    /// The (3, 224, 224) tensor is wrapped into a batch of one, fed to the
    /// model's single named input, and the single row of the single output
    /// is flattened into the score vector.
    fn evaluate(&self, tensor: &Array3<f32>) -> Result<Vec<f32>, PipelineError> {
        // Prepend the batch dimension and hand ort (shape, flat data).
        let mut shape: Vec<i64> = vec![1];
        shape.extend(tensor.shape().iter().map(|&d| d as i64));
        let flat_data: Vec<f32> = tensor.iter().copied().collect();

        let input_value =
            Value::from_array((shape, flat_data)).map_err(|e| PipelineError::Inference {
                message: format!("Failed to create input tensor: {e}"),
            })?;

        let inputs = ort::inputs![self.input_name.as_str() => input_value];

        let mut session = self.session.lock().map_err(|e| PipelineError::Inference {
            message: format!("Session lock poisoned: {e}"),
        })?;

        let outputs = session.run(inputs).map_err(|e| PipelineError::Inference {
            message: format!("ONNX inference failed: {e}"),
        })?;

        let (name, output) = outputs.iter().next().ok_or_else(|| PipelineError::Inference {
            message: "Model produced no outputs".to_string(),
        })?;

        let (out_shape, data) =
            output
                .try_extract_tensor::<f32>()
                .map_err(|e| PipelineError::Inference {
                    message: format!("Failed to extract output tensor {name:?}: {e}"),
                })?;

        // Batch size is 1, so the whole buffer is the one score row
        // whether the model reports (num_classes,) or (1, num_classes).
        match out_shape.len() {
            1 | 2 => Ok(data.to_vec()),
            _ => Err(PipelineError::Inference {
                message: format!("Unexpected output shape: {out_shape:?}"),
            }),
        }
    }

    fn num_classes(&self) -> Option<usize> {
        self.num_classes
    }
}
