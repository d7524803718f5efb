//! Image preprocessing for ResNet classification.
//!
//! The model expects:
//! - Input size: 224×224 pixels
//! - Normalization: per-channel, `(pixel/255 - mean[c]) / std[c]` with the
//!   ImageNet constants below
//! - Channel order: RGB
//! - Tensor layout: CHW \[channels, height, width\]

use std::io::Cursor;

use image::DynamicImage;
use ndarray::Array3;

use crate::error::PipelineError;

/// Number of color channels (RGB).
const CHANNELS: usize = 3;

/// Model input edge length in pixels.
pub const IMAGE_SIZE: usize = 224;

/// ImageNet normalization mean, RGB order.
pub const NORM_MEAN: [f32; 3] = [0.485, 0.456, 0.406];

/// ImageNet normalization std, RGB order.
pub const NORM_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Decode raw image bytes into pixels.
///
/// The container format is sniffed from the bytes themselves; there is no
/// filename to fall back on. Bytes that are not a valid image are a
/// `Decode` error; images the decoder recognizes but cannot represent in
/// a color mode we can normalize are `UnsupportedFormat`.
pub fn decode(bytes: &[u8]) -> Result<DynamicImage, PipelineError> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PipelineError::Decode {
            message: format!("Cannot sniff image format: {e}"),
        })?;

    if reader.format().is_none() {
        return Err(PipelineError::Decode {
            message: "Cannot detect image format".to_string(),
        });
    }

    reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(u) => PipelineError::UnsupportedFormat {
            message: u.to_string(),
        },
        other => PipelineError::Decode {
            message: other.to_string(),
        },
    })
}

/// Preprocess raw image bytes into a normalized CHW tensor.
///
/// Decodes, converts to RGB (grayscale and alpha images are converted to
/// 3-channel color), resizes to exactly 224×224 (Lanczos3, pinned for
/// reproducible fixtures), and normalizes each channel. The output shape is
/// always exactly (3, 224, 224).
pub fn preprocess(bytes: &[u8]) -> Result<Array3<f32>, PipelineError> {
    let image = decode(bytes)?;
    Ok(to_tensor(&image))
}

/// Convert an already-decoded image into the normalized CHW tensor.
pub fn to_tensor(image: &DynamicImage) -> Array3<f32> {
    let resized = image.resize_exact(
        IMAGE_SIZE as u32,
        IMAGE_SIZE as u32,
        image::imageops::FilterType::Lanczos3,
    );
    let rgb = resized.to_rgb8();

    let mut tensor = Array3::<f32>::zeros((CHANNELS, IMAGE_SIZE, IMAGE_SIZE));

    // Walk the raw RGB bytes and the flat tensor buffer directly instead of
    // per-pixel get_pixel() and 3D ndarray indexing.
    let raw = rgb.as_raw();
    let tensor_data = tensor.as_slice_mut().unwrap();
    for (i, pixel) in raw.chunks_exact(3).enumerate() {
        let y = i / IMAGE_SIZE;
        let x = i % IMAGE_SIZE;
        for (c, &val) in pixel.iter().enumerate() {
            // CHW layout: offset = c * H * W + y * W + x
            let idx = c * IMAGE_SIZE * IMAGE_SIZE + y * IMAGE_SIZE + x;
            tensor_data[idx] = (val as f32 / 255.0 - NORM_MEAN[c]) / NORM_STD[c];
        }
    }

    tensor
}
