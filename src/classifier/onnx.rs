//! Local inference via ONNX Runtime.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use image::{DynamicImage, imageops::FilterType};
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;

use super::InferenceBackend;
use crate::error::{DashlightError, InferenceError, Result};

/// Execution device for local inference.
#[derive(Debug, Clone, Copy, Default)]
pub enum Device {
    #[default]
    Cpu,
    #[cfg(feature = "cuda")]
    Cuda { device_id: u32 },
}

/// Tensor layout expected by the classifier model.
#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// Square input edge in pixels.
    pub input_size: u32,
    /// Name of the image input tensor.
    pub input_name: String,
    /// Name of the score output tensor.
    pub output_name: String,
}

impl Default for OnnxConfig {
    fn default() -> Self {
        Self {
            input_size: 224,
            input_name: "pixel_values".to_string(),
            output_name: "logits".to_string(),
        }
    }
}

/// ONNX Runtime backend for the warning-light classifier.
///
/// The session is guarded by a mutex because `run` requires exclusive
/// access; concurrent classification requests serialize on it.
pub struct OnnxBackend {
    session: Mutex<Session>,
    config: OnnxConfig,
    model_path: PathBuf,
}

impl OnnxBackend {
    /// Load a classifier model from a local ONNX file.
    pub fn new(model_path: impl Into<PathBuf>, config: OnnxConfig, device: Device) -> Result<Self> {
        let model_path = model_path.into();
        let session = build_session(&model_path, &device)?;
        Ok(Self {
            session: Mutex::new(session),
            config,
            model_path,
        })
    }

    /// Scale pixels into the model's input tensor (NCHW, [0, 1]).
    fn to_input(&self, image: &DynamicImage) -> Vec<f32> {
        let size = self.config.input_size;
        let rgb = image
            .resize_exact(size, size, FilterType::Triangle)
            .to_rgb8();
        let plane = (size * size) as usize;
        let mut data = vec![0.0f32; 3 * plane];
        for (i, pixel) in rgb.pixels().enumerate() {
            data[i] = f32::from(pixel[0]) / 255.0;
            data[plane + i] = f32::from(pixel[1]) / 255.0;
            data[2 * plane + i] = f32::from(pixel[2]) / 255.0;
        }
        data
    }
}

impl InferenceBackend for OnnxBackend {
    fn name(&self) -> &str {
        self.model_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("onnx")
    }

    fn infer(&self, image: &DynamicImage) -> std::result::Result<Vec<f32>, InferenceError> {
        use ort::value::TensorRef;

        let input = self.to_input(image);
        let size = self.config.input_size as usize;
        let shape = [1_usize, 3, size, size];

        let tensor = TensorRef::from_array_view((shape, input.as_slice()))
            .map_err(|e| InferenceError::Backend(format!("failed to create input tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| InferenceError::Backend("poisoned session lock".to_string()))?;

        let outputs = session
            .run(ort::inputs![self.config.input_name.as_str() => tensor])
            .map_err(|e| InferenceError::Backend(format!("ONNX inference failed: {e}")))?;

        let scores = outputs.get(self.config.output_name.as_str()).ok_or_else(|| {
            InferenceError::Backend(format!("no {} output found", self.config.output_name))
        })?;

        let (_, data) = scores
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError::Backend(format!("failed to extract scores: {e}")))?;

        Ok(data.to_vec())
    }
}

/// Build an ONNX session with the appropriate execution provider.
fn build_session(model_path: &Path, device: &Device) -> Result<Session> {
    let builder = Session::builder()
        .map_err(|e| DashlightError::Configuration(format!("failed to create session builder: {e}")))?
        .with_optimization_level(GraphOptimizationLevel::Level3)
        .map_err(|e| DashlightError::Configuration(format!("failed to set optimization level: {e}")))?;

    let mut builder = match device {
        Device::Cpu => builder,
        #[cfg(feature = "cuda")]
        Device::Cuda { device_id } => {
            use ort::execution_providers::CUDAExecutionProvider;
            builder
                .with_execution_providers([
                    CUDAExecutionProvider::default()
                        .with_device_id(*device_id as i32)
                        .build(),
                ])
                .map_err(|e| {
                    DashlightError::Configuration(format!("failed to configure CUDA: {e}"))
                })?
        }
    };

    builder
        .commit_from_file(model_path)
        .map_err(|e| DashlightError::Configuration(format!("failed to load ONNX model: {e}")))
}
