//! Builder for configuring pipeline instances

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use super::orchestrator::{CONFIDENCE_THRESHOLD, Pipeline};
use crate::classifier::{Device, InferenceBackend, LocalClassifier, OnnxBackend, OnnxConfig};
use crate::error::{DashlightError, Result};
use crate::providers::{self, VisionProvider};
use crate::types::ProviderKind;

/// Main entry point for creating pipeline instances.
pub struct Dashlight;

impl Dashlight {
    /// Create a new builder for configuring the pipeline.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }
}

/// Builder for configuring pipeline instances.
pub struct PipelineBuilder {
    backend: Option<Arc<dyn InferenceBackend>>,
    onnx_model: Option<(PathBuf, OnnxConfig, Device)>,
    adapters: HashMap<ProviderKind, Arc<dyn VisionProvider>>,
    threshold: f32,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            backend: None,
            onnx_model: None,
            adapters: HashMap::new(),
            threshold: CONFIDENCE_THRESHOLD,
        }
    }

    /// Use a custom inference backend (fakes in tests, alternative
    /// runtimes).
    pub fn backend(mut self, backend: Arc<dyn InferenceBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Use the bundled ONNX backend with a local model file.
    pub fn onnx_model(
        mut self,
        path: impl Into<PathBuf>,
        config: OnnxConfig,
        device: Device,
    ) -> Self {
        self.onnx_model = Some((path.into(), config, device));
        self
    }

    /// Replace the adapter for one provider (wiremock clients, mocks).
    pub fn adapter(mut self, kind: ProviderKind, adapter: Arc<dyn VisionProvider>) -> Self {
        self.adapters.insert(kind, adapter);
        self
    }

    /// Override the escalation threshold (defaults to
    /// [`CONFIDENCE_THRESHOLD`]).
    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Build the pipeline.
    ///
    /// Exactly one inference backend must be configured. Providers not
    /// explicitly replaced get their default public-API adapters.
    pub fn build(self) -> Result<Pipeline> {
        let backend = match (self.backend, self.onnx_model) {
            (Some(backend), None) => backend,
            (None, Some((path, config, device))) => {
                Arc::new(OnnxBackend::new(path, config, device)?) as Arc<dyn InferenceBackend>
            }
            (Some(_), Some(_)) => {
                return Err(DashlightError::Configuration(
                    "configure either a custom backend or an ONNX model, not both".to_string(),
                ));
            }
            (None, None) => {
                return Err(DashlightError::Configuration(
                    "no inference backend configured".to_string(),
                ));
            }
        };

        let mut adapters = self.adapters;
        for kind in [
            ProviderKind::OpenAi,
            ProviderKind::Anthropic,
            ProviderKind::Gemini,
        ] {
            adapters
                .entry(kind)
                .or_insert_with(|| providers::make_adapter(kind, None));
        }

        Ok(Pipeline {
            classifier: LocalClassifier::new(backend),
            adapters,
            threshold: self.threshold,
        })
    }
}
