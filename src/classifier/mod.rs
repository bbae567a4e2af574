//! On-device warning-light classification.
//!
//! [`LocalClassifier`] wraps an [`InferenceBackend`] (the bundled ONNX
//! backend, or a fake in tests) and turns one raw score vector into ranked
//! [`Candidate`]s. The backend's output index *i* must correspond to
//! vocabulary entry *i*; a length mismatch is a hard failure, never a
//! best-effort truncation.

mod onnx;

pub use onnx::{Device, OnnxBackend, OnnxConfig};

use std::sync::Arc;

use image::DynamicImage;

use crate::error::InferenceError;
use crate::types::{Candidate, Label};
use crate::vocabulary;

/// Number of ranked candidates a classification produces.
pub const TOP_K: usize = 3;

/// The externally supplied inference backend.
///
/// Implementations accept upright pixel data and return one score per
/// vocabulary entry, either already-normalized probabilities or raw
/// logits; [`LocalClassifier`] normalizes as needed.
pub trait InferenceBackend: Send + Sync {
    /// Backend name for logging/debugging.
    fn name(&self) -> &str;

    /// Produce the per-class score vector for an image.
    fn infer(&self, image: &DynamicImage) -> Result<Vec<f32>, InferenceError>;
}

/// Ranked top-3 classification over the closed vocabulary.
#[derive(Clone)]
pub struct LocalClassifier {
    backend: Arc<dyn InferenceBackend>,
}

impl LocalClassifier {
    pub fn new(backend: Arc<dyn InferenceBackend>) -> Self {
        Self { backend }
    }

    /// Backend name, surfaced for diagnostics.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Classify an image into the top ranked candidates.
    ///
    /// Fails on backend errors and on score vectors whose length does not
    /// match the vocabulary.
    pub fn classify(&self, image: &DynamicImage) -> Result<Vec<Candidate>, InferenceError> {
        let scores = self.backend.infer(image)?;
        if scores.len() != vocabulary::LABELS.len() {
            return Err(InferenceError::OutputLength {
                expected: vocabulary::LABELS.len(),
                got: scores.len(),
            });
        }
        if scores.iter().any(|s| !s.is_finite()) {
            return Err(InferenceError::Backend(
                "non-finite score in backend output".to_string(),
            ));
        }

        let probs = ensure_probabilities(scores);
        Ok(rank(&probs))
    }
}

/// Normalize a score vector to probabilities.
///
/// Backends do not declare whether they emit probabilities or logits, so an
/// output is treated as already normalized only when every value lies in
/// [0, 1] and the values sum to ~1. Anything else goes through softmax.
fn ensure_probabilities(scores: Vec<f32>) -> Vec<f32> {
    let in_range = scores.iter().all(|s| (0.0..=1.0).contains(s));
    let sum: f32 = scores.iter().sum();
    if in_range && (sum - 1.0).abs() <= 1e-2 {
        return scores;
    }
    softmax(&scores)
}

/// Numerically stable softmax: subtract the max logit before exponentiating.
fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|x| x / sum).collect()
}

/// Rank probabilities descending, ties toward the lower vocabulary index.
fn rank(probs: &[f32]) -> Vec<Candidate> {
    let mut order: Vec<usize> = (0..probs.len()).collect();
    order.sort_by(|&a, &b| {
        probs[b]
            .partial_cmp(&probs[a])
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });
    order
        .into_iter()
        .take(TOP_K)
        .map(|i| Candidate::new(Label::Known(vocabulary::LABELS[i]), probs[i]))
        .collect()
}
