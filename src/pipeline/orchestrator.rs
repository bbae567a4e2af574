//! Fallback orchestration: local inference, decision, optional escalation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use image::DynamicImage;
use tracing::warn;

use crate::classifier::LocalClassifier;
use crate::error::{DashlightError, RemoteError, Result};
use crate::providers::{self, VisionProvider};
use crate::telemetry;
use crate::types::{Candidate, Origin, Outcome, ProviderKind, RemoteConfig};
use crate::vocabulary;

/// Escalation gate: a local top candidate at or above this confidence is
/// final. Applied to the local result only; remote results are trusted at
/// face value once returned.
pub const CONFIDENCE_THRESHOLD: f32 = 0.70;

/// The configured identification pipeline.
///
/// Cheap to share across concurrent requests: everything inside is
/// read-only after construction, and each request owns its own [`Outcome`].
/// Dropping the future returned by [`identify`](Self::identify) cancels the
/// request; partial results are simply discarded.
pub struct Pipeline {
    pub(super) classifier: LocalClassifier,
    pub(super) adapters: HashMap<ProviderKind, Arc<dyn VisionProvider>>,
    pub(super) threshold: f32,
}

impl Pipeline {
    /// Identify the warning light in an upright, guide-box-cropped image.
    ///
    /// Never fails outright: degraded paths (local failure, remote failure,
    /// low confidence without a credential) all surface as an [`Outcome`]
    /// with a diagnostic note. `remote` is read once at the start of the
    /// request and never cached beyond it.
    pub async fn identify(&self, image: DynamicImage, remote: Option<&RemoteConfig>) -> Outcome {
        let start = Instant::now();
        let outcome = self.run(image, remote).await;

        let status = if outcome.candidates.is_empty() && outcome.note.is_some() {
            "error"
        } else {
            "ok"
        };
        let origin = match outcome.origin {
            Origin::Local => "local",
            Origin::Remote => "remote",
        };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "origin" => origin,
            "status" => status,
        )
        .increment(1);
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS, "origin" => origin)
            .record(start.elapsed().as_secs_f64());

        outcome
    }

    async fn run(&self, image: DynamicImage, remote: Option<&RemoteConfig>) -> Outcome {
        // LocalInference: off the caller's thread; classification is CPU
        // bound.
        let local_start = Instant::now();
        let classifier = self.classifier.clone();
        let local_image = image.clone();
        let local =
            tokio::task::spawn_blocking(move || classifier.classify(&local_image)).await;
        metrics::histogram!(telemetry::LOCAL_INFERENCE_SECONDS)
            .record(local_start.elapsed().as_secs_f64());

        let candidates = match local {
            Ok(Ok(candidates)) => candidates,
            // A failed local pass provides no usable evidence about the
            // capture; escalating would spend a remote call on it, so the
            // request ends here.
            Ok(Err(e)) => {
                warn!(error = %e, "local inference failed");
                return Outcome::empty(format!("on-device classification failed: {e}"));
            }
            Err(e) => {
                warn!(error = %e, "local inference worker aborted");
                return Outcome::empty("on-device classification was interrupted");
            }
        };
        let local_outcome = Outcome::new(candidates, Origin::Local);

        // Decision: the threshold gates the local top candidate only.
        if local_outcome.top_confidence() >= self.threshold {
            return local_outcome;
        }
        let Some(config) = remote else {
            return local_outcome.with_note(
                "confidence is low and no remote provider is configured; \
                 showing the on-device result",
            );
        };

        // RemoteInference → Merge, or fall back to the local outcome. Local
        // results are never discarded once remote fails.
        match self.escalate(&image, config).await {
            Ok(candidate) => Outcome::new(vec![candidate], Origin::Remote),
            Err(e) => {
                warn!(provider = config.provider.name(), error = %e, "escalation failed");
                local_outcome.with_note(format!(
                    "remote identification via {} failed; showing the on-device result",
                    config.provider
                ))
            }
        }
    }

    /// One bounded attempt against the caller-selected provider.
    async fn escalate(&self, image: &DynamicImage, config: &RemoteConfig) -> Result<Candidate> {
        let adapter = self.adapter_for(config);
        metrics::counter!(telemetry::ESCALATIONS_TOTAL,
            "provider" => config.provider.name(),
        )
        .increment(1);

        let encoded = providers::prepare_image(image)?;
        adapter
            .identify(&encoded, &vocabulary::LABELS, &config.api_key)
            .await
            .map_err(|e| {
                metrics::counter!(telemetry::REMOTE_FAILURES_TOTAL,
                    "provider" => config.provider.name(),
                    "reason" => remote_reason(&e),
                )
                .increment(1);
                DashlightError::Remote(e)
            })
    }

    /// Resolve the adapter for a request. An endpoint override builds a
    /// fresh adapter for this call only; otherwise the registered adapter
    /// for the provider is used.
    fn adapter_for(&self, config: &RemoteConfig) -> Arc<dyn VisionProvider> {
        match &config.endpoint {
            Some(endpoint) => providers::make_adapter(config.provider, Some(endpoint)),
            None => match self.adapters.get(&config.provider) {
                Some(adapter) => Arc::clone(adapter),
                None => providers::make_adapter(config.provider, None),
            },
        }
    }
}

/// Metrics label for a remote failure subtype.
fn remote_reason(error: &RemoteError) -> &'static str {
    match error {
        RemoteError::Network(_) => "network",
        RemoteError::Auth => "auth",
        RemoteError::Api { .. } => "api",
        RemoteError::Parse(_) => "parse",
    }
}
