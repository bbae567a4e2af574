//! Decision-flow tests for the fallback orchestrator using scripted fakes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use image::DynamicImage;

use dashlight::classifier::InferenceBackend;
use dashlight::providers::{EncodedImage, VisionProvider};
use dashlight::{
    Candidate, Dashlight, InferenceError, Label, Origin, Pipeline, ProviderKind, RemoteConfig,
    RemoteError,
};

/// Backend that always reports the given confidence for `oil_pressure`
/// (vocabulary index 1), with the remainder spread over the other classes.
struct ScriptedBackend {
    top_confidence: f32,
}

impl InferenceBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn infer(&self, _image: &DynamicImage) -> Result<Vec<f32>, InferenceError> {
        let rest = (1.0 - self.top_confidence) / 35.0;
        let mut scores = vec![rest; 36];
        scores[1] = self.top_confidence;
        Ok(scores)
    }
}

struct FailingBackend;

impl InferenceBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn infer(&self, _image: &DynamicImage) -> Result<Vec<f32>, InferenceError> {
        Err(InferenceError::Backend("model exploded".to_string()))
    }
}

enum AdapterScript {
    Succeed(&'static str, f32),
    FailNetwork,
}

/// Adapter that counts invocations and follows a fixed script.
struct CountingAdapter {
    calls: Arc<AtomicUsize>,
    script: AdapterScript,
}

#[async_trait]
impl VisionProvider for CountingAdapter {
    fn name(&self) -> &str {
        "counting"
    }

    async fn identify(
        &self,
        _image: &EncodedImage,
        _labels: &[&str],
        _api_key: &str,
    ) -> Result<Candidate, RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            AdapterScript::Succeed(label, confidence) => {
                Ok(Candidate::new(Label::Known(label), *confidence))
            }
            AdapterScript::FailNetwork => {
                Err(RemoteError::Network("connection refused".to_string()))
            }
        }
    }
}

fn pipeline_with(
    top_confidence: f32,
    script: AdapterScript,
) -> (Pipeline, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = Dashlight::builder()
        .backend(Arc::new(ScriptedBackend { top_confidence }))
        .adapter(
            ProviderKind::OpenAi,
            Arc::new(CountingAdapter {
                calls: Arc::clone(&calls),
                script,
            }),
        )
        .build()
        .expect("pipeline builds");
    (pipeline, calls)
}

fn test_image() -> DynamicImage {
    DynamicImage::new_rgb8(64, 64)
}

fn remote() -> RemoteConfig {
    RemoteConfig::new(ProviderKind::OpenAi, "test-key")
}

#[tokio::test]
async fn high_confidence_never_escalates() {
    let (pipeline, calls) = pipeline_with(0.95, AdapterScript::Succeed("abs", 0.9));

    let outcome = pipeline.identify(test_image(), Some(&remote())).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.origin, Origin::Local);
    assert_eq!(outcome.candidates[0].label, Label::Known("oil_pressure"));
    assert!(outcome.note.is_none());
}

#[tokio::test]
async fn threshold_boundary_stays_local() {
    // Exactly at the threshold counts as confident.
    let (pipeline, calls) = pipeline_with(0.70, AdapterScript::Succeed("abs", 0.9));

    let outcome = pipeline.identify(test_image(), Some(&remote())).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.origin, Origin::Local);
}

#[tokio::test]
async fn low_confidence_without_credential_keeps_local_with_advisory() {
    let (pipeline, calls) = pipeline_with(0.40, AdapterScript::Succeed("abs", 0.9));

    let outcome = pipeline.identify(test_image(), None).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.origin, Origin::Local);
    assert_eq!(outcome.candidates[0].label, Label::Known("oil_pressure"));
    let note = outcome.note.expect("advisory note attached");
    assert!(note.contains("no remote provider"));
}

#[tokio::test]
async fn low_confidence_escalates_exactly_once() {
    let (pipeline, calls) = pipeline_with(0.40, AdapterScript::Succeed("seat_belt", 0.91));

    let outcome = pipeline.identify(test_image(), Some(&remote())).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.origin, Origin::Remote);
    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].label, Label::Known("seat_belt"));
    assert!((outcome.candidates[0].confidence - 0.91).abs() < 1e-6);
}

#[tokio::test]
async fn remote_failure_reverts_to_local_outcome() {
    let (pipeline, calls) = pipeline_with(0.40, AdapterScript::FailNetwork);

    let outcome = pipeline.identify(test_image(), Some(&remote())).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.origin, Origin::Local);
    assert!(!outcome.candidates.is_empty(), "local results are kept");
    assert_eq!(outcome.candidates[0].label, Label::Known("oil_pressure"));
    let note = outcome.note.expect("fallback note attached");
    assert!(note.contains("openai"));
}

#[tokio::test]
async fn local_failure_ends_request_without_escalation() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = Dashlight::builder()
        .backend(Arc::new(FailingBackend))
        .adapter(
            ProviderKind::OpenAi,
            Arc::new(CountingAdapter {
                calls: Arc::clone(&calls),
                script: AdapterScript::Succeed("abs", 0.9),
            }),
        )
        .build()
        .expect("pipeline builds");

    let outcome = pipeline.identify(test_image(), Some(&remote())).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0, "no remote attempt");
    assert!(outcome.candidates.is_empty());
    assert_eq!(outcome.origin, Origin::Local);
    assert!(outcome.note.expect("note attached").contains("failed"));
}

#[tokio::test]
async fn custom_threshold_is_honored() {
    let calls = Arc::new(AtomicUsize::new(0));
    let pipeline = Dashlight::builder()
        .backend(Arc::new(ScriptedBackend {
            top_confidence: 0.60,
        }))
        .adapter(
            ProviderKind::OpenAi,
            Arc::new(CountingAdapter {
                calls: Arc::clone(&calls),
                script: AdapterScript::Succeed("abs", 0.9),
            }),
        )
        .threshold(0.50)
        .build()
        .expect("pipeline builds");

    let outcome = pipeline.identify(test_image(), Some(&remote())).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(outcome.origin, Origin::Local);
}

#[tokio::test]
async fn concurrent_requests_are_independent() {
    let (pipeline, _) = pipeline_with(0.95, AdapterScript::Succeed("abs", 0.9));
    let pipeline = Arc::new(pipeline);

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let p = Arc::clone(&pipeline);
            tokio::spawn(async move { p.identify(test_image(), None).await })
        })
        .collect();

    for task in tasks {
        let outcome = task.await.expect("task completes");
        assert_eq!(outcome.candidates[0].label, Label::Known("oil_pressure"));
    }
}

#[tokio::test]
async fn builder_requires_a_backend() {
    assert!(Dashlight::builder().build().is_err());
}
