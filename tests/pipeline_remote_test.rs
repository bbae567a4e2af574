//! End-to-end pipeline tests against a mocked provider endpoint.

use std::sync::Arc;

use image::DynamicImage;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashlight::classifier::InferenceBackend;
use dashlight::{Dashlight, InferenceError, Label, Origin, Pipeline, ProviderKind, RemoteConfig};

/// Backend whose top candidate is always below the escalation threshold.
struct UnsureBackend;

impl InferenceBackend for UnsureBackend {
    fn name(&self) -> &str {
        "unsure"
    }

    fn infer(&self, _image: &DynamicImage) -> Result<Vec<f32>, InferenceError> {
        let mut scores = vec![0.6 / 35.0; 36];
        scores[0] = 0.4;
        Ok(scores)
    }
}

fn pipeline() -> Pipeline {
    Dashlight::builder()
        .backend(Arc::new(UnsureBackend))
        .build()
        .expect("pipeline builds")
}

#[tokio::test]
async fn escalation_round_trip_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content":
                "```json\n{\"label\": \"glow_plug\", \"confidence\": 0.93}\n```"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let remote = RemoteConfig::new(ProviderKind::OpenAi, "test_key").endpoint(server.uri());
    let outcome = pipeline()
        .identify(DynamicImage::new_rgb8(64, 64), Some(&remote))
        .await;

    assert_eq!(outcome.origin, Origin::Remote);
    assert_eq!(outcome.candidates.len(), 1);
    assert_eq!(outcome.candidates[0].label, Label::Known("glow_plug"));
    assert!((outcome.candidates[0].confidence - 0.93).abs() < 1e-6);
}

#[tokio::test]
async fn http_failure_falls_back_to_local_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let remote = RemoteConfig::new(ProviderKind::Anthropic, "test_key").endpoint(server.uri());
    let outcome = pipeline()
        .identify(DynamicImage::new_rgb8(64, 64), Some(&remote))
        .await;

    assert_eq!(outcome.origin, Origin::Local);
    assert_eq!(outcome.candidates[0].label, Label::Known("check_engine"));
    let note = outcome.note.expect("fallback note attached");
    assert!(note.contains("anthropic"));
}
