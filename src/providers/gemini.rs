//! Google Gemini vision adapter.
//!
//! Speaks the `generateContent` wire format: the credential travels as a
//! query parameter rather than a header, the image as an `inline_data`
//! part, and the reply text sits under `candidates/content/parts`.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::encode::EncodedImage;
use super::reply;
use super::REQUEST_TIMEOUT;
use super::traits::VisionProvider;
use crate::error::RemoteError;
use crate::types::Candidate;

/// Default base URL for the Gemini API
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for identification calls.
const MODEL: &str = "gemini-2.0-flash";

/// Client for the Gemini generateContent endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl VisionProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn identify(
        &self,
        image: &EncodedImage,
        labels: &[&str],
        api_key: &str,
    ) -> Result<Candidate, RemoteError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, MODEL
        );
        let data = BASE64.encode(&image.bytes);
        let instruction = reply::instruction(labels);

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: image.media_type,
                            data: &data,
                        },
                    },
                    Part::Text { text: &instruction },
                ],
            }],
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        super::handle_response_errors(&response, "gemini")?;

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Parse(format!("malformed envelope: {e}")))?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_deref()))
            .ok_or_else(|| RemoteError::Parse("no text part in reply".to_string()))?;

        reply::parse_reply(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    InlineData { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Vec<ReplyCandidate>,
}

#[derive(Deserialize)]
struct ReplyCandidate {
    content: ReplyContent,
}

#[derive(Deserialize)]
struct ReplyContent {
    #[serde(default)]
    parts: Vec<ReplyPart>,
}

#[derive(Deserialize)]
struct ReplyPart {
    #[serde(default)]
    text: Option<String>,
}
