//! Anthropic vision adapter.
//!
//! Speaks the Messages API: `x-api-key` + `anthropic-version` headers, an
//! image content block carrying base64 source data, and a reply whose first
//! text block embeds the JSON verdict.

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

/// Default base URL for the Anthropic API
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Model used for identification calls.
const MODEL: &str = "claude-3-5-haiku-latest";

/// API version header required by the Messages endpoint.
const API_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages endpoint.
#[derive(Clone)]
pub struct AnthropicClient {
    http: Client,
    base_url: String,
}

impl Default for AnthropicClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AnthropicClient {
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
impl VisionProvider for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn identify(
        &self,
        image: &EncodedImage,
        labels: &[&str],
        api_key: &str,
    ) -> Result<Candidate, RemoteError> {
        let url = format!("{}/v1/messages", self.base_url);
        let data = BASE64.encode(&image.bytes);
        let instruction = reply::instruction(labels);

        let request = MessagesRequest {
            model: MODEL,
            max_tokens: 100,
            messages: vec![UserMessage {
                role: "user",
                content: vec![
                    ContentBlock::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: image.media_type,
                            data: &data,
                        },
                    },
                    ContentBlock::Text { text: &instruction },
                ],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        super::handle_response_errors(&response, "anthropic")?;

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Parse(format!("malformed envelope: {e}")))?;

        let text = parsed
            .content
            .iter()
            .find_map(|block| block.text.as_deref())
            .ok_or_else(|| RemoteError::Parse("no text block in reply".to_string()))?;

        reply::parse_reply(text)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<UserMessage<'a>>,
}

#[derive(Serialize)]
struct UserMessage<'a> {
    role: &'a str,
    content: Vec<ContentBlock<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock<'a> {
    Image { source: ImageSource<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct ImageSource<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    media_type: &'a str,
    data: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ResponseBlock>,
}

#[derive(Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}
