//! OpenAI vision adapter.
//!
//! Speaks the `chat/completions` wire format: bearer-token auth, a user
//! message holding a text part plus an `image_url` data-URL part, and a
//! reply whose assistant text embeds the JSON verdict.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::encode::EncodedImage;
use super::reply;
use super::traits::VisionProvider;
use super::REQUEST_TIMEOUT;
use crate::error::RemoteError;
use crate::types::Candidate;

/// Default base URL for the OpenAI API
const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Model used for identification calls.
const MODEL: &str = "gpt-4o-mini";

/// Client for the OpenAI chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    base_url: String,
}

impl Default for OpenAiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenAiClient {
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
impl VisionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn identify(
        &self,
        image: &EncodedImage,
        labels: &[&str],
        api_key: &str,
    ) -> Result<Candidate, RemoteError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let data_url = format!(
            "data:{};base64,{}",
            image.media_type,
            BASE64.encode(&image.bytes)
        );
        let instruction = reply::instruction(labels);

        let request = ChatRequest {
            model: MODEL,
            max_tokens: 100,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: &instruction },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: &data_url },
                    },
                ],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&request)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        super::handle_response_errors(&response, "openai")?;

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::Parse(format!("malformed envelope: {e}")))?;

        let text = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| RemoteError::Parse("empty choices in reply".to_string()))?;

        reply::parse_reply(text)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    content: String,
}
