//! Cloud vision provider adapters.
//!
//! Three wire formats, one capability contract ([`VisionProvider`]). The
//! orchestrator selects exactly one adapter per request; adapters never
//! retry and never keep the caller's credential beyond the call.

pub mod encode;
pub mod reply;
mod traits;

mod anthropic;
mod gemini;
mod openai;

pub use anthropic::AnthropicClient;
pub use encode::{EncodedImage, prepare_image};
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use traits::VisionProvider;

use std::sync::Arc;
use std::time::Duration;

use crate::error::RemoteError;
use crate::types::ProviderKind;

/// Bounded per-call timeout shared by all adapters. One attempt either
/// completes within this window or the orchestrator falls back to the local
/// outcome.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Construct the adapter for a provider, optionally against a custom base
/// URL (tests, proxies).
pub fn make_adapter(kind: ProviderKind, base_url: Option<&str>) -> Arc<dyn VisionProvider> {
    match (kind, base_url) {
        (ProviderKind::OpenAi, Some(url)) => Arc::new(OpenAiClient::with_base_url(url)),
        (ProviderKind::OpenAi, None) => Arc::new(OpenAiClient::new()),
        (ProviderKind::Anthropic, Some(url)) => Arc::new(AnthropicClient::with_base_url(url)),
        (ProviderKind::Anthropic, None) => Arc::new(AnthropicClient::new()),
        (ProviderKind::Gemini, Some(url)) => Arc::new(GeminiClient::with_base_url(url)),
        (ProviderKind::Gemini, None) => Arc::new(GeminiClient::new()),
    }
}

/// Check response status and map to the appropriate error.
///
/// All three providers collapse the same way: 401/403 is an auth failure,
/// any other non-2xx is an API failure with the status attached.
pub(crate) fn handle_response_errors(
    response: &reqwest::Response,
    provider: &str,
) -> Result<(), RemoteError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    match status.as_u16() {
        401 | 403 => Err(RemoteError::Auth),
        code => Err(RemoteError::Api {
            status: code,
            message: format!("{provider} API error: {status}"),
        }),
    }
}
