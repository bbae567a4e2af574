//! Remote escalation configuration

use serde::{Deserialize, Serialize};

/// The set of supported cloud vision providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    OpenAi,
    Anthropic,
    Gemini,
}

impl ProviderKind {
    /// Provider name for logging/metrics labels.
    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-request remote configuration.
///
/// Supplied by the caller on each identification call and read exactly once
/// at the start of the request; the pipeline never caches the credential
/// beyond the call that carried it.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub provider: ProviderKind,
    pub api_key: String,
    /// Optional endpoint override; defaults to the provider's public API.
    pub endpoint: Option<String>,
}

impl RemoteConfig {
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            api_key: api_key.into(),
            endpoint: None,
        }
    }

    /// Override the provider endpoint (used by tests and proxies).
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }
}
