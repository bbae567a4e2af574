//! Capability trait for cloud vision adapters.
//!
//! Each provider speaks its own wire format; all of them satisfy one
//! contract so the orchestrator can dispatch to whichever the caller
//! selected. Adapters are single-shot: one bounded attempt, no automatic
//! retries. A failed call means the orchestrator falls back to the local
//! outcome.

use async_trait::async_trait;

use super::encode::EncodedImage;
use crate::error::RemoteError;
use crate::types::Candidate;

/// One cloud vision provider.
#[async_trait]
pub trait VisionProvider: Send + Sync {
    /// Provider name for logging/metrics labels.
    fn name(&self) -> &str;

    /// Ask the provider to identify the warning light in `image`.
    ///
    /// `labels` is the closed vocabulary offered to the model; `api_key` is
    /// the caller-supplied credential for this single call and must not be
    /// retained. Returns exactly one candidate; unresolvable label text
    /// comes back as [`crate::Label::Unrecognized`] rather than an error.
    async fn identify(
        &self,
        image: &EncodedImage,
        labels: &[&str],
        api_key: &str,
    ) -> Result<Candidate, RemoteError>;
}
