//! The hybrid classification pipeline.
//!
//! Local-first with confidence-gated escalation:
//!
//! ```text
//! LocalInference → Decision → Done
//!                      ↘ RemoteInference → Merge → Done
//! ```
//!
//! The flow is strictly sequential per request: the decision to escalate
//! depends on the local result, so there is never concurrent fan-out across
//! providers or overlap between local and remote work. Requests are
//! independent of each other and share only read-only configuration.

mod builder;
mod orchestrator;

pub use builder::{Dashlight, PipelineBuilder};
pub use orchestrator::{CONFIDENCE_THRESHOLD, Pipeline};
