//! Telemetry metric name constants.
//!
//! Centralised metric names for dashlight operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `dashlight_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `origin` - where the final outcome came from: "local" or "remote"
//! - `provider` - cloud provider name (e.g. "openai", "gemini")
//! - `status` - outcome: "ok" or "error"
//! - `reason` - remote failure subtype: "network", "auth", "api", "parse"

/// Total identification requests completed.
///
/// Labels: `origin`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "dashlight_requests_total";

/// End-to-end request duration in seconds.
///
/// Labels: `origin`.
pub const REQUEST_DURATION_SECONDS: &str = "dashlight_request_duration_seconds";

/// On-device inference duration in seconds.
pub const LOCAL_INFERENCE_SECONDS: &str = "dashlight_local_inference_seconds";

/// Total escalations dispatched to a cloud provider.
///
/// Labels: `provider`.
pub const ESCALATIONS_TOTAL: &str = "dashlight_escalations_total";

/// Total failed cloud provider calls.
///
/// Labels: `provider`, `reason` ("network" | "auth" | "api" | "parse").
pub const REMOTE_FAILURES_TOTAL: &str = "dashlight_remote_failures_total";
