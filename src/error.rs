//! Dashlight error types

/// Errors from the guide-box geometry mapper.
///
/// Every variant is recoverable: the caller falls back to the uncropped
/// source image.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("non-positive source dimensions: {width}x{height}")]
    InvalidSource { width: u32, height: u32 },

    #[error("viewport aspect cannot be computed: {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    /// The mapped guide box, after padding and clamping, has no area.
    #[error("guide box maps outside the image")]
    EmptyCrop,
}

/// Errors from the on-device classifier.
///
/// Terminal for the request that hit them: a failed local pass provides no
/// usable evidence about the capture, so the pipeline does not escalate.
#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("inference backend failed: {0}")]
    Backend(String),

    /// The backend emitted a score vector that does not line up with the
    /// vocabulary. Positional label mapping would be meaningless.
    #[error("output length {got} does not match vocabulary size {expected}")]
    OutputLength { expected: usize, got: usize },
}

/// Errors from a cloud vision provider call.
///
/// Subtypes are distinguished in logs and metrics; the orchestrator only
/// cares that the call failed and reverts to the local outcome.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed")]
    Auth,

    #[error("provider error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("unparseable provider reply: {0}")]
    Parse(String),
}

/// Dashlight error types
#[derive(Debug, thiserror::Error)]
pub enum DashlightError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for Dashlight operations
pub type Result<T> = std::result::Result<T, DashlightError>;
