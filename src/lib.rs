//! Dashlight - hybrid identification of dashboard warning lights
//!
//! This crate classifies a photographed dashboard warning symbol with an
//! on-device ONNX model and, when the local confidence is low, escalates to
//! one of three interchangeable cloud vision providers. A pure geometry
//! mapper turns the capture screen's guide-box overlay into the pixel crop
//! the classifier sees.
//!
//! # Example
//!
//! ```rust,no_run
//! use dashlight::{
//!     CropRequest, Dashlight, GuideBox, Orientation, ProviderKind, RemoteConfig, Size,
//!     classifier::{Device, OnnxConfig},
//!     geometry,
//! };
//!
//! #[tokio::main]
//! async fn main() -> dashlight::Result<()> {
//!     let pipeline = Dashlight::builder()
//!         .onnx_model("warning-lights.onnx", OnnxConfig::default(), Device::Cpu)
//!         .build()?;
//!
//!     let photo = image::open("capture.jpg").expect("readable capture");
//!     let viewport = Size::new(390.0, 844.0);
//!     let request = CropRequest::new(
//!         photo.width(),
//!         photo.height(),
//!         Orientation::Up,
//!         viewport,
//!         GuideBox::new(240.0, -40.0).rect_in(viewport),
//!     );
//!     let cropped = geometry::crop_capture(photo, &request);
//!
//!     let remote = RemoteConfig::new(ProviderKind::OpenAi, "sk-your-key");
//!     let outcome = pipeline.identify(cropped, Some(&remote)).await;
//!
//!     for candidate in &outcome.candidates {
//!         println!("{}: {:.2}", candidate.label, candidate.confidence);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod classifier;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod providers;
pub mod telemetry;
pub mod types;
pub mod vocabulary;

// Re-export main types at crate root
pub use error::{DashlightError, GeometryError, InferenceError, RemoteError, Result};
pub use pipeline::{CONFIDENCE_THRESHOLD, Dashlight, Pipeline, PipelineBuilder};

// Re-export all types
pub use types::{
    Candidate, CropRequest, FillMode, GuideBox, Label, Orientation, Origin, Outcome, PixelRect,
    ProviderKind, Rect, RemoteConfig, Size,
};

pub use catalog::{SymbolCatalog, SymbolInfo, Urgency};
