//! Public types for the Dashlight API.

mod candidate;
mod config;
mod geometry;

pub use candidate::{Candidate, Label, Origin, Outcome};
pub use config::{ProviderKind, RemoteConfig};
pub use geometry::{CropRequest, FillMode, GuideBox, Orientation, PixelRect, Rect, Size};
