//! Value types for the guide-box geometry mapper

use serde::{Deserialize, Serialize};

/// A size in viewport points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in viewport points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// An axis-aligned rectangle in upright image pixels.
///
/// Always fully contained in the source image bounds; carries no orientation
/// metadata because the mapper emits upright coordinates only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Stored-pixel orientation of a capture.
///
/// Names the rotation that must be applied to the stored pixel data to view
/// it upright. Capture devices report pixels in sensor orientation, decoupled
/// from how the photo was framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Already upright.
    #[default]
    Up,
    /// Rotate 180 degrees to view upright.
    Down,
    /// Rotate 90 degrees clockwise to view upright.
    QuarterCw,
    /// Rotate 90 degrees counter-clockwise to view upright.
    QuarterCcw,
}

impl Orientation {
    /// Quarter turns swap the upright width/height.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Orientation::QuarterCw | Orientation::QuarterCcw)
    }
}

/// How the capture preview scales the image into the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillMode {
    /// Cover the viewport; one axis is symmetrically cropped.
    #[default]
    AspectFill,
    /// Letterbox the image; everything is visible.
    AspectFit,
}

/// The fixed on-screen guide box, as configuration.
///
/// Size and vertical offset are constants of the capture screen, not
/// computed. The box is horizontally centered; `vertical_offset` shifts it
/// from the viewport center (negative = up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuideBox {
    pub size: f64,
    pub vertical_offset: f64,
}

impl GuideBox {
    pub const fn new(size: f64, vertical_offset: f64) -> Self {
        Self {
            size,
            vertical_offset,
        }
    }

    /// The guide rectangle in viewport coordinates.
    pub fn rect_in(&self, viewport: Size) -> Rect {
        Rect::new(
            (viewport.width - self.size) / 2.0,
            (viewport.height - self.size) / 2.0 + self.vertical_offset,
            self.size,
            self.size,
        )
    }
}

/// Everything `compute_crop` needs, as one value.
///
/// `source_width`/`source_height` are the stored (sensor-order) pixel
/// dimensions; the mapper normalizes them to upright space internally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRequest {
    pub source_width: u32,
    pub source_height: u32,
    pub orientation: Orientation,
    pub viewport: Size,
    /// Guide rectangle in viewport coordinates.
    pub guide_box: Rect,
    pub fill_mode: FillMode,
    /// Symmetric expansion of the mapped rectangle, as a fraction of its
    /// size per side.
    pub padding: f64,
}

/// Default symmetric padding applied around the mapped guide box.
pub(crate) const DEFAULT_PADDING: f64 = 0.10;

impl CropRequest {
    /// A request with aspect-fill and the default 10% padding.
    pub fn new(
        source_width: u32,
        source_height: u32,
        orientation: Orientation,
        viewport: Size,
        guide_box: Rect,
    ) -> Self {
        Self {
            source_width,
            source_height,
            orientation,
            viewport,
            guide_box,
            fill_mode: FillMode::AspectFill,
            padding: DEFAULT_PADDING,
        }
    }

    pub fn fill_mode(mut self, mode: FillMode) -> Self {
        self.fill_mode = mode;
        self
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}
