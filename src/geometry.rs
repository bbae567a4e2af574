//! Guide-box geometry: viewport overlay → pixel-space crop.
//!
//! The capture screen shows the camera feed scaled into a viewport with a
//! fixed guide box drawn on top. The photo itself arrives in sensor
//! orientation at full resolution, so the box must be mapped through two
//! transforms: orientation normalization and the viewport fill scaling.
//! All math here is pure; the only I/O-adjacent helper is
//! [`normalize_orientation`], which re-renders pixels upright.
//!
//! Every computation runs in upright pixel space. The returned rectangle
//! carries no orientation metadata, so nothing downstream can misinterpret
//! it.

use image::DynamicImage;

use crate::error::GeometryError;
use crate::types::{CropRequest, FillMode, Orientation, PixelRect};

/// Map the on-screen guide box to a pixel rectangle of the captured image.
///
/// Fails when the source dimensions are non-positive, the viewport aspect
/// cannot be computed, or the mapped box (after padding and clamping) has no
/// area. On [`GeometryError::EmptyCrop`] the caller is expected to fall back
/// to the full, uncropped image.
pub fn compute_crop(req: &CropRequest) -> Result<PixelRect, GeometryError> {
    if req.source_width == 0 || req.source_height == 0 {
        return Err(GeometryError::InvalidSource {
            width: req.source_width,
            height: req.source_height,
        });
    }
    let vw = req.viewport.width;
    let vh = req.viewport.height;
    if !(vw.is_finite() && vh.is_finite()) || vw <= 0.0 || vh <= 0.0 {
        return Err(GeometryError::InvalidViewport {
            width: vw,
            height: vh,
        });
    }

    // Orientation first: quarter turns swap the upright axes. Everything
    // below operates on what a viewer sees, not on sensor order.
    let (iw, ih) = upright_dimensions(req);
    let (iw_f, ih_f) = (f64::from(iw), f64::from(ih));

    // Image-to-viewport display scale under the fill mode. Aspect-fill
    // covers the viewport (one axis symmetrically cropped), aspect-fit
    // letterboxes. The comparison of aspect ratios is folded into max/min.
    let scale = match req.fill_mode {
        FillMode::AspectFill => (vw / iw_f).max(vh / ih_f),
        FillMode::AspectFit => (vw / iw_f).min(vh / ih_f),
    };
    let offset_x = (vw - iw_f * scale) / 2.0;
    let offset_y = (vh - ih_f * scale) / 2.0;

    // Guide box from viewport points into image pixels.
    let x = (req.guide_box.x - offset_x) / scale;
    let y = (req.guide_box.y - offset_y) / scale;
    let w = req.guide_box.width / scale;
    let h = req.guide_box.height / scale;

    // Symmetric padding, then clamp to the image bounds.
    let pad_x = w * req.padding;
    let pad_y = h * req.padding;
    let x0 = (x - pad_x).max(0.0);
    let y0 = (y - pad_y).max(0.0);
    let x1 = (x + w + pad_x).min(iw_f);
    let y1 = (y + h + pad_y).min(ih_f);

    if x1 - x0 < 1.0 || y1 - y0 < 1.0 {
        return Err(GeometryError::EmptyCrop);
    }

    let out_x = x0.round() as u32;
    let out_y = y0.round() as u32;
    let width = ((x1 - x0).round() as u32).min(iw - out_x);
    let height = ((y1 - y0).round() as u32).min(ih - out_y);
    if width == 0 || height == 0 {
        return Err(GeometryError::EmptyCrop);
    }

    Ok(PixelRect {
        x: out_x,
        y: out_y,
        width,
        height,
    })
}

/// Source dimensions in upright space.
fn upright_dimensions(req: &CropRequest) -> (u32, u32) {
    if req.orientation.swaps_axes() {
        (req.source_height, req.source_width)
    } else {
        (req.source_width, req.source_height)
    }
}

/// Re-render stored pixels upright.
///
/// Normalizing an already-upright image returns it unchanged.
pub fn normalize_orientation(image: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Up => image,
        Orientation::Down => image.rotate180(),
        Orientation::QuarterCw => image.rotate90(),
        Orientation::QuarterCcw => image.rotate270(),
    }
}

/// Crop a capture to its guide box, falling back to the full image.
///
/// Applies orientation normalization, maps the guide box, and crops. A
/// degenerate mapping ([`GeometryError::EmptyCrop`] or invalid inputs) falls
/// back to the full upright image rather than failing the request.
pub fn crop_capture(image: DynamicImage, req: &CropRequest) -> DynamicImage {
    let upright = normalize_orientation(image, req.orientation);
    match compute_crop(req) {
        Ok(rect) => upright.crop_imm(rect.x, rect.y, rect.width, rect.height),
        Err(err) => {
            tracing::warn!(error = %err, "guide-box crop degenerate, using full image");
            upright
        }
    }
}
