//! Shared image preprocessing for all provider adapters.
//!
//! Runs once before any adapter is invoked so payload size and network
//! latency are bounded uniformly across providers: downscale until the
//! longer edge fits [`MAX_EDGE`] (never upscale), then re-encode as JPEG at
//! [`JPEG_QUALITY`].

use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;

use crate::error::{DashlightError, Result};

/// Longest edge of the image sent to a provider.
pub const MAX_EDGE: u32 = 512;

/// Fixed JPEG re-encoding quality.
pub const JPEG_QUALITY: u8 = 80;

/// A provider-ready encoded image.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

/// Downscale and re-encode an image for upload.
pub fn prepare_image(image: &DynamicImage) -> Result<EncodedImage> {
    let scaled = if image.width().max(image.height()) > MAX_EDGE {
        image.resize(MAX_EDGE, MAX_EDGE, image::imageops::FilterType::Triangle)
    } else {
        image.clone()
    };

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    scaled
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| DashlightError::Configuration(format!("image encoding failed: {e}")))?;

    Ok(EncodedImage {
        bytes,
        media_type: "image/jpeg",
    })
}
