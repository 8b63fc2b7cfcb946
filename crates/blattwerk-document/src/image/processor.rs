// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decode, downscale, and re-encode images with the `image`
// crate. Used by the image compression tools and before embedding images
// into generated PDFs.

use blattwerk_core::CompressionLevel;
use blattwerk_core::error::{BlattwerkError, Result};
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, instrument};

/// Image pipeline over a single in-memory image.
///
/// Transformations consume `self` and return a new processor, so calls chain:
///
/// ```ignore
/// let jpeg = ImageProcessor::from_bytes(&bytes)?
///     .scale(0.7)
///     .to_jpeg_bytes(40)?;
/// ```
pub struct ImageProcessor {
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)
            .map_err(|err| BlattwerkError::ImageError(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations ------------------------------------------------------

    /// Resize to fit within `max_width` x `max_height`, preserving aspect
    /// ratio. Lanczos3 filtering.
    #[instrument(skip(self), fields(max_width, max_height))]
    pub fn resize(self, max_width: u32, max_height: u32) -> Self {
        debug!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            "Resizing image"
        );
        let resized = self
            .image
            .resize(max_width, max_height, image::imageops::FilterType::Lanczos3);
        Self { image: resized }
    }

    /// Scale both dimensions by `factor`. Factors at or above 1.0 are a no-op.
    pub fn scale(self, factor: f32) -> Self {
        if !(factor > 0.0 && factor < 1.0) {
            return self;
        }
        let width = ((self.image.width() as f32 * factor).round() as u32).max(1);
        let height = ((self.image.height() as f32 * factor).round() as u32).max(1);
        self.resize(width, height)
    }

    /// Downscale and re-encode as JPEG at the level's quality.
    #[instrument(skip(self))]
    pub fn compress(self, level: CompressionLevel) -> Result<Vec<u8>> {
        let (from_w, from_h) = (self.width(), self.height());
        let scaled = self.scale(level.downscale());
        let output = scaled.to_jpeg_bytes(level.jpeg_quality())?;
        info!(
            from_w,
            from_h,
            to_w = scaled.width(),
            to_h = scaled.height(),
            output_bytes = output.len(),
            "Image compressed"
        );
        Ok(output)
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| BlattwerkError::ImageError(format!("PNG encoding failed: {}", err)))?;
        Ok(cursor.into_inner())
    }

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let rgb = self.image.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
        rgb.write_with_encoder(encoder)
            .map_err(|err| BlattwerkError::ImageError(format!("JPEG encoding failed: {}", err)))?;
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::png_bytes;

    #[test]
    fn garbage_is_an_image_error() {
        let err = ImageProcessor::from_bytes(b"not an image").err().unwrap();
        assert!(matches!(err, BlattwerkError::ImageError(_)));
    }

    #[test]
    fn scale_keeps_aspect_ratio() {
        let img = ImageProcessor::from_bytes(&png_bytes(200, 100)).unwrap().scale(0.5);
        assert_eq!((img.width(), img.height()), (100, 50));
    }

    #[test]
    fn scale_never_upsizes() {
        let img = ImageProcessor::from_bytes(&png_bytes(40, 30)).unwrap().scale(1.0);
        assert_eq!((img.width(), img.height()), (40, 30));
    }

    #[test]
    fn extreme_compression_downscales() {
        let out = ImageProcessor::from_bytes(&png_bytes(100, 60))
            .unwrap()
            .compress(CompressionLevel::High)
            .unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (70, 42));
        assert_eq!(image::guess_format(&out).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn png_round_trip_keeps_size() {
        let img = ImageProcessor::from_bytes(&png_bytes(12, 9)).unwrap();
        let again = ImageProcessor::from_bytes(&img.to_png_bytes().unwrap()).unwrap();
        assert_eq!((again.width(), again.height()), (12, 9));
    }
}
