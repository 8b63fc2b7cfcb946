// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — create new PDF documents from images using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use blattwerk_core::CompressionLevel;
use blattwerk_core::error::{BlattwerkError, Result};
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::image::ImageProcessor;

/// Image pixels are placed at one point per pixel.
const IMAGE_DPI: f32 = 72.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

/// Creates new PDF documents from raster images.
pub struct PdfWriter {
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self { title: None }
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    // -- Images to PDF --------------------------------------------------------

    /// Create a PDF with one page per image, in the given order.
    ///
    /// Each page is exactly the size of its image (one point per pixel, after
    /// the compression level's downscale). Images are re-encoded at the
    /// level's JPEG quality before being embedded.
    #[instrument(skip(self, images), fields(count = images.len()))]
    pub fn create_from_images(
        &self,
        images: &[&[u8]],
        compression: CompressionLevel,
    ) -> Result<Vec<u8>> {
        if images.is_empty() {
            return Err(BlattwerkError::NoInput);
        }

        let title = self.title.as_deref().unwrap_or("Blattwerk Document");
        info!(title, ?compression, "Creating PDF from images");

        let mut doc = PdfDocument::new(title);
        let mut pages = Vec::with_capacity(images.len());

        for (index, bytes) in images.iter().enumerate() {
            let raw = prepare_image(bytes, compression).map_err(|err| {
                warn!(index, %err, "Image could not be embedded");
                err
            })?;
            let width_pt = raw.width as f32;
            let height_pt = raw.height as f32;
            let xobject_id = doc.add_image(&raw);

            let ops = vec![Op::UseXobject {
                id: xobject_id,
                transform: XObjectTransform {
                    translate_x: Some(Pt(0.0)),
                    translate_y: Some(Pt(0.0)),
                    scale_x: None,
                    scale_y: None,
                    dpi: Some(IMAGE_DPI),
                    rotate: None,
                },
            }];

            pages.push(PdfPage::new(
                Mm(width_pt * MM_PER_PT),
                Mm(height_pt * MM_PER_PT),
                ops,
            ));
            debug!(index, width_pt, height_pt, "Image page added");
        }

        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            debug!(warnings = warnings.len(), "printpdf reported warnings");
        }

        Ok(output)
    }
}

/// Decode, compress, and convert one image into printpdf's RGB8 form.
fn prepare_image(bytes: &[u8], compression: CompressionLevel) -> Result<RawImage> {
    let compressed = ImageProcessor::from_bytes(bytes)?.compress(compression)?;
    let rgb = ImageProcessor::from_bytes(&compressed)?
        .into_dynamic()
        .to_rgb8();

    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    Ok(RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width,
        height,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    })
}
