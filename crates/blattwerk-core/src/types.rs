// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Blattwerk document toolkit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BlattwerkError;

/// Top-level grouping shown on the catalog screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolCategory {
    Jpg,
    Png,
    Pdf,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 3] = [Self::Jpg, Self::Png, Self::Pdf];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Jpg => "JPG",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
        }
    }
}

/// Identity of a tool. The slug form is used in routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolId {
    JpgToPdf,
    PdfToJpg,
    PngToPdf,
    PdfToPng,
    MergePdf,
    SplitPdf,
    CompressPdf,
    OrganizePdf,
}

impl ToolId {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::JpgToPdf => "jpg-to-pdf",
            Self::PdfToJpg => "pdf-to-jpg",
            Self::PngToPdf => "png-to-pdf",
            Self::PdfToPng => "pdf-to-png",
            Self::MergePdf => "merge-pdf",
            Self::SplitPdf => "split-pdf",
            Self::CompressPdf => "compress-pdf",
            Self::OrganizePdf => "organize-pdf",
        }
    }

    /// Tools whose options screen needs the page count of the first input.
    pub fn needs_page_count(&self) -> bool {
        matches!(
            self,
            Self::SplitPdf | Self::OrganizePdf | Self::PdfToJpg | Self::PdfToPng
        )
    }

    /// Input document types the file picker should offer.
    pub fn accepted_inputs(&self) -> &'static [DocumentType] {
        match self {
            Self::JpgToPdf => &[DocumentType::Jpeg],
            Self::PngToPdf => &[DocumentType::Png],
            _ => &[DocumentType::Pdf],
        }
    }

    /// Whether the tool takes several input files at once.
    pub fn accepts_multiple(&self) -> bool {
        matches!(self, Self::JpgToPdf | Self::PngToPdf | Self::MergePdf)
    }

    /// Catalog entry for this tool.
    pub fn tool(&self) -> &'static PdfTool {
        TOOLS
            .iter()
            .find(|tool| tool.id == *self)
            .unwrap_or(&TOOLS[0])
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ToolId {
    type Err = BlattwerkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TOOLS
            .iter()
            .map(|tool| tool.id)
            .find(|id| id.slug() == s)
            .ok_or_else(|| BlattwerkError::UnsupportedTool(s.to_string()))
    }
}

/// A tool as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfTool {
    pub id: ToolId,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    /// Whether the options screen offers a compression level.
    pub has_compression: bool,
}

/// Every tool the catalog knows about, in display order.
pub static TOOLS: [PdfTool; 8] = [
    PdfTool {
        id: ToolId::JpgToPdf,
        name: "JPG to PDF",
        description: "Convert JPG images to PDF documents easily.",
        category: ToolCategory::Jpg,
        has_compression: true,
    },
    PdfTool {
        id: ToolId::PdfToJpg,
        name: "PDF to JPG",
        description: "Extract images from your PDF or save pages as JPG.",
        category: ToolCategory::Jpg,
        has_compression: true,
    },
    PdfTool {
        id: ToolId::PngToPdf,
        name: "PNG to PDF",
        description: "Convert PNG images to PDF documents with high quality.",
        category: ToolCategory::Png,
        has_compression: true,
    },
    PdfTool {
        id: ToolId::PdfToPng,
        name: "PDF to PNG",
        description: "Turn your PDF pages into high-quality PNG images.",
        category: ToolCategory::Png,
        has_compression: true,
    },
    PdfTool {
        id: ToolId::MergePdf,
        name: "Merge PDF",
        description: "Combine multiple PDF files into one document.",
        category: ToolCategory::Pdf,
        has_compression: true,
    },
    PdfTool {
        id: ToolId::SplitPdf,
        name: "Split PDF",
        description: "Separate one page or a whole set for easy conversion.",
        category: ToolCategory::Pdf,
        has_compression: true,
    },
    PdfTool {
        id: ToolId::CompressPdf,
        name: "Compress PDF",
        description: "Reduce file size while optimizing for maximal quality.",
        category: ToolCategory::Pdf,
        has_compression: true,
    },
    PdfTool {
        id: ToolId::OrganizePdf,
        name: "Organize PDF",
        description: "Sort, add and delete PDF pages of your document.",
        category: ToolCategory::Pdf,
        has_compression: false,
    },
];

/// Tools belonging to one category, in catalog order.
pub fn tools_in(category: ToolCategory) -> impl Iterator<Item = &'static PdfTool> {
    TOOLS.iter().filter(move |tool| tool.category == category)
}

/// User-selectable output compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompressionLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl CompressionLevel {
    pub const ALL: [CompressionLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// JPEG quality (1-100) used when re-encoding images.
    pub fn jpeg_quality(&self) -> u8 {
        match self {
            Self::Low => 80,
            Self::Medium => 40,
            Self::High => 10,
        }
    }

    /// Linear scale applied to image dimensions before encoding.
    pub fn downscale(&self) -> f32 {
        match self {
            Self::High => 0.7,
            Self::Low | Self::Medium => 1.0,
        }
    }

    /// Rough share of the input size left after compression.
    pub fn size_factor(&self) -> f64 {
        match self {
            Self::Low => 0.75,
            Self::Medium => 0.45,
            Self::High => 0.15,
        }
    }

    /// Expected output size in megabytes for `input_bytes` of input.
    pub fn estimated_mb(&self, input_bytes: usize) -> f64 {
        input_bytes as f64 * self.size_factor() / (1024.0 * 1024.0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low compression",
            Self::Medium => "Recommended",
            Self::High => "Extreme compression",
        }
    }
}

/// Supported input document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentType {
    Pdf,
    Jpeg,
    Png,
}

impl DocumentType {
    /// MIME type string, also used for processed outputs.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// File extensions offered in pickers for this type.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Pdf => &["pdf"],
            Self::Jpeg => &["jpg", "jpeg"],
            Self::Png => &["png"],
        }
    }

    /// Infer document type from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            _ => None,
        }
    }
}

/// A file handed to a tool, already read into memory.
#[derive(Debug, Clone)]
pub struct InputFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl InputFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// File name up to the first dot, as used for default output names.
    pub fn stem(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }
}

/// One output produced by a tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedFile {
    pub name: String,
    pub data: Vec<u8>,
    pub mime_type: &'static str,
    pub size: usize,
}

impl ProcessedFile {
    pub fn new(name: impl Into<String>, data: Vec<u8>, doc_type: DocumentType) -> Self {
        let size = data.len();
        Self {
            name: name.into(),
            data,
            mime_type: doc_type.mime_type(),
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_round_trips_through_from_str() {
        for tool in &TOOLS {
            assert_eq!(tool.id.slug().parse::<ToolId>().unwrap(), tool.id);
        }
        assert!("rotate-pdf".parse::<ToolId>().is_err());
    }

    #[test]
    fn pdf_category_has_four_tools() {
        let ids: Vec<ToolId> = tools_in(ToolCategory::Pdf).map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![
                ToolId::MergePdf,
                ToolId::SplitPdf,
                ToolId::CompressPdf,
                ToolId::OrganizePdf
            ]
        );
    }

    #[test]
    fn organize_has_no_compression() {
        assert!(!ToolId::OrganizePdf.tool().has_compression);
        assert!(ToolId::OrganizePdf.needs_page_count());
        assert!(!ToolId::MergePdf.needs_page_count());
    }

    #[test]
    fn only_extreme_compression_downscales() {
        assert_eq!(CompressionLevel::High.downscale(), 0.7);
        assert_eq!(CompressionLevel::Medium.downscale(), 1.0);
        assert!(CompressionLevel::Low.jpeg_quality() > CompressionLevel::High.jpeg_quality());
    }

    #[test]
    fn estimate_shrinks_with_stronger_compression() {
        let ten_mb = 10 * 1024 * 1024;
        assert!((CompressionLevel::Low.estimated_mb(ten_mb) - 7.5).abs() < 1e-9);
        assert!((CompressionLevel::High.estimated_mb(ten_mb) - 1.5).abs() < 1e-9);
        assert!(CompressionLevel::Medium.estimated_mb(ten_mb) < 7.5);
        assert_eq!(CompressionLevel::High.estimated_mb(0), 0.0);
    }

    #[test]
    fn stem_stops_at_first_dot() {
        let file = InputFile::new("report.final.pdf", Vec::new());
        assert_eq!(file.stem(), "report");
    }
}
