// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool dispatcher — runs one catalog tool over a set of input files and
// names the outputs.

use blattwerk_core::error::{BlattwerkError, Result};
use blattwerk_core::{CompressionLevel, DocumentType, InputFile, ProcessedFile, ToolId};
use blattwerk_reorder::PageOrder;
use tracing::{info, instrument};

use crate::pdf::{PdfReader, PdfWriter};

/// How the split tool divides a document. Page indices are 0-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitMode {
    /// One output holding the listed pages.
    Single { pages: Vec<usize> },
    /// One output per non-empty group.
    Multiple { groups: Vec<Vec<usize>> },
}

impl Default for SplitMode {
    fn default() -> Self {
        Self::Single { pages: Vec::new() }
    }
}

/// User choices collected on the tool screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOptions {
    pub compression: CompressionLevel,
    /// Output base name without extension. Blank means the default.
    pub custom_name: Option<String>,
    pub split: SplitMode,
    /// Final page order for the organize tool. `None` keeps the document
    /// as it is.
    pub page_order: Option<PageOrder>,
}

/// Output base name: the custom name, or `<first input stem>_processed`.
pub fn output_base_name(inputs: &[InputFile], options: &ToolOptions) -> String {
    let custom = options.custom_name.as_deref().map(str::trim).unwrap_or("");
    if !custom.is_empty() {
        return custom.to_string();
    }
    let stem = inputs.first().map(InputFile::stem).unwrap_or("document");
    format!("{stem}_processed")
}

/// Run `tool` over `inputs`.
#[instrument(skip(inputs, options), fields(inputs = inputs.len()))]
pub fn process(
    tool: ToolId,
    inputs: &[InputFile],
    options: &ToolOptions,
) -> Result<Vec<ProcessedFile>> {
    let first = inputs.first().ok_or(BlattwerkError::NoInput)?;
    let base = output_base_name(inputs, options);
    let pdf_named = |data: Vec<u8>| ProcessedFile::new(format!("{base}.pdf"), data, DocumentType::Pdf);

    let outputs = match tool {
        ToolId::JpgToPdf | ToolId::PngToPdf => {
            let images: Vec<&[u8]> = inputs.iter().map(|f| f.data.as_slice()).collect();
            let mut writer = PdfWriter::new();
            writer.set_title(base.clone());
            vec![pdf_named(writer.create_from_images(&images, options.compression)?)]
        }
        ToolId::MergePdf => {
            let others: Vec<&[u8]> = inputs[1..].iter().map(|f| f.data.as_slice()).collect();
            let merged = PdfReader::from_bytes(&first.data)?.merge(&others)?;
            vec![pdf_named(merged)]
        }
        ToolId::SplitPdf => {
            let reader = PdfReader::from_bytes(&first.data)?;
            match &options.split {
                SplitMode::Single { pages } => vec![pdf_named(reader.split_single(pages)?)],
                SplitMode::Multiple { groups } => reader
                    .split_groups(groups)?
                    .into_iter()
                    .map(|(index, data)| {
                        ProcessedFile::new(
                            format!("{base}_part_{}.pdf", index + 1),
                            data,
                            DocumentType::Pdf,
                        )
                    })
                    .collect(),
            }
        }
        ToolId::CompressPdf => {
            vec![pdf_named(PdfReader::from_bytes(&first.data)?.compress()?)]
        }
        ToolId::OrganizePdf => {
            let reader = PdfReader::from_bytes(&first.data)?;
            let order = options
                .page_order
                .clone()
                .unwrap_or_else(|| PageOrder::identity(reader.page_count()));
            vec![pdf_named(reader.apply_order(&order)?)]
        }
        ToolId::PdfToJpg | ToolId::PdfToPng => {
            return Err(BlattwerkError::UnsupportedTool(tool.slug().to_string()));
        }
    };

    info!(%tool, outputs = outputs.len(), "Tool finished");
    Ok(outputs)
}
