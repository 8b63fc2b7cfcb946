// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// blattwerk-document — Document processing for the Blattwerk toolkit.
//
// Provides PDF operations (reorder, split, merge, compress, images to PDF),
// image compression, and the dispatcher that runs a catalog tool over a set
// of input files.

pub mod image;
pub mod pdf;
pub mod process;

#[cfg(test)]
pub(crate) mod testutil;

// Re-export the primary structs so callers can use `blattwerk_document::PdfReader` etc.
pub use image::processor::ImageProcessor;
pub use pdf::reader::{PdfReader, merge_all};
pub use pdf::writer::PdfWriter;
pub use process::{SplitMode, ToolOptions, output_base_name, process};
