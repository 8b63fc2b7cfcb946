// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — rebuilding existing PDFs (reorder, split, merge, compress) and
// creating new ones from images.

pub mod reader;
pub mod writer;

pub use reader::{PdfReader, merge_all};
pub use writer::PdfWriter;
