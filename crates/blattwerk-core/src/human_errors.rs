// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages shown on the result and tool screens.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how the UI presents the message.

use crate::error::BlattwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Trying again may well work (file briefly locked, disk busy).
    Transient,
    /// User must do something (pick a file, choose different pages).
    ActionRequired,
    /// Cannot be fixed by retrying — damaged file, unsupported format.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether offering a "Try again" button makes sense.
    pub retriable: bool,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `BlattwerkError` into a `HumanError` suitable for display.
pub fn humanize_error(err: &BlattwerkError) -> HumanError {
    match err {
        // -- Document errors --
        BlattwerkError::UnsupportedDocument(detail) => HumanError {
            message: "This type of file isn't supported.".into(),
            suggestion: format!("Choose a PDF, JPG, or PNG file instead. (File type: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        BlattwerkError::UnsupportedTool(tool) => HumanError {
            message: "This tool isn't available yet.".into(),
            suggestion: format!("{tool} needs a page renderer that this version doesn't include. Pick another tool."),
            retriable: false,
            severity: Severity::Permanent,
        },

        BlattwerkError::NoInput => HumanError {
            message: "No files were chosen.".into(),
            suggestion: "Choose at least one file, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        BlattwerkError::PdfError(_) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: "The file may be damaged or password protected. Try opening it in a PDF viewer first, or try a different file.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        BlattwerkError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try saving it as a JPEG or PNG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        // -- Page order errors --
        BlattwerkError::InvalidSlot { .. } | BlattwerkError::NotAPermutation { .. } => HumanError {
            message: "The page order got out of step with the document.".into(),
            suggestion: "Open the document again and rearrange the pages once more.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Storage --
        BlattwerkError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "We're not allowed to use that file or folder.".into(),
                suggestion: "Pick a different location, or check the file's permissions.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "Reading or writing a file failed.".into(),
                suggestion: format!("Try again in a moment. ({io_err})"),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        BlattwerkError::Serialization(_) => HumanError {
            message: "Your saved settings couldn't be read.".into(),
            suggestion: "Default settings are being used instead. Change them on the home screen to save a fresh copy.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}
