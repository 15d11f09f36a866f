// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the people producing photo reports.
//
// Every run-fatal error is mapped to a plain message with a clear suggestion.
// Per-image problems never reach this layer: they are logged and the run
// carries on with whatever asset is available.

use crate::error::FotoberichtError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (fix an input, free disk space, pick a folder).
    ActionRequired,
    /// Cannot be fixed by retrying or user action — broken install, bad data.
    Permanent,
}

/// A human-readable error with plain message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

/// Convert a `FotoberichtError` into a `HumanError`.
pub fn humanize_error(err: &FotoberichtError) -> HumanError {
    match err {
        FotoberichtError::NoImages => HumanError {
            message: "No photos were selected.".into(),
            suggestion: "Add at least one photo, then try again.".into(),
            severity: Severity::ActionRequired,
        },

        FotoberichtError::Letterhead(detail) => HumanError {
            message: "The letterhead image could not be read.".into(),
            suggestion: format!("Check the letterhead path in the configuration. ({detail})"),
            severity: Severity::ActionRequired,
        },

        FotoberichtError::Config(detail) => HumanError {
            message: "Some required input is missing or invalid.".into(),
            suggestion: detail.clone(),
            severity: Severity::ActionRequired,
        },

        FotoberichtError::OutputExists(path) => HumanError {
            message: "The output folder already exists.".into(),
            suggestion: format!(
                "Choose another name or allow overwriting {}.",
                path.display()
            ),
            severity: Severity::ActionRequired,
        },

        FotoberichtError::ImageError(detail) => HumanError {
            message: "A photo could not be processed.".into(),
            suggestion: format!("Remove the damaged photo and try again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        FotoberichtError::PdfError(detail) => HumanError {
            message: "The PDF could not be created.".into(),
            suggestion: format!("Try again; if it keeps failing, report this problem. ({detail})"),
            severity: Severity::Permanent,
        },

        FotoberichtError::Font(detail) => HumanError {
            message: "The caption font is damaged.".into(),
            suggestion: format!("Reinstall the application. ({detail})"),
            severity: Severity::Permanent,
        },

        FotoberichtError::Archive(detail) => HumanError {
            message: "The photos could not be saved to the output folder.".into(),
            suggestion: format!("Check free disk space and folder permissions. ({detail})"),
            severity: Severity::ActionRequired,
        },

        FotoberichtError::Io(io_err) => humanize_io_error(io_err),

        FotoberichtError::Serialization(detail) => HumanError {
            message: "The settings file is damaged.".into(),
            suggestion: format!("Delete the settings file to restore defaults. ({detail})"),
            severity: Severity::Permanent,
        },
    }
}

fn humanize_io_error(err: &std::io::Error) -> HumanError {
    match err.kind() {
        std::io::ErrorKind::NotFound => HumanError {
            message: "A file or folder could not be found.".into(),
            suggestion: format!("Check that the path exists. ({err})"),
            severity: Severity::ActionRequired,
        },
        std::io::ErrorKind::PermissionDenied => HumanError {
            message: "Access to a file or folder was denied.".into(),
            suggestion: format!("Choose a folder you are allowed to write to. ({err})"),
            severity: Severity::ActionRequired,
        },
        _ => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check free disk space and try again. ({err})"),
            severity: Severity::ActionRequired,
        },
    }
}
