// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Fotobericht document assembler.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one document-assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(pub Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A source image as seen by the grouping pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Path of the source file.
    pub path: PathBuf,
    /// Upright pixel dimensions, `None` when the file could not be read.
    pub dimensions: Option<(u32, u32)>,
    /// Width >= height after orientation correction.
    pub wide: bool,
}

impl ImageRef {
    /// Build a reference from known upright dimensions.
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            dimensions: Some((width, height)),
            wide: width >= height,
        }
    }

    /// Reference for a file that could not be inspected. Such images are
    /// treated as tall so they always get a page of their own.
    pub fn unreadable(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dimensions: None,
            wide: false,
        }
    }
}

/// Base file name of `path` as a lossy string (empty if there is none).
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// One or two images destined for a single output page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageGroup {
    Single(ImageRef),
    /// Only ever built from two wide images.
    Pair(ImageRef, ImageRef),
}

impl PageGroup {
    /// Number of images on the page.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Pair(..) => 2,
        }
    }

    /// Always false; a group holds at least one image.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Images in page order (top to bottom).
    pub fn images(&self) -> Vec<&ImageRef> {
        match self {
            Self::Single(a) => vec![a],
            Self::Pair(a, b) => vec![a, b],
        }
    }
}

/// Identifier fields used to synthesise captions and archive file names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentIdentity {
    /// Case number ("Aktennummer").
    pub case_number: String,
    /// Document-type code. Empty, or a placeholder such as `(ohne)`, means
    /// no code.
    pub document_code: String,
    /// Document count within the case.
    pub document_count: String,
}

impl DocumentIdentity {
    pub fn new(
        case_number: impl Into<String>,
        document_code: impl Into<String>,
        document_count: impl Into<String>,
    ) -> Self {
        Self {
            case_number: case_number.into(),
            document_code: document_code.into(),
            document_count: document_count.into(),
        }
    }

    /// Whether a real document-type code is set. Placeholder entries start
    /// with an opening parenthesis.
    pub fn has_document_code(&self) -> bool {
        let code = self.document_code.trim();
        !code.is_empty() && !code.starts_with('(')
    }

    /// `"{case}-{code}-{count}"`, or `"{case}-{count}"` without a code.
    pub fn label(&self) -> String {
        if self.has_document_code() {
            format!(
                "{}-{}-{}",
                self.case_number.trim(),
                self.document_code.trim(),
                self.document_count.trim()
            )
        } else {
            format!(
                "{}-{}",
                self.case_number.trim(),
                self.document_count.trim()
            )
        }
    }
}

/// Per-run configuration handed to the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingOptions {
    /// Number given to the first photo.
    pub start_number: u32,
    /// Caption each photo with its file name instead of a generated label.
    pub use_original_filenames: bool,
    /// Case/document identifiers for generated captions.
    pub identity: DocumentIdentity,
    /// Save processed copies of the originals to the output location.
    pub archive: bool,
    /// Save copies into a zip archive rather than a plain folder.
    pub archive_as_zip: bool,
    /// Delete source files that were archived, after a successful run.
    pub delete_originals: bool,
    /// Burn the capture timestamp into the images placed in the PDF.
    pub timestamp_in_document: bool,
    /// Burn the capture timestamp into the archived copies.
    pub timestamp_in_archive: bool,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            start_number: 1,
            use_original_filenames: false,
            identity: DocumentIdentity::default(),
            archive: true,
            archive_as_zip: true,
            delete_originals: false,
            timestamp_in_document: false,
            timestamp_in_archive: false,
        }
    }
}

impl ProcessingOptions {
    /// Options for a preview run: file names as captions, nothing archived.
    pub fn preview(start_number: u32, timestamp_in_document: bool) -> Self {
        Self {
            start_number,
            use_original_filenames: true,
            archive: false,
            archive_as_zip: false,
            timestamp_in_document,
            ..Self::default()
        }
    }
}

/// Lifecycle states of an assembly run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Created, not started yet.
    Idle,
    /// Pages are being produced.
    Running,
    /// Stopped at a group boundary on request; nothing was written.
    Cancelled,
    /// Document written successfully.
    Completed,
    /// Aborted by a run-fatal error.
    Failed,
}

impl RunState {
    /// Whether the run has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed | Self::Failed)
    }
}

/// Terminal outcome of an assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { document: PathBuf },
    Cancelled,
    Failed { message: String },
}

impl RunOutcome {
    /// The state a run ends in for this outcome.
    pub fn state(&self) -> RunState {
        match self {
            Self::Completed { .. } => RunState::Completed,
            Self::Cancelled => RunState::Cancelled,
            Self::Failed { .. } => RunState::Failed,
        }
    }
}
