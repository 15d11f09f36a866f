// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Fotobericht.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Fotobericht operations.
#[derive(Debug, Error)]
pub enum FotoberichtError {
    // -- Input errors --
    #[error("no images to assemble")]
    NoImages,

    #[error("letterhead image unreadable: {0}")]
    Letterhead(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("output folder already exists: {}", .0.display())]
    OutputExists(PathBuf),

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("font could not be loaded: {0}")]
    Font(String),

    // -- Output errors --
    #[error("archive write failed: {0}")]
    Archive(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FotoberichtError>;
