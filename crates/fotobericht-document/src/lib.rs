// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// fotobericht-document — Image handling and page composition for Fotobericht.
//
// Provides the upright-load primitive, wide/tall classification, per-photo
// normalization (crop, downsample, timestamp burn-in), page grouping and
// layout, and the PDF report writer.

pub mod fonts;
pub mod image;
pub mod layout;
pub mod pdf;

// Re-export the primary structs so callers can use `fotobericht_document::ReportWriter` etc.
pub use fonts::CaptionFont;
pub use self::image::{Normalizer, classify, classify_all, load_upright, upright_dimensions};
pub use layout::{CaptionScheme, PageGeometry, group_pages};
pub use pdf::reader::PdfReader;
pub use pdf::writer::{PageImage, ReportWriter};
