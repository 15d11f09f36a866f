// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — report emission and page-count inspection.

pub mod embed;
pub mod reader;
pub mod writer;

pub use reader::PdfReader;
pub use writer::{PageImage, ReportWriter};
