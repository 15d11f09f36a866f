// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — upright loading, wide/tall classification, normalization,
// EXIF capture time, and timestamp burn-in.

pub mod classify;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod metadata;
pub mod normalize;
pub mod overlay;
pub mod processor;
pub mod source;

pub use classify::{classify, classify_all};
pub use normalize::{ArchiveCopy, NormalizedImage, Normalizer};
pub use processor::ImageProcessor;
pub use source::{UprightImage, load_upright, upright_dimensions};
