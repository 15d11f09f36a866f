// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orientation classifier — wide (width >= height) vs tall, measured after the
// stored EXIF orientation is applied.

use std::path::Path;

use fotobericht_core::ImageRef;
use tracing::warn;

use super::source::upright_dimensions;

/// Inspect `path` and classify it. Unreadable files are logged and treated as
/// tall, so one corrupt photo never aborts a batch.
pub fn classify(path: &Path) -> ImageRef {
    match upright_dimensions(path) {
        Ok((width, height)) => ImageRef::new(path, width, height),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot classify image, treating as tall");
            ImageRef::unreadable(path)
        }
    }
}

/// Classify every path, preserving order.
pub fn classify_all<P: AsRef<Path>>(paths: &[P]) -> Vec<ImageRef> {
    paths.iter().map(|p| classify(p.as_ref())).collect()
}
