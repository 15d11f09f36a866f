// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caption text and archive file names.

use std::path::Path;

use fotobericht_core::{ProcessingOptions, file_name_of};

/// Digits a photo number is padded to for a run of `total` photos.
pub fn number_width(total: usize) -> usize {
    match total {
        0..=9 => 0,
        10..=99 => 2,
        _ => 3,
    }
}

/// Caption rules for one run.
#[derive(Debug, Clone)]
pub struct CaptionScheme {
    use_original_filenames: bool,
    label: String,
    width: usize,
}

impl CaptionScheme {
    /// Scheme for `options` over a run of `total` photos.
    pub fn new(options: &ProcessingOptions, total: usize) -> Self {
        Self {
            use_original_filenames: options.use_original_filenames,
            label: options.identity.label(),
            width: number_width(total),
        }
    }

    /// `"{label} Foto Nr. {n}"`, `n` zero-padded for the run size.
    pub fn generated(&self, photo_number: u32) -> String {
        format!("{} Foto Nr. {:0width$}", self.label, photo_number, width = self.width)
    }

    /// Caption printed under the photo.
    pub fn caption(&self, photo_number: u32, source: &Path) -> String {
        if self.use_original_filenames {
            file_name_of(source)
        } else {
            self.generated(photo_number)
        }
    }

    /// Archive file name without extension: the caption, or the source's
    /// stem when captions are file names.
    pub fn archive_name(&self, photo_number: u32, source: &Path) -> String {
        if self.use_original_filenames {
            source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.generated(photo_number))
        } else {
            self.generated(photo_number)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fotobericht_core::DocumentIdentity;

    fn options(code: &str) -> ProcessingOptions {
        ProcessingOptions {
            identity: DocumentIdentity::new("12345", code, "7"),
            ..ProcessingOptions::default()
        }
    }

    #[test]
    fn padding_depends_on_total() {
        let opts = options("");
        assert_eq!(CaptionScheme::new(&opts, 5).generated(3), "12345-7 Foto Nr. 3");
        assert_eq!(CaptionScheme::new(&opts, 50).generated(3), "12345-7 Foto Nr. 03");
        assert_eq!(CaptionScheme::new(&opts, 500).generated(3), "12345-7 Foto Nr. 003");
        assert_eq!(CaptionScheme::new(&opts, 50).generated(42), "12345-7 Foto Nr. 42");
    }

    #[test]
    fn boundaries() {
        assert_eq!(number_width(9), 0);
        assert_eq!(number_width(10), 2);
        assert_eq!(number_width(99), 2);
        assert_eq!(number_width(100), 3);
    }

    #[test]
    fn document_code_included_unless_placeholder() {
        let with_code = CaptionScheme::new(&options("BA"), 3);
        assert_eq!(with_code.generated(1), "12345-BA-7 Foto Nr. 1");

        let placeholder = CaptionScheme::new(&options("(kein)"), 3);
        assert_eq!(placeholder.generated(1), "12345-7 Foto Nr. 1");
    }

    #[test]
    fn original_file_names() {
        let opts = ProcessingOptions::preview(1, false);
        let scheme = CaptionScheme::new(&opts, 3);
        let src = Path::new("/photos/IMG_0042.JPG");
        assert_eq!(scheme.caption(1, src), "IMG_0042.JPG");
        assert_eq!(scheme.archive_name(1, src), "IMG_0042");
    }

    #[test]
    fn archive_name_matches_caption() {
        let scheme = CaptionScheme::new(&options(""), 3);
        let src = Path::new("/photos/a.png");
        assert_eq!(scheme.archive_name(2, src), scheme.caption(2, src));
    }
}
