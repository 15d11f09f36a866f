// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image normalizer — turns one source photo into the working copy placed in
// the PDF, plus (optionally) the processed copy handed to the output sink.
//
// Pipeline: upright load -> alpha flattening -> 4:3 crop -> downsample ->
// optional timestamp -> JPEG q85 in the run's scratch folder. The archived
// copy is the upright, flattened original (optionally timestamped) at q95.
// Image-level failures fall back to the untouched source file.

use std::path::{Path, PathBuf};

use fotobericht_core::ProcessingOptions;
use fotobericht_core::error::Result;
use image::ImageFormat;
use tracing::{debug, instrument, warn};

use super::metadata::capture_label;
use super::overlay::burn_timestamp;
use super::processor::{ImageProcessor, MAX_SIDE_PX};
use super::source::load_upright;
use crate::fonts::CaptionFont;

/// JPEG quality of the working copy embedded in the document.
pub const WORKING_QUALITY: u8 = 85;

/// JPEG quality of archived copies.
pub const ARCHIVE_QUALITY: u8 = 95;

/// A processed copy destined for the output sink.
#[derive(Debug, Clone)]
pub struct ArchiveCopy {
    /// File name inside the output folder or zip archive.
    pub file_name: String,
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
}

/// Result of normalizing one photo.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// The source file.
    pub source: PathBuf,
    /// File to embed in the document: the working copy, or the source itself
    /// when processing failed.
    pub document_path: PathBuf,
    /// Working copy dimensions, if processing succeeded.
    pub dimensions: Option<(u32, u32)>,
    /// Processed copy for the output sink, if archiving was requested.
    pub archive_copy: Option<ArchiveCopy>,
}

impl NormalizedImage {
    /// Processing failed; the document falls back to the source file.
    pub fn fallback(source: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            document_path: source.to_path_buf(),
            dimensions: None,
            archive_copy: None,
        }
    }

    /// Whether the source is used unprocessed.
    pub fn is_fallback(&self) -> bool {
        self.dimensions.is_none()
    }
}

/// Normalizes photos for one run. Borrowed state only; owns nothing on disk.
pub struct Normalizer<'a> {
    options: &'a ProcessingOptions,
    font: &'a CaptionFont,
    work_dir: &'a Path,
}

impl<'a> Normalizer<'a> {
    pub fn new(options: &'a ProcessingOptions, font: &'a CaptionFont, work_dir: &'a Path) -> Self {
        Self {
            options,
            font,
            work_dir,
        }
    }

    /// Normalize `source`. `photo_number` keys the scratch file name,
    /// `archive_name` is the sink file name without extension.
    #[instrument(skip(self, source, archive_name), fields(source = %source.display()))]
    pub fn normalize(&self, source: &Path, photo_number: u32, archive_name: &str) -> NormalizedImage {
        match self.try_normalize(source, photo_number, archive_name) {
            Ok(normalized) => normalized,
            Err(err) => {
                warn!(error = %err, "processing failed, using original file");
                NormalizedImage::fallback(source)
            }
        }
    }

    fn try_normalize(
        &self,
        source: &Path,
        photo_number: u32,
        archive_name: &str,
    ) -> Result<NormalizedImage> {
        let raw = ImageProcessor::from_dynamic(load_upright(source)?.into_dynamic()).flatten_alpha();

        let wants_stamp = self.options.timestamp_in_document
            || (self.options.archive && self.options.timestamp_in_archive);
        let stamp = if wants_stamp { capture_label(source) } else { None };

        let mut working = ImageProcessor::from_dynamic(raw.as_dynamic().clone())
            .crop_to_four_thirds()
            .downsample(MAX_SIDE_PX);
        if self.options.timestamp_in_document {
            if let Some(label) = &stamp {
                working =
                    ImageProcessor::from_dynamic(burn_timestamp(working.into_dynamic(), label, self.font));
            }
        }

        let document_path = self.work_dir.join(format!("temp_{photo_number}.jpg"));
        working.save_jpeg(&document_path, WORKING_QUALITY)?;
        debug!(
            width = working.width(),
            height = working.height(),
            path = %document_path.display(),
            "Working copy written"
        );

        let archive_copy = if self.options.archive {
            self.archive_copy(raw, stamp.as_deref(), source, archive_name)
        } else {
            None
        };

        Ok(NormalizedImage {
            source: source.to_path_buf(),
            document_path,
            dimensions: Some((working.width(), working.height())),
            archive_copy,
        })
    }

    /// Encode the archived copy in the source's own format where possible.
    fn archive_copy(
        &self,
        raw: ImageProcessor,
        stamp: Option<&str>,
        source: &Path,
        archive_name: &str,
    ) -> Option<ArchiveCopy> {
        let raw = match stamp {
            Some(label) if self.options.timestamp_in_archive => {
                ImageProcessor::from_dynamic(burn_timestamp(raw.into_dynamic(), label, self.font))
            }
            _ => raw,
        };

        let (format, extension) = archive_format(source);
        match raw.encode_as(format, ARCHIVE_QUALITY) {
            Ok(bytes) => Some(ArchiveCopy {
                file_name: format!("{archive_name}.{extension}"),
                bytes,
            }),
            Err(err) => {
                warn!(error = %err, "could not encode archive copy, skipping it");
                None
            }
        }
    }
}

/// Output format and extension for an archived copy of `source`. Formats we
/// cannot write fall back to JPEG.
pub fn archive_format(source: &Path) -> (ImageFormat, String) {
    let extension = source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    match ImageFormat::from_extension(&extension) {
        Some(
            format @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Tiff | ImageFormat::Bmp),
        ) => (format, extension),
        _ => (ImageFormat::Jpeg, "jpg".to_string()),
    }
}
