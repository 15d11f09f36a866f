// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image source — the single "load image, return upright pixels + dimensions"
// primitive shared by the classifier, the normalizer, and the PDF writer.
//
// Orientation comes from the EXIF Orientation tag (values 1-8). Files without
// EXIF, or with an unknown value, are treated as already upright.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{In, Reader, Tag};
use fotobericht_core::error::{FotoberichtError, Result};
use image::DynamicImage;
use tracing::{debug, instrument};

/// EXIF orientation value for "already upright".
pub const ORIENTATION_NORMAL: u32 = 1;

/// A decoded image with its stored orientation already applied.
pub struct UprightImage {
    image: DynamicImage,
    orientation: u32,
}

impl UprightImage {
    /// Upright width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Upright height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The EXIF orientation that was applied.
    pub fn orientation(&self) -> u32 {
        self.orientation
    }

    /// Borrow the upright pixels.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume and return the upright pixels.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }
}

/// Decode `path` and rotate/flip it according to its EXIF orientation.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_upright(path: &Path) -> Result<UprightImage> {
    let image = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|err| {
            FotoberichtError::ImageError(format!("failed to open {}: {}", path.display(), err))
        })?
        .decode()
        .map_err(|err| {
            FotoberichtError::ImageError(format!("failed to decode {}: {}", path.display(), err))
        })?;

    let orientation = read_orientation(path).unwrap_or(ORIENTATION_NORMAL);
    let image = apply_orientation(image, orientation);
    debug!(
        width = image.width(),
        height = image.height(),
        orientation,
        "Image loaded upright"
    );
    Ok(UprightImage { image, orientation })
}

/// Upright dimensions read from the file header, without decoding pixels.
pub fn upright_dimensions(path: &Path) -> Result<(u32, u32)> {
    let (width, height) = image::image_dimensions(path).map_err(|err| {
        FotoberichtError::ImageError(format!("failed to read {}: {}", path.display(), err))
    })?;
    let orientation = read_orientation(path).unwrap_or(ORIENTATION_NORMAL);
    if swaps_axes(orientation) {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// Read the EXIF Orientation tag. `None` when the file has no EXIF data.
pub fn read_orientation(path: &Path) -> Option<u32> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let exif = Reader::new().read_from_container(&mut reader).ok()?;
    exif.get_field(Tag::Orientation, In::PRIMARY)?
        .value
        .get_uint(0)
}

/// Orientations 5-8 include a quarter turn and swap width and height.
pub fn swaps_axes(orientation: u32) -> bool {
    matches!(orientation, 5..=8)
}

/// Apply an EXIF orientation transform so the result displays upright.
pub fn apply_orientation(image: DynamicImage, orientation: u32) -> DynamicImage {
    match orientation {
        2 => image.fliph(),
        3 => image.rotate180(),
        4 => image.flipv(),
        // Transpose: mirror across the main diagonal.
        5 => image.rotate90().fliph(),
        6 => image.rotate90(),
        // Transverse: mirror across the anti-diagonal.
        7 => image.rotate270().fliph(),
        8 => image.rotate270(),
        _ => image,
    }
}
