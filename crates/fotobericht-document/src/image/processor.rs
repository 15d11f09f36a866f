// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — alpha flattening, 4:3 cropping, downsampling, and
// encoding. Operates on in-memory images using the `image` crate.

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use fotobericht_core::error::FotoberichtError;
use tracing::{debug, info, instrument};

/// Longest side, in pixels, of an image placed in the document.
pub const MAX_SIDE_PX: u32 = 2000;

/// Wide images with an aspect ratio in this closed range are cropped to 4:3.
pub const FOUR_THIRDS_CROP_RANGE: (f64, f64) = (1.0, 1.33);

/// Image processing pipeline operating on a single in-memory image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`,
/// enabling method chaining:
///
/// ```ignore
/// let jpeg = ImageProcessor::from_dynamic(upright)
///     .flatten_alpha()
///     .crop_to_four_thirds()
///     .downsample(MAX_SIDE_PX)
///     .to_jpeg_bytes(85)?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the underlying `DynamicImage`.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Convert alpha-bearing colour modes to opaque RGB. The alpha channel is
    /// dropped, not composited onto a background.
    pub fn flatten_alpha(self) -> Self {
        if !self.image.color().has_alpha() {
            return self;
        }
        debug!(color = ?self.image.color(), "Dropping alpha channel");
        Self {
            image: DynamicImage::ImageRgb8(self.image.to_rgb8()),
        }
    }

    /// Center-crop near-square wide images to 4:3. Other images pass through.
    #[instrument(skip(self))]
    pub fn crop_to_four_thirds(self) -> Self {
        match four_thirds_crop_box(self.width(), self.height()) {
            Some((x, y, w, h)) => self.crop(x, y, w, h),
            None => self,
        }
    }

    /// Crop a rectangular region from the image.
    ///
    /// `x` and `y` are the top-left corner; `width` and `height` define the
    /// size of the crop rectangle. Values are clamped to image bounds.
    pub fn crop(self, x: u32, y: u32, width: u32, height: u32) -> Self {
        let img_w = self.image.width();
        let img_h = self.image.height();

        let safe_x = x.min(img_w.saturating_sub(1));
        let safe_y = y.min(img_h.saturating_sub(1));
        let safe_w = width.min(img_w - safe_x);
        let safe_h = height.min(img_h - safe_y);

        info!(safe_x, safe_y, safe_w, safe_h, "Cropping image");

        let cropped = self.image.crop_imm(safe_x, safe_y, safe_w, safe_h);
        Self { image: cropped }
    }

    /// Scale down so the longer side equals `max_side`, preserving aspect
    /// ratio. Images already within the cap are returned unchanged.
    #[instrument(skip(self))]
    pub fn downsample(self, max_side: u32) -> Self {
        match downsampled_size(self.width(), self.height(), max_side) {
            Some((w, h)) => {
                info!(
                    from_w = self.image.width(),
                    from_h = self.image.height(),
                    to_w = w,
                    to_h = h,
                    "Downsampling image"
                );
                self.resize_exact(w, h)
            }
            None => self,
        }
    }

    /// Resize the image to exactly `width` x `height`, ignoring aspect ratio.
    /// Uses Lanczos3 filtering for high-quality downscaling.
    pub fn resize_exact(self, width: u32, height: u32) -> Self {
        let resized = self.image.resize_exact(width, height, FilterType::Lanczos3);
        Self { image: resized }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as JPEG bytes with the given quality (1-100).
    pub fn to_jpeg_bytes(&self, quality: u8) -> Result<Vec<u8>, FotoberichtError> {
        encode_jpeg(&self.image, quality)
    }

    /// Encode in `format`; `quality` applies to JPEG only.
    pub fn encode_as(&self, format: ImageFormat, quality: u8) -> Result<Vec<u8>, FotoberichtError> {
        if format == ImageFormat::Jpeg {
            return encode_jpeg(&self.image, quality);
        }
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image.write_to(&mut cursor, format).map_err(|err| {
            FotoberichtError::ImageError(format!("{:?} encoding failed: {}", format, err))
        })?;
        Ok(buffer)
    }

    /// Write the image to `path` as JPEG with the given quality.
    pub fn save_jpeg(
        &self,
        path: impl AsRef<std::path::Path>,
        quality: u8,
    ) -> Result<(), FotoberichtError> {
        let bytes = self.to_jpeg_bytes(quality)?;
        std::fs::write(path.as_ref(), bytes)?;
        Ok(())
    }
}

/// Encode a `DynamicImage` as JPEG. JPEG has no alpha, so pixels go through
/// RGB8 (or stay L8 for grayscale).
fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, FotoberichtError> {
    let mut buffer = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    let result = match image {
        DynamicImage::ImageLuma8(gray) => gray.write_with_encoder(encoder),
        other => other.to_rgb8().write_with_encoder(encoder),
    };
    result.map_err(|err| FotoberichtError::ImageError(format!("JPEG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Crop box `(x, y, width, height)` that trims a near-square wide image to
/// the nearest 4:3 ratio, or `None` if no crop applies.
pub fn four_thirds_crop_box(width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
    if width == 0 || height == 0 || width < height {
        return None;
    }
    let aspect = width as f64 / height as f64;
    let (lo, hi) = FOUR_THIRDS_CROP_RANGE;
    if !(lo..=hi).contains(&aspect) {
        return None;
    }

    let mut new_w = width;
    let mut new_h = (width as u64 * 3 / 4) as u32;
    if new_h > height {
        new_h = height;
        new_w = (height as u64 * 4 / 3) as u32;
    }
    let x = (width - new_w) / 2;
    let y = (height - new_h) / 2;
    Some((x, y, new_w, new_h))
}

/// Target size when the longer side exceeds `max_side`, or `None` if the
/// image already fits. The longer side becomes exactly `max_side`.
pub fn downsampled_size(width: u32, height: u32, max_side: u32) -> Option<(u32, u32)> {
    let longer = width.max(height);
    if longer <= max_side {
        return None;
    }
    let scale = |side: u32| -> u32 {
        ((side as f64 * max_side as f64 / longer as f64).round() as u32).max(1)
    };
    if width >= height {
        Some((max_side, scale(height)))
    } else {
        Some((scale(width), max_side))
    }
}
