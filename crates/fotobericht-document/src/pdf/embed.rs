// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photos go into the PDF as DCTDecode streams. Upright RGB or grayscale JPEGs
// (every working copy) are embedded byte for byte; anything else is decoded,
// turned upright, and re-encoded first. Decoded pixels never outlive the call,
// so a report only holds compressed streams until it is saved.

use std::collections::BTreeMap;
use std::path::Path;

use fotobericht_core::error::Result;
use image::{DynamicImage, ImageFormat};
use printpdf::{DictItem, ExternalStream, ExternalXObject, Px};
use tracing::debug;

use crate::image::processor::ImageProcessor;
use crate::image::source::{ORIENTATION_NORMAL, load_upright};

/// JPEG quality for photos that have to be re-encoded before embedding.
pub const REENCODE_QUALITY: u8 = 85;

/// A JPEG stream ready to become an image XObject.
#[derive(Debug, Clone)]
pub struct EmbeddedJpeg {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    gray: bool,
}

impl EmbeddedJpeg {
    /// Load `path` for embedding. Fails if the file cannot be decoded.
    pub fn load(path: &Path) -> Result<Self> {
        let upright = load_upright(path)?;
        let (width, height) = (upright.width(), upright.height());
        let gray = matches!(upright.as_dynamic(), DynamicImage::ImageLuma8(_));
        let plain = matches!(
            upright.as_dynamic(),
            DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_)
        );

        if plain && upright.orientation() == ORIENTATION_NORMAL {
            let bytes = std::fs::read(path)?;
            if is_passthrough_jpeg(&bytes) {
                debug!(path = %path.display(), bytes = bytes.len(), "Embedding JPEG as is");
                return Ok(Self {
                    bytes,
                    width,
                    height,
                    gray,
                });
            }
        }

        let rgb = DynamicImage::ImageRgb8(upright.into_dynamic().to_rgb8());
        let bytes = ImageProcessor::from_dynamic(rgb).to_jpeg_bytes(REENCODE_QUALITY)?;
        debug!(path = %path.display(), bytes = bytes.len(), "Re-encoded for embedding");
        Ok(Self {
            bytes,
            width,
            height,
            gray: false,
        })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Image XObject carrying the JPEG stream unchanged.
    pub fn into_xobject(self, dpi: f32) -> ExternalXObject {
        let color_space: &[u8] = if self.gray { b"DeviceGray" } else { b"DeviceRGB" };
        let dict = BTreeMap::from([
            ("Type".to_string(), DictItem::Name(b"XObject".to_vec())),
            ("Subtype".to_string(), DictItem::Name(b"Image".to_vec())),
            ("Width".to_string(), DictItem::Int(i64::from(self.width))),
            ("Height".to_string(), DictItem::Int(i64::from(self.height))),
            ("ColorSpace".to_string(), DictItem::Name(color_space.to_vec())),
            ("BitsPerComponent".to_string(), DictItem::Int(8)),
            ("Filter".to_string(), DictItem::Name(b"DCTDecode".to_vec())),
        ]);
        ExternalXObject {
            stream: ExternalStream {
                dict,
                content: self.bytes,
                compress: false,
            },
            width: Some(Px(self.width as usize)),
            height: Some(Px(self.height as usize)),
            dpi: Some(dpi),
        }
    }
}

/// JPEG data a PDF viewer can show as DeviceRGB/DeviceGray. Adobe-marked
/// files may carry CMYK or YCCK and are re-encoded instead.
fn is_passthrough_jpeg(bytes: &[u8]) -> bool {
    matches!(image::guess_format(bytes), Ok(ImageFormat::Jpeg)) && !has_adobe_marker(bytes)
}

/// Whether an APP14 "Adobe" segment appears in the JPEG header.
fn has_adobe_marker(bytes: &[u8]) -> bool {
    let header = &bytes[..bytes.len().min(64 * 1024)];
    header
        .windows(7)
        .any(|w| w[0] == 0xFF && w[1] == 0xEE && &w[4..7] == b"Ado")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::path::PathBuf;

    fn save(dir: &Path, name: &str, image: DynamicImage) -> PathBuf {
        let path = dir.join(name);
        image.save(&path).unwrap();
        path
    }

    #[test]
    fn rgb_jpeg_is_embedded_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(
            dir.path(),
            "a.jpg",
            DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([10, 120, 200]))),
        );

        let jpeg = EmbeddedJpeg::load(&path).unwrap();

        assert_eq!(jpeg.dimensions(), (64, 48));
        let xobject = jpeg.into_xobject(72.0);
        assert_eq!(xobject.stream.content, std::fs::read(&path).unwrap());
        assert_eq!(
            xobject.stream.dict.get("Filter"),
            Some(&DictItem::Name(b"DCTDecode".to_vec()))
        );
        assert_eq!(
            xobject.stream.dict.get("ColorSpace"),
            Some(&DictItem::Name(b"DeviceRGB".to_vec()))
        );
    }

    #[test]
    fn gray_jpeg_keeps_its_colour_space() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(
            dir.path(),
            "g.jpg",
            DynamicImage::ImageLuma8(GrayImage::from_pixel(32, 32, Luma([90]))),
        );

        let xobject = EmbeddedJpeg::load(&path).unwrap().into_xobject(72.0);
        assert_eq!(
            xobject.stream.dict.get("ColorSpace"),
            Some(&DictItem::Name(b"DeviceGray".to_vec()))
        );
    }

    #[test]
    fn png_is_reencoded_as_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = save(
            dir.path(),
            "a.png",
            DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 30, Rgba([1, 2, 3, 4]))),
        );

        let jpeg = EmbeddedJpeg::load(&path).unwrap();
        assert_eq!(jpeg.dimensions(), (40, 30));
        let xobject = jpeg.into_xobject(72.0);
        assert_eq!(
            image::guess_format(&xobject.stream.content).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(xobject.width, Some(Px(40)));
    }

    #[test]
    fn garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();
        assert!(EmbeddedJpeg::load(&path).is_err());
    }

    #[test]
    fn adobe_marker_is_detected() {
        let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xEE, 0x00, 0x0E];
        bytes.extend_from_slice(b"Adobe");
        assert!(has_adobe_marker(&bytes));
        assert!(!has_adobe_marker(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J']));
    }
}
