// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Camera-like JPEGs for tests: pixels from `image`, plus a hand-built APP1
// segment carrying Orientation and DateTimeOriginal.

use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};

/// Grey used for every fixture pixel.
pub const FIXTURE_GREY: Rgb<u8> = Rgb([128, 128, 128]);

/// Write a `width`x`height` grey JPEG whose EXIF says `orientation` and
/// `taken` (`YYYY:MM:DD HH:MM:SS`).
pub fn write_camera_jpeg(
    dir: &Path,
    name: &str,
    (width, height): (u32, u32),
    orientation: u16,
    taken: &str,
) -> PathBuf {
    let mut encoded = Vec::new();
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, FIXTURE_GREY))
        .write_to(&mut std::io::Cursor::new(&mut encoded), image::ImageFormat::Jpeg)
        .unwrap();
    assert_eq!(&encoded[..2], &[0xFF, 0xD8]);

    let payload = exif_payload(orientation, taken);
    let segment_len = u16::try_from(payload.len() + 2).unwrap();
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(&payload);
    jpeg.extend_from_slice(&encoded[2..]);

    let path = dir.join(name);
    std::fs::write(&path, jpeg).unwrap();
    path
}

/// `Exif\0\0` + little-endian TIFF: IFD0 {Orientation, ExifIFD}, Exif IFD
/// {DateTimeOriginal}.
fn exif_payload(orientation: u16, taken: &str) -> Vec<u8> {
    const IFD0: u32 = 8;
    const EXIF_IFD: u32 = IFD0 + 2 + 2 * 12 + 4;
    const DATE: u32 = EXIF_IFD + 2 + 12 + 4;

    let mut date = taken.as_bytes().to_vec();
    date.push(0);

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&IFD0.to_le_bytes());

    tiff.extend_from_slice(&2u16.to_le_bytes());
    entry(&mut tiff, 0x0112, 3, 1, u32::from(orientation));
    entry(&mut tiff, 0x8769, 4, 1, EXIF_IFD);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    entry(&mut tiff, 0x9003, 2, date.len() as u32, DATE);
    tiff.extend_from_slice(&0u32.to_le_bytes());

    assert_eq!(tiff.len() as u32, DATE);
    tiff.extend_from_slice(&date);

    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(&tiff);
    payload
}

fn entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    out.extend_from_slice(&value.to_le_bytes());
}

/// Pixels that look like the overlay's yellow fill.
pub fn stamped_pixels(image: &DynamicImage) -> usize {
    image
        .to_rgb8()
        .pixels()
        .filter(|p| p[0] > 170 && p[1] > 130 && p[2] < 90)
        .count()
}
