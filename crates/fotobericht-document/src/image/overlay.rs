// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Timestamp burn-in: bottom-right text with a dark outline and a bright fill,
// sized relative to the image width.

use ab_glyph::PxScale;
use image::{DynamicImage, Rgb};
use imageproc::drawing::{draw_text_mut, text_size};
use tracing::debug;

use crate::fonts::CaptionFont;

/// Text height as a fraction of the image width.
pub const FONT_WIDTH_RATIO: f32 = 0.04;

/// Smallest overlay font size in pixels.
pub const MIN_FONT_PX: f32 = 28.0;

const OUTLINE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);
const FILL_COLOR: Rgb<u8> = Rgb([255, 214, 0]);

/// Overlay font size for an image `width` pixels wide.
pub fn overlay_font_px(width: u32) -> f32 {
    (width as f32 * FONT_WIDTH_RATIO).round().max(MIN_FONT_PX)
}

/// Draw `text` into the bottom-right corner of `image`.
pub fn burn_timestamp(image: DynamicImage, text: &str, font: &CaptionFont) -> DynamicImage {
    let mut canvas = image.to_rgb8();
    let (width, height) = canvas.dimensions();

    let size = overlay_font_px(width);
    let scale = PxScale::from(size);
    let (text_w, text_h) = text_size(scale, font.font(), text);
    let margin = (size / 2.0).round() as i32;
    let outline = ((size / 14.0).round() as i32).max(2);

    let x = width as i32 - text_w as i32 - margin;
    let y = height as i32 - text_h as i32 - margin;
    debug!(size, x, y, text, "Burning in timestamp");

    for r in 1..=outline {
        for (dx, dy) in [(-r, -r), (0, -r), (r, -r), (-r, 0), (r, 0), (-r, r), (0, r), (r, r)] {
            draw_text_mut(&mut canvas, OUTLINE_COLOR, x + dx, y + dy, scale, font.font(), text);
        }
    }
    draw_text_mut(&mut canvas, FILL_COLOR, x, y, scale, font.font(), text);

    DynamicImage::ImageRgb8(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    #[test]
    fn font_size_scales_with_width_above_minimum() {
        assert_eq!(overlay_font_px(400), MIN_FONT_PX);
        assert_eq!(overlay_font_px(2000), 80.0);
        assert_eq!(overlay_font_px(1500), 60.0);
    }

    #[test]
    fn text_lands_in_bottom_right() {
        let font = CaptionFont::load().unwrap();
        let grey = Rgb([128, 128, 128]);
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(800, 600, grey));

        let out = burn_timestamp(img, "17.03.2024 14:05", &font).to_rgb8();

        assert_eq!(*out.get_pixel(10, 10), grey);
        let changed = out
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != grey)
            .collect::<Vec<_>>();
        assert!(!changed.is_empty());
        assert!(changed.iter().all(|(x, y, _)| *x > 300 && *y > 450));
    }
}
