// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page geometry — constants of the A4 report page and the values derived
// from the letterhead's aspect ratio.

use fotobericht_core::error::{FotoberichtError, Result};

pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;
/// Top and bottom page margin.
pub const MARGIN_MM: f32 = 10.0;
/// Gap between letterhead and content area.
pub const HEADER_SPACING_MM: f32 = 10.0;
/// Gap between an image and its caption.
pub const CAPTION_OFFSET_MM: f32 = 3.0;
/// Gap between two stacked image blocks.
pub const SPACING_BETWEEN_MM: f32 = 8.0;
/// Height of the caption cell.
pub const LINE_HEIGHT_MM: f32 = 10.0;
/// Room kept free below a single image for its caption.
pub const SINGLE_CAPTION_CLEARANCE_MM: f32 = 15.0;

/// Page-constant layout values, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub letterhead_width: f32,
    pub letterhead_height: f32,
    pub header_spacing: f32,
    pub caption_offset: f32,
    pub spacing_between: f32,
    pub line_height: f32,
    pub content_top: f32,
    pub content_height: f32,
    /// Starting image width before fit-to-box shrinking.
    pub uniform_dimension: f32,
}

impl PageGeometry {
    /// A4 portrait geometry for a letterhead of the given pixel size.
    pub fn a4(letterhead_width_px: u32, letterhead_height_px: u32) -> Result<Self> {
        if letterhead_width_px == 0 || letterhead_height_px == 0 {
            return Err(FotoberichtError::Letterhead(
                "letterhead image has zero size".into(),
            ));
        }
        let aspect = letterhead_width_px as f32 / letterhead_height_px as f32;

        let letterhead_width = A4_WIDTH_MM / 3.0;
        let letterhead_height = letterhead_width / aspect;
        let content_top = MARGIN_MM + letterhead_height + HEADER_SPACING_MM;
        let content_height = A4_HEIGHT_MM - MARGIN_MM - content_top;
        let uniform_dimension = (content_height
            - SPACING_BETWEEN_MM
            - 2.0 * (CAPTION_OFFSET_MM + LINE_HEIGHT_MM))
            / 1.5;

        if uniform_dimension <= 0.0 {
            return Err(FotoberichtError::Letterhead(format!(
                "letterhead is too tall ({letterhead_width_px}x{letterhead_height_px} px leaves no room for photos)"
            )));
        }

        Ok(Self {
            page_width: A4_WIDTH_MM,
            page_height: A4_HEIGHT_MM,
            margin: MARGIN_MM,
            letterhead_width,
            letterhead_height,
            header_spacing: HEADER_SPACING_MM,
            caption_offset: CAPTION_OFFSET_MM,
            spacing_between: SPACING_BETWEEN_MM,
            line_height: LINE_HEIGHT_MM,
            content_top,
            content_height,
            uniform_dimension,
        })
    }

    /// Height limit for the image on a one-image page.
    pub fn single_max_height(&self) -> f32 {
        self.content_height - SINGLE_CAPTION_CLEARANCE_MM
    }

    /// Height limit for each image on a two-image page.
    pub fn pair_max_height(&self) -> f32 {
        (self.content_height - self.spacing_between) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn derived_values_for_wide_letterhead() {
        // 7:1 letterhead -> 70 mm wide, 10 mm tall.
        let g = PageGeometry::a4(700, 100).unwrap();
        assert!(approx(g.letterhead_width, 70.0));
        assert!(approx(g.letterhead_height, 10.0));
        assert!(approx(g.content_top, 30.0));
        assert!(approx(g.content_height, 257.0));
        assert!(approx(g.uniform_dimension, (257.0 - 8.0 - 26.0) / 1.5));
        assert!(approx(g.single_max_height(), 242.0));
        assert!(approx(g.pair_max_height(), 124.5));
    }

    #[test]
    fn zero_sized_letterhead_is_rejected() {
        assert!(matches!(
            PageGeometry::a4(0, 100),
            Err(FotoberichtError::Letterhead(_))
        ));
    }

    #[test]
    fn very_tall_letterhead_is_rejected() {
        assert!(PageGeometry::a4(10, 1000).is_err());
    }
}
