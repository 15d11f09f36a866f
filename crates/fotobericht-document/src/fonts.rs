// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Embedded caption font (DejaVu Sans Bold), shared by the PDF writer for
// captions and by the timestamp overlay.

use ab_glyph::{Font, FontRef};
use fotobericht_core::error::{FotoberichtError, Result};

use crate::layout::TextMetrics;

/// Raw TrueType bytes of the caption font.
pub const CAPTION_FONT_BYTES: &[u8] = include_bytes!("../fonts/DejaVuSans-Bold.ttf");

/// Millimetres per PostScript point.
const MM_PER_PT: f32 = 25.4 / 72.0;

/// Parsed caption font used for measuring and rasterising text.
#[derive(Clone)]
pub struct CaptionFont {
    font: FontRef<'static>,
}

impl CaptionFont {
    /// Parse the embedded font.
    pub fn load() -> Result<Self> {
        let font = FontRef::try_from_slice(CAPTION_FONT_BYTES)
            .map_err(|e| FotoberichtError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    /// Borrow the `ab_glyph` font for rasterising.
    pub fn font(&self) -> &FontRef<'static> {
        &self.font
    }

    /// Advance width of `text` at `size_pt`, in points.
    pub fn text_width_pt(&self, text: &str, size_pt: f32) -> f32 {
        let units_per_em = self.font.units_per_em().unwrap_or(1000.0);
        let advance: f32 = text
            .chars()
            .map(|c| self.font.h_advance_unscaled(self.font.glyph_id(c)))
            .sum();
        advance / units_per_em * size_pt
    }
}

impl TextMetrics for CaptionFont {
    fn text_width_mm(&self, text: &str, size_pt: f32) -> f32 {
        self.text_width_pt(text, size_pt) * MM_PER_PT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_font_parses() {
        assert!(CaptionFont::load().is_ok());
    }

    #[test]
    fn width_scales_with_size_and_length() {
        let font = CaptionFont::load().unwrap();
        let short = font.text_width_mm("Foto", 11.0);
        let long = font.text_width_mm("Foto Nr. 12", 11.0);
        assert!(short > 0.0);
        assert!(long > short);
        let double = font.text_width_mm("Foto", 22.0);
        assert!((double - 2.0 * short).abs() < 1e-3);
        assert_eq!(font.text_width_mm("", 11.0), 0.0);
    }
}
