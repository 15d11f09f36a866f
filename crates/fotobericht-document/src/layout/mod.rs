// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Layout module — page geometry, page grouping, placement rectangles, and
// caption text. All lengths are millimetres with a top-left origin.

pub mod caption;
pub mod geometry;
pub mod grouping;
pub mod placement;

pub use caption::CaptionScheme;
pub use geometry::PageGeometry;
pub use grouping::group_pages;
pub use placement::{Placement, Rect, place_page};

/// Caption font size in points.
pub const CAPTION_FONT_SIZE_PT: f32 = 11.0;

/// Measures rendered text so captions can be centred exactly.
pub trait TextMetrics {
    /// Advance width of `text` at `size_pt`, in millimetres.
    fn text_width_mm(&self, text: &str, size_pt: f32) -> f32;
}
