// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Placement rectangles for the letterhead, images, and captions.
//
// A single image starts at the uniform width and shrinks only if it would be
// taller than the content area minus caption clearance. Paired images each
// shrink to half the content height. Blocks (image + offset + caption line)
// are centred vertically in the content area, images and captions
// horizontally on the page.

use super::geometry::PageGeometry;
use super::{CAPTION_FONT_SIZE_PT, TextMetrics};

/// Aspect used for an image whose size is unknown (4:3 landscape).
pub const PLACEHOLDER_DIMENSIONS: (u32, u32) = (4, 3);

/// Axis-aligned rectangle in millimetres, origin at the page's top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Where one image and its caption go on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub image: Rect,
    /// Caption cell: exactly as wide as the rendered text, one line high.
    pub caption: Rect,
}

/// Letterhead rectangle: centred, at the top margin.
pub fn letterhead_rect(geometry: &PageGeometry) -> Rect {
    Rect {
        x: (geometry.page_width - geometry.letterhead_width) / 2.0,
        y: geometry.margin,
        width: geometry.letterhead_width,
        height: geometry.letterhead_height,
    }
}

/// Size of an image that starts at the uniform width and is capped at
/// `max_height`, keeping its aspect ratio.
fn fit(geometry: &PageGeometry, (px_w, px_h): (u32, u32), max_height: f32) -> (f32, f32) {
    let (px_w, px_h) = if px_w == 0 || px_h == 0 {
        PLACEHOLDER_DIMENSIONS
    } else {
        (px_w, px_h)
    };
    let (px_w, px_h) = (px_w as f32, px_h as f32);

    let mut width = geometry.uniform_dimension;
    let mut height = px_h * (width / px_w);
    if height > max_height {
        height = max_height;
        width = px_w * (height / px_h);
    }
    (width, height)
}

fn block(geometry: &PageGeometry, size: (f32, f32), top: f32, caption_width: f32) -> Placement {
    let (width, height) = size;
    let image = Rect {
        x: (geometry.page_width - width) / 2.0,
        y: top,
        width,
        height,
    };
    let caption = Rect {
        x: (geometry.page_width - caption_width) / 2.0,
        y: image.bottom() + geometry.caption_offset,
        width: caption_width,
        height: geometry.line_height,
    };
    Placement { image, caption }
}

/// Layout of a one-image page.
pub fn place_single(
    geometry: &PageGeometry,
    dimensions: (u32, u32),
    caption_width: f32,
) -> Placement {
    let size = fit(geometry, dimensions, geometry.single_max_height());
    let block_height = size.1 + geometry.caption_offset + geometry.line_height;
    let top = geometry.content_top + (geometry.content_height - block_height) / 2.0;
    block(geometry, size, top, caption_width)
}

/// Layout of a two-image page, top block first.
pub fn place_pair(
    geometry: &PageGeometry,
    first: ((u32, u32), f32),
    second: ((u32, u32), f32),
) -> [Placement; 2] {
    let max_height = geometry.pair_max_height();
    let size1 = fit(geometry, first.0, max_height);
    let size2 = fit(geometry, second.0, max_height);

    let block1 = size1.1 + geometry.caption_offset + geometry.line_height;
    let block2 = size2.1 + geometry.caption_offset + geometry.line_height;
    let total = block1 + geometry.spacing_between + block2;
    let top = geometry.content_top + (geometry.content_height - total) / 2.0;

    let upper = block(geometry, size1, top, first.1);
    let lower_top = upper.caption.bottom() + geometry.spacing_between;
    let lower = block(geometry, size2, lower_top, second.1);
    [upper, lower]
}

/// Lay out one page from `(pixel dimensions, caption)` entries, measuring
/// captions with `metrics`. One entry gives a single layout, two a stacked
/// pair; further entries are ignored.
pub fn place_page(
    geometry: &PageGeometry,
    entries: &[((u32, u32), &str)],
    metrics: &impl TextMetrics,
) -> Vec<Placement> {
    let measure = |text: &str| metrics.text_width_mm(text, CAPTION_FONT_SIZE_PT);
    match entries {
        [] => Vec::new(),
        [(dims, caption)] => vec![place_single(geometry, *dims, measure(caption))],
        [(d1, c1), (d2, c2), ..] => {
            place_pair(geometry, (*d1, measure(c1)), (*d2, measure(c2))).to_vec()
        }
    }
}
