// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report writer — builds the photo report with `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: each page is a `PdfPage` holding a
// `Vec<Op>`, and the document is serialised once via `PdfDocument::save()`.
// Photos are held as JPEG streams (see `embed`), never as raw pixels.
// Layout is computed in millimetres from the top-left corner and flipped to
// PDF's bottom-left origin here.

use std::path::Path;

use fotobericht_core::error::{FotoberichtError, Result};
use image::DynamicImage;
use printpdf::{
    FontId, Mm, Op, ParsedFont, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt,
    RawImage, RawImageData, RawImageFormat, TextItem, XObjectId, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use super::embed::EmbeddedJpeg;
use crate::fonts::{CAPTION_FONT_BYTES, CaptionFont};
use crate::image::source::load_upright;
use crate::layout::placement::{Rect, letterhead_rect, place_page};
use crate::layout::{CAPTION_FONT_SIZE_PT, PageGeometry};

/// Images are embedded at 72 dpi so one pixel is one point before scaling.
const EMBED_DPI: f32 = 72.0;

/// Baseline offset below the caption cell's vertical centre, as a fraction
/// of the font size.
const BASELINE_SHIFT: f32 = 0.3;

/// One photo to place on a page.
#[derive(Debug, Clone, Copy)]
pub struct PageImage<'a> {
    /// File to embed.
    pub path: &'a Path,
    /// Caption printed below it.
    pub caption: &'a str,
}

/// Accumulates report pages and writes the finished PDF.
pub struct ReportWriter {
    doc: PdfDocument,
    pages: Vec<PdfPage>,
    geometry: PageGeometry,
    metrics: CaptionFont,
    font: FontId,
    letterhead: XObjectId,
    letterhead_px: (u32, u32),
}

impl ReportWriter {
    /// Start a report titled `title` with the letterhead at `letterhead`.
    ///
    /// Fails if the letterhead cannot be decoded or leaves no room for photos.
    #[instrument(skip(letterhead), fields(letterhead = %letterhead.display()))]
    pub fn new(title: &str, letterhead: &Path) -> Result<Self> {
        let letterhead_img = load_upright(letterhead)
            .map_err(|e| FotoberichtError::Letterhead(format!("{}: {e}", letterhead.display())))?;
        let letterhead_px = (letterhead_img.width(), letterhead_img.height());
        let geometry = PageGeometry::a4(letterhead_px.0, letterhead_px.1)?;

        let mut doc = PdfDocument::new(title);

        let mut font_warnings = Vec::new();
        let parsed = ParsedFont::from_bytes(CAPTION_FONT_BYTES, 0, &mut font_warnings)
            .ok_or_else(|| FotoberichtError::Font("failed to parse caption font".into()))?;
        let font = doc.add_font(&parsed);
        let metrics = CaptionFont::load()?;

        let letterhead = doc.add_image(&raw_image(letterhead_img.into_dynamic()));

        info!(
            title,
            letterhead_w = letterhead_px.0,
            letterhead_h = letterhead_px.1,
            content_height = geometry.content_height,
            "Report started"
        );

        Ok(Self {
            doc,
            pages: Vec::new(),
            geometry,
            metrics,
            font,
            letterhead,
            letterhead_px,
        })
    }

    /// Pages added so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a page with one or two photos.
    ///
    /// A photo that cannot be decoded is left out; its area stays blank and
    /// its caption is still printed.
    pub fn add_page(&mut self, images: &[PageImage<'_>]) -> Result<()> {
        let embedded: Vec<Option<EmbeddedJpeg>> = images
            .iter()
            .map(|img| match EmbeddedJpeg::load(img.path) {
                Ok(jpeg) => Some(jpeg),
                Err(err) => {
                    warn!(path = %img.path.display(), error = %err, "image left out of document");
                    None
                }
            })
            .collect();

        let entries: Vec<((u32, u32), &str)> = images
            .iter()
            .zip(&embedded)
            .map(|(img, jpeg)| {
                let dims = jpeg.as_ref().map(EmbeddedJpeg::dimensions).unwrap_or((0, 0));
                (dims, img.caption)
            })
            .collect();
        let placements = place_page(&self.geometry, &entries, &self.metrics);

        let mut ops = Vec::new();
        let head = letterhead_rect(&self.geometry);
        ops.push(self.image_op(self.letterhead.clone(), self.letterhead_px, &head));

        for ((placement, jpeg), (_, caption)) in placements.iter().zip(embedded).zip(&entries) {
            if let Some(jpeg) = jpeg {
                let px = jpeg.dimensions();
                let id = self.doc.add_xobject(&jpeg.into_xobject(EMBED_DPI));
                ops.push(self.image_op(id, px, &placement.image));
            }
            ops.extend(self.caption_ops(caption, &placement.caption));
        }

        self.pages.push(PdfPage::new(
            Mm(self.geometry.page_width),
            Mm(self.geometry.page_height),
            ops,
        ));
        debug!(page = self.pages.len(), images = images.len(), "Page added");
        Ok(())
    }

    /// Serialise the document.
    pub fn to_bytes(mut self) -> Vec<u8> {
        self.doc.with_pages(self.pages);
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        self.doc.save(&PdfSaveOptions::default(), &mut warnings)
    }

    /// Serialise the document and write it to `path`.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub fn save(self, path: &Path) -> Result<()> {
        let pages = self.pages.len();
        let bytes = self.to_bytes();
        std::fs::write(path, &bytes)?;
        info!(pages, bytes = bytes.len(), "Wrote report PDF");
        Ok(())
    }

    /// Draw an embedded image into `rect`.
    fn image_op(&self, id: XObjectId, (px_w, px_h): (u32, u32), rect: &Rect) -> Op {
        let page_h = self.geometry.page_height;
        Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Mm(rect.x).into_pt()),
                translate_y: Some(Mm(page_h - rect.bottom()).into_pt()),
                scale_x: Some(Mm(rect.width).into_pt().0 / px_w.max(1) as f32),
                scale_y: Some(Mm(rect.height).into_pt().0 / px_h.max(1) as f32),
                dpi: Some(EMBED_DPI),
                rotate: None,
            },
        }
    }

    /// Caption text, vertically centred in its cell.
    fn caption_ops(&self, text: &str, cell: &Rect) -> Vec<Op> {
        let font_mm = Mm::from(Pt(CAPTION_FONT_SIZE_PT)).0;
        let baseline = cell.y + cell.height / 2.0 + BASELINE_SHIFT * font_mm;
        let y = self.geometry.page_height - baseline;

        vec![
            Op::StartTextSection,
            Op::SetFontSize {
                size: Pt(CAPTION_FONT_SIZE_PT),
                font: self.font.clone(),
            },
            Op::SetTextCursor {
                pos: Point {
                    x: Mm(cell.x).into_pt(),
                    y: Mm(y).into_pt(),
                },
            },
            Op::WriteText {
                items: vec![TextItem::Text(text.to_string())],
                font: self.font.clone(),
            },
            Op::EndTextSection,
        ]
    }
}

/// RGB8 pixel buffer for `printpdf`. Only the letterhead, which stays
/// lossless, goes in this way.
fn raw_image(image: DynamicImage) -> RawImage {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    RawImage {
        pixels: RawImageData::U8(rgb.into_raw()),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    }
}
