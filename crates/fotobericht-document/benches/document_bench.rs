// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the fotobericht-document crate: the per-photo
// normalization pipeline and page grouping.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgb, RgbImage};

use fotobericht_core::{ImageRef, ProcessingOptions};
use fotobericht_document::{CaptionFont, Normalizer, group_pages};

/// Normalize a 2400x1800 synthetic photo: 4:3 crop is a no-op, downsample to
/// 2000x1500, JPEG encode. This is the per-photo hot path of a run.
fn bench_normalize(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = dir.path().join("photo.png");
    let mut img = RgbImage::from_pixel(2400, 1800, Rgb([90, 120, 60]));
    for y in (0..1800).step_by(7) {
        for x in 0..2400 {
            img.put_pixel(x, y, Rgb([220, 220, 200]));
        }
    }
    img.save(&source).expect("write source");

    let work = dir.path().join("work");
    std::fs::create_dir(&work).expect("work dir");
    let font = CaptionFont::load().expect("font");
    let options = ProcessingOptions {
        archive: false,
        ..ProcessingOptions::default()
    };
    let normalizer = Normalizer::new(&options, &font, &work);

    c.bench_function("normalize (2400x1800)", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&source), 1, "bench")));
    });
}

/// Group 500 images in a repeating wide/wide/tall pattern.
fn bench_grouping(c: &mut Criterion) {
    let images: Vec<ImageRef> = (0..500)
        .map(|i| {
            if i % 3 == 2 {
                ImageRef::new(format!("{i}.jpg"), 3000, 4000)
            } else {
                ImageRef::new(format!("{i}.jpg"), 4000, 3000)
            }
        })
        .collect();

    c.bench_function("group_pages (500)", |b| {
        b.iter(|| black_box(group_pages(black_box(images.clone()))));
    });
}

criterion_group!(benches, bench_normalize, bench_grouping);
criterion_main!(benches);
