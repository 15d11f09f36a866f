// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page grouping — one left-to-right pass. A tall image gets its own page; a
// wide image shares its page with the next image only if that one is wide
// too. Decisions are never revisited.

use fotobericht_core::{ImageRef, PageGroup};

/// Group classified images into pages, preserving input order.
pub fn group_pages(images: Vec<ImageRef>) -> Vec<PageGroup> {
    let mut groups = Vec::with_capacity(images.len());
    let mut iter = images.into_iter().peekable();

    while let Some(first) = iter.next() {
        if first.wide {
            if let Some(second) = iter.next_if(|next| next.wide) {
                groups.push(PageGroup::Pair(first, second));
                continue;
            }
        }
        groups.push(PageGroup::Single(first));
    }

    groups
}

/// Number of images across all groups.
pub fn image_count(groups: &[PageGroup]) -> usize {
    groups.iter().map(PageGroup::len).sum()
}
