// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The `fotobericht plan` command: print the page grouping and captions
// without writing anything.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use fotobericht_core::error::Result;
use fotobericht_core::{DocumentIdentity, PageGroup, ProcessingOptions};
use fotobericht_document::{CaptionScheme, classify_all, group_pages};

use super::parse_start_number;

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Photos in document order
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Case number; without it and --count, captions are file names
    #[arg(long)]
    pub case: Option<String>,

    /// Document-type code
    #[arg(long, default_value = "")]
    pub code: String,

    /// Document count within the case
    #[arg(long)]
    pub count: Option<String>,

    /// Number of the first photo
    #[arg(long)]
    pub start: Option<String>,
}

pub fn execute(args: PlanArgs) -> Result<ExitCode> {
    let options = match (&args.case, &args.count) {
        (Some(case), Some(count)) => ProcessingOptions {
            start_number: parse_start_number(args.start.as_deref(), 1),
            identity: DocumentIdentity::new(case, &args.code, count),
            ..ProcessingOptions::default()
        },
        _ => ProcessingOptions::preview(parse_start_number(args.start.as_deref(), 1), false),
    };

    let groups = group_pages(classify_all(&args.images));
    for line in describe(&groups, &options, args.images.len()) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// One line per page: `Page N: caption [wide|tall] + caption [...]`.
fn describe(groups: &[PageGroup], options: &ProcessingOptions, total: usize) -> Vec<String> {
    let captions = CaptionScheme::new(options, total);
    let mut number = options.start_number;
    groups
        .iter()
        .enumerate()
        .map(|(page, group)| {
            let images: Vec<String> = group
                .images()
                .into_iter()
                .map(|image| {
                    let shape = match (image.dimensions, image.wide) {
                        (None, _) => "unreadable",
                        (Some(_), true) => "wide",
                        (Some(_), false) => "tall",
                    };
                    let text = format!("{} [{shape}]", captions.caption(number, &image.path));
                    number += 1;
                    text
                })
                .collect();
            format!("Page {}: {}", page + 1, images.join(" + "))
        })
        .collect()
}
