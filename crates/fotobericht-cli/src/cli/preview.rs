// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The `fotobericht preview` command: file names as captions, nothing
// archived, written to a fresh temporary folder unless --output is given.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use fotobericht_assembly::AssemblyRequest;
use fotobericht_core::error::Result;
use fotobericht_core::{AppConfig, ProcessingOptions};
use tracing::info;

use super::{PhotoArgs, report_outcome, run_with_progress};

/// File name of the preview document inside its temporary folder.
pub const PREVIEW_FILE: &str = "preview.pdf";

#[derive(Args, Debug)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub photos: PhotoArgs,

    /// Write the preview here instead of a temporary folder
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub async fn execute(args: PreviewArgs, config: &AppConfig) -> Result<ExitCode> {
    let letterhead = args.photos.letterhead(config)?;
    let options = ProcessingOptions::preview(
        args.photos.start_number(config),
        args.photos.timestamp || config.timestamp_in_document,
    );

    let document = match args.output {
        Some(path) => path,
        None => {
            // Kept after exit so the preview can be opened.
            let dir = tempfile::Builder::new()
                .prefix("fotobericht-preview-")
                .tempdir()?
                .keep();
            dir.join(PREVIEW_FILE)
        }
    };
    info!(document = %document.display(), "Creating preview");

    let mut request = AssemblyRequest::new(args.photos.images, options, document, letterhead);
    if let Some(root) = &config.temp_root {
        request = request.with_temp_root(root);
    }

    let outcome = run_with_progress(request).await;
    Ok(report_outcome(&outcome))
}
