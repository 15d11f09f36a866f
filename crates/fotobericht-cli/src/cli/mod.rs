// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommands and the pieces they share: photo/letterhead arguments, start
// number parsing, and running an assembly with progress output and Ctrl-C
// cancellation.

pub mod config;
pub mod create;
pub mod output;
pub mod plan;
pub mod preview;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use fotobericht_assembly::{AssemblyEvent, AssemblyRequest, ChannelObserver, DocumentAssembler};
use fotobericht_core::error::{FotoberichtError, Result};
use fotobericht_core::{AppConfig, RunOutcome};
use fotobericht_document::PdfReader;
use tracing::warn;

/// Arguments shared by `create` and `preview`.
#[derive(Args, Debug)]
pub struct PhotoArgs {
    /// Photos in document order
    #[arg(required = true)]
    pub images: Vec<PathBuf>,

    /// Letterhead image (defaults to the configured one)
    #[arg(long)]
    pub letterhead: Option<PathBuf>,

    /// Number of the first photo; anything that is not a positive number counts as 1
    #[arg(long)]
    pub start: Option<String>,

    /// Burn the capture time into the photos in the document
    #[arg(long)]
    pub timestamp: bool,
}

impl PhotoArgs {
    pub fn letterhead(&self, config: &AppConfig) -> Result<PathBuf> {
        self.letterhead
            .clone()
            .or_else(|| config.letterhead_path.clone())
            .ok_or_else(|| {
                FotoberichtError::Config(
                    "No letterhead set. Pass --letterhead or run `fotobericht config set-letterhead <image>`."
                        .into(),
                )
            })
    }

    pub fn start_number(&self, config: &AppConfig) -> u32 {
        parse_start_number(self.start.as_deref(), config.default_start_number)
    }
}

/// `raw` as a photo number >= 1. Missing input gives `default`, invalid input 1.
pub fn parse_start_number(raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw else {
        return default.max(1);
    };
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => {
            warn!(input = raw, "invalid start number, using 1");
            1
        }
    }
}

/// Run `request` in the background, printing progress to stderr. Ctrl-C
/// stops the run at the next page boundary.
pub async fn run_with_progress(request: AssemblyRequest) -> RunOutcome {
    let total = request.image_paths.len();
    let (observer, mut events) = ChannelObserver::new();
    let handle = DocumentAssembler::new(request).spawn(Arc::new(observer));

    let token = handle.cancel_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("Stopping after the current page...");
            token.cancel();
        }
    });

    while let Some(event) = events.recv().await {
        match &event {
            AssemblyEvent::Progress(placed) => eprintln!("  {placed}/{total} photos placed"),
            AssemblyEvent::Status(message) => eprintln!("{message}..."),
            _ => {}
        }
        if event.is_terminal() {
            break;
        }
    }

    interrupt.abort();
    handle.wait().await
}

/// Print the outcome and map it to an exit code.
pub fn report_outcome(outcome: &RunOutcome) -> ExitCode {
    match outcome {
        RunOutcome::Completed { document } => {
            match PdfReader::open(document) {
                Ok(reader) => println!("{} ({} pages)", document.display(), reader.page_count()),
                Err(_) => println!("{}", document.display()),
            }
            ExitCode::SUCCESS
        }
        RunOutcome::Cancelled => {
            eprintln!("Cancelled. Nothing was written.");
            ExitCode::from(130)
        }
        RunOutcome::Failed { message } => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
