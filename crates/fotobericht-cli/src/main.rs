// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fotobericht — assembles photo batches into captioned A4 PDF reports.
//
// Entry point. Initialises logging, loads the persisted configuration, and
// dispatches to the subcommands.

mod cli;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fotobericht_core::AppConfig;
use fotobericht_core::config::data_dir;
use fotobericht_core::human_errors::humanize_error;

/// Fotobericht - photo reports with letterhead, captions, and archived originals.
#[derive(Parser, Debug)]
#[command(name = "fotobericht")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the report PDF and archive the photos
    Create(cli::create::CreateArgs),

    /// Build a throw-away preview captioned with file names
    Preview(cli::preview::PreviewArgs),

    /// Show how the photos will be grouped into pages
    Plan(cli::plan::PlanArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Fotobericht v{}", env!("CARGO_PKG_VERSION"));

    let dir = data_dir();
    let config = AppConfig::load_or_default(&dir);

    let result = match cli.command {
        Commands::Create(args) => cli::create::execute(args, &config).await,
        Commands::Preview(args) => cli::preview::execute(args, &config).await,
        Commands::Plan(args) => cli::plan::execute(args),
        Commands::Config(args) => cli::config::execute(args, config, &dir),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            let human = humanize_error(&err);
            eprintln!("error: {}\n  {}", human.message, human.suggestion);
            ExitCode::FAILURE
        }
    }
}
