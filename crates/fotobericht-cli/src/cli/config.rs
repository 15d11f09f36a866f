// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The `fotobericht config` command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Subcommand};
use fotobericht_core::AppConfig;
use fotobericht_core::config::CONFIG_FILE;
use fotobericht_core::error::{FotoberichtError, Result};
use fotobericht_document::upright_dimensions;
use tracing::info;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the current configuration
    Show,

    /// Show the config file path
    Path,

    /// Write a config file with defaults
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Remember the letterhead image
    SetLetterhead {
        /// Letterhead image file
        path: PathBuf,
    },
}

pub fn execute(args: ConfigArgs, config: AppConfig, dir: &Path) -> Result<ExitCode> {
    match args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }

        ConfigCommand::Path => {
            println!("{}", dir.join(CONFIG_FILE).display());
        }

        ConfigCommand::Init { force } => {
            let path = dir.join(CONFIG_FILE);
            if path.exists() && !force {
                return Err(FotoberichtError::Config(format!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                )));
            }
            let path = AppConfig::default().persist(dir)?;
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::SetLetterhead { path } => {
            let path = set_letterhead(config, &path, dir)?;
            println!("Letterhead saved in {}", path.display());
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Check that `letterhead` decodes, then store its absolute path.
fn set_letterhead(mut config: AppConfig, letterhead: &Path, dir: &Path) -> Result<PathBuf> {
    let absolute = letterhead
        .canonicalize()
        .map_err(|e| FotoberichtError::Letterhead(format!("{}: {e}", letterhead.display())))?;
    let (width, height) = upright_dimensions(&absolute)
        .map_err(|e| FotoberichtError::Letterhead(e.to_string()))?;
    info!(path = %absolute.display(), width, height, "Letterhead set");

    config.letterhead_path = Some(absolute);
    config.persist(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_letterhead_persists_absolute_path() {
        let dir = tempfile::tempdir().unwrap();
        let head = dir.path().join("head.png");
        image::RgbImage::from_pixel(300, 60, image::Rgb([0, 0, 0]))
            .save(&head)
            .unwrap();

        set_letterhead(AppConfig::default(), &head, dir.path()).unwrap();

        let loaded = AppConfig::load_or_default(dir.path());
        assert_eq!(loaded.letterhead_path, Some(head.canonicalize().unwrap()));
    }

    #[test]
    fn set_letterhead_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("head.png");
        std::fs::write(&bogus, b"not an image").unwrap();
        assert!(matches!(
            set_letterhead(AppConfig::default(), &bogus, dir.path()),
            Err(FotoberichtError::Letterhead(_))
        ));
    }
}
