// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The `fotobericht create` command.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use fotobericht_assembly::AssemblyRequest;
use fotobericht_core::error::{FotoberichtError, Result};
use fotobericht_core::{AppConfig, DocumentIdentity, ProcessingOptions, RunState};
use tracing::info;

use super::output::{self, OutputLocation};
use super::{PhotoArgs, report_outcome, run_with_progress};

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub photos: PhotoArgs,

    /// Case number
    #[arg(long)]
    pub case: String,

    /// Document-type code; leave out or use a "(...)" placeholder for none
    #[arg(long, default_value = "")]
    pub code: String,

    /// Document count within the case
    #[arg(long)]
    pub count: String,

    /// Report name (defaults to "<case>-<code>-<count>")
    #[arg(long)]
    pub name: Option<String>,

    /// Folder in which the report folder is created (defaults to the first photo's folder)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Replace an existing report folder
    #[arg(long)]
    pub overwrite: bool,

    /// Caption photos with their file names
    #[arg(long)]
    pub original_names: bool,

    /// Do not save copies of the photos
    #[arg(long, conflicts_with_all = ["folder", "delete_originals"])]
    pub no_archive: bool,

    /// Save copies as loose files instead of a zip archive
    #[arg(long)]
    pub folder: bool,

    /// Delete the source photos once they are archived
    #[arg(long)]
    pub delete_originals: bool,

    /// Burn the capture time into the archived copies too
    #[arg(long)]
    pub timestamp_archive: bool,
}

impl CreateArgs {
    fn identity(&self) -> Result<DocumentIdentity> {
        if self.case.trim().is_empty() {
            return Err(FotoberichtError::Config("Enter a case number.".into()));
        }
        if self.count.trim().is_empty() {
            return Err(FotoberichtError::Config("Enter a document count.".into()));
        }
        Ok(DocumentIdentity::new(&self.case, &self.code, &self.count))
    }

    /// Flags win over the configured defaults.
    fn options(&self, config: &AppConfig, identity: DocumentIdentity) -> ProcessingOptions {
        let archive = config.archive_images && !self.no_archive;
        let timestamp_in_document = self.photos.timestamp || config.timestamp_in_document;
        ProcessingOptions {
            start_number: self.photos.start_number(config),
            use_original_filenames: self.original_names,
            identity,
            archive,
            archive_as_zip: config.archive_as_zip && !self.folder,
            delete_originals: archive && (self.delete_originals || config.delete_originals),
            timestamp_in_document,
            timestamp_in_archive: timestamp_in_document
                && (self.timestamp_archive || config.timestamp_in_archive),
        }
    }
}

pub async fn execute(args: CreateArgs, config: &AppConfig) -> Result<ExitCode> {
    let identity = args.identity()?;
    let letterhead = args.photos.letterhead(config)?;
    let first = args.photos.images.first().ok_or(FotoberichtError::NoImages)?;

    let location: OutputLocation = output::resolve(
        first,
        args.output_dir.as_deref(),
        args.name.as_deref(),
        &identity.label(),
    )?;
    output::prepare(&location, &args.photos.images, args.overwrite)?;

    let options = args.options(config, identity);
    info!(
        document = %location.document.display(),
        images = args.photos.images.len(),
        archive = options.archive,
        zip = options.archive_as_zip,
        "Creating report"
    );

    let mut request = AssemblyRequest::new(
        args.photos.images.clone(),
        options,
        &location.document,
        letterhead,
    );
    if let Some(root) = &config.temp_root {
        request = request.with_temp_root(root);
    }

    let outcome = run_with_progress(request).await;
    if outcome.state() != RunState::Completed {
        output::discard_if_empty(&location);
    }
    Ok(report_outcome(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CreateArgs,
    }

    fn parse(extra: &[&str]) -> CreateArgs {
        let mut argv = vec!["fotobericht", "--case", "12345", "--count", "7", "a.jpg"];
        argv.extend_from_slice(extra);
        Harness::parse_from(argv).args
    }

    #[test]
    fn defaults_follow_config() {
        let args = parse(&[]);
        let opts = args.options(&AppConfig::default(), args.identity().unwrap());
        assert_eq!(opts.start_number, 1);
        assert!(opts.archive && opts.archive_as_zip);
        assert!(!opts.delete_originals);
        assert!(!opts.timestamp_in_document && !opts.timestamp_in_archive);
        assert_eq!(opts.identity.label(), "12345-7");
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&["--folder", "--delete-originals", "--timestamp", "--timestamp-archive", "--start", "x"]);
        let opts = args.options(&AppConfig::default(), args.identity().unwrap());
        assert!(opts.archive && !opts.archive_as_zip);
        assert!(opts.delete_originals);
        assert!(opts.timestamp_in_document && opts.timestamp_in_archive);
        assert_eq!(opts.start_number, 1);
    }

    #[test]
    fn archive_timestamp_needs_document_timestamp() {
        let args = parse(&["--timestamp-archive"]);
        let opts = args.options(&AppConfig::default(), args.identity().unwrap());
        assert!(!opts.timestamp_in_archive);
    }

    #[test]
    fn no_archive_disables_deletion() {
        let config = AppConfig {
            delete_originals: true,
            ..AppConfig::default()
        };
        let args = parse(&["--no-archive"]);
        let opts = args.options(&config, args.identity().unwrap());
        assert!(!opts.archive);
        assert!(!opts.delete_originals);
    }

    #[test]
    fn blank_case_is_rejected() {
        let args = Harness::parse_from(["fotobericht", "--case", " ", "--count", "7", "a.jpg"]).args;
        assert!(matches!(args.identity(), Err(FotoberichtError::Config(_))));
    }
}
