// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document assembly driver.
//
// Classifies and groups the input photos, then for each page group
// normalizes the photos, stores archive copies, and lays out the page. The
// cancel flag is checked between groups. Only a completed run leaves files
// behind: the PDF, the finished sink, and (if requested) the deletion of
// archived originals.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fotobericht_core::error::{FotoberichtError, Result};
use fotobericht_core::{ProcessingOptions, RunOutcome, RunState};
use fotobericht_document::image::NormalizedImage;
use fotobericht_document::{
    CaptionFont, CaptionScheme, Normalizer, PageImage, ReportWriter, classify_all, group_pages,
};
use tracing::{error, info, instrument, warn};

use crate::context::RunContext;
use crate::handle::{AssemblyHandle, CancelToken};
use crate::observer::AssemblyObserver;
use crate::sink::OutputSink;

/// Status text emitted before the PDF is written.
pub const STATUS_SAVING: &str = "Saving document";

/// Status text emitted while the photos are being inspected.
pub const STATUS_CLASSIFYING: &str = "Checking photo orientation";

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct AssemblyRequest {
    /// Photos in document order.
    pub image_paths: Vec<PathBuf>,
    pub options: ProcessingOptions,
    /// PDF to write. Its folder also receives archived copies.
    pub document_path: PathBuf,
    /// Letterhead image printed at the top of every page.
    pub letterhead_path: PathBuf,
    /// Parent of the scratch directory; the system temp dir if `None`.
    pub temp_root: Option<PathBuf>,
}

impl AssemblyRequest {
    pub fn new(
        image_paths: Vec<PathBuf>,
        options: ProcessingOptions,
        document_path: impl Into<PathBuf>,
        letterhead_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            image_paths,
            options,
            document_path: document_path.into(),
            letterhead_path: letterhead_path.into(),
            temp_root: None,
        }
    }

    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = Some(temp_root.into());
        self
    }
}

/// Runs one assembly. `Idle -> Running -> {Cancelled, Completed, Failed}`.
pub struct DocumentAssembler {
    request: AssemblyRequest,
    state: Arc<Mutex<RunState>>,
}

impl DocumentAssembler {
    pub fn new(request: AssemblyRequest) -> Self {
        Self {
            request,
            state: Arc::new(Mutex::new(RunState::Idle)),
        }
    }

    pub fn state(&self) -> RunState {
        *self.state.lock().expect("state lock poisoned")
    }

    fn set_state(&self, state: RunState) {
        *self.state.lock().expect("state lock poisoned") = state;
    }

    /// Run on tokio's blocking pool. Must be called within a tokio runtime.
    pub fn spawn(self, observer: Arc<dyn AssemblyObserver>) -> AssemblyHandle {
        let cancel = CancelToken::new();
        let token = cancel.clone();
        let state = Arc::clone(&self.state);
        let task = tokio::task::spawn_blocking(move || self.run(observer.as_ref(), &token));
        AssemblyHandle::new(cancel, state, task)
    }

    /// Run on the current thread, reporting exactly one terminal notification.
    #[instrument(skip_all, fields(images = self.request.image_paths.len(), document = %self.request.document_path.display()))]
    pub fn run(self, observer: &dyn AssemblyObserver, cancel: &CancelToken) -> RunOutcome {
        self.set_state(RunState::Running);

        let outcome = match self.assemble(observer, cancel) {
            Ok(Some(document)) => {
                info!(document = %document.display(), "Assembly completed");
                observer.completed(&document);
                RunOutcome::Completed { document }
            }
            Ok(None) => {
                info!("Assembly cancelled");
                observer.cancelled();
                RunOutcome::Cancelled
            }
            Err(err) => {
                let message = err.to_string();
                error!(error = %message, "Assembly failed");
                observer.failed(&message);
                RunOutcome::Failed { message }
            }
        };

        self.set_state(outcome.state());
        outcome
    }

    /// `Ok(None)` means cancelled.
    fn assemble(
        &self,
        observer: &dyn AssemblyObserver,
        cancel: &CancelToken,
    ) -> Result<Option<PathBuf>> {
        let request = &self.request;
        let options = &request.options;
        if request.image_paths.is_empty() {
            return Err(FotoberichtError::NoImages);
        }
        last_photo_number(options.start_number, request.image_paths.len())?;

        let title = request
            .document_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Fotobericht".to_string());
        let mut writer = ReportWriter::new(&title, &request.letterhead_path)?;
        let font = CaptionFont::load()?;

        if let Some(dir) = request.document_path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        let sink = OutputSink::for_options(options, &request.document_path);
        let mut ctx = RunContext::new(request.temp_root.as_deref(), sink)?;
        let work_dir = ctx.work_dir().to_path_buf();
        info!(run = %ctx.id(), "Assembly started");

        observer.status(STATUS_CLASSIFYING);
        let groups = group_pages(classify_all(&request.image_paths));
        let captions = CaptionScheme::new(options, request.image_paths.len());
        let normalizer = Normalizer::new(options, &font, &work_dir);

        let mut photo_number = options.start_number;
        let mut placed = 0usize;

        for group in &groups {
            if cancel.is_cancelled() {
                return Ok(None);
            }

            let mut page: Vec<(NormalizedImage, String)> = Vec::with_capacity(group.len());
            for image in group.images() {
                let caption = captions.caption(photo_number, &image.path);
                let archive_name = captions.archive_name(photo_number, &image.path);
                let normalized = normalizer.normalize(&image.path, photo_number, &archive_name);
                if let Some(copy) = &normalized.archive_copy {
                    ctx.sink_mut()
                        .store(&copy.file_name, &copy.bytes, &image.path)?;
                }
                page.push((normalized, caption));
                // Checked up front; only the step past the last photo saturates.
                photo_number = photo_number.saturating_add(1);
            }

            let entries: Vec<PageImage<'_>> = page
                .iter()
                .map(|(normalized, caption)| PageImage {
                    path: &normalized.document_path,
                    caption: caption.as_str(),
                })
                .collect();
            writer.add_page(&entries)?;

            placed += group.len();
            observer.progress(placed);
        }

        if cancel.is_cancelled() {
            return Ok(None);
        }

        observer.status(STATUS_SAVING);
        if let Err(err) = writer.save(&request.document_path) {
            remove_quietly(&request.document_path);
            return Err(err);
        }
        if let Err(err) = ctx.sink_mut().finish() {
            remove_quietly(&request.document_path);
            return Err(err);
        }

        if options.delete_originals {
            delete_originals(ctx.sink().archived_sources());
        }

        Ok(Some(request.document_path.clone()))
    }
}

/// Number of the last photo, or a config error if it does not fit in `u32`.
fn last_photo_number(start: u32, count: usize) -> Result<u32> {
    u32::try_from(count.saturating_sub(1))
        .ok()
        .and_then(|offset| start.checked_add(offset))
        .ok_or_else(|| {
            FotoberichtError::Config(format!("start number {start} is too large for {count} photos"))
        })
}

/// Remove source files that were archived. Failures are logged only; the
/// document and archive already exist at this point.
fn delete_originals(sources: &[PathBuf]) {
    for source in sources {
        match std::fs::remove_file(source) {
            Ok(()) => info!(path = %source.display(), "Original deleted"),
            Err(err) => warn!(path = %source.display(), error = %err, "could not delete original"),
        }
    }
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "could not remove partial document");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::NullObserver;

    #[test]
    fn empty_input_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("out").join("r.pdf");
        let request = AssemblyRequest::new(
            Vec::new(),
            ProcessingOptions::default(),
            &doc,
            dir.path().join("head.png"),
        );
        let assembler = DocumentAssembler::new(request);
        assert_eq!(assembler.state(), RunState::Idle);

        let outcome = assembler.run(&NullObserver, &CancelToken::new());
        assert_eq!(
            outcome,
            RunOutcome::Failed {
                message: FotoberichtError::NoImages.to_string()
            }
        );
        assert!(!doc.exists());
    }

    #[test]
    fn photo_numbers_must_fit() {
        assert_eq!(last_photo_number(5, 12).unwrap(), 16);
        assert_eq!(last_photo_number(u32::MAX, 1).unwrap(), u32::MAX);
        assert!(matches!(
            last_photo_number(u32::MAX, 2),
            Err(FotoberichtError::Config(_))
        ));
    }

    #[test]
    fn oversized_start_number_fails_without_output() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("out").join("r.pdf");
        let options = ProcessingOptions {
            start_number: u32::MAX,
            ..ProcessingOptions::default()
        };
        let request = AssemblyRequest::new(
            vec![dir.path().join("a.jpg"), dir.path().join("b.jpg")],
            options,
            &doc,
            dir.path().join("head.png"),
        );

        let outcome = DocumentAssembler::new(request).run(&NullObserver, &CancelToken::new());
        assert!(matches!(
            outcome,
            RunOutcome::Failed { ref message } if message.contains("too large")
        ));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn missing_letterhead_fails_before_touching_output() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("out").join("r.pdf");
        let request = AssemblyRequest::new(
            vec![dir.path().join("a.jpg")],
            ProcessingOptions::default(),
            &doc,
            dir.path().join("missing.png"),
        );

        let outcome = DocumentAssembler::new(request).run(&NullObserver, &CancelToken::new());
        assert_eq!(outcome.state(), RunState::Failed);
        assert!(!dir.path().join("out").exists());
    }
}
