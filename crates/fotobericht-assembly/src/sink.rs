// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output sinks — where processed copies of the source photos end up: nowhere,
// loose files in the output folder, or a zip archive next to the document.
//
// Nothing touches the disk until the first `store`. `abort` removes whatever
// was written; after `finish` it is a no-op. Zip archives are built under a
// temporary name and only renamed onto `<stem>.zip` by `finish`, so an
// aborted run never touches an archive already sitting there.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use fotobericht_core::ProcessingOptions;
use fotobericht_core::error::{FotoberichtError, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Destination for archived photo copies.
pub enum OutputSink {
    /// Archiving disabled.
    None,
    /// Loose files in a directory.
    Folder(FolderSink),
    /// Entries in a zip archive.
    Zip(ZipSink),
}

impl OutputSink {
    /// Sink for a run writing `document_path` with `options`. Zip archives
    /// are named after the document: `report.pdf` -> `report.zip`.
    pub fn for_options(options: &ProcessingOptions, document_path: &Path) -> Self {
        if !options.archive {
            return Self::None;
        }
        let dir = document_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        if options.archive_as_zip {
            let stem = document_path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "archive".to_string());
            Self::Zip(ZipSink::new(dir.join(format!("{stem}.zip"))))
        } else {
            Self::Folder(FolderSink::new(dir))
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Store `bytes` as `name`, remembering `source` as archived. Names that
    /// are already taken get a ` (2)`, ` (3)`, … suffix.
    pub fn store(&mut self, name: &str, bytes: &[u8], source: &Path) -> Result<()> {
        match self {
            Self::None => Ok(()),
            Self::Folder(sink) => sink.store(name, bytes, source),
            Self::Zip(sink) => sink.store(name, bytes, source),
        }
    }

    /// Flush and close. Returns the archive path for zip sinks that
    /// received at least one entry.
    pub fn finish(&mut self) -> Result<Option<PathBuf>> {
        match self {
            Self::None => Ok(None),
            Self::Folder(sink) => {
                sink.finished = true;
                info!(dir = %sink.dir.display(), files = sink.written.len(), "Copies saved");
                Ok(None)
            }
            Self::Zip(sink) => sink.finish(),
        }
    }

    /// Discard everything written so far.
    pub fn abort(&mut self) {
        match self {
            Self::None => {}
            Self::Folder(sink) => sink.abort(),
            Self::Zip(sink) => sink.abort(),
        }
    }

    /// Source files that have a copy in this sink.
    pub fn archived_sources(&self) -> &[PathBuf] {
        match self {
            Self::None => &[],
            Self::Folder(sink) => &sink.sources,
            Self::Zip(sink) => &sink.sources,
        }
    }
}

/// Copies written as loose files.
pub struct FolderSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
    sources: Vec<PathBuf>,
    names: HashSet<String>,
    finished: bool,
}

impl FolderSink {
    fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            written: Vec::new(),
            sources: Vec::new(),
            names: HashSet::new(),
            finished: false,
        }
    }

    fn store(&mut self, name: &str, bytes: &[u8], source: &Path) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| archive_error(&self.dir, e))?;
        let dir = self.dir.clone();
        let name = unique_name(name, |candidate| {
            self.names.contains(candidate) || dir.join(candidate).exists()
        });
        let path = self.dir.join(&name);
        std::fs::write(&path, bytes).map_err(|e| archive_error(&path, e))?;
        debug!(path = %path.display(), "Copy saved");
        self.names.insert(name);
        self.written.push(path);
        self.sources.push(source.to_path_buf());
        Ok(())
    }

    fn abort(&mut self) {
        if self.finished {
            return;
        }
        for path in self.written.drain(..) {
            if let Err(err) = std::fs::remove_file(&path) {
                warn!(path = %path.display(), error = %err, "could not remove copy");
            }
        }
        self.sources.clear();
        self.names.clear();
    }
}

/// Copies written into a zip archive.
pub struct ZipSink {
    path: PathBuf,
    writer: Option<ZipWriter<NamedTempFile>>,
    sources: Vec<PathBuf>,
    names: HashSet<String>,
    finished: bool,
}

impl ZipSink {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            writer: None,
            sources: Vec::new(),
            names: HashSet::new(),
            finished: false,
        }
    }

    /// Archive path (may not exist yet).
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&mut self) -> Result<&mut ZipWriter<NamedTempFile>> {
        if self.writer.is_none() {
            let dir = match self.path.parent() {
                Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
                _ => PathBuf::from("."),
            };
            std::fs::create_dir_all(&dir).map_err(|e| archive_error(&dir, e))?;
            let file = tempfile::Builder::new()
                .prefix(".fotobericht-")
                .suffix(".zip.part")
                .tempfile_in(&dir)
                .map_err(|e| archive_error(&dir, e))?;
            debug!(path = %file.path().display(), "Zip archive started");
            self.writer = Some(ZipWriter::new(file));
        }
        self.writer
            .as_mut()
            .ok_or_else(|| FotoberichtError::Archive("zip writer unavailable".into()))
    }

    fn store(&mut self, name: &str, bytes: &[u8], source: &Path) -> Result<()> {
        let name = unique_name(name, |candidate| self.names.contains(candidate));
        // Photos are already compressed.
        let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

        let writer = self.writer()?;
        writer
            .start_file(name.as_str(), options)
            .map_err(|e| FotoberichtError::Archive(e.to_string()))?;
        writer
            .write_all(bytes)
            .map_err(|e| FotoberichtError::Archive(e.to_string()))?;

        debug!(entry = %name, "Copy added to archive");
        self.names.insert(name);
        self.sources.push(source.to_path_buf());
        Ok(())
    }

    fn finish(&mut self) -> Result<Option<PathBuf>> {
        self.finished = true;
        match self.writer.take() {
            Some(writer) => {
                let file = writer
                    .finish()
                    .map_err(|e| FotoberichtError::Archive(e.to_string()))?;
                file.persist(&self.path)
                    .map_err(|e| archive_error(&self.path, e.error))?;
                info!(path = %self.path.display(), entries = self.names.len(), "Zip archive written");
                Ok(Some(self.path.clone()))
            }
            None => Ok(None),
        }
    }

    fn abort(&mut self) {
        if self.finished {
            return;
        }
        // Dropping the temporary file removes it.
        if let Some(writer) = self.writer.take() {
            match writer.finish() {
                Ok(file) => {
                    if let Err(err) = file.close() {
                        warn!(error = %err, "could not remove partial archive");
                    }
                }
                Err(err) => warn!(error = %err, "partial archive left unfinished"),
            }
        }
        self.sources.clear();
        self.names.clear();
    }
}

fn archive_error(path: &Path, err: std::io::Error) -> FotoberichtError {
    FotoberichtError::Archive(format!("{}: {err}", path.display()))
}

/// First of `name`, `stem (2).ext`, `stem (3).ext`, … for which `taken`
/// is false.
fn unique_name(name: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(name) {
        return name.to_string();
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (name, None),
    };
    (2..)
        .map(|n| match ext {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        })
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| name.to_string())
}
