// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run context — everything one assembly run owns on disk. Dropping the
// context removes the scratch directory and discards an unfinished sink, so
// cancelled and failed runs leave nothing behind.

use std::path::Path;

use fotobericht_core::RunId;
use fotobericht_core::error::Result;
use tempfile::TempDir;
use tracing::debug;

use crate::sink::OutputSink;

pub struct RunContext {
    id: RunId,
    work_dir: TempDir,
    sink: OutputSink,
}

impl RunContext {
    /// Create the scratch directory under `temp_root` (or the system temp
    /// directory) and take ownership of `sink`.
    pub fn new(temp_root: Option<&Path>, sink: OutputSink) -> Result<Self> {
        let id = RunId::new();
        let mut builder = tempfile::Builder::new();
        builder.prefix("fotobericht-");
        let work_dir = match temp_root {
            Some(root) => {
                std::fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };
        debug!(run = %id, work_dir = %work_dir.path().display(), "Run context created");
        Ok(Self { id, work_dir, sink })
    }

    pub fn id(&self) -> RunId {
        self.id
    }

    /// Scratch directory for working copies.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut OutputSink {
        &mut self.sink
    }
}

impl Drop for RunContext {
    fn drop(&mut self) {
        self.sink.abort();
        debug!(run = %self.id, "Run context released");
    }
}
