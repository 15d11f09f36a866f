// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Observer interface through which a run reports to its caller.

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

/// Receives run notifications. Called from the thread running the
/// assembly; every method defaults to doing nothing.
pub trait AssemblyObserver: Send + Sync {
    /// Running count of images placed so far.
    fn progress(&self, _placed: usize) {}

    /// Human-readable phase description.
    fn status(&self, _message: &str) {}

    fn completed(&self, _document: &Path) {}

    fn failed(&self, _message: &str) {}

    fn cancelled(&self) {}
}

/// Ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl AssemblyObserver for NullObserver {}

/// A notification as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyEvent {
    Progress(usize),
    Status(String),
    Completed(PathBuf),
    Failed(String),
    Cancelled,
}

impl AssemblyEvent {
    /// Whether this is the last event of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed(_) | Self::Failed(_) | Self::Cancelled)
    }
}

/// Forwards notifications over an unbounded tokio channel, so the blocking
/// assembly thread never waits on the receiver.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<AssemblyEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<AssemblyEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: AssemblyEvent) {
        // A dropped receiver just means nobody is listening any more.
        let _ = self.tx.send(event);
    }
}

impl AssemblyObserver for ChannelObserver {
    fn progress(&self, placed: usize) {
        self.send(AssemblyEvent::Progress(placed));
    }

    fn status(&self, message: &str) {
        self.send(AssemblyEvent::Status(message.to_string()));
    }

    fn completed(&self, document: &Path) {
        self.send(AssemblyEvent::Completed(document.to_path_buf()));
    }

    fn failed(&self, message: &str) {
        self.send(AssemblyEvent::Failed(message.to_string()));
    }

    fn cancelled(&self) {
        self.send(AssemblyEvent::Cancelled);
    }
}
