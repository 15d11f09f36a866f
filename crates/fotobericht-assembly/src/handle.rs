// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background-run handle: cancellation token, observable state, and the join
// handle of the blocking task.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use fotobericht_core::{RunOutcome, RunState};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Cooperative cancellation flag, checked by the driver between pages.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A run executing on tokio's blocking pool.
pub struct AssemblyHandle {
    cancel: CancelToken,
    state: Arc<Mutex<RunState>>,
    task: JoinHandle<RunOutcome>,
}

impl AssemblyHandle {
    pub(crate) fn new(
        cancel: CancelToken,
        state: Arc<Mutex<RunState>>,
        task: JoinHandle<RunOutcome>,
    ) -> Self {
        Self {
            cancel,
            state,
            task,
        }
    }

    /// Ask the run to stop at the next page boundary.
    pub fn cancel(&self) {
        info!("Cancellation requested");
        self.cancel.cancel();
    }

    /// A clone of the token, e.g. for a Ctrl-C handler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunState {
        *self.state.lock().expect("state lock poisoned")
    }

    /// Wait for the run to end. A panicked task is reported as a failure.
    pub async fn wait(self) -> RunOutcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(error = %err, "assembly task did not complete");
                *self.state.lock().expect("state lock poisoned") = RunState::Failed;
                RunOutcome::Failed {
                    message: format!("assembly task did not complete: {err}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_clones_share_the_flag() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(other.is_cancelled());
    }
}
