// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// fotobericht-assembly — Runs a document assembly: output sinks, run-scoped
// scratch space, observer notifications, and the background handle.

pub mod context;
pub mod driver;
pub mod handle;
pub mod observer;
pub mod sink;

pub use context::RunContext;
pub use driver::{AssemblyRequest, DocumentAssembler, STATUS_SAVING};
pub use handle::{AssemblyHandle, CancelToken};
pub use observer::{AssemblyEvent, AssemblyObserver, ChannelObserver, NullObserver};
pub use sink::OutputSink;
