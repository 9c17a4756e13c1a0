// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod getres;
pub mod orchestrator;
pub mod progress;
mod runner;


pub use getres::{CompletionFn, Getres, RunHandle};
pub use orchestrator::Orchestrator;
pub use progress::{ProgressEvent, ProgressFn, ProgressKind};
