// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // manifest + loader registry
pub mod engine;     // orchestration and entry point
pub mod errors;     // error handling
pub mod loaders;    // built-in loaders and the HTTP fetcher
pub mod observability;
pub mod traits;     // loader and fetcher abstractions
pub mod tree;       // descriptor trees, parsers, walking

pub use engine::{CompletionFn, Getres, ProgressEvent, ProgressFn, ProgressKind, RunHandle};
pub use errors::{FailurePolicy, JobError, ResourceError, RunError};
pub use tree::{Done, JobDescriptor, Node, Parser, ResourceTree, Source};
