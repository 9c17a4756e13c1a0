// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod resource;
mod run;

pub use config::ConfigError;
pub use resource::{BoxError, FetchError, ResourceError};
pub use run::{FailurePolicy, JobError, RunError};
