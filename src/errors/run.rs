// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use super::ResourceError;
use crate::tree::Source;

/// A job failure as seen by the run: the original error plus the job's source.
#[derive(Debug, Clone, Error)]
#[error("Job error {src}. {source}")]
pub struct JobError {
    pub src: Source,
    pub source: Arc<ResourceError>,
}

impl JobError {
    pub fn new(src: Source, source: Arc<ResourceError>) -> Self {
        Self { src, source }
    }

    /// The unwrapped error that made the job fail
    pub fn original(&self) -> &ResourceError {
        &self.source
    }
}

/// The single terminal error of a resource run.
///
/// `Clone` so that the callback adapter and the [`RunHandle`](crate::engine::RunHandle)
/// observe the same settlement.
#[derive(Debug, Clone, Error)]
pub enum RunError {
    /// The descriptor tree holds a node that is neither a job nor a container
    #[error("Invalid node: {path}")]
    InvalidNode { path: String },

    /// The first job to fail, by completion time
    #[error(transparent)]
    Job(#[from] JobError),

    /// No async runtime to drive the run
    #[error("Async runtime is not available in this environment")]
    RuntimeUnavailable,

    /// The task driving the run was lost
    #[error("Run task failed: {0}")]
    Internal(String),
}

/// What happens to jobs still in flight once a run has failed.
///
/// Either way their outcomes are discarded; the run has already settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Let in-flight jobs run to completion (their job callbacks still fire)
    #[default]
    Detach,
    /// Cooperatively cancel in-flight jobs
    Cancel,
}
