// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for individual job execution.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A job task began loading.
///
/// # Log Level
/// `debug!` - One per job, too chatty for info
pub struct JobStarted<'a> {
    pub path: &'a str,
    pub src: &'a dyn Display,
    pub type_name: &'a str,
}

impl Display for JobStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loading '{}' from {} as {}",
            self.path, self.src, self.type_name
        )
    }
}

impl StructuredLog for JobStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            path = self.path,
            src = %self.src,
            type_name = self.type_name,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "job",
            span_name = name,
            path = self.path,
            src = %self.src,
            type_name = self.type_name,
        )
    }
}

/// # Log Level
/// `debug!`
pub struct JobCompleted<'a> {
    pub path: &'a str,
    pub duration: std::time::Duration,
}

impl Display for JobCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Loaded '{}' in {:?}", self.path, self.duration)
    }
}

impl StructuredLog for JobCompleted<'_> {
    fn log(&self) {
        tracing::debug!(
            path = self.path,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "job_completed",
            span_name = name,
            path = self.path,
            duration = ?self.duration,
        )
    }
}

/// A job failed. Whether this settles the run is the orchestrator's call.
///
/// # Log Level
/// `warn!` - Job-scoped failure
///
/// # Example
/// ```
/// use getres::observability::messages::job::JobFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "Not Found");
/// let msg = JobFailed {
///     path: "foo",
///     src: &"/foo.txt",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct JobFailed<'a> {
    pub path: &'a str,
    pub src: &'a dyn Display,
    pub error: &'a dyn std::error::Error,
}

impl Display for JobFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Job '{}' ({}) failed: {}", self.path, self.src, self.error)
    }
}

impl StructuredLog for JobFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            path = self.path,
            src = %self.src,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "job_failed",
            span_name = name,
            path = self.path,
            src = %self.src,
            error = %self.error,
        )
    }
}

/// A synchronous parser panicked; the panic was contained.
///
/// # Log Level
/// `error!` - A bug in user code, but not fatal to the process
pub struct ParserPanicked<'a> {
    pub path: &'a str,
    pub message: &'a str,
}

impl Display for ParserPanicked<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Parser for '{}' panicked: {}", self.path, self.message)
    }
}

impl StructuredLog for ParserPanicked<'_> {
    fn log(&self) {
        tracing::error!(path = self.path, panic = self.message, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "parser_panicked",
            span_name = name,
            path = self.path,
            panic = self.message,
        )
    }
}
