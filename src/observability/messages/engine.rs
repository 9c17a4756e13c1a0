// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for resource run lifecycle events.
//!
//! This module contains message types for logging events related to:
//! * Run start, after the tree has been walked
//! * Run completion and failure
//! * Structurally invalid descriptor trees

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Run started: the tree was valid and its jobs are about to be spawned.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use getres::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     total: 5,
///     policy: "detach",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted<'a> {
    pub total: usize,
    pub policy: &'a str,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting resource run: {} jobs, failure_policy={}",
            self.total, self.policy
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(total = self.total, policy = self.policy, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "resource_run",
            span_name = name,
            total = self.total,
            policy = self.policy,
        )
    }
}

/// Every job finished and the result tree is complete.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RunCompleted {
    pub total: usize,
    pub duration: std::time::Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resource run completed: {} jobs in {:?}",
            self.total, self.duration
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            total = self.total,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "run_completed",
            span_name = name,
            total = self.total,
            duration = ?self.duration,
        )
    }
}

/// The first job failure settled the run.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use getres::observability::messages::engine::RunFailed;
///
/// let error = std::io::Error::new(std::io::ErrorKind::Other, "Job error /foo.txt. Not Found");
/// let msg = RunFailed {
///     processed: 1,
///     total: 3,
///     in_flight: 1,
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct RunFailed<'a> {
    pub processed: usize,
    pub total: usize,
    /// Jobs still running when the run settled
    pub in_flight: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for RunFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resource run failed after {}/{} jobs ({} still in flight): {}",
            self.processed, self.total, self.in_flight, self.error
        )
    }
}

impl StructuredLog for RunFailed<'_> {
    fn log(&self) {
        tracing::error!(
            processed = self.processed,
            total = self.total,
            in_flight = self.in_flight,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "run_failed",
            span_name = name,
            processed = self.processed,
            total = self.total,
            error = %self.error,
        )
    }
}

/// The descriptor tree holds a node that is neither a job nor a container.
///
/// # Log Level
/// `error!` - The run never starts
pub struct InvalidTree<'a> {
    pub path: &'a str,
}

impl Display for InvalidTree<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Rejected descriptor tree: invalid node at '{}'", self.path)
    }
}

impl StructuredLog for InvalidTree<'_> {
    fn log(&self) {
        tracing::error!(path = self.path, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("invalid_tree", span_name = name, path = self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn messages_render() {
        assert_eq!(
            RunStarted { total: 2, policy: "cancel" }.to_string(),
            "Starting resource run: 2 jobs, failure_policy=cancel"
        );
        assert_eq!(
            RunCompleted {
                total: 2,
                duration: Duration::from_millis(5)
            }
            .to_string(),
            "Resource run completed: 2 jobs in 5ms"
        );
        assert_eq!(
            InvalidTree { path: "foo" }.to_string(),
            "Rejected descriptor tree: invalid node at 'foo'"
        );
    }
}
