// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Run orchestration: walk, fan out, fan in, settle once.
//!
//! The orchestrator owns every piece of mutable run state (the shape plan,
//! the processed count and the settlement itself) inside a single
//! `JoinSet` loop, so job outcomes are consumed strictly in completion
//! order without any locking.

use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use super::progress::{ProgressEvent, ProgressTracker};
use super::runner::{JobOutcome, JobRunner};
use crate::config::LoaderRegistry;
use crate::errors::{FailurePolicy, JobError, RunError};
use crate::observability::messages::engine::{InvalidTree, RunCompleted, RunFailed, RunStarted};
use crate::observability::messages::StructuredLog;
use crate::tree::{walk, ResourceTree, Source, WalkPlan};

#[derive(Debug, Clone)]
pub struct Orchestrator {
    registry: Arc<LoaderRegistry>,
    policy: FailurePolicy,
}

impl Orchestrator {
    pub fn new(registry: Arc<LoaderRegistry>, policy: FailurePolicy) -> Self {
        Self { registry, policy }
    }

    /// Load every job of `tree` and assemble the result tree.
    ///
    /// `on_progress` is called inline as the run advances. An invalid tree
    /// fails before any event is emitted.
    pub async fn run(
        &self,
        tree: ResourceTree,
        on_progress: &mut (dyn FnMut(&ProgressEvent) + Send),
    ) -> Result<Value, RunError> {
        if Handle::try_current().is_err() {
            return Err(RunError::RuntimeUnavailable);
        }

        let WalkPlan { jobs, mut shape } = walk(tree).map_err(|error| {
            if let RunError::InvalidNode { path } = &error {
                InvalidTree { path }.log();
            }
            error
        })?;
        let total = jobs.len();

        let span = {
            let started = RunStarted {
                total,
                policy: policy_name(self.policy),
            };
            started.log();
            started.span("run")
        };

        async move {
            let clock = Instant::now();
            let mut progress = ProgressTracker::new(total, on_progress);
            progress.started();

            if total > 0 {
                let token = CancellationToken::new();
                let mut placements: Vec<(Vec<String>, Source)> = Vec::with_capacity(total);
                let mut set: JoinSet<(usize, JobOutcome)> = JoinSet::new();
                for job in jobs {
                    placements.push((job.path.clone(), job.descriptor.src.clone()));
                    let runner =
                        JobRunner::new(job, self.registry.clone(), self.policy, token.clone());
                    set.spawn(runner.spawn());
                }

                while let Some(joined) = set.join_next().await {
                    let failure = match joined {
                        Ok((index, Ok(value))) => {
                            let (path, src) = &placements[index];
                            shape.fill(path, value);
                            progress.loaded(src.clone());
                            continue;
                        }
                        Ok((index, Err(source))) => {
                            RunError::Job(JobError::new(placements[index].1.clone(), source))
                        }
                        Err(e) => RunError::Internal(e.to_string()),
                    };

                    RunFailed {
                        processed: progress.processed(),
                        total,
                        in_flight: set.len(),
                        error: &failure,
                    }
                    .log();
                    self.release(&mut set, &token);
                    return Err(failure);
                }
            }

            progress.done();
            RunCompleted {
                total,
                duration: clock.elapsed(),
            }
            .log();
            Ok(shape.into_value())
        }
        .instrument(span)
        .await
    }

    /// Stop waiting on jobs still in flight after the run has settled.
    fn release<T: 'static>(&self, set: &mut JoinSet<T>, token: &CancellationToken) {
        match self.policy {
            FailurePolicy::Detach => set.detach_all(),
            FailurePolicy::Cancel => {
                token.cancel();
                set.abort_all();
            }
        }
    }
}

fn policy_name(policy: FailurePolicy) -> &'static str {
    match policy {
        FailurePolicy::Detach => "detach",
        FailurePolicy::Cancel => "cancel",
    }
}
