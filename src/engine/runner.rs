// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Execution of a single resource job.

use futures::FutureExt;
use serde_json::{Map, Value};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::config::LoaderRegistry;
use crate::errors::{FailurePolicy, ResourceError};
use crate::observability::messages::job::{JobCompleted, JobFailed, JobStarted, ParserPanicked};
use crate::observability::messages::StructuredLog;
use crate::traits::Loader;
use crate::tree::{panic_message, JobEntry, Source};

/// What the orchestrator receives for one job. The error is shared so it
/// can be wrapped into the run error without losing the original.
pub(crate) type JobOutcome = Result<Value, Arc<ResourceError>>;

pub(crate) struct JobRunner {
    job: JobEntry,
    registry: Arc<LoaderRegistry>,
    policy: FailurePolicy,
    token: CancellationToken,
}

impl JobRunner {
    pub(crate) fn new(
        job: JobEntry,
        registry: Arc<LoaderRegistry>,
        policy: FailurePolicy,
        token: CancellationToken,
    ) -> Self {
        Self {
            job,
            registry,
            policy,
            token,
        }
    }

    /// Start the job on the runtime now and return a monitor for its outcome.
    ///
    /// The monitor resolves to the job's discovery index together with the
    /// outcome; a job task that still panicked (in its callback) resolves to
    /// [`ResourceError::Aborted`].
    pub(crate) fn spawn(self) -> impl Future<Output = (usize, JobOutcome)> + Send + 'static {
        let index = self.job.index;
        let task = tokio::spawn(self.run());
        async move {
            match task.await {
                Ok(outcome) => (index, outcome),
                Err(e) => (index, Err(Arc::new(ResourceError::Aborted(e.to_string())))),
            }
        }
    }

    async fn run(self) -> JobOutcome {
        let path = self.job.dotted_path();
        let descriptor = &self.job.descriptor;
        let span = {
            let started = JobStarted {
                path: &path,
                src: &descriptor.src,
                type_name: descriptor.type_name(),
            };
            started.log();
            started.span("job")
        };
        let clock = Instant::now();

        let outcome = async {
            tokio::select! {
                _ = self.token.cancelled() => Err(ResourceError::Cancelled),
                outcome = self.execute_and_notify() => outcome,
            }
        }
        .instrument(span)
        .await;

        match &outcome {
            Ok(_) => JobCompleted {
                path: &path,
                duration: clock.elapsed(),
            }
            .log(),
            Err(ResourceError::Cancelled) => {}
            Err(ResourceError::ParserPanicked(message)) => ParserPanicked {
                path: &path,
                message,
            }
            .log(),
            Err(error) => JobFailed {
                path: &path,
                src: &descriptor.src,
                error,
            }
            .log(),
        }

        outcome.map_err(Arc::new)
    }

    /// A panic while loading or parsing is this job's outcome, so the
    /// callback still observes it.
    async fn execute_and_notify(&self) -> Result<Value, ResourceError> {
        let outcome = AssertUnwindSafe(self.execute())
            .catch_unwind()
            .await
            .unwrap_or_else(|payload| Err(ResourceError::Aborted(panic_message(payload.as_ref()))));
        if let Some(callback) = &self.job.descriptor.callback {
            callback(outcome.as_ref());
        }
        outcome
    }

    async fn execute(&self) -> Result<Value, ResourceError> {
        let descriptor = &self.job.descriptor;
        let loader = self.registry.resolve(descriptor.type_name())?;

        let value = match &descriptor.src {
            Source::Single(location) => loader.load(&descriptor.request_for(location)).await?,
            Source::List(locations) => {
                Value::Array(self.fan_out(&loader, locations.iter().map(String::as_str)).await?)
            }
            Source::Map(entries) => {
                let values = self
                    .fan_out(&loader, entries.iter().map(|(_, location)| location.as_str()))
                    .await?;
                let object: Map<String, Value> = entries
                    .iter()
                    .map(|(key, _)| key.clone())
                    .zip(values)
                    .collect();
                Value::Object(object)
            }
        };

        match &descriptor.parser {
            Some(parser) => parser.apply(value).await,
            None => Ok(value),
        }
    }

    /// Load every location concurrently; results keep input order, the first
    /// failure by completion time wins.
    async fn fan_out<'a>(
        &self,
        loader: &Arc<dyn Loader>,
        locations: impl Iterator<Item = &'a str>,
    ) -> Result<Vec<Value>, ResourceError> {
        let mut set = JoinSet::new();
        let mut slots: Vec<Option<Value>> = Vec::new();
        for (slot, location) in locations.enumerate() {
            let loader = loader.clone();
            let request = self.job.descriptor.request_for(location);
            set.spawn(async move { (slot, loader.load(&request).await) });
            slots.push(None);
        }

        while let Some(joined) = set.join_next().await {
            let failure = match joined {
                Ok((slot, Ok(value))) => {
                    slots[slot] = Some(value);
                    continue;
                }
                Ok((_, Err(error))) => error,
                Err(e) => ResourceError::Aborted(e.to_string()),
            };
            match self.policy {
                FailurePolicy::Detach => set.detach_all(),
                FailurePolicy::Cancel => set.abort_all(),
            }
            return Err(failure);
        }

        Ok(slots.into_iter().map(Option::unwrap_or_default).collect())
    }
}
