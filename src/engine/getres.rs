// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::orchestrator::Orchestrator;
use super::progress::{ProgressEvent, ProgressFn};
use crate::config::{Config, LoaderRegistry};
use crate::errors::{ConfigError, FailurePolicy, FetchError, ResourceError, RunError};
use crate::loaders::{loader_fn, HttpFetcher};
use crate::traits::{Fetcher, Loader, ResourceRequest};
use crate::tree::ResourceTree;

/// Receives the single outcome of a run started with [`Getres::start`].
pub type CompletionFn = Box<dyn FnOnce(Result<Value, RunError>) + Send>;

/// Asynchronous resource-tree loader.
///
/// Owns a loader registry (seeded with `text` and `json`) and the failure
/// policy. Each run takes a snapshot of the registry, so registering a loader
/// never affects a run already in flight.
///
/// ```no_run
/// use getres::{Getres, ResourceTree};
/// use serde_json::json;
///
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let getres = Getres::new()?;
/// let tree = ResourceTree::from_value(json!({
///     "readme": { "src": "https://example.com/README.md" },
///     "data": { "users": { "src": "https://example.com/users.json", "type": "json" } }
/// }))?;
/// let resources = getres.load(tree).await?;
/// println!("{}", resources["data"]["users"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Getres {
    registry: Arc<LoaderRegistry>,
    policy: FailurePolicy,
}

impl Getres {
    /// A loader backed by an HTTP fetcher with default settings
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new()?)))
    }

    /// A loader configured from the `http` and `failure_policy` sections of a manifest
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let fetcher = HttpFetcher::from_config(&config.http)?;
        Ok(Self::with_fetcher(Arc::new(fetcher)).with_failure_policy(config.failure_policy))
    }

    /// A loader whose built-in `text` and `json` types fetch through `fetcher`
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            registry: Arc::new(LoaderRegistry::with_fetcher(fetcher)),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    /// Add or replace the loader for `type_name`. Chainable.
    pub fn register(&mut self, type_name: impl Into<String>, loader: impl Loader + 'static) -> &mut Self {
        Arc::make_mut(&mut self.registry).register(type_name, Arc::new(loader));
        self
    }

    /// Register an async closure as the loader for `type_name`.
    pub fn register_fn<F, Fut>(&mut self, type_name: &str, f: F) -> &mut Self
    where
        F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, ResourceError>> + Send + 'static,
    {
        self.register(type_name, loader_fn(type_name, f))
    }

    /// Load `tree`, resolving to the result tree or the first error.
    pub async fn load(&self, tree: ResourceTree) -> Result<Value, RunError> {
        self.load_with_progress(tree, |_: &ProgressEvent| {}).await
    }

    pub async fn load_with_progress<F>(&self, tree: ResourceTree, mut on_progress: F) -> Result<Value, RunError>
    where
        F: FnMut(&ProgressEvent) + Send,
    {
        self.orchestrator().run(tree, &mut on_progress).await
    }

    /// Start a run in the background.
    ///
    /// `on_complete` is called exactly once with the run's outcome; the
    /// returned handle resolves to that same outcome. Fails immediately with
    /// [`RunError::RuntimeUnavailable`] when called outside a Tokio runtime.
    pub fn start(
        &self,
        tree: ResourceTree,
        on_complete: Option<CompletionFn>,
        on_progress: Option<ProgressFn>,
    ) -> Result<RunHandle, RunError> {
        let runtime = Handle::try_current().map_err(|_| RunError::RuntimeUnavailable)?;
        let orchestrator = self.orchestrator();

        let task = runtime.spawn(async move {
            let mut on_progress: ProgressFn =
                on_progress.unwrap_or_else(|| Box::new(|_: &ProgressEvent| {}));
            let outcome = orchestrator.run(tree, &mut *on_progress).await;
            if let Some(on_complete) = on_complete {
                on_complete(outcome.clone());
            }
            outcome
        });

        Ok(RunHandle { task })
    }

    fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(self.registry.clone(), self.policy)
    }
}

/// Future for a run started with [`Getres::start`].
///
/// Dropping the handle does not stop the run.
#[derive(Debug)]
pub struct RunHandle {
    task: JoinHandle<Result<Value, RunError>>,
}

impl RunHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the run. Jobs already spawned keep running detached.
    pub fn abort(&self) {
        self.task.abort();
    }
}

impl Future for RunHandle {
    type Output = Result<Value, RunError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.task).poll(cx).map(|joined| {
            joined.unwrap_or_else(|e| Err(RunError::Internal(e.to_string())))
        })
    }
}
