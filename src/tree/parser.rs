// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-job post-processing of decoded values.

use serde_json::Value;
use std::any::Any;
use std::fmt::{self, Debug, Formatter};
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::errors::{BoxError, ResourceError};

/// Future returned by an asynchronous parser.
pub type ParseFuture = Pin<Box<dyn Future<Output = Result<Value, BoxError>> + Send>>;

/// Observer of a single job's outcome.
pub type JobCallback = Arc<dyn Fn(Result<&Value, &ResourceError>) + Send + Sync>;

/// A user transformation applied to a job's decoded value.
///
/// The variant is chosen explicitly when the parser is built; there is no
/// inspection of the closure's shape.
#[derive(Clone)]
pub enum Parser {
    Sync(Arc<dyn Fn(Value) -> Result<Value, BoxError> + Send + Sync>),
    Async(Arc<dyn Fn(Value) -> ParseFuture + Send + Sync>),
}

impl Parser {
    /// A parser that returns its result directly.
    ///
    /// A panic inside `f` is contained and reported as
    /// [`ResourceError::ParserPanicked`].
    pub fn from_fn<F, E>(f: F) -> Self
    where
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Parser::Sync(Arc::new(move |value| f(value).map_err(Into::into)))
    }

    pub fn from_async_fn<F, Fut, E>(f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        Parser::Async(Arc::new(move |value| {
            let future = f(value);
            Box::pin(async move { future.await.map_err(Into::into) })
        }))
    }

    /// A parser that reports its result through a [`Done`] handle, possibly
    /// from another task. Dropping the handle without a result fails the job.
    ///
    /// ```
    /// use getres::Parser;
    ///
    /// let upper = Parser::from_callback(|value, done| match value.as_str() {
    ///     Some(text) => done.ok(text.to_uppercase().into()),
    ///     None => done.err("expected text"),
    /// });
    /// # let _ = upper;
    /// ```
    pub fn from_callback<F>(f: F) -> Self
    where
        F: Fn(Value, Done) + Send + Sync + 'static,
    {
        Parser::Async(Arc::new(move |value| {
            let (tx, rx) = oneshot::channel();
            f(value, Done { tx });
            Box::pin(async move {
                rx.await
                    .unwrap_or_else(|_| Err("parser finished without a result".into()))
            })
        }))
    }

    pub(crate) async fn apply(&self, value: Value) -> Result<Value, ResourceError> {
        match self {
            Parser::Sync(f) => match catch_unwind(AssertUnwindSafe(|| f(value))) {
                Ok(result) => result.map_err(ResourceError::Parser),
                Err(payload) => Err(ResourceError::ParserPanicked(panic_message(payload.as_ref()))),
            },
            Parser::Async(f) => {
                let future = catch_unwind(AssertUnwindSafe(|| f(value)))
                    .map_err(|payload| ResourceError::ParserPanicked(panic_message(payload.as_ref())))?;
                future.await.map_err(ResourceError::Parser)
            }
        }
    }
}

impl Debug for Parser {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Parser::Sync(_) => write!(f, "Parser::Sync"),
            Parser::Async(_) => write!(f, "Parser::Async"),
        }
    }
}

/// Completion handle for [`Parser::from_callback`].
pub struct Done {
    tx: oneshot::Sender<Result<Value, BoxError>>,
}

impl Done {
    pub fn send(self, result: Result<Value, BoxError>) {
        // the job may already be gone (cancelled run)
        let _ = self.tx.send(result);
    }

    pub fn ok(self, value: Value) {
        self.send(Ok(value));
    }

    pub fn err(self, error: impl Into<BoxError>) {
        self.send(Err(error.into()));
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
