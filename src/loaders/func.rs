// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;

use crate::errors::ResourceError;
use crate::traits::{Loader, ResourceRequest};

/// A loader backed by an async closure.
pub struct FnLoader<F> {
    name: String,
    f: F,
}

/// Wrap an async closure as a [`Loader`].
///
/// ```
/// use getres::loaders::loader_fn;
/// use getres::traits::ResourceRequest;
/// use getres::ResourceError;
/// use serde_json::Value;
///
/// let twinsen = loader_fn("twinsen", |request: ResourceRequest| async move {
///     Ok::<_, ResourceError>(Value::String(format!("Twinsen {}", request.src)))
/// });
/// # let _ = twinsen;
/// ```
pub fn loader_fn<F, Fut>(name: impl Into<String>, f: F) -> FnLoader<F>
where
    F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ResourceError>> + Send + 'static,
{
    FnLoader {
        name: name.into(),
        f,
    }
}

#[async_trait]
impl<F, Fut> Loader for FnLoader<F>
where
    F: Fn(ResourceRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ResourceError>> + Send + 'static,
{
    async fn load(&self, request: &ResourceRequest) -> Result<Value, ResourceError> {
        (self.f)(request.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
