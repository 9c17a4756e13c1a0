// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::ResourceError;

/// One leaf load: a single location plus the job's loader settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    pub src: String,
    pub type_name: String,
    pub credentials: bool,
    /// Extra descriptor keys, untouched
    pub options: Map<String, Value>,
}

/// Turns a location into a decoded value.
///
/// Loaders are registered by type name and may be called concurrently for
/// many locations of the same run.
#[async_trait]
pub trait Loader: Send + Sync {
    async fn load(&self, request: &ResourceRequest) -> Result<Value, ResourceError>;

    fn name(&self) -> &str;
}
