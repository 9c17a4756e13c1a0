// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::errors::ResourceError;
use crate::traits::{Fetcher, Loader, ResourceRequest};

/// Built-in `text` loader: the raw body as a UTF-8 string.
pub struct TextLoader {
    fetcher: Arc<dyn Fetcher>,
}

impl TextLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Loader for TextLoader {
    async fn load(&self, request: &ResourceRequest) -> Result<Value, ResourceError> {
        let body = self.fetcher.get(&request.src, request.credentials).await?;
        Ok(Value::String(String::from_utf8(body)?))
    }

    fn name(&self) -> &str {
        "text"
    }
}
