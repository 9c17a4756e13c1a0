// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::errors::ResourceError;
use crate::traits::{Fetcher, Loader, ResourceRequest};

/// Built-in `json` loader: the body decoded as JSON.
pub struct JsonLoader {
    fetcher: Arc<dyn Fetcher>,
}

impl JsonLoader {
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl Loader for JsonLoader {
    async fn load(&self, request: &ResourceRequest) -> Result<Value, ResourceError> {
        let body = self.fetcher.get(&request.src, request.credentials).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::MockFetcher;
    use serde_json::json;

    fn request(src: &str) -> ResourceRequest {
        ResourceRequest {
            src: src.into(),
            type_name: "json".into(),
            credentials: false,
            options: Default::default(),
        }
    }

    #[tokio::test]
    async fn decodes_json_body() {
        let fetcher = MockFetcher::new().body("/zoe.json", r#"{ "hello": "world!" }"#);
        let loader = JsonLoader::new(Arc::new(fetcher));
        assert_eq!(
            loader.load(&request("/zoe.json")).await.unwrap(),
            json!({ "hello": "world!" })
        );
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let fetcher = MockFetcher::new().body("/zoe.json", r#"{ "hello: "world!" }"#);
        let loader = JsonLoader::new(Arc::new(fetcher));
        let error = loader.load(&request("/zoe.json")).await.unwrap_err();
        assert!(matches!(error, ResourceError::Json(_)));
        assert!(error.to_string().starts_with("Invalid JSON: "));
    }
}
