// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::errors::FetchError;

/// Byte-level retrieval used by the built-in loaders.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `src`, attaching stored credentials only when `credentials` is true.
    async fn get(&self, src: &str, credentials: bool) -> Result<Vec<u8>, FetchError>;
}
