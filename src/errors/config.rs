// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::FetchError;

/// Errors that can occur while loading a manifest or building a runtime from it
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The `resources` section is not a valid descriptor tree
    #[error("Invalid resources: {0}")]
    InvalidResources(String),

    #[error(transparent)]
    Http(#[from] FetchError),
}
