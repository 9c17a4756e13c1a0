// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::errors::{ConfigError, FailurePolicy};
use crate::tree::{count_jobs, ResourceTree};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// A resource manifest.
///
/// Describes how resources are fetched and which resources to load. It is
/// typically read from a YAML file and handed to [`Getres::from_config`](crate::Getres::from_config).
///
/// # Fields
/// * `http` - Settings for the HTTP fetcher behind the built-in loaders (optional)
/// * `failure_policy` - What happens to in-flight jobs after the first failure (optional, defaults to detach)
/// * `resources` - The descriptor tree to load (optional, defaults to an empty tree)
///
/// # Example
/// ```yaml
/// http:
///   base_url: https://assets.example.com/
///   timeout_seconds: 10
///   credentials:
///     kind: bearer
///     token: abc
/// failure_policy: cancel
/// resources:
///   readme: { src: /README.md }
///   data:
///     users: { src: /users.json, type: json, credentials: true }
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub failure_policy: FailurePolicy,
    #[serde(default = "empty_resources")]
    pub resources: serde_json::Value,
}

fn empty_resources() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Config {
    /// The `resources` section as a descriptor tree
    pub fn resource_tree(&self) -> Result<ResourceTree, ConfigError> {
        ResourceTree::from_value(self.resources.clone())
            .map_err(|error| ConfigError::InvalidResources(error.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            failure_policy: FailurePolicy::default(),
            resources: empty_resources(),
        }
    }
}

/// HTTP fetcher settings.
///
/// # Fields
/// * `base_url` - Relative locations are joined to it; without it they are rejected (optional)
/// * `timeout_seconds` - Per-request timeout (optional, defaults to 30)
/// * `user_agent` - `User-Agent` header (optional, defaults to `getres/<version>`)
/// * `credentials` - Sent only for jobs with `credentials: true` (optional)
#[derive(Debug, Default, Deserialize)]
pub struct HttpConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub credentials: Option<CredentialsConfig>,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CredentialsConfig {
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        #[serde(default)]
        password: Option<String>,
    },
}

/// Parse a manifest from YAML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Load a manifest from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_config(&content)
}

/// Load a manifest and check that its resources form a valid descriptor tree.
///
/// Structural problems (a list or scalar where a job or container belongs,
/// a malformed `src`) are reported here instead of when the run starts.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    let tree = cfg.resource_tree()?;
    count_jobs(&tree).map_err(|error| ConfigError::InvalidResources(error.to_string()))?;
    Ok(cfg)
}
