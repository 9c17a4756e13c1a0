// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! HTTP fetch backend for the built-in loaders.

use async_trait::async_trait;
use tracing::{debug, trace};
use url::{ParseError, Url};

use crate::config::{CredentialsConfig, HttpConfig};
use crate::errors::FetchError;
use crate::observability::messages::loader::{HttpRequestFailed, HttpStatusRejected};
use crate::observability::messages::StructuredLog;
use crate::traits::Fetcher;

/// [`Fetcher`] over an async `reqwest` client.
///
/// Relative locations are joined to the configured base URL. Stored
/// credentials are attached only to requests that ask for them.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Option<Url>,
    credentials: Option<CredentialsConfig>,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::from_config(&HttpConfig::default())
    }

    pub fn from_config(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        let base_url = config
            .base_url
            .as_deref()
            .map(|base| {
                Url::parse(base).map_err(|e| FetchError::InvalidLocation {
                    location: base.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            client,
            base_url,
            credentials: config.credentials.clone(),
        })
    }

    /// The absolute URL for `src`
    pub fn resolve(&self, src: &str) -> Result<Url, FetchError> {
        let invalid = |e: ParseError| FetchError::InvalidLocation {
            location: src.to_string(),
            reason: e.to_string(),
        };
        match Url::parse(src) {
            Ok(url) => Ok(url),
            Err(ParseError::RelativeUrlWithoutBase) => match &self.base_url {
                Some(base) => base.join(src).map_err(invalid),
                None => Err(invalid(ParseError::RelativeUrlWithoutBase)),
            },
            Err(e) => Err(invalid(e)),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, src: &str, credentials: bool) -> Result<Vec<u8>, FetchError> {
        let url = self.resolve(src)?;
        trace!(url = %url, credentials, "HTTP GET request starting");

        let mut request = self.client.get(url.clone());
        if credentials {
            request = match &self.credentials {
                Some(CredentialsConfig::Bearer { token }) => request.bearer_auth(token),
                Some(CredentialsConfig::Basic { username, password }) => {
                    request.basic_auth(username, password.as_deref())
                }
                None => request,
            };
        }

        let response = request.send().await.map_err(|e| {
            HttpRequestFailed {
                url: url.as_str(),
                error: &e,
            }
            .log();
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status();
        debug!(url = %url, status = status.as_u16(), "HTTP response received");
        if !status.is_success() {
            HttpStatusRejected {
                url: url.as_str(),
                status: status.as_u16(),
            }
            .log();
            return Err(FetchError::status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        trace!(url = %url, bytes = body.len(), "HTTP response body read");
        Ok(body.to_vec())
    }
}
