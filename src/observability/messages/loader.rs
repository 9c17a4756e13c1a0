// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for loader registration and HTTP fetching.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A loader was added to a registry.
///
/// # Log Level
/// `debug!` - Setup detail
pub struct LoaderRegistered<'a> {
    pub type_name: &'a str,
    pub loader: &'a str,
}

impl Display for LoaderRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered loader '{}' for type '{}'",
            self.loader, self.type_name
        )
    }
}

impl StructuredLog for LoaderRegistered<'_> {
    fn log(&self) {
        tracing::debug!(type_name = self.type_name, loader = self.loader, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "loader_registered",
            span_name = name,
            type_name = self.type_name,
            loader = self.loader,
        )
    }
}

/// A registration replaced one of the built-in loaders.
///
/// # Log Level
/// `warn!` - Allowed, but every job of that type changes behavior
///
/// # Example
/// ```
/// use getres::observability::messages::loader::BuiltinLoaderShadowed;
///
/// let msg = BuiltinLoaderShadowed {
///     type_name: "json",
///     loader: "yaml_as_json",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct BuiltinLoaderShadowed<'a> {
    pub type_name: &'a str,
    pub loader: &'a str,
}

impl Display for BuiltinLoaderShadowed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built-in loader '{}' replaced by '{}'",
            self.type_name, self.loader
        )
    }
}

impl StructuredLog for BuiltinLoaderShadowed<'_> {
    fn log(&self) {
        tracing::warn!(type_name = self.type_name, loader = self.loader, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "builtin_loader_shadowed",
            span_name = name,
            type_name = self.type_name,
            loader = self.loader,
        )
    }
}

/// The request never produced a response.
///
/// # Log Level
/// `warn!` - Job-scoped transport failure
pub struct HttpRequestFailed<'a> {
    pub url: &'a str,
    pub error: &'a reqwest::Error,
}

impl Display for HttpRequestFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "HTTP request to {} failed: {}", self.url, self.error)
    }
}

impl StructuredLog for HttpRequestFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            url = self.url,
            error = %self.error,
            is_connect = self.error.is_connect(),
            is_timeout = self.error.is_timeout(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "http_request_failed",
            span_name = name,
            url = self.url,
            error = %self.error,
        )
    }
}

/// # Log Level
/// `warn!` - Job-scoped failure
pub struct HttpStatusRejected<'a> {
    pub url: &'a str,
    pub status: u16,
}

impl Display for HttpStatusRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "HTTP {} from {}", self.status, self.url)
    }
}

impl StructuredLog for HttpStatusRejected<'_> {
    fn log(&self) {
        tracing::warn!(url = self.url, status = self.status, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "http_status_rejected",
            span_name = name,
            url = self.url,
            status = self.status,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_render() {
        assert_eq!(
            LoaderRegistered {
                type_name: "twinsen",
                loader: "twinsen"
            }
            .to_string(),
            "Registered loader 'twinsen' for type 'twinsen'"
        );
        assert_eq!(
            HttpStatusRejected {
                url: "https://example.com/foo.txt",
                status: 404
            }
            .to_string(),
            "HTTP 404 from https://example.com/foo.txt"
        );
    }
}
