// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors scoped to a single resource job.
//!
//! These are the *unwrapped* errors: a job's own callback receives them as-is,
//! while the run-level completion sees them wrapped in a [`JobError`](super::JobError).

use thiserror::Error;

/// Boxed error type accepted from user parsers and custom loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised by a [`Fetcher`](crate::traits::Fetcher) while retrieving raw bytes.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status.
    ///
    /// Displays as the status reason alone (`Not Found`) so that the
    /// wrapped job error reads `Job error /foo.txt. Not Found`.
    #[error("{reason}")]
    Status { status: u16, reason: String },

    /// The location could not be turned into a request URL
    #[error("Invalid location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },

    /// The HTTP client itself could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl FetchError {
    /// Build a status error using the canonical reason phrase for `status`.
    pub fn status(status: u16) -> Self {
        let reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Request failed")
            .to_string();
        FetchError::Status { status, reason }
    }
}

/// Everything that can make one resource job fail.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No loader is registered under the job's type name
    #[error("Invalid type: {0}")]
    InvalidType(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UTF-8 text: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A custom loader failed; its message is kept verbatim
    #[error("{0}")]
    Loader(BoxError),

    /// A parser returned (or completed with) an error; its message is kept verbatim
    #[error("{0}")]
    Parser(BoxError),

    /// A parser panicked instead of returning an error; the panic message is
    /// shown verbatim, like a returned error
    #[error("{0}")]
    ParserPanicked(String),

    /// The task running the job died before producing an outcome
    #[error("Job task aborted: {0}")]
    Aborted(String),

    #[error("Job cancelled")]
    Cancelled,
}

impl ResourceError {
    /// Convenience for custom loaders: wrap any error or message as a loader failure.
    pub fn loader(error: impl Into<BoxError>) -> Self {
        ResourceError::Loader(error.into())
    }

    /// Convenience for parsers: wrap any error or message as a parser failure.
    pub fn parser(error: impl Into<BoxError>) -> Self {
        ResourceError::Parser(error.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_displays_reason_only() {
        let error = FetchError::status(404);
        assert_eq!(error.to_string(), "Not Found");
        assert!(matches!(error, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn status_error_without_canonical_reason() {
        assert_eq!(FetchError::status(599).to_string(), "Request failed");
    }

    #[test]
    fn fetch_errors_are_transparent() {
        let error = ResourceError::from(FetchError::Transport("connection refused".into()));
        assert_eq!(error.to_string(), "connection refused");
    }

    #[test]
    fn parser_and_loader_messages_are_verbatim() {
        assert_eq!(ResourceError::parser("Parse this!").to_string(), "Parse this!");
        assert_eq!(ResourceError::loader("no disk").to_string(), "no disk");
        assert_eq!(
            ResourceError::ParserPanicked("Parse this!".into()).to_string(),
            "Parse this!"
        );
        assert_eq!(
            ResourceError::InvalidType("invalid".into()).to_string(),
            "Invalid type: invalid"
        );
    }

    #[test]
    fn json_errors_include_the_parse_failure() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{ \"hello: \"world!\" }")
            .expect_err("malformed json must not parse");
        let expected = parse_error.to_string();
        let error = ResourceError::from(parse_error);
        assert_eq!(error.to_string(), format!("Invalid JSON: {}", expected));
    }
}
