// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Organization
//!
//! * `engine` - run lifecycle events
//! * `job` - job execution events
//! * `loader` - registry and fetch events

pub mod engine;
pub mod job;
pub mod loader;

use tracing::Span;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// A span carrying the same fields, for instrumenting the work the message describes.
    fn span(&self, name: &str) -> Span;
}
