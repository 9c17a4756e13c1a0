// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Log messages are plain structs implementing `Display`, so message text
//! lives in one place instead of being scattered through format strings.
//! Each also implements [`StructuredLog`](messages::StructuredLog), which
//! emits the event with its fields attached at the level the message
//! belongs to.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::engine` - run lifecycle (started, completed, failed, invalid tree)
//! * `messages::job` - per-job lifecycle and parser failures
//! * `messages::loader` - loader registration and HTTP fetch events
//!
//! # Usage
//!
//! ```rust
//! use getres::observability::messages::engine::RunStarted;
//! use getres::observability::messages::StructuredLog;
//!
//! RunStarted { total: 3, policy: "detach" }.log();
//! ```

pub mod messages;
