// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Loader implementations and the HTTP fetch backend.

pub mod func;
pub mod http;
pub mod json;
pub mod text;

#[cfg(test)]
pub mod mock;

pub use func::{loader_fn, FnLoader};
pub use http::HttpFetcher;
pub use json::JsonLoader;
pub use text::TextLoader;

#[cfg(test)]
pub use mock::MockFetcher;
