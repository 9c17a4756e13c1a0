// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod fetcher;
pub mod loader;

pub use fetcher::Fetcher;
pub use loader::{Loader, ResourceRequest};
