// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Loader type for plain UTF-8 text bodies
pub const TEXT_LOADER: &str = "text";
/// Loader type for JSON bodies
pub const JSON_LOADER: &str = "json";
/// Loader type used when a descriptor has no `type`
pub const DEFAULT_LOADER_TYPE: &str = TEXT_LOADER;
/// Loader types present in every registry before user registration
pub const BUILTIN_LOADER_TYPES: [&str; 2] = [TEXT_LOADER, JSON_LOADER];

/// HTTP request timeout when the manifest does not set one
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("getres/", env!("CARGO_PKG_VERSION"));

/// Path reported when the tree root itself is not an object
pub const ROOT_PATH: &str = "<root>";
