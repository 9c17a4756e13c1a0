// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::config::consts::{BUILTIN_LOADER_TYPES, JSON_LOADER, TEXT_LOADER};
use crate::errors::ResourceError;
use crate::loaders::{JsonLoader, TextLoader};
use crate::observability::messages::loader::{BuiltinLoaderShadowed, LoaderRegistered};
use crate::observability::messages::StructuredLog;
use crate::traits::{Fetcher, Loader};

/// Type name to loader table.
///
/// Cloning is cheap (the loaders are shared), which lets a run take a
/// snapshot while the owner keeps registering.
#[derive(Clone, Default)]
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn Loader>>,
}

impl LoaderRegistry {
    /// A registry without any loaders, not even the built-ins
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in `text` and `json` loaders over `fetcher`
    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Self {
        let mut registry = Self::empty();
        registry.loaders.insert(
            TEXT_LOADER.to_string(),
            Arc::new(TextLoader::new(fetcher.clone())),
        );
        registry
            .loaders
            .insert(JSON_LOADER.to_string(), Arc::new(JsonLoader::new(fetcher)));
        registry
    }

    /// Add or replace the loader for `type_name`.
    pub fn register(&mut self, type_name: impl Into<String>, loader: Arc<dyn Loader>) -> &mut Self {
        let type_name = type_name.into();
        if BUILTIN_LOADER_TYPES.contains(&type_name.as_str()) {
            BuiltinLoaderShadowed {
                type_name: &type_name,
                loader: loader.name(),
            }
            .log();
        }
        LoaderRegistered {
            type_name: &type_name,
            loader: loader.name(),
        }
        .log();
        self.loaders.insert(type_name, loader);
        self
    }

    pub fn resolve(&self, type_name: &str) -> Result<Arc<dyn Loader>, ResourceError> {
        self.loaders
            .get(type_name)
            .cloned()
            .ok_or_else(|| ResourceError::InvalidType(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.loaders.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl Debug for LoaderRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderRegistry")
            .field("types", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loaders::{loader_fn, MockFetcher};
    use crate::traits::ResourceRequest;
    use serde_json::{json, Value};

    fn registry() -> LoaderRegistry {
        LoaderRegistry::with_fetcher(Arc::new(MockFetcher::new()))
    }

    fn shout() -> Arc<dyn Loader> {
        Arc::new(loader_fn("shout", |request: ResourceRequest| async move {
            Ok::<_, ResourceError>(Value::String(request.src.to_uppercase()))
        }))
    }

    #[test]
    fn builtins_are_seeded() {
        let registry = registry();
        assert_eq!(registry.names(), vec!["json", "text"]);
        assert!(registry.contains("text"));
        assert!(registry.contains("json"));
        assert!(LoaderRegistry::empty().is_empty());
    }

    #[test]
    fn unknown_type_is_invalid_type() {
        let error = registry().resolve("invalid").err().unwrap();
        assert_eq!(error.to_string(), "Invalid type: invalid");
    }

    #[tokio::test]
    async fn register_is_chainable_and_replaces() {
        let mut registry = registry();
        registry
            .register("shout", shout())
            .register("text", shout());

        assert_eq!(registry.len(), 3);
        let loader = registry.resolve("text").unwrap();
        assert_eq!(loader.name(), "shout");

        let request = ResourceRequest {
            src: "/a.txt".into(),
            type_name: "text".into(),
            credentials: false,
            options: Default::default(),
        };
        assert_eq!(loader.load(&request).await.unwrap(), json!("/A.TXT"));
    }

    #[test]
    fn clones_are_independent_snapshots() {
        let original = registry();
        let mut copy = original.clone();
        copy.register("shout", shout());

        assert!(copy.contains("shout"));
        assert!(!original.contains("shout"));
    }
}
