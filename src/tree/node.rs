// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Resource descriptor tree types.
//!
//! A [`ResourceTree`] is an insertion-ordered mapping from key to [`Node`]. Trees
//! can be assembled with the builder methods or converted from a JSON/YAML value,
//! in which case every object carrying a `src` key becomes a job.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use super::parser::{JobCallback, Parser};
use crate::config::consts::{DEFAULT_LOADER_TYPE, ROOT_PATH};
use crate::errors::{ResourceError, RunError};
use crate::traits::ResourceRequest;

/// An opaque resource location, interpreted by the loader.
pub type Location = String;

/// Where a job's data comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Single(Location),
    /// Loaded concurrently, results kept in list order
    List(Vec<Location>),
    /// Loaded concurrently, results keyed like the source (insertion order)
    Map(Vec<(String, Location)>),
}

impl Source {
    /// Build a keyed source from `(key, location)` pairs.
    pub fn map<K, L>(pairs: impl IntoIterator<Item = (K, L)>) -> Self
    where
        K: Into<String>,
        L: Into<Location>,
    {
        Source::Map(
            pairs
                .into_iter()
                .map(|(key, location)| (key.into(), location.into()))
                .collect(),
        )
    }

    /// Interpret a `src` value: a string, an array of strings or an object of strings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(location) => Some(Source::Single(location.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Source::List),
            Value::Object(entries) => entries
                .iter()
                .map(|(key, item)| item.as_str().map(|location| (key.clone(), location.to_string())))
                .collect::<Option<Vec<_>>>()
                .map(Source::Map),
            _ => None,
        }
    }

    /// Number of leaf loads this source fans out to
    pub fn len(&self) -> usize {
        match self {
            Source::Single(_) => 1,
            Source::List(locations) => locations.len(),
            Source::Map(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Source::Single(location) => write!(f, "{}", location),
            Source::List(locations) => write!(f, "[{}]", locations.join(", ")),
            Source::Map(entries) => {
                let pairs: Vec<String> = entries
                    .iter()
                    .map(|(key, location)| format!("{}: {}", key, location))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Source::Single(location) => serializer.serialize_str(location),
            Source::List(locations) => locations.serialize(serializer),
            Source::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, location) in entries {
                    map.serialize_entry(key, location)?;
                }
                map.end()
            }
        }
    }
}

impl From<&str> for Source {
    fn from(location: &str) -> Self {
        Source::Single(location.to_string())
    }
}

impl From<String> for Source {
    fn from(location: String) -> Self {
        Source::Single(location)
    }
}

impl From<Vec<&str>> for Source {
    fn from(locations: Vec<&str>) -> Self {
        Source::List(locations.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Source {
    fn from(locations: Vec<String>) -> Self {
        Source::List(locations)
    }
}

/// One leaf job: what to load, how to decode it and what to do with the result.
#[derive(Clone)]
pub struct JobDescriptor {
    pub src: Source,
    /// Loader type, `text` when absent
    pub type_name: Option<String>,
    pub credentials: bool,
    /// Remaining descriptor keys, handed to the loader untouched
    pub options: Map<String, Value>,
    pub parser: Option<Parser>,
    pub callback: Option<JobCallback>,
}

impl JobDescriptor {
    pub fn new(src: impl Into<Source>) -> Self {
        Self {
            src: src.into(),
            type_name: None,
            credentials: false,
            options: Map::new(),
            parser: None,
            callback: None,
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_credentials(mut self, credentials: bool) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Observe this job's own outcome. The callback sees the unwrapped error.
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(Result<&Value, &ResourceError>) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    pub fn type_name(&self) -> &str {
        self.type_name.as_deref().unwrap_or(DEFAULT_LOADER_TYPE)
    }

    /// The request handed to the loader for one leaf location of this job
    pub fn request_for(&self, location: &str) -> ResourceRequest {
        ResourceRequest {
            src: location.to_string(),
            type_name: self.type_name().to_string(),
            credentials: self.credentials,
            options: self.options.clone(),
        }
    }

    /// Read a job from a descriptor object. `None` when any known key is
    /// malformed; a null `type` or `credentials` counts as absent.
    pub fn from_object(object: &Map<String, Value>) -> Option<Self> {
        let mut descriptor = JobDescriptor::new(Source::from_value(object.get("src")?)?);
        for (key, value) in object {
            match key.as_str() {
                "src" => {}
                "type" | "credentials" if value.is_null() => {}
                "type" => descriptor.type_name = Some(value.as_str()?.to_string()),
                "credentials" => descriptor.credentials = value.as_bool()?,
                _ => {
                    descriptor.options.insert(key.clone(), value.clone());
                }
            }
        }
        Some(descriptor)
    }
}

impl Debug for JobDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobDescriptor")
            .field("src", &self.src)
            .field("type_name", &self.type_name())
            .field("credentials", &self.credentials)
            .field("options", &self.options)
            .field("parser", &self.parser)
            .field("callback", &self.callback.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Job(JobDescriptor),
    Container(ResourceTree),
    /// Anything that is neither; rejected when the tree is walked
    Invalid(Value),
}

impl Node {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(object) if object.contains_key("src") => {
                match JobDescriptor::from_object(&object) {
                    Some(descriptor) => Node::Job(descriptor),
                    None => Node::Invalid(Value::Object(object)),
                }
            }
            Value::Object(object) => Node::Container(ResourceTree::from_object(object)),
            other => Node::Invalid(other),
        }
    }
}

impl From<JobDescriptor> for Node {
    fn from(descriptor: JobDescriptor) -> Self {
        Node::Job(descriptor)
    }
}

impl From<ResourceTree> for Node {
    fn from(tree: ResourceTree) -> Self {
        Node::Container(tree)
    }
}

/// Insertion-ordered mapping from key to [`Node`].
#[derive(Debug, Clone, Default)]
pub struct ResourceTree {
    entries: Vec<(String, Node)>,
}

impl ResourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<Node>) -> &mut Self {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = node,
            None => self.entries.push((key, node)),
        }
        self
    }

    pub fn job(mut self, key: impl Into<String>, descriptor: JobDescriptor) -> Self {
        self.insert(key, descriptor);
        self
    }

    pub fn container(mut self, key: impl Into<String>, tree: ResourceTree) -> Self {
        self.insert(key, tree);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| node)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries
            .iter_mut()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| node)
    }

    /// Look up a job by dotted key path (`p.b`), e.g. to attach a parser to a
    /// tree that was read from a manifest.
    pub fn job_mut(&mut self, path: &str) -> Option<&mut JobDescriptor> {
        let mut keys = path.split('.');
        let mut node = self.get_mut(keys.next()?)?;
        for key in keys {
            node = match node {
                Node::Container(tree) => tree.get_mut(key)?,
                _ => return None,
            };
        }
        match node {
            Node::Job(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert a JSON value into a tree. The root itself must be an object.
    pub fn from_value(value: Value) -> Result<Self, RunError> {
        match value {
            Value::Object(object) => Ok(Self::from_object(object)),
            _ => Err(RunError::InvalidNode {
                path: ROOT_PATH.to_string(),
            }),
        }
    }

    fn from_object(object: Map<String, Value>) -> Self {
        Self {
            entries: object
                .into_iter()
                .map(|(key, value)| (key, Node::from_value(value)))
                .collect(),
        }
    }
}

impl TryFrom<Value> for ResourceTree {
    type Error = RunError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        ResourceTree::from_value(value)
    }
}

impl IntoIterator for ResourceTree {
    type Item = (String, Node);
    type IntoIter = std::vec::IntoIter<(String, Node)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
