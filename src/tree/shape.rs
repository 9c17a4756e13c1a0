// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::{Map, Value};

/// The result tree under construction.
///
/// Containers and job placeholders are laid down in discovery order during
/// the walk, so filling jobs in completion order never changes key order.
#[derive(Debug, Default)]
pub struct ShapePlan {
    root: Map<String, Value>,
}

impl ShapePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&mut self, path: &[String]) -> bool {
        self.set(path, Value::Object(Map::new()))
    }

    pub fn add_placeholder(&mut self, path: &[String]) -> bool {
        self.set(path, Value::Null)
    }

    /// Write a job's final value. Returns false if `path` has no slot.
    pub fn fill(&mut self, path: &[String], value: Value) -> bool {
        self.set(path, value)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    fn set(&mut self, path: &[String], value: Value) -> bool {
        let Some((key, parents)) = path.split_last() else {
            return false;
        };
        match self.parent_mut(parents) {
            Some(parent) => {
                parent.insert(key.clone(), value);
                true
            }
            None => false,
        }
    }

    fn parent_mut(&mut self, path: &[String]) -> Option<&mut Map<String, Value>> {
        let mut current = &mut self.root;
        for key in path {
            current = current.get_mut(key)?.as_object_mut()?;
        }
        Some(current)
    }
}
