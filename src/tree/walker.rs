// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use super::node::{JobDescriptor, Node, ResourceTree};
use super::shape::ShapePlan;
use crate::errors::RunError;

/// A job discovered by the walk.
#[derive(Debug)]
pub struct JobEntry {
    /// Discovery position, depth-first in insertion order
    pub index: usize,
    pub path: Vec<String>,
    pub descriptor: JobDescriptor,
}

impl JobEntry {
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

#[derive(Debug)]
pub struct WalkPlan {
    pub jobs: Vec<JobEntry>,
    pub shape: ShapePlan,
}

/// Flatten a descriptor tree into its jobs and the shape of the result.
///
/// Fails on the first invalid node with its dotted key path. An array is
/// reported at its first element (`foo.0`).
pub fn walk(tree: ResourceTree) -> Result<WalkPlan, RunError> {
    let mut plan = WalkPlan {
        jobs: Vec::new(),
        shape: ShapePlan::new(),
    };
    let mut path = Vec::new();
    visit(tree, &mut path, &mut plan)?;
    Ok(plan)
}

/// Number of jobs in `tree`, or the structural error a run would report.
pub fn count_jobs(tree: &ResourceTree) -> Result<usize, RunError> {
    walk(tree.clone()).map(|plan| plan.jobs.len())
}

fn visit(tree: ResourceTree, path: &mut Vec<String>, plan: &mut WalkPlan) -> Result<(), RunError> {
    for (key, node) in tree {
        path.push(key);
        match node {
            Node::Job(descriptor) => {
                plan.shape.add_placeholder(path);
                plan.jobs.push(JobEntry {
                    index: plan.jobs.len(),
                    path: path.clone(),
                    descriptor,
                });
            }
            Node::Container(child) => {
                plan.shape.add_container(path);
                visit(child, path, plan)?;
            }
            Node::Invalid(value) => {
                if matches!(&value, Value::Array(items) if !items.is_empty()) {
                    path.push("0".to_string());
                }
                return Err(RunError::InvalidNode {
                    path: path.join("."),
                });
            }
        }
        path.pop();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn jobs_are_discovered_depth_first() {
        let tree = ResourceTree::from_value(json!({
            "a": { "src": "/a.txt" },
            "p": { "b": { "src": "/b.txt" }, "q": { "c": { "src": "/c.txt" } } },
            "d": { "src": "/d.txt" }
        }))
        .unwrap();

        let plan = walk(tree).unwrap();
        let paths: Vec<String> = plan.jobs.iter().map(JobEntry::dotted_path).collect();
        assert_eq!(paths, vec!["a", "p.b", "p.q.c", "d"]);
        assert!(plan.jobs.iter().enumerate().all(|(i, job)| job.index == i));
        assert_eq!(
            plan.shape.into_value(),
            json!({ "a": null, "p": { "b": null, "q": { "c": null } }, "d": null })
        );
    }

    #[test]
    fn invalid_nodes_report_their_path() {
        struct TestCase {
            tree: serde_json::Value,
            expected: &'static str,
        }

        let cases = vec![
            TestCase {
                tree: json!({ "foo": [1, 2, 3] }),
                expected: "Invalid node: foo.0",
            },
            TestCase {
                tree: json!({ "ok": { "src": "/a" }, "p": { "list": ["x"] } }),
                expected: "Invalid node: p.list.0",
            },
            TestCase {
                tree: json!({ "foo": [] }),
                expected: "Invalid node: foo",
            },
            TestCase {
                tree: json!({ "ok": { "src": "/a" }, "foo": { "bar": 7 } }),
                expected: "Invalid node: foo.bar",
            },
            TestCase {
                tree: json!({ "foo": { "bar": { "src": null } } }),
                expected: "Invalid node: foo.bar",
            },
        ];

        for case in cases {
            let tree = ResourceTree::from_value(case.tree).unwrap();
            assert_eq!(walk(tree).unwrap_err().to_string(), case.expected);
        }
    }

    #[test]
    fn empty_tree_has_no_jobs() {
        assert_eq!(count_jobs(&ResourceTree::new()).unwrap(), 0);
        let nested = ResourceTree::from_value(json!({ "a": { "b": {} } })).unwrap();
        assert_eq!(count_jobs(&nested).unwrap(), 0);
    }
}
