// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod node;
pub mod parser;
pub mod shape;
pub mod walker;

pub use node::{JobDescriptor, Location, Node, ResourceTree, Source};
pub use parser::{Done, JobCallback, Parser};
pub(crate) use parser::panic_message;
pub use shape::ShapePlan;
pub use walker::{count_jobs, walk, JobEntry, WalkPlan};
