// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::tree::Source;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    Started,
    Loaded,
    Done,
}

/// A run state change, delivered in order: one `started`, a `loaded` per
/// finished job (completion order), and `done` only if nothing failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressEvent {
    #[serde(rename = "type")]
    pub kind: ProgressKind,
    pub processed: usize,
    pub remaining: usize,
    pub total: usize,
    pub percent: f64,
    /// Source of the job that just loaded; `loaded` events only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<Source>,
}

impl ProgressEvent {
    pub fn new(kind: ProgressKind, processed: usize, total: usize, src: Option<Source>) -> Self {
        Self {
            kind,
            processed,
            remaining: total.saturating_sub(processed),
            total,
            percent: percent(processed, total),
            src,
        }
    }
}

/// Boxed progress observer accepted by [`Getres::start`](crate::Getres::start).
pub type ProgressFn = Box<dyn FnMut(&ProgressEvent) + Send>;

/// `processed * 100 / total`, or 0 for an empty run
pub fn percent(processed: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        processed as f64 * 100.0 / total as f64
    }
}

/// Counts completions for one run and forwards events to the observer.
pub(crate) struct ProgressTracker<'a> {
    total: usize,
    processed: usize,
    sink: &'a mut (dyn FnMut(&ProgressEvent) + Send),
}

impl<'a> ProgressTracker<'a> {
    pub(crate) fn new(total: usize, sink: &'a mut (dyn FnMut(&ProgressEvent) + Send)) -> Self {
        Self {
            total,
            processed: 0,
            sink,
        }
    }

    pub(crate) fn processed(&self) -> usize {
        self.processed
    }

    pub(crate) fn started(&mut self) {
        self.emit(ProgressKind::Started, None);
    }

    pub(crate) fn loaded(&mut self, src: Source) {
        self.processed += 1;
        self.emit(ProgressKind::Loaded, Some(src));
    }

    pub(crate) fn done(&mut self) {
        self.emit(ProgressKind::Done, None);
    }

    fn emit(&mut self, kind: ProgressKind, src: Option<Source>) {
        let event = ProgressEvent::new(kind, self.processed, self.total, src);
        (self.sink)(&event);
    }
}
