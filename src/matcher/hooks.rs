//! Traversal trace events for caller-injected diagnostics.

use std::io;
use std::path::Path;

/// A single decision taken by the walker.
///
/// Events borrow from the walker's state and are only valid for the duration
/// of the hook call. Copy out whatever must outlive it.
#[derive(Debug)]
pub enum TraceEvent<'a> {
    /// The entry name did not match the level pattern.
    Skipped { path: &'a Path, level: usize },

    /// The entry matched but is not a directory while deeper levels remain.
    NotTraversable { path: &'a Path, level: usize },

    /// The entry matched the level pattern.
    ///
    /// `is_leaf` is true when this was the last level, i.e. a record is about
    /// to be yielded for `path`.
    Matched {
        path: &'a Path,
        level: usize,
        is_leaf: bool,
    },

    /// Listing the children of `path` failed.
    ListingFailed { path: &'a Path, error: &'a io::Error },
}

impl TraceEvent<'_> {
    /// The path the event refers to.
    pub fn path(&self) -> &Path {
        match self {
            TraceEvent::Skipped { path, .. }
            | TraceEvent::NotTraversable { path, .. }
            | TraceEvent::Matched { path, .. }
            | TraceEvent::ListingFailed { path, .. } => path,
        }
    }

    /// The level index the event was raised at, if any.
    pub fn level(&self) -> Option<usize> {
        match self {
            TraceEvent::Skipped { level, .. }
            | TraceEvent::NotTraversable { level, .. }
            | TraceEvent::Matched { level, .. } => Some(*level),
            TraceEvent::ListingFailed { .. } => None,
        }
    }

    /// Get a description of the event for debugging.
    pub fn description(&self) -> String {
        match self {
            TraceEvent::Skipped { path, level } => {
                format!("skipped {} at level {level}: no match", path.display())
            }
            TraceEvent::NotTraversable { path, level } => format!(
                "skipped {} at level {level}: not a directory",
                path.display()
            ),
            TraceEvent::Matched {
                path,
                level,
                is_leaf,
            } => format!(
                "matched {} at level {level}{}",
                path.display(),
                if *is_leaf { " (leaf)" } else { "" }
            ),
            TraceEvent::ListingFailed { path, error } => {
                format!("cannot list {}: {error}", path.display())
            }
        }
    }
}
