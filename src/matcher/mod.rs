//! Per-level directory name matching.
//!
//! A hierarchy of experiment directories is described by one
//! [`LevelMatcher`] per depth. Each matcher tests a directory base name and,
//! on success, returns the named captures of its pattern as a
//! [`ParameterMap`].
//!
//! ## Core Components
//!
//! - [`LevelMatcher`] - Prefix-anchored compiled pattern for one level
//! - [`ParameterMap`] - Captured `name -> raw string` values
//! - [`TraceEvent`] / [`TraceHookFn`] - Caller-injected traversal diagnostics
//!
//! Matchers are usually produced by the [`compiler`](crate::compiler) from
//! declarative level specifications, but raw patterns can be compiled with
//! [`LevelMatcher::new`].

pub mod hooks;
pub mod level;
pub mod types;

pub use hooks::TraceEvent;
pub use level::LevelMatcher;
pub use types::{ParameterMap, TraceHookFn};
