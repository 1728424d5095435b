//! # Experiment Manager
//!
//! Collect results of scientific experiments stored in directory trees whose
//! names encode parameter values, e.g.
//! `K=3_multiplier=0.5/results/sample_True`.
//!
//! A hierarchy is described by one level specification per directory depth.
//! Every level is compiled into a matcher; the walker descends the tree and
//! keeps only the paths that match at every level, capturing the named
//! parameters along the way. The captures end up in a [`ResultTable`] with
//! one row per matched leaf directory.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use experiment_manager::compiler::patterns::{BOOL_PATTERN, FLOAT_PATTERN, INT_PATTERN};
//! use experiment_manager::{Filter, LevelSpec, ResultManager};
//!
//! let mut manager = ResultManager::from_arguments(
//!     "./sample_result_folder",
//!     &[
//!         LevelSpec::params([("K", INT_PATTERN), ("multiplier", FLOAT_PATTERN)]),
//!         LevelSpec::literal("results"),
//!         LevelSpec::params([("sample", BOOL_PATTERN)]),
//!     ],
//!     false,
//! )?;
//!
//! let table = manager.parse_paths()?;
//! println!("{} results", table.len());
//!
//! let selected = manager.filter_results(&Filter::new().contained("K", ["2", "4"]))?;
//! for row in selected.rows() {
//!     println!("{:?} -> {:?}", row.path(), row.get("multiplier"));
//! }
//! # Ok::<(), experiment_manager::ManagerError>(())
//! ```
//!
//! ### Creating result directories
//!
//! ```rust
//! use experiment_manager::{LevelValues, ResultManager};
//! use std::path::Path;
//!
//! let path = ResultManager::create_default_path(
//!     "runs",
//!     &[
//!         LevelValues::params().with("param2", "a").with("param1", true),
//!         LevelValues::literal("results_of_my_experiments"),
//!         LevelValues::params().with("param3", 1),
//!     ],
//!     true,
//! );
//! assert_eq!(
//!     path,
//!     Path::new("runs/param1=True_param2=a/results_of_my_experiments/param3=1")
//! );
//! ```
//!
//! Captured values are always strings; use [`ResultTable::cast_column`] or
//! the [`convert`] helpers to turn them into numbers or booleans.

pub mod compiler;
pub mod config;
pub mod convert;
pub mod error;
pub mod manager;
pub mod matcher;
pub mod table;
pub mod walker;

// Compiler and configuration
pub use compiler::{compile_level, compile_levels, render_name, LevelSpec, LevelValues};
pub use config::{ManagerConfig, WalkConfig};

// Core types and errors
pub use error::{ManagerError, Result};
pub use matcher::{LevelMatcher, ParameterMap, TraceEvent, TraceHookFn};

// Traversal and result collection
pub use manager::{collect, default_path, ResultManager};
pub use table::{CellValue, ColumnType, Filter, ResultTable, Row, PATH_COLUMN};
pub use walker::{walk, DirectoryLister, FsLister, StructureWalker};
