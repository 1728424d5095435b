//! Configuration for result managers and directory walks.
//!
//! A [`ManagerConfig`] fully describes a parse: where the results live, how
//! every directory level is named and how the walk lists directories. It can
//! be written by hand in YAML next to the experiment scripts:
//!
//! ```yaml
//! root_dir: ./example_results
//! canonical_order: true
//! levels:
//!   - multiplier: '[-+]?(?:\d*\.\d+|\d+)'
//!     K: '\d+'
//!   - results
//!   - sample: 'True|False'
//! walk:
//!   sort_entries: true
//! ```

use crate::compiler::LevelSpec;
use crate::error::{ManagerError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory walk configuration.
///
/// # Examples
///
/// ```rust
/// use experiment_manager::WalkConfig;
///
/// // Platform listing order, symlinked directories are followed
/// let config = WalkConfig::default();
/// assert!(!config.sort_entries);
///
/// // Reproducible row order across file systems
/// let config = WalkConfig::deterministic();
/// assert!(config.sort_entries);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkConfig {
    /// Sort the children of every directory by name before matching.
    ///
    /// When disabled, rows come out in whatever order the file system lists
    /// directory entries, which differs between platforms.
    pub sort_entries: bool,

    /// Descend into symbolic links that point to directories.
    pub follow_symlinks: bool,

    /// Report directories below the root that cannot be listed as errors.
    ///
    /// When disabled, such a directory is logged, reported to the trace hook
    /// and its subtree is left out of the results. The root itself must
    /// always be listable.
    pub strict_listing: bool,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            sort_entries: false,
            follow_symlinks: true,
            strict_listing: false,
        }
    }
}

impl WalkConfig {
    /// Configuration producing the same row order on every file system.
    pub fn deterministic() -> Self {
        Self {
            sort_entries: true,
            ..Self::default()
        }
    }
}

/// Complete description of a result-parsing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Root of the results tree
    pub root_dir: PathBuf,

    /// One specification per directory level, outermost first
    pub levels: Vec<LevelSpec>,

    /// Sort parameter names of every level before building patterns
    #[serde(default)]
    pub canonical_order: bool,

    #[serde(default)]
    pub walk: WalkConfig,
}

impl ManagerConfig {
    pub fn new(root_dir: impl Into<PathBuf>, levels: Vec<LevelSpec>) -> Self {
        Self {
            root_dir: root_dir.into(),
            levels,
            canonical_order: false,
            walk: WalkConfig::default(),
        }
    }

    pub fn with_canonical_order(mut self, canonical_order: bool) -> Self {
        self.canonical_order = canonical_order;
        self
    }

    pub fn with_walk(mut self, walk: WalkConfig) -> Self {
        self.walk = walk;
        self
    }

    /// Parse a configuration from YAML text.
    ///
    /// # Errors
    /// Returns [`ManagerError::Config`] on malformed YAML or when no level is given.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML configuration file.
    ///
    /// A relative `root_dir` is resolved against the directory holding the file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_yaml_str(&text)?;
        if config.root_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.root_dir = parent.join(&config.root_dir);
            }
        }
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.levels.is_empty() {
            return Err(ManagerError::Config(
                "at least one directory level must be specified".to_string(),
            ));
        }
        Ok(())
    }
}
