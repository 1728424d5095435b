//! Recursive structural matching of directory trees.
//!
//! The walker descends a results tree one level per [`LevelMatcher`]. An
//! entry is kept only if its base name matches the matcher of its depth; a
//! record is produced only when a whole chain of entries, from the root's
//! children down to the last level, matched.
//!
//! ```text
//! root/
//! ├── K=2_multiplier=0.5/        level 0: K=(?P<K>\d+)_multiplier=(?P<multiplier>...)
//! │   ├── results/               level 1: results
//! │   │   ├── sample_True        level 2: sample_(?P<sample>True|False)  -> record
//! │   │   └── sample_False       level 2                                  -> record
//! │   └── logs/                  level 1: no match, skipped
//! └── README.md                  level 0: no match, skipped
//! ```
//!
//! Traversal is depth-first and lazy: a directory is only listed when the
//! walker reaches it, so dropping the iterator early leaves the rest of the
//! tree untouched. The walker uses an explicit stack, so hierarchy depth is
//! not limited by the call stack.
//!
//! Concurrent walks of the same tree are as safe as the underlying
//! [`DirectoryLister`]; the walker itself shares no state between calls.

pub mod lister;

pub use lister::{ChildEntry, DirectoryLister, FsLister};

use crate::config::WalkConfig;
use crate::error::{ManagerError, Result};
use crate::matcher::{LevelMatcher, ParameterMap, TraceEvent, TraceHookFn};
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// A matched leaf path and the parameters captured along the way.
pub type WalkItem = (PathBuf, ParameterMap);

/// Default lister used by [`walk`].
static FS_LISTER: FsLister = FsLister::new(true);

/// Directory being scanned at one level.
struct Frame {
    children: std::vec::IntoIter<ChildEntry>,
    level: usize,
    inherited: ParameterMap,
}

/// Lazy depth-first iterator over matching leaf paths.
///
/// Yields `Ok((leaf_path, parameters))` for every fully matching path, where
/// `parameters` is the union of the captures of every level along the path.
/// If two levels capture the same name, the deeper level wins.
///
/// If the root cannot be listed, the walk yields a single
/// `Err(ManagerError::Traversal)` and stops. A deeper directory that cannot
/// be listed is logged, reported as [`TraceEvent::ListingFailed`] and its
/// subtree is skipped. With [`WalkConfig::strict_listing`] set, it yields an
/// error instead, and iteration may continue afterwards with the rest of
/// the tree.
pub struct StructureWalker<'a> {
    matchers: &'a [LevelMatcher],
    lister: &'a dyn DirectoryLister,
    config: WalkConfig,
    hook: Option<TraceHookFn>,
    root: Option<PathBuf>,
    stack: Vec<Frame>,
}

/// Walk `root` against `matchers` using the file system.
///
/// # Examples
///
/// ```rust,no_run
/// use experiment_manager::{compile_levels, walk, LevelSpec};
///
/// let matchers = compile_levels(&[
///     LevelSpec::params([("seed", r"\d+")]),
///     LevelSpec::literal("results"),
/// ], false)?;
///
/// for item in walk("./example_results", &matchers) {
///     let (path, params) = item?;
///     println!("{} -> seed {}", path.display(), params["seed"]);
/// }
/// # Ok::<(), experiment_manager::ManagerError>(())
/// ```
pub fn walk(root: impl Into<PathBuf>, matchers: &[LevelMatcher]) -> StructureWalker<'_> {
    StructureWalker::new(root, matchers)
}

impl<'a> StructureWalker<'a> {
    pub fn new(root: impl Into<PathBuf>, matchers: &'a [LevelMatcher]) -> Self {
        Self {
            matchers,
            lister: &FS_LISTER,
            config: WalkConfig::default(),
            hook: None,
            root: Some(root.into()),
            stack: Vec::new(),
        }
    }

    /// Use a custom directory lister instead of the file system.
    pub fn with_lister(mut self, lister: &'a dyn DirectoryLister) -> Self {
        self.lister = lister;
        self
    }

    /// Apply a walk configuration.
    ///
    /// `sort_entries` and `strict_listing` are read here; symlink handling
    /// belongs to the lister (see [`FsLister::new`]).
    pub fn with_config(mut self, config: WalkConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_hook(mut self, hook: TraceHookFn) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Current number of open directory levels.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn emit(&self, event: TraceEvent<'_>) {
        if let Some(hook) = &self.hook {
            hook(&event);
        }
    }

    /// List `dir` and push it as the frame for `level`.
    fn open(&mut self, dir: PathBuf, level: usize, inherited: ParameterMap) -> Result<()> {
        match self.lister.list(&dir) {
            Ok(mut children) => {
                if self.config.sort_entries {
                    children.sort_by(|a, b| a.name.cmp(&b.name));
                }
                self.stack.push(Frame {
                    children: children.into_iter(),
                    level,
                    inherited,
                });
                Ok(())
            }
            Err(source) => {
                warn!(path = %dir.display(), error = %source, "cannot list directory");
                self.emit(TraceEvent::ListingFailed {
                    path: &dir,
                    error: &source,
                });
                Err(ManagerError::Traversal { path: dir, source })
            }
        }
    }
}

impl Iterator for StructureWalker<'_> {
    type Item = Result<WalkItem>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(root) = self.root.take() {
            if self.matchers.is_empty() {
                return None;
            }
            if let Err(err) = self.open(root, 0, ParameterMap::new()) {
                return Some(Err(err));
            }
        }

        loop {
            let (entry, level) = match self.stack.last_mut() {
                None => return None,
                Some(frame) => match frame.children.next() {
                    Some(entry) => (entry, frame.level),
                    None => {
                        self.stack.pop();
                        continue;
                    }
                },
            };

            let Some(captured) = self.matchers[level].captures(&entry.name) else {
                trace!(path = %entry.path.display(), level, "skipped: no match");
                self.emit(TraceEvent::Skipped {
                    path: &entry.path,
                    level,
                });
                continue;
            };

            let is_leaf = level + 1 == self.matchers.len();
            self.emit(TraceEvent::Matched {
                path: &entry.path,
                level,
                is_leaf,
            });

            let mut params = self
                .stack
                .last()
                .map(|frame| frame.inherited.clone())
                .unwrap_or_default();
            params.extend(captured);

            if is_leaf {
                debug!(path = %entry.path.display(), "matched leaf");
                return Some(Ok((entry.path, params)));
            }

            if !entry.is_dir {
                debug!(path = %entry.path.display(), level, "skipped: not a directory");
                self.emit(TraceEvent::NotTraversable {
                    path: &entry.path,
                    level,
                });
                continue;
            }

            if let Err(err) = self.open(entry.path, level + 1, params) {
                if self.config.strict_listing {
                    return Some(Err(err));
                }
            }
        }
    }
}
