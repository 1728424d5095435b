//! Result manager: the consumer-facing wrapper around the walker.
//!
//! [`ResultManager`] owns a root directory and the compiled level matchers,
//! drives a walk on demand and keeps the resulting [`ResultTable`] for
//! filtering and analysis.

use crate::compiler::{compile_levels, render_name, LevelSpec, LevelValues};
use crate::config::{ManagerConfig, WalkConfig};
use crate::error::{ManagerError, Result};
use crate::matcher::{LevelMatcher, TraceHookFn};
use crate::table::{CellValue, Filter, Record, ResultTable, PATH_COLUMN};
use crate::walker::{DirectoryLister, FsLister, StructureWalker};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Column order of a table built from `matchers`: the path column, then every
/// parameter name in level and pattern order.
fn column_order(matchers: &[LevelMatcher]) -> Vec<String> {
    let mut columns = vec![PATH_COLUMN.to_string()];
    for name in matchers.iter().flat_map(|m| m.parameters()) {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }
    columns
}

/// Drive `walker` to exhaustion and materialize its rows.
///
/// The first traversal error aborts collection. Without
/// [`WalkConfig::strict_listing`] that only happens when the root itself
/// cannot be listed.
fn collect_walk(walker: StructureWalker<'_>, matchers: &[LevelMatcher]) -> Result<ResultTable> {
    let records = walker
        .map(|item| {
            let (path, params) = item?;
            let mut record: Record = params
                .into_iter()
                .map(|(name, value)| (name, CellValue::Str(value)))
                .collect();
            record.insert(PATH_COLUMN.to_string(), CellValue::Path(path));
            Ok(record)
        })
        .collect::<Result<Vec<Record>>>()?;

    Ok(ResultTable::from_records(records, &column_order(matchers)))
}

/// Walk `root` against `matchers` on the file system and collect every
/// matched path into a table.
///
/// Rows follow the platform's directory listing order.
pub fn collect(root: impl Into<PathBuf>, matchers: &[LevelMatcher]) -> Result<ResultTable> {
    collect_walk(StructureWalker::new(root, matchers), matchers)
}

/// Build the path a result with the given values is expected at.
///
/// Each level becomes one path segment: literals verbatim, values rendered
/// as `name=value` pieces joined by `_` (sorted by name in canonical order).
///
/// ```rust
/// use experiment_manager::{default_path, LevelValues};
/// use std::path::PathBuf;
///
/// let path = default_path("/tmp", &[
///     LevelValues::params().with("param2", "a").with("param1", true),
///     LevelValues::literal("results_of_my_experiments"),
/// ], true);
/// assert_eq!(
///     path,
///     PathBuf::from("/tmp/param1=True_param2=a/results_of_my_experiments")
/// );
/// ```
pub fn default_path(
    root: impl AsRef<Path>,
    levels: &[LevelValues],
    canonical_order: bool,
) -> PathBuf {
    let mut path = root.as_ref().to_path_buf();
    for level in levels {
        path.push(render_name(level, canonical_order));
    }
    path
}

/// Manager for experimental results organized in parameter-named folders.
///
/// # Examples
///
/// ```rust,no_run
/// use experiment_manager::compiler::patterns::{BOOL_PATTERN, FLOAT_PATTERN, INT_PATTERN};
/// use experiment_manager::{ColumnType, Filter, LevelSpec, ResultManager};
///
/// let mut manager = ResultManager::from_arguments(
///     "./results",
///     &[
///         LevelSpec::params([("multiplier", FLOAT_PATTERN), ("K", INT_PATTERN)]),
///         LevelSpec::literal("results"),
///         LevelSpec::params([("sample", BOOL_PATTERN)]),
///     ],
///     true,
/// )?;
///
/// manager.parse_paths()?;
/// manager.table_mut()?.cast_column("K", ColumnType::Int)?;
///
/// let selected = manager.filter_results(&Filter::new().equal("K", 3))?;
/// for path in selected.paths() {
///     println!("{}", path.display());
/// }
/// # Ok::<(), experiment_manager::ManagerError>(())
/// ```
pub struct ResultManager {
    root_dir: PathBuf,
    matchers: Vec<LevelMatcher>,
    walk_config: WalkConfig,
    lister: Arc<dyn DirectoryLister + Send + Sync>,
    hook: Option<TraceHookFn>,
    table: Option<ResultTable>,
}

impl ResultManager {
    /// Create a manager from already compiled matchers, one per level.
    pub fn new(root_dir: impl Into<PathBuf>, matchers: Vec<LevelMatcher>) -> Self {
        Self {
            root_dir: root_dir.into(),
            matchers,
            walk_config: WalkConfig::default(),
            lister: Arc::new(FsLister::default()),
            hook: None,
            table: None,
        }
    }

    /// Compile level specifications and create a manager.
    ///
    /// With `canonical_order`, the parameters of every level are sorted by
    /// name before the pattern is built.
    ///
    /// # Errors
    /// Returns [`ManagerError::PatternSyntax`] if any level fails to compile.
    pub fn from_arguments(
        root_dir: impl Into<PathBuf>,
        levels: &[LevelSpec],
        canonical_order: bool,
    ) -> Result<Self> {
        let matchers = compile_levels(levels, canonical_order)?;
        Ok(Self::new(root_dir, matchers))
    }

    /// Create a manager from a full configuration.
    pub fn from_config(config: &ManagerConfig) -> Result<Self> {
        let manager = Self::from_arguments(&config.root_dir, &config.levels, config.canonical_order)?
            .with_walk_config(config.walk.clone())
            .with_lister(FsLister::new(config.walk.follow_symlinks));
        Ok(manager)
    }

    pub fn with_walk_config(mut self, config: WalkConfig) -> Self {
        self.walk_config = config;
        self
    }

    /// Replace the file-system lister, e.g. with an in-memory tree.
    pub fn with_lister(mut self, lister: impl DirectoryLister + Send + Sync + 'static) -> Self {
        self.lister = Arc::new(lister);
        self
    }

    pub fn with_trace_hook(mut self, hook: TraceHookFn) -> Self {
        self.hook = Some(hook);
        self
    }

    /// Start from an already parsed table instead of walking the tree.
    pub fn with_table(mut self, table: ResultTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn matchers(&self) -> &[LevelMatcher] {
        &self.matchers
    }

    /// Pattern sources of every level, outermost first.
    pub fn patterns(&self) -> Vec<&str> {
        self.matchers.iter().map(LevelMatcher::pattern).collect()
    }

    /// A fresh lazy walk over the root directory.
    pub fn walk(&self) -> StructureWalker<'_> {
        let walker = StructureWalker::new(&self.root_dir, &self.matchers)
            .with_lister(&*self.lister)
            .with_config(self.walk_config.clone());
        match &self.hook {
            Some(hook) => walker.with_hook(Arc::clone(hook)),
            None => walker,
        }
    }

    /// Walk the root directory and collect the results without storing them.
    pub fn collect(&self) -> Result<ResultTable> {
        collect_walk(self.walk(), &self.matchers)
    }

    /// Walk the root directory and store the results table.
    ///
    /// Every call re-reads the file system and replaces the previous table.
    pub fn parse_paths(&mut self) -> Result<&ResultTable> {
        let table = self.collect()?;
        info!(
            root = %self.root_dir.display(),
            rows = table.len(),
            "parsed result paths"
        );
        Ok(&*self.table.insert(table))
    }

    /// The parsed table.
    ///
    /// # Errors
    /// Returns [`ManagerError::NotParsed`] before [`parse_paths`](Self::parse_paths).
    pub fn table(&self) -> Result<&ResultTable> {
        self.table.as_ref().ok_or(ManagerError::NotParsed)
    }

    pub fn table_mut(&mut self) -> Result<&mut ResultTable> {
        self.table.as_mut().ok_or(ManagerError::NotParsed)
    }

    pub fn into_table(self) -> Option<ResultTable> {
        self.table
    }

    /// Rows of the parsed table matching `filter`, as a new table.
    pub fn filter_results(&self, filter: &Filter) -> Result<ResultTable> {
        self.table()?.filter(filter)
    }

    /// See [`default_path`].
    pub fn create_default_path(
        root_dir: impl AsRef<Path>,
        levels: &[LevelValues],
        canonical_order: bool,
    ) -> PathBuf {
        default_path(root_dir, levels, canonical_order)
    }
}

impl fmt::Debug for ResultManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultManager")
            .field("root_dir", &self.root_dir)
            .field("patterns", &self.patterns())
            .field("walk_config", &self.walk_config)
            .field("has_hook", &self.hook.is_some())
            .field("parsed_rows", &self.table.as_ref().map(ResultTable::len))
            .finish()
    }
}
