//! Compiled matcher for a single directory level.

use crate::error::{ManagerError, Result};
use crate::matcher::types::ParameterMap;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Compiled pattern associated with one depth of the directory hierarchy.
///
/// Matching is anchored at the start of the directory name only: a name is
/// accepted as soon as a prefix of it matches, trailing characters are left
/// unconsumed. `K=3_multiplier=0.5_extra` therefore matches
/// `K=(?P<K>\d+)_multiplier=(?P<multiplier>[-+]?(?:\d*\.\d+|\d+))`.
///
/// Literal levels built with [`LevelMatcher::exact`] are the exception: they
/// are anchored at both ends and only accept the literal name itself.
///
/// # Examples
///
/// ```rust
/// use experiment_manager::LevelMatcher;
///
/// let matcher = LevelMatcher::new(r"seed=(?P<seed>\d+)")?;
/// let params = matcher.captures("seed=111_run2").unwrap();
/// assert_eq!(params["seed"], "111");
/// assert!(matcher.captures("run_seed=111").is_none());
/// # Ok::<(), experiment_manager::ManagerError>(())
/// ```
#[derive(Clone)]
pub struct LevelMatcher {
    /// Pattern source without anchors, for introspection
    pattern: Arc<str>,

    /// Anchored regex actually used for matching
    regex: Regex,

    /// Named groups in the order they appear in the pattern
    parameters: Arc<[String]>,
}

impl LevelMatcher {
    /// Compile a raw regex pattern with prefix-match semantics.
    ///
    /// # Errors
    /// Returns [`ManagerError::PatternSyntax`] if the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::compile(pattern, format!("^(?:{pattern})"))
    }

    /// Compile a matcher that only accepts `name` verbatim.
    ///
    /// [`pattern`](Self::pattern) reports the regex-escaped name.
    pub fn exact(name: &str) -> Result<Self> {
        let escaped = regex::escape(name);
        let anchored = format!("^{escaped}$");
        Self::compile(&escaped, anchored)
    }

    fn compile(source: &str, anchored: String) -> Result<Self> {
        let regex = Regex::new(&anchored).map_err(|e| ManagerError::PatternSyntax {
            pattern: source.to_string(),
            message: e.to_string(),
        })?;

        let parameters: Vec<String> = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();

        Ok(Self {
            pattern: source.into(),
            regex,
            parameters: parameters.into(),
        })
    }

    /// Pattern source this matcher was built from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parameter names captured by this level, in pattern order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Whether this level captures no parameters (a literal/anchor level).
    pub fn is_anchor(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// Match a directory name and return its captured parameters.
    ///
    /// Returns `None` when the name does not match. Optional groups that did
    /// not participate in the match are left out of the map.
    pub fn captures(&self, name: &str) -> Option<ParameterMap> {
        let caps = self.regex.captures(name)?;
        let params = self
            .parameters
            .iter()
            .filter_map(|param| {
                caps.name(param)
                    .map(|m| (param.clone(), m.as_str().to_string()))
            })
            .collect();
        Some(params)
    }
}

impl fmt::Debug for LevelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelMatcher")
            .field("pattern", &self.pattern)
            .field("parameters", &self.parameters)
            .finish()
    }
}
