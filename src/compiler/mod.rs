//! Level pattern compiler.
//!
//! This module turns declarative [`LevelSpec`]s into [`LevelMatcher`]s, one
//! per directory level, and provides the inverse operation of rendering a
//! directory name from parameter values.
//!
//! The compiler is organized into several sub-modules:
//! - [`spec`] - Level specifications and value rendering
//! - [`patterns`] - Commonly used value sub-patterns
//!
//! # Examples
//!
//! ```rust
//! use experiment_manager::compiler::{compile_level, patterns, LevelSpec};
//!
//! let spec = LevelSpec::params([
//!     ("multiplier", patterns::FLOAT_PATTERN),
//!     ("K", patterns::INT_PATTERN),
//! ]);
//!
//! // Canonical order sorts parameters by name before building the pattern.
//! let matcher = compile_level(&spec, true)?;
//! let params = matcher.captures("K=3_multiplier=0.5").unwrap();
//! assert_eq!(params["K"], "3");
//! assert_eq!(params["multiplier"], "0.5");
//! # Ok::<(), experiment_manager::ManagerError>(())
//! ```

pub mod patterns;
pub mod spec;

pub use spec::{DirValue, LevelSpec, LevelValues};

use crate::error::Result;
use crate::matcher::LevelMatcher;

/// Separator between `name=value` pieces of a directory name.
pub const SEPARATOR: &str = "_";

/// Order `(name, _)` pairs as declared, or sorted by name in canonical order.
fn ordered<T>(pairs: &[(String, T)], canonical_order: bool) -> Vec<&(String, T)> {
    let mut ordered: Vec<&(String, T)> = pairs.iter().collect();
    if canonical_order {
        ordered.sort_by(|a, b| a.0.cmp(&b.0));
    }
    ordered
}

/// Pattern source that [`compile_level`] builds for `spec`.
///
/// A literal renders as its regex-escaped text; a parametrized level renders
/// as `name=(?P<name>sub)` pieces joined by `_`, with the `name=` prefix
/// escaped so it only matches the parameter name literally.
pub fn pattern_from_spec(spec: &LevelSpec, canonical_order: bool) -> String {
    match spec {
        LevelSpec::Literal(name) => regex::escape(name),
        LevelSpec::Parametrized(pairs) => ordered(pairs, canonical_order)
            .into_iter()
            .map(|(name, sub)| format!("{}=(?P<{name}>{sub})", regex::escape(name)))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    }
}

/// Compile one level specification into a matcher.
///
/// # Errors
/// Returns [`ManagerError::PatternSyntax`](crate::ManagerError::PatternSyntax)
/// when a sub-pattern or parameter name is not valid regex syntax.
pub fn compile_level(spec: &LevelSpec, canonical_order: bool) -> Result<LevelMatcher> {
    match spec {
        LevelSpec::Literal(name) => LevelMatcher::exact(name),
        LevelSpec::Parametrized(_) => {
            LevelMatcher::new(&pattern_from_spec(spec, canonical_order))
        }
    }
}

/// Compile a whole hierarchy, one matcher per level, stopping at the first error.
pub fn compile_levels(specs: &[LevelSpec], canonical_order: bool) -> Result<Vec<LevelMatcher>> {
    specs
        .iter()
        .map(|spec| compile_level(spec, canonical_order))
        .collect()
}

/// Render a directory name from values: `name1=value1_name2=value2...`.
pub fn render_name(values: &LevelValues, canonical_order: bool) -> String {
    match values {
        LevelValues::Literal(name) => name.clone(),
        LevelValues::Values(pairs) => ordered(pairs, canonical_order)
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(SEPARATOR),
    }
}
