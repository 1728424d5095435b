//! Core type definitions shared by the matcher and the walker.

use super::hooks::TraceEvent;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Captured parameter values for one directory level or one full path.
///
/// Keys are parameter names (the named groups of a level pattern), values are
/// the raw captured substrings. No type conversion happens at capture time.
pub type ParameterMap = BTreeMap<String, String>;

/// Trace callback invoked by the walker for every traversal decision.
///
/// # Example
/// ```rust
/// use experiment_manager::matcher::{TraceEvent, TraceHookFn};
/// use std::sync::{Arc, Mutex};
///
/// let skipped = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&skipped);
/// let hook: TraceHookFn = Arc::new(move |event: &TraceEvent<'_>| {
///     if let TraceEvent::Skipped { path, .. } = event {
///         sink.lock().unwrap().push(path.to_path_buf());
///     }
/// });
/// # let _ = hook;
/// ```
pub type TraceHookFn = Arc<dyn Fn(&TraceEvent<'_>) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_parameter_map_is_ordered_by_name() {
        let mut params = ParameterMap::new();
        params.insert("multiplier".to_string(), "0.5".to_string());
        params.insert("K".to_string(), "3".to_string());

        let keys: Vec<&str> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["K", "multiplier"]);
    }

    #[test]
    fn test_trace_hook_signature() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let hook: TraceHookFn = Arc::new(move |_event: &TraceEvent<'_>| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        hook(&TraceEvent::Skipped {
            path: Path::new("/tmp/x"),
            level: 0,
        });
        hook(&TraceEvent::NotTraversable {
            path: Path::new("/tmp/y"),
            level: 1,
        });

        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }
}
