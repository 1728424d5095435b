//! Error types for the experiment manager crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ManagerError>;

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Invalid pattern `{pattern}`: {message}")]
    PatternSyntax { pattern: String, message: String },

    #[error("Cannot list directory {}: {source}", path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Results have not been parsed yet")]
    NotParsed,

    #[error("Cannot convert `{value}`: {message}")]
    Conversion { value: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ManagerError {
    pub(crate) fn conversion(value: &str, message: impl Into<String>) -> Self {
        ManagerError::Conversion {
            value: value.to_string(),
            message: message.into(),
        }
    }
}

impl From<serde_yaml::Error> for ManagerError {
    fn from(err: serde_yaml::Error) -> Self {
        ManagerError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_pattern_syntax_display() {
        let error = ManagerError::PatternSyntax {
            pattern: "K=(?P<K>[".to_string(),
            message: "unclosed character class".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Invalid pattern"));
        assert!(display.contains("K=(?P<K>["));
        assert!(display.contains("unclosed character class"));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_traversal_keeps_source() {
        let error = ManagerError::Traversal {
            path: PathBuf::from("/missing/root"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        };
        assert!(error.to_string().contains("/missing/root"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_column_not_found() {
        let error = ManagerError::ColumnNotFound("seed".to_string());
        assert_eq!(error.to_string(), "Column not found: seed");
    }

    #[test]
    fn test_conversion_helper() {
        let error = ManagerError::conversion("maybe", "not a boolean");
        assert_eq!(error.to_string(), "Cannot convert `maybe`: not a boolean");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: ManagerError = io_error.into();
        match error {
            ManagerError::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io variant"),
        }
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: yaml: [").unwrap_err();
        let error: ManagerError = yaml_err.into();
        assert!(matches!(error, ManagerError::Config(_)));
    }

    #[test]
    fn test_result_type_alias_error() {
        fn fails() -> Result<i32> {
            Err(ManagerError::NotParsed)
        }

        match fails().unwrap_err() {
            ManagerError::NotParsed => {}
            other => panic!("Expected NotParsed, got {other:?}"),
        }
    }
}
