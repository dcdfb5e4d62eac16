//! Error types for the quiz core.
//!
//! A single `QuizpackError` enum covers every failure the library can
//! surface; each variant carries enough context (path, pattern, element
//! name) for the host editor to build a user-facing message.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the quiz core library.
#[derive(Debug, Error)]
pub enum QuizpackError {
    /// The XML document does not have the expected shape.
    #[error("Invalid document structure: {0}")]
    Structure(String),

    /// Missing required XML element.
    #[error("Missing required XML element: <{element}> in {context}")]
    MissingElement { element: String, context: String },

    /// XML parsing failed at the document level.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Failed to write a file to the given path.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user-supplied search pattern failed to compile as a regex.
    #[error("Invalid search pattern: '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Archive extraction or creation failed in the archive collaborator.
    #[error("Package operation failed: {0}")]
    Package(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for quiz core operations.
pub type Result<T> = std::result::Result<T, QuizpackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_error_display() {
        let err = QuizpackError::Structure("expected <questestinterop> root".to_string());
        assert!(err.to_string().contains("questestinterop"));
    }

    #[test]
    fn test_missing_element_display() {
        let err = QuizpackError::MissingElement {
            element: "assessment".to_string(),
            context: "questestinterop".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required XML element: <assessment> in questestinterop"
        );
    }

    #[test]
    fn test_invalid_pattern_display() {
        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = QuizpackError::InvalidPattern {
            pattern: "(unclosed".to_string(),
            source,
        };
        assert!(err.to_string().contains("(unclosed"));
    }

    #[test]
    fn test_write_error_carries_path() {
        let err = QuizpackError::Write {
            path: PathBuf::from("/tmp/out/assessment.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("assessment.xml"));
    }
}
