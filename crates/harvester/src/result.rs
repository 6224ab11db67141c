//! Result and error types for the harvester.

use std::path::PathBuf;

use thiserror::Error;

use crate::selector::SelectorList;

/// Result type for harvester operations
pub type HarvesterResult<T> = Result<T, HarvesterError>;

/// Errors that can occur in the harvester
#[derive(Debug, Error)]
pub enum HarvesterError {
    /// No selector in a fallback list matched the document
    #[error("No element matched any of {count} selectors: {selectors}", count = .selectors.len())]
    ElementNotFound {
        /// Every selector that was attempted, in priority order
        selectors: SelectorList,
    },

    /// An environment variable could not be parsed into its option's type
    #[error("Invalid value {value:?} for {variable}: expected {expected}")]
    ConfigValidation {
        /// Environment variable that supplied the value
        variable: String,
        /// Raw value as read
        value: String,
        /// Human-readable description of the accepted format
        expected: &'static str,
    },

    /// The `.env` file exists but could not be loaded
    #[error("Failed to load env file {}: {message}", .path.display())]
    EnvFile {
        /// Path of the env file
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// A selector list was built without any entries
    #[error("Selector list must contain at least one selector")]
    EmptySelectorList,

    /// Strategy tag outside the supported set
    #[error("Unknown selector strategy '{tag}' (expected 'xpath' or 'css')")]
    UnknownStrategy {
        /// The tag that failed to parse
        tag: String,
    },

    /// A template placeholder had no value
    #[error("No value for placeholder '{{{placeholder}}}' in template {template:?}")]
    TemplateError {
        /// Template pattern
        template: String,
        /// Placeholder name without braces
        placeholder: String,
    },

    /// No named selector list with this name
    #[error("Unknown selector list '{name}'")]
    UnknownSelector {
        /// Requested name
        name: String,
    },

    /// Course code absent from the mapping table
    #[error("Course not found: {code}")]
    CourseNotFound {
        /// Requested course code
        code: String,
    },

    /// Course code appears twice while building a table
    #[error("Duplicate course code: {code}")]
    DuplicateCourse {
        /// The repeated code
        code: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarvesterError {
    /// Create a configuration validation error
    #[must_use]
    pub fn config_validation(
        variable: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::ConfigValidation {
            variable: variable.into(),
            value: value.into(),
            expected,
        }
    }

    /// Create a course-not-found error
    #[must_use]
    pub fn course_not_found(code: impl Into<String>) -> Self {
        Self::CourseNotFound { code: code.into() }
    }

    /// Whether this error is a lookup failure rather than a fault
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::CourseNotFound { .. } | Self::UnknownSelector { .. }
        )
    }
}
