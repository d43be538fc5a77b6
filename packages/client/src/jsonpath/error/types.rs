//! Target path error types
//!
//! Errors raised while parsing a target path or resolving one of its
//! qualifiers against the projection limits.

use std::error::Error;
use std::fmt;

/// Target path error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Text that no segment form matches, or leftover input
    InvalidPath,
    /// Malformed filter query or a condition value that is not a JSON scalar
    InvalidQuery,
    /// Index literal out of range
    InvalidIndex,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidPath => "invalid path",
            ErrorKind::InvalidQuery => "invalid query",
            ErrorKind::InvalidIndex => "invalid index",
        }
    }
}

/// Error produced by the target path grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub kind: ErrorKind,
    pub path: String,
    pub message: String,
    pub position: Option<usize>,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.position {
            Some(pos) => write!(
                f,
                "{} '{}' at position {pos}: {}",
                self.kind.as_str(),
                self.path,
                self.message
            ),
            None => write!(f, "{} '{}': {}", self.kind.as_str(), self.path, self.message),
        }
    }
}

impl Error for PathError {}

/// Result type for target path operations
pub type PathResult<T> = Result<T, PathError>;

impl PathError {
    #[must_use]
    pub fn new(kind: ErrorKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
            position: None,
        }
    }

    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    pub fn invalid_path(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, path, msg)
    }

    pub fn invalid_query(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidQuery, path, msg)
    }

    pub fn invalid_index(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidIndex, path, msg)
    }

    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_position() {
        let err = PathError::invalid_path("$.a..b", "unexpected text").at(3);
        assert_eq!(
            err.to_string(),
            "invalid path '$.a..b' at position 3: unexpected text"
        );
    }

    #[test]
    fn test_display_without_position() {
        let err = PathError::invalid_index("$.a[99]", "index 99 exceeds limit 10");
        assert_eq!(err.kind(), ErrorKind::InvalidIndex);
        assert_eq!(
            err.to_string(),
            "invalid index '$.a[99]': index 99 exceeds limit 10"
        );
    }
}
