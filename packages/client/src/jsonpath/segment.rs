//! Parsed target path types
//!
//! A target path is an ordered list of segments. Each segment descends into
//! an object key and may then select array elements by literal index, by
//! filter query, or by the n-th query match when both are present. Further
//! indices descend into nested arrays: `.grid[0][1]`.

use std::fmt;
use std::str::FromStr;

use super::error::{PathError, PathResult};
use super::query::Query;

/// One `.key[...]` step of a target path
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub(crate) key: String,
    pub(crate) index: Option<usize>,
    pub(crate) query: Option<Query>,
    pub(crate) nested: Vec<usize>,
}

impl Segment {
    /// Plain object-key descent
    #[must_use]
    pub fn key(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            index: None,
            query: None,
            nested: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    /// Append an index step into a nested array
    #[must_use]
    pub fn with_nested_index(mut self, index: usize) -> Self {
        self.nested.push(index);
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn query(&self) -> Option<&Query> {
        self.query.as_ref()
    }

    /// Index steps into nested arrays, applied after the first selection
    #[inline]
    #[must_use]
    pub fn nested_indices(&self) -> &[usize] {
        &self.nested
    }

    #[inline]
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.index.is_none() && self.query.is_none() && self.nested.is_empty()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.key)?;
        if let Some(query) = &self.query {
            write!(f, "[{query}]")?;
        }
        if let Some(index) = self.index {
            write!(f, "[{index}]")?;
        }
        for index in &self.nested {
            write!(f, "[{index}]")?;
        }
        Ok(())
    }
}

/// A parsed target path
#[derive(Debug, Clone, PartialEq)]
pub struct TargetPath {
    pub(crate) segments: Vec<Segment>,
}

impl TargetPath {
    /// Parse `path` with the target path grammar
    ///
    /// # Errors
    ///
    /// See [`parse_path`](super::parser::parse_path).
    pub fn parse(path: &str) -> PathResult<Self> {
        super::parser::parse_path(path)
    }

    /// Build a path from segments
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` when `segments` is empty.
    pub fn from_segments(segments: Vec<Segment>) -> PathResult<Self> {
        if segments.is_empty() {
            return Err(PathError::invalid_path("$", "a path needs at least one segment"));
        }
        Ok(Self { segments })
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// True when any segment carries a filter query
    #[inline]
    #[must_use]
    pub fn has_query(&self) -> bool {
        self.segments.iter().any(|s| s.query.is_some())
    }

    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for TargetPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
