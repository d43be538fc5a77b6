//! Target path parsing
//!
//! Parsing is all-or-nothing: every character after the optional `$` must
//! belong to a segment, otherwise the whole path is rejected.

use super::error::{PathError, PathResult};
use super::grammar::{QUALIFIER, SEGMENT};
use super::query::Query;
use super::segment::{Segment, TargetPath};

/// Parse a target path into its ordered segments
///
/// # Errors
///
/// * `InvalidPath` - empty path, text no segment form matches, or a query
///   that is not the first qualifier of its segment
/// * `InvalidQuery` - a query literal that is not a JSON scalar
/// * `InvalidIndex` - an index that does not fit `usize`
pub fn parse_path(path: &str) -> PathResult<TargetPath> {
    let body_start = usize::from(path.starts_with('$'));
    let mut position = body_start;
    let mut segments = Vec::new();

    while position < path.len() {
        let caps = SEGMENT
            .captures_at(path, position)
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == position))
            .ok_or_else(|| {
                PathError::invalid_path(path, "expected `.key` optionally followed by `[index]` or `[?(query)]`")
                    .at(position)
            })?;

        let whole = caps.get(0).map_or(position, |m| m.end());
        let mut segment = Segment::key(&caps["key"]);
        if let Some(qualifiers) = caps.name("qualifiers") {
            apply_qualifiers(&mut segment, qualifiers.as_str(), qualifiers.start(), path)?;
        }

        segments.push(segment);
        position = whole;
    }

    if segments.is_empty() {
        return Err(PathError::invalid_path(path, "path has no segments").at(body_start));
    }

    log::trace!("parsed target path {path} into {} segments", segments.len());
    Ok(TargetPath { segments })
}

fn apply_qualifiers(
    segment: &mut Segment,
    qualifiers: &str,
    offset: usize,
    path: &str,
) -> PathResult<()> {
    for caps in QUALIFIER.captures_iter(qualifiers) {
        let start = offset + caps.get(0).map_or(0, |m| m.start());

        if let Some(index) = caps.name("index") {
            let value = index.as_str().parse::<usize>().map_err(|_| {
                PathError::invalid_index(path, format!("index `{}` is out of range", index.as_str()))
                    .at(start)
            })?;
            // the first index selects, later ones descend into nested arrays
            if segment.index.is_some() {
                segment.nested.push(value);
            } else {
                segment.index = Some(value);
            }
        }

        if let Some(query) = caps.name("query") {
            if segment.query.is_some() || segment.index.is_some() {
                return Err(PathError::invalid_path(
                    path,
                    format!("query on `{}` must be its first qualifier", segment.key),
                )
                .at(start));
            }
            segment.query = Some(Query::parse(query.as_str(), path)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::jsonpath::ErrorKind;

    #[test]
    fn test_plain_path() {
        let path = parse_path("$.loan.amount").expect("plain path should parse");
        assert_eq!(path.segments(), &[Segment::key("loan"), Segment::key("amount")]);
        assert!(!path.has_query());
    }

    #[test]
    fn test_dollar_is_optional() {
        assert_eq!(
            parse_path(".a.b").expect("path without $ should parse"),
            parse_path("$.a.b").expect("path with $ should parse")
        );
    }

    #[test]
    fn test_index_zero_is_not_absent() {
        let path = parse_path("$.items[0].name").expect("indexed path should parse");
        assert_eq!(path.segments()[0].index(), Some(0));
        assert_eq!(path.segments()[1].index(), None);
    }

    #[test]
    fn test_query_segment() {
        let path = parse_path("$.fees[?(@.type=='late')].amount").expect("query path should parse");
        let query = path.segments()[0].query().expect("first segment carries a query");
        assert_eq!(query.template(), json!({"type": "late"}));
        assert_eq!(path.segments()[0].index(), None);
        assert!(path.has_query());
    }

    #[test]
    fn test_query_with_index() {
        let path = parse_path("$.fees[?(@.type=='a')][1].amount").expect("query+index should parse");
        let first = &path.segments()[0];
        assert_eq!(first.index(), Some(1));
        assert!(first.query().is_some());
    }

    #[test]
    fn test_rejects_trailing_garbage() {
        let err = parse_path("$.a.b!").expect_err("trailing text is invalid");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
        assert_eq!(err.position, Some(5));
    }

    #[test]
    fn test_rejects_unsupported_selectors() {
        for path in ["$.a[*]", "$..a", "$.a[1:2]", "$.a[?(@.n>1)]", "$.a[-1]", "$['a']"] {
            assert!(parse_path(path).is_err(), "{path} should be rejected");
        }
    }

    #[test]
    fn test_rejects_empty_path() {
        assert!(parse_path("$").is_err());
        assert!(parse_path("").is_err());
    }

    #[test]
    fn test_repeated_index_descends_nested_arrays() {
        let path = parse_path("$.grid[0][1][2]").expect("nested indices should parse");
        let grid = &path.segments()[0];
        assert_eq!(grid.index(), Some(0));
        assert_eq!(grid.nested_indices(), &[1, 2]);
        assert_eq!(path.to_string(), "$.grid[0][1][2]");

        let path = parse_path("$.fees[?(@.t=='a')][1][0]").expect("query then indices should parse");
        assert_eq!(path.segments()[0].index(), Some(1));
        assert_eq!(path.segments()[0].nested_indices(), &[0]);
    }

    #[test]
    fn test_rejects_query_after_index() {
        let err = parse_path("$.grid[0][?(@.t=='a')]").expect_err("query must come first");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
        assert_eq!(err.position, Some(9));

        let err = parse_path("$.a[?(@.t=='a')][?(@.u=='b')]").expect_err("one query per segment");
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn test_rejects_oversized_index() {
        let err = parse_path("$.a[999999999999999999999999]").expect_err("index overflows usize");
        assert_eq!(err.kind(), ErrorKind::InvalidIndex);
    }

    #[test]
    fn test_display_is_canonical() {
        assert!(
            parse_path("$.a[ ?(@.k=='v') ][2].b").is_err(),
            "whitespace around a query is not part of the grammar"
        );

        let path = parse_path("$.a[?( @.k == \"v\" )][2].b").expect("path should parse");
        assert_eq!(path.to_string(), "$.a[?(@.k=='v')][2].b");
    }
}
