//! Compiled target path grammar
//!
//! The grammar is compiled once per process and shared by every parse.
//!
//! ```text
//! path      := "$"? segment+
//! segment   := "." KEY qualifier*
//! qualifier := "[" INDEX "]" | "[" query "]"
//! query     := "?(" condition ("&&" condition)* ")"
//! condition := "@." FIELD "==" VALUE
//! VALUE     := 'text' | "text" | INTEGER | true | false | null
//! ```

use lazy_static::lazy_static;
use regex::Regex;

/// Literal accepted on the right-hand side of a condition
const VALUE: &str = r#"(?:'[\w.\s-]+'|"[\w.\s-]+"|\d+|true|false|null)"#;

fn condition_pattern() -> String {
    format!(r"(?:@\.\w+\s*==\s*{VALUE})")
}

fn query_pattern() -> String {
    let condition = condition_pattern();
    format!(r"(?:\?\(\s*{condition}(?:\s*&&\s*{condition})*\s*\))")
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|e| panic!("target path grammar failed to compile: {e}"))
}

lazy_static! {
    /// One `.key` followed by its run of bracket qualifiers
    pub(crate) static ref SEGMENT: Regex = compile(&format!(
        r"\.(?P<key>\w+)(?P<qualifiers>(?:\[(?:\d+|{})\])*)",
        query_pattern()
    ));

    /// A single bracket qualifier inside a segment's qualifier run
    pub(crate) static ref QUALIFIER: Regex = compile(&format!(
        r"\[(?:(?P<index>\d+)|(?P<query>{}))\]",
        query_pattern()
    ));

    /// A complete `?(...)` query and nothing else
    pub(crate) static ref QUERY: Regex = compile(&format!("^{}$", query_pattern()));

    /// One equality condition inside a query
    pub(crate) static ref CONDITION: Regex = compile(&format!(
        r"@\.(?P<field>\w+)\s*==\s*(?P<value>{VALUE})"
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_captures_key_and_qualifiers() {
        let caps = SEGMENT
            .captures(".items[?(@.type=='a')][1]")
            .expect("segment should match");
        assert_eq!(&caps["key"], "items");
        assert_eq!(&caps["qualifiers"], "[?(@.type=='a')][1]");
    }

    #[test]
    fn test_qualifier_reports_unfired_group_as_absent() {
        let caps = QUALIFIER.captures("[0]").expect("index qualifier should match");
        assert_eq!(caps.name("index").map(|m| m.as_str()), Some("0"));
        assert!(caps.name("query").is_none());
    }

    #[test]
    fn test_condition_allows_whitespace() {
        let caps = CONDITION
            .captures("@.kind  ==  \"loan fee\"")
            .expect("condition should match");
        assert_eq!(&caps["field"], "kind");
        assert_eq!(&caps["value"], "\"loan fee\"");
    }

    #[test]
    fn test_query_is_anchored() {
        assert!(QUERY.is_match("?( @.a==1 && @.b=='x' )"));
        assert!(!QUERY.is_match("?(@.a==1 || @.b==2)"));
        assert!(!QUERY.is_match("?(@.a==1)]"));
    }

    #[test]
    fn test_query_rejects_other_operators() {
        assert!(!QUALIFIER.is_match("[?(@.n>1)]"));
        assert!(!QUALIFIER.is_match("[?(@.n==1||@.n==2)]"));
    }
}
