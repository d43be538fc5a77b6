//! Equality-conjunction filter queries
//!
//! A query such as `?(@.type=='fee' && @.year==2020)` selects the array
//! elements whose fields equal every literal. The same conditions seed the
//! objects appended when no element matches yet.

use std::fmt;

use serde_json::{Map, Value};

use super::error::{PathError, PathResult};
use super::grammar::{CONDITION, QUERY};

/// `@.field == literal`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub value: Value,
}

impl Condition {
    #[must_use]
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// True when `element` is an object whose `field` equals the literal
    #[inline]
    #[must_use]
    pub fn matches(&self, element: &Value) -> bool {
        element
            .as_object()
            .and_then(|fields| fields.get(&self.field))
            .is_some_and(|found| *found == self.value)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Value::String(text) => write!(f, "@.{}=='{text}'", self.field),
            other => write!(f, "@.{}=={other}", self.field),
        }
    }
}

/// Conjunction of equality conditions
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    conditions: Vec<Condition>,
}

impl Query {
    /// Build a query from already typed conditions
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` when `conditions` is empty.
    pub fn new(conditions: Vec<Condition>) -> PathResult<Self> {
        if conditions.is_empty() {
            return Err(PathError::invalid_query(
                "",
                "a query needs at least one condition",
            ));
        }
        Ok(Self { conditions })
    }

    /// Parse the text of a `?(...)` qualifier
    ///
    /// `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuery` when the text is not a `&&` conjunction of
    /// equality conditions or a literal cannot be represented as a JSON scalar.
    pub fn parse(text: &str, path: &str) -> PathResult<Self> {
        if !QUERY.is_match(text) {
            return Err(PathError::invalid_query(
                path,
                format!("`{text}` is not a conjunction of `@.field==value` conditions"),
            ));
        }

        let body = text
            .strip_prefix("?(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| PathError::invalid_query(path, format!("malformed query `{text}`")))?;

        let mut conditions = Vec::new();
        for caps in CONDITION.captures_iter(body) {
            let field = &caps["field"];
            let value = parse_literal(&caps["value"], path)?;
            conditions.push(Condition::new(field, value));
        }

        if conditions.is_empty() {
            return Err(PathError::invalid_query(
                path,
                format!("query `{text}` has no conditions"),
            ));
        }
        Ok(Self { conditions })
    }

    #[inline]
    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// True when `element` satisfies every condition
    #[inline]
    #[must_use]
    pub fn matches(&self, element: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(element))
    }

    /// Positions of the elements satisfying the query, in array order
    #[must_use]
    pub fn matching_indices(&self, elements: &[Value]) -> Vec<usize> {
        elements
            .iter()
            .enumerate()
            .filter(|(_, element)| self.matches(element))
            .map(|(i, _)| i)
            .collect()
    }

    /// Object pre-populated with the condition fields, so it satisfies the query
    #[must_use]
    pub fn template(&self) -> Value {
        let mut fields = Map::new();
        for condition in &self.conditions {
            fields.insert(condition.field.clone(), condition.value.clone());
        }
        Value::Object(fields)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("?(")?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str("&&")?;
            }
            write!(f, "{condition}")?;
        }
        f.write_str(")")
    }
}

/// Turn a grammar-approved literal into a typed JSON scalar
fn parse_literal(raw: &str, path: &str) -> PathResult<Value> {
    match raw {
        "true" => return Ok(Value::Bool(true)),
        "false" => return Ok(Value::Bool(false)),
        "null" => return Ok(Value::Null),
        _ => {}
    }

    for quote in ['\'', '"'] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return Ok(Value::String(inner.trim().to_string()));
        }
    }

    raw.parse::<u64>()
        .map(Value::from)
        .map_err(|_| {
            PathError::invalid_query(path, format!("literal `{raw}` is not a JSON scalar"))
        })
}
