//! Iterative insertion walk
//!
//! The walk keeps a frontier of cursors into the record being built. Each
//! segment maps every cursor to the slots it selects: one slot for a key or
//! a literal index, one or more for a query (broadcast). Nested indices then
//! move each slot down into inner arrays. The value is written to every slot
//! selected by the final segment.

use serde_json::{Map, Value};

use crate::error::{ProjectionError, ProjectionResult};
use crate::jsonpath::{PathError, Query, Segment, TargetPath};

/// One insertion of `value` at `path`
pub(crate) struct Walk<'p> {
    pub(crate) path: &'p TargetPath,
    pub(crate) target: &'p str,
    pub(crate) max_index: usize,
}

impl Walk<'_> {
    /// Write `value` into `record`, returning how many slots were written
    pub(crate) fn insert(&self, value: &Value, record: &mut Value) -> ProjectionResult<usize> {
        let Some((last, parents)) = self.path.segments().split_last() else {
            return Err(PathError::invalid_path(self.target, "path has no segments").into());
        };

        let mut frontier: Vec<&mut Value> = vec![record];
        for segment in parents {
            let mut next = Vec::with_capacity(frontier.len());
            for node in frontier {
                next.extend(self.select(node, segment)?);
            }
            frontier = next;
        }

        let mut written = 0;
        for node in frontier {
            for slot in self.select(node, last)? {
                *slot = value.clone();
                written += 1;
            }
        }
        Ok(written)
    }

    fn select<'r>(
        &self,
        node: &'r mut Value,
        segment: &Segment,
    ) -> ProjectionResult<Vec<&'r mut Value>> {
        let slots = self.select_in_object(node, segment)?;
        if segment.nested_indices().is_empty() {
            return Ok(slots);
        }
        slots
            .into_iter()
            .map(|slot| self.descend_nested(slot, segment))
            .collect()
    }

    fn select_in_object<'r>(
        &self,
        node: &'r mut Value,
        segment: &Segment,
    ) -> ProjectionResult<Vec<&'r mut Value>> {
        let members = match node {
            Value::Object(members) => members,
            other => {
                return Err(self.conflict(format!(
                    "expected object to hold '{}', found {}",
                    segment.name(),
                    kind_of(other)
                )));
            }
        };

        match (segment.query(), segment.index()) {
            (None, None) => Ok(vec![
                members
                    .entry(segment.name())
                    .or_insert_with(empty_object),
            ]),
            (None, Some(index)) => {
                self.check_index(index)?;
                let elements = self.array_at(members, segment)?;
                if elements.len() <= index {
                    elements.resize_with(index + 1, empty_object);
                }
                Ok(vec![&mut elements[index]])
            }
            (Some(query), Some(index)) => {
                self.check_index(index)?;
                let elements = self.array_at(members, segment)?;
                let position = nth_match(elements, query, index);
                Ok(vec![&mut elements[position]])
            }
            (Some(query), None) => {
                let elements = self.array_at(members, segment)?;
                let mut matching = query.matching_indices(elements);
                if matching.is_empty() {
                    elements.push(query.template());
                    matching.push(elements.len() - 1);
                }
                log::debug!(
                    "query {query} on '{}' selects {} element(s)",
                    segment.name(),
                    matching.len()
                );
                Ok(elements
                    .iter_mut()
                    .enumerate()
                    .filter(|(i, _)| matching.binary_search(i).is_ok())
                    .map(|(_, element)| element)
                    .collect())
            }
        }
    }

    /// Follow the nested indices of `segment` down from `slot`
    ///
    /// An empty object left behind by padding becomes an array here.
    fn descend_nested<'r>(
        &self,
        mut slot: &'r mut Value,
        segment: &Segment,
    ) -> ProjectionResult<&'r mut Value> {
        for &index in segment.nested_indices() {
            self.check_index(index)?;
            if slot.as_object().is_some_and(Map::is_empty) {
                *slot = Value::Array(Vec::new());
            }
            let elements = match slot {
                Value::Array(elements) => elements,
                other => {
                    return Err(self.conflict(format!(
                        "expected nested array under '{}', found {}",
                        segment.name(),
                        kind_of(other)
                    )));
                }
            };
            if elements.len() <= index {
                elements.resize_with(index + 1, empty_object);
            }
            slot = &mut elements[index];
        }
        Ok(slot)
    }

    fn array_at<'r>(
        &self,
        members: &'r mut Map<String, Value>,
        segment: &Segment,
    ) -> ProjectionResult<&'r mut Vec<Value>> {
        match members
            .entry(segment.name())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(elements) => Ok(elements),
            other => Err(self.conflict(format!(
                "expected array at '{}', found {}",
                segment.name(),
                kind_of(other)
            ))),
        }
    }

    fn check_index(&self, index: usize) -> ProjectionResult<()> {
        if index > self.max_index {
            return Err(PathError::invalid_index(
                self.target,
                format!("index {index} exceeds the limit of {}", self.max_index),
            )
            .into());
        }
        Ok(())
    }

    fn conflict(&self, reason: String) -> ProjectionError {
        ProjectionError::conflict(self.target, reason)
    }
}

/// Position of the `n`-th element matching `query`, appending seeded
/// elements until that many matches exist
fn nth_match(elements: &mut Vec<Value>, query: &Query, n: usize) -> usize {
    let matching = query.matching_indices(elements);
    if let Some(&position) = matching.get(n) {
        return position;
    }
    for _ in matching.len()..=n {
        elements.push(query.template());
    }
    elements.len() - 1
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn insert(target: &str, value: Value, record: &mut Value) -> ProjectionResult<usize> {
        let path = TargetPath::parse(target)?;
        Walk {
            path: &path,
            target,
            max_index: 100,
        }
        .insert(&value, record)
    }

    #[test]
    fn test_nth_match_appends_until_enough() {
        let query = Query::parse("?(@.t=='a')", "$.x").expect("query should parse");
        let mut elements = vec![json!({"t": "a"}), json!({"t": "b"})];
        assert_eq!(nth_match(&mut elements, &query, 0), 0);
        assert_eq!(nth_match(&mut elements, &query, 2), 3);
        assert_eq!(
            elements,
            vec![json!({"t": "a"}), json!({"t": "b"}), json!({"t": "a"}), json!({"t": "a"})]
        );
    }

    #[test]
    fn test_broadcast_reports_every_slot() {
        let mut record = json!({"tags": [{"type": "a"}, {"type": "b"}, {"type": "a"}]});
        let written = insert("$.tags[?(@.type=='a')].val", json!(1), &mut record)
            .expect("insert should succeed");
        assert_eq!(written, 2);
    }

    #[test]
    fn test_descending_into_scalar_conflicts() {
        let mut record = json!({"a": 5});
        let err = insert("$.a.b", json!(1), &mut record).expect_err("scalar cannot hold keys");
        assert_eq!(
            err,
            ProjectionError::conflict("$.a.b", "expected object to hold 'b', found number")
        );
    }

    #[test]
    fn test_indexing_non_array_conflicts() {
        let mut record = json!({"a": {"k": 1}});
        let err = insert("$.a[0]", json!(1), &mut record).expect_err("object cannot be indexed");
        assert_eq!(
            err,
            ProjectionError::conflict("$.a[0]", "expected array at 'a', found object")
        );
    }

    #[test]
    fn test_index_limit() {
        let mut record = json!({});
        let err = insert("$.a[101]", json!(1), &mut record).expect_err("index above limit");
        assert!(err.is_path());
        assert_eq!(record, json!({}));
    }

    #[test]
    fn test_nested_indices_pad_each_level() {
        let mut record = json!({});
        insert("$.grid[1][2]", json!(7), &mut record).expect("insert should succeed");
        assert_eq!(record, json!({"grid": [{}, [{}, {}, 7]]}));

        insert("$.grid[1][0].name", json!("x"), &mut record).expect("insert should succeed");
        assert_eq!(record, json!({"grid": [{}, [{"name": "x"}, {}, 7]]}));
    }

    #[test]
    fn test_nested_index_into_filled_object_conflicts() {
        let mut record = json!({"grid": [{"a": 1}]});
        let err = insert("$.grid[0][0]", json!(2), &mut record).expect_err("object holds data");
        assert!(matches!(err, ProjectionError::Conflict { .. }));
    }

    #[test]
    fn test_nested_index_limit() {
        let mut record = json!({});
        let err = insert("$.grid[0][101]", json!(1), &mut record).expect_err("above the limit");
        assert!(err.is_path());
    }
}
