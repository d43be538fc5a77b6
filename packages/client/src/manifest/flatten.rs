//! Depth-first flattening of a JSON document into `(path, scalar)` pairs
//!
//! Object members extend the path with `.key`; array elements append
//! `[index]` to the path of the array itself, so `{"items": [1]}` yields
//! `$.items[0]`. Empty objects and arrays produce nothing.

use std::iter::FusedIterator;

use serde_json::Value;

/// Root prefix of every flattened path
pub const ROOT: &str = "$";

/// Flatten `document` lazily
///
/// The iterator is single pass and walks in document order (object members
/// in insertion order, array elements by position).
#[must_use]
pub fn flatten(document: &Value) -> Flatten<'_> {
    Flatten {
        stack: vec![(ROOT.to_string(), document)],
    }
}

/// Iterator returned by [`flatten`]
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    stack: Vec<(String, &'a Value)>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = (String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((path, value)) = self.stack.pop() {
            match value {
                Value::Object(members) => {
                    // reversed so the first member is popped first
                    for (key, child) in members.iter().rev() {
                        self.stack.push((format!("{path}.{key}"), child));
                    }
                }
                Value::Array(elements) => {
                    for (i, child) in elements.iter().enumerate().rev() {
                        self.stack.push((format!("{path}[{i}]"), child));
                    }
                }
                scalar => return Some((path, scalar)),
            }
        }
        None
    }
}

impl FusedIterator for Flatten<'_> {}
