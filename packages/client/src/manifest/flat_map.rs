//! Flattened view of a document with exact-path lookup

use hashbrown::HashMap;
use serde_json::Value;

use super::flatten::flatten;

/// Ordered `path -> scalar` mapping derived from a document
///
/// Iteration follows flattening order. Should two leaves collapse onto the
/// same path (an object key spelled like `a[0]` next to an array `a`), the
/// entry keeps its first position and takes the later value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatMap {
    entries: Vec<(String, Value)>,
    index: HashMap<String, usize>,
}

impl FlatMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `document` into a new map
    #[must_use]
    pub fn from_document(document: &Value) -> Self {
        flatten(document)
            .map(|(path, value)| (path, value.clone()))
            .collect()
    }

    pub fn insert(&mut self, path: String, value: Value) {
        if let Some(&slot) = self.index.get(&path) {
            self.entries[slot].1 = value;
        } else {
            self.index.insert(path.clone(), self.entries.len());
            self.entries.push((path, value));
        }
    }

    /// Exact-match lookup; no normalisation is applied to `path`
    #[inline]
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.index.get(path).map(|&slot| &self.entries[slot].1)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for FlatMap {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut map = FlatMap::new();
        for (path, value) in iter {
            map.insert(path, value);
        }
        map
    }
}

impl IntoIterator for FlatMap {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_lookup_is_exact() {
        let flat = FlatMap::from_document(&json!({"a": {"b": 1}}));
        assert_eq!(flat.get("$.a.b"), Some(&json!(1)));
        assert_eq!(flat.get("$.a"), None);
        assert_eq!(flat.get("$.a.b "), None);
        assert_eq!(flat.get("$['a']['b']"), None);
    }

    #[test]
    fn test_colliding_paths_keep_first_position_last_value() {
        let flat = FlatMap::from_document(&json!({"a": [1], "z": 0, "a[0]": 2}));
        let entries: Vec<(&str, &Value)> = flat.iter().collect();
        assert_eq!(entries, vec![("$.a[0]", &json!(2)), ("$.z", &json!(0))]);
        assert_eq!(flat.len(), 2);
    }
}
