use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Extensible attribute storage for a language element
///
/// Holds the element's named attribute values (description, brief
/// description, and so on) as JSON values. Backed by a BTreeMap so that
/// iteration order is deterministic, which the extension applier and the
/// view projector rely on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Attributes {
    data: BTreeMap<String, serde_json::Value>,
}

impl Attributes {
    /// Create a new empty Attributes instance
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Get a value by attribute name
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }

    /// Set a value by attribute name
    pub fn set(&mut self, name: String, value: serde_json::Value) {
        self.data.insert(name, value);
    }

    /// Remove a value by attribute name
    pub fn remove(&mut self, name: &str) -> Option<serde_json::Value> {
        self.data.remove(name)
    }

    /// Check if an attribute exists
    pub fn contains(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Iterate over attribute names in deterministic order
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    /// Iterate over (name, value) pairs in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.data.iter()
    }

    /// Keep only the attributes whose names satisfy the predicate
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.data.retain(|name, _| keep(name));
    }

    /// Get the number of attributes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no attributes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<BTreeMap<String, serde_json::Value>> for Attributes {
    fn from(data: BTreeMap<String, serde_json::Value>) -> Self {
        Self { data }
    }
}

impl From<Attributes> for BTreeMap<String, serde_json::Value> {
    fn from(attributes: Attributes) -> Self {
        attributes.data
    }
}
