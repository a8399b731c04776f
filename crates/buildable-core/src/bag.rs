//! The property bag: a dynamically-extensible named-property container.
//!
//! Slots are created lazily on first write. Absent properties are simply
//! absent; storing an explicit [`Value::Null`] keeps the slot and is
//! observable as a set property. A `BTreeMap` backs the bag so enumeration
//! order is deterministic, which keeps record hashing and printing stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Name-to-value store backing both the builder and the finished record.
///
/// `Clone` is the deep-copy operation: values are owned data, so the clone
/// shares no mutable state with its source and later mutation of either bag
/// cannot leak into the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBag {
    slots: BTreeMap<String, Value>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite the value for `name`. Accepts any value,
    /// including an explicit null.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.slots.insert(name.into(), value);
    }

    /// The stored value, or `None` when the property was never set.
    /// `Some(&Value::Null)` means a null was stored deliberately.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    /// Currently-set property names, in sorted order.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.slots.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_is_distinct_from_stored_null() {
        let mut bag = PropertyBag::new();
        assert!(bag.get("name").is_none());
        bag.set("name", Value::Null);
        assert_eq!(bag.get("name"), Some(&Value::Null));
        assert_eq!(bag.property_names().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut bag = PropertyBag::new();
        bag.set("name", Value::from("A"));
        bag.set("name", Value::from("B"));
        assert_eq!(bag.get("name"), Some(&Value::from("B")));
        assert_eq!(bag.len(), 1);
    }

    #[test]
    fn clone_is_independent_of_source() {
        let mut bag = PropertyBag::new();
        bag.set("name", Value::from("A"));
        let snapshot = bag.clone();
        bag.set("name", Value::from("B"));
        bag.set("extra", Value::Int(1));
        assert_eq!(snapshot.get("name"), Some(&Value::from("A")));
        assert!(snapshot.get("extra").is_none());
    }

    #[test]
    fn property_names_enumerate_in_sorted_order() {
        let mut bag = PropertyBag::new();
        bag.set("zeta", Value::Int(1));
        bag.set("alpha", Value::Int(2));
        assert_eq!(
            bag.property_names().collect::<Vec<_>>(),
            vec!["alpha", "zeta"]
        );
    }
}
