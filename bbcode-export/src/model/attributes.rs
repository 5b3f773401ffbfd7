//! Ordered attribute sets carried by model text nodes and interval tree nodes.
//!
//! Attribute order matters: it is the order in which opening tags are emitted
//! for a node, so the set behaves like an insertion-ordered map rather than a
//! hash map.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Value of a single formatting attribute.
///
/// Values are compared by strict equality when deciding whether two adjacent
/// runs can share one tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Text(String),
    /// Any other JSON value (arrays, objects, floats), kept verbatim.
    Other(serde_json::Value),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(value) => write!(f, "{value}"),
            AttributeValue::Integer(value) => write!(f, "{value}"),
            AttributeValue::Text(value) => f.write_str(value),
            AttributeValue::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

/// Insertion-ordered map of attribute names to values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, AttributeValue)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Sets an attribute. An existing entry keeps its position.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<AttributeValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Places every entry of `other` in front of the current entries,
    /// replacing entries with the same name.
    pub fn prepend(&mut self, other: &Attributes) {
        self.entries.retain(|(name, _)| !other.contains(name));
        let mut merged = other.entries.clone();
        merged.append(&mut self.entries);
        self.entries = merged;
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Builder-style insert, handy when assembling documents by hand.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (name, value) in iter {
            attributes.insert(name, value);
        }
        attributes
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (name, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("}")
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AttributesVisitor;

        impl<'de> Visitor<'de> for AttributesVisitor {
            type Value = Attributes;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of attribute names to values")
            }

            // Entries arrive in source order, which becomes the attribute order.
            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Attributes, M::Error> {
                let mut attributes = Attributes::new();
                while let Some((name, value)) = access.next_entry::<String, AttributeValue>()? {
                    attributes.insert(name, value);
                }
                Ok(attributes)
            }
        }

        deserializer.deserialize_map(AttributesVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_position_of_existing_entry() {
        let mut attributes = Attributes::new().with("bold", true).with("italic", true);
        attributes.insert("bold", false);
        let keys: Vec<_> = attributes.keys().collect();
        assert_eq!(keys, vec!["bold", "italic"]);
        assert_eq!(attributes.get("bold"), Some(&AttributeValue::Bool(false)));
    }

    #[test]
    fn prepend_moves_entries_to_front() {
        let mut attributes = Attributes::new()
            .with("linkHref", "http://x")
            .with("italic", true);
        attributes.prepend(&Attributes::new().with("italic", true));
        let keys: Vec<_> = attributes.keys().collect();
        assert_eq!(keys, vec!["italic", "linkHref"]);
    }

    #[test]
    fn json_object_order_is_preserved() {
        let attributes: Attributes =
            serde_json::from_str(r#"{"underline": true, "bold": true, "linkHref": "/a"}"#)
                .unwrap();
        let keys: Vec<_> = attributes.keys().collect();
        assert_eq!(keys, vec!["underline", "bold", "linkHref"]);
        assert_eq!(
            attributes.get("linkHref"),
            Some(&AttributeValue::Text("/a".to_string()))
        );
    }

    #[test]
    fn display_lists_entries_in_order() {
        let attributes = Attributes::new().with("bold", true).with("size", 3i64);
        assert_eq!(attributes.to_string(), "{bold=true,size=3}");
    }
}
