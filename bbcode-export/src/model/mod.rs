//! The semantic document tree the converter reads formatting from.
//!
//! A model fragment is a forest of elements and text nodes. Only text nodes
//! carry attributes; block structure is expressed by element names such as
//! `paragraph`, `listItem` and `softBreak`.
//!
//! Documents are usually loaded from JSON:
//!
//! ```json
//! { "children": [
//!     { "type": "element", "name": "paragraph", "children": [
//!         { "type": "text", "data": "Hello " },
//!         { "type": "text", "data": "world", "attributes": { "bold": true } }
//!     ] }
//! ] }
//! ```

mod attributes;

pub use attributes::{AttributeValue, Attributes};

use crate::error::ExportError;
use crate::position::TreeNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Fragment {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn from_json(source: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text(Text),
    Element(Element),
}

impl Node {
    pub fn text(data: impl Into<String>) -> Self {
        Node::Text(Text::new(data))
    }

    pub fn element(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element::new(name).with_children(children))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }
}

impl TreeNode for Node {
    fn name(&self) -> Option<&str> {
        match self {
            Node::Text(_) => None,
            Node::Element(element) => Some(&element.name),
        }
    }

    fn children(&self) -> &[Node] {
        match self {
            Node::Text(_) => &[],
            Node::Element(element) => &element.children,
        }
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Node::Text(text)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// A run of characters sharing one attribute set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub data: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
}

impl Text {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name, value);
        self
    }

    /// Length in characters, the unit of every offset inside a text run.
    pub fn len(&self) -> usize {
        self.data.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(name, value);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }
}
