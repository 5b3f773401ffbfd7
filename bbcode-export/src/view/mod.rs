//! The presentation tree a host renders from the model.
//!
//! View element names are HTML-like (`p`, `br`, `ul`, `ol`, `li`). The view
//! has no attribute elements: inline formatting lives only in the model, so
//! view text nodes correspond one to one with model text nodes.

use crate::position::TreeNode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
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
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text(Text),
    Element(Element),
}

impl Node {
    pub fn text(data: impl Into<String>) -> Self {
        Node::Text(Text { data: data.into() })
    }

    pub fn element(name: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element(Element {
            name: name.into(),
            children,
        })
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

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}
