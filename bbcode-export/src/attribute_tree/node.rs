use crate::model::Attributes;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

/// A node of the attribute interval tree.
///
/// `start..end` is a half-open character range relative to the text run the
/// tree was built from. A parent's range always covers its children's ranges.
/// Leaves carry the text; wrappers created while merging carry none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(super) id: NodeId,
    pub(super) start: usize,
    pub(super) end: usize,
    pub(super) attributes: Attributes,
    pub(super) text: Option<String>,
    pub(super) children: Vec<Node>,
}

impl Node {
    pub(super) fn new(
        id: NodeId,
        start: usize,
        end: usize,
        attributes: Attributes,
        text: Option<String>,
    ) -> Self {
        Self {
            id,
            start,
            end,
            attributes,
            text,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Own data only, under a new id. Children are not copied.
    pub(super) fn detached_copy(&self, id: NodeId) -> Node {
        Node::new(
            id,
            self.start,
            self.end,
            self.attributes.clone(),
            self.text.clone(),
        )
    }

    pub(super) fn cover(&mut self, start: usize, end: usize) {
        self.start = self.start.min(start);
        self.end = self.end.max(end);
    }

    pub(super) fn sort_by_start(&mut self) {
        self.children.sort_by_key(|child| child.start);
        for child in &mut self.children {
            child.sort_by_start();
        }
    }

    /// Moves `attributes` to the front of this node's attribute list.
    pub(super) fn hoist(&mut self, attributes: &Attributes) {
        self.attributes.prepend(attributes);
    }

    pub(super) fn strip(&mut self, attributes: &Attributes) {
        for name in attributes.keys() {
            self.attributes.remove(name);
        }
    }
}

/// Compact one-line outline: `[start,end){attrs} "text" (children...)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end)?;
        if !self.attributes.is_empty() {
            write!(f, "{}", self.attributes)?;
        }
        if let Some(text) = &self.text {
            write!(f, " {text:?}")?;
        }
        if !self.children.is_empty() {
            f.write_str(" (")?;
            for (index, child) in self.children.iter().enumerate() {
                if index > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{child}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}
