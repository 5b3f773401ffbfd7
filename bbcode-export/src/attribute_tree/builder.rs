use super::node::{Node, NodeId};
use crate::model::Attributes;

/// Incremental constructor for attribute trees.
///
/// The builder keeps an active node, addressed by its child-index path from
/// the root, and inserts new nodes as the active node's last child. Every
/// insertion widens the ranges of all nodes on the active path so parents keep
/// covering their children. The root has no range of its own until the first
/// insertion, which it adopts.
#[derive(Debug)]
pub struct TreeBuilder {
    root: Node,
    root_spanned: bool,
    next_id: usize,
    active: Vec<usize>,
    last_inserted: Option<Vec<usize>>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            root: Node::new(NodeId(0), 0, 0, Attributes::new(), None),
            root_spanned: false,
            next_id: 1,
            active: Vec::new(),
            last_inserted: None,
        }
    }

    /// Inserts a fresh node under the active node.
    pub fn add_leaf(
        &mut self,
        start: usize,
        end: usize,
        attributes: Attributes,
        text: Option<String>,
    ) -> &mut Self {
        let id = self.allocate_id();
        self.attach(Node::new(id, start, end, attributes, text))
    }

    /// Inserts a copy of `node`'s own data under the active node.
    pub fn add_node(&mut self, node: &Node) -> &mut Self {
        let id = self.allocate_id();
        self.attach(node.detached_copy(id))
    }

    /// Makes the most recently inserted node the active node.
    pub fn focus_last_inserted(&mut self) -> &mut Self {
        if let Some(path) = &self.last_inserted {
            self.active = path.clone();
        }
        self
    }

    /// Makes the active node's parent the active node. No-op at the root.
    pub fn focus_parent(&mut self) -> &mut Self {
        self.active.pop();
        self
    }

    pub fn active_node(&self) -> &Node {
        let mut node = &self.root;
        for &index in &self.active {
            node = &node.children[index];
        }
        node
    }

    pub(super) fn active_node_mut(&mut self) -> &mut Node {
        let mut node = &mut self.root;
        for &index in &self.active {
            node = &mut node.children[index];
        }
        node
    }

    /// Finishes the tree, ordering every node's children by start offset.
    pub fn into_tree(mut self) -> Node {
        self.root.sort_by_start();
        self.root
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn attach(&mut self, node: Node) -> &mut Self {
        let (start, end) = (node.start, node.end);

        if self.root_spanned {
            self.root.cover(start, end);
        } else {
            self.root.start = start;
            self.root.end = end;
            self.root_spanned = true;
        }

        let mut parent = &mut self.root;
        for &index in &self.active {
            parent = &mut parent.children[index];
            parent.cover(start, end);
        }
        parent.children.push(node);

        let mut path = self.active.clone();
        path.push(parent.children.len() - 1);
        self.last_inserted = Some(path);
        self
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
