//! Positions and ranges in the model and view trees.
//!
//! A position is a path of child offsets from the fragment root: `[2]` is the
//! gap before the third top-level node, `[2, 0]` the gap before the first
//! child of that node. The last path element is the offset inside the parent.
//! Positions are ordered lexicographically by path, which is document order
//! for positions that address real gaps.
//!
//! The two trees use distinct position types so a model position can never be
//! handed to code expecting a view position.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// Read access to a tree shared by the model and the view.
pub trait TreeNode: Sized {
    /// Element name, `None` for text nodes.
    fn name(&self) -> Option<&str>;
    fn children(&self) -> &[Self];
}

/// Marker for the tree a position belongs to.
pub trait Side {
    const LABEL: &'static str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Model {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {}

impl Side for Model {
    const LABEL: &'static str = "model";
}

impl Side for View {
    const LABEL: &'static str = "view";
}

pub struct Position<S> {
    path: Vec<usize>,
    side: PhantomData<S>,
}

pub type ModelPosition = Position<Model>;
pub type ViewPosition = Position<View>;

impl<S> Position<S> {
    /// Builds a position from a full path. An empty path is treated as the
    /// start of the root.
    pub fn new(path: Vec<usize>) -> Self {
        let path = if path.is_empty() { vec![0] } else { path };
        Self {
            path,
            side: PhantomData,
        }
    }

    /// The gap at `offset` among the children of the node at `parent`.
    pub fn at(parent: &[usize], offset: usize) -> Self {
        let mut path = parent.to_vec();
        path.push(offset);
        Self::new(path)
    }

    /// The gap immediately after the node addressed by `node_path`.
    pub fn after(node_path: &[usize]) -> Self {
        let mut position = Self::new(node_path.to_vec());
        position.advance();
        position
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn parent(&self) -> &[usize] {
        &self.path[..self.path.len() - 1]
    }

    pub fn offset(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    /// The gap after the node that follows this position.
    pub fn next(&self) -> Self {
        let mut next = self.clone();
        next.advance();
        next
    }

    fn advance(&mut self) {
        if let Some(last) = self.path.last_mut() {
            *last += 1;
        }
    }

    pub fn is_before(&self, other: &Self) -> bool {
        self.path < other.path
    }

    /// The children of this position's parent, if the parent exists.
    pub fn siblings<'a, N: TreeNode>(&self, roots: &'a [N]) -> Option<&'a [N]> {
        let mut children = roots;
        for &index in self.parent() {
            children = children.get(index)?.children();
        }
        Some(children)
    }

    /// The node immediately after this position.
    pub fn node_after<'a, N: TreeNode>(&self, roots: &'a [N]) -> Option<&'a N> {
        self.siblings(roots)?.get(self.offset())
    }
}

// Manual impls: derives would demand the uninhabited markers implement them.
impl<S> Clone for Position<S> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            side: PhantomData,
        }
    }
}

impl<S> PartialEq for Position<S> {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl<S> Eq for Position<S> {}

impl<S> PartialOrd for Position<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for Position<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl<S> std::hash::Hash for Position<S> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl<S: Side> fmt::Debug for Position<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl<S: Side> fmt::Display for Position<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", S::LABEL, self.path)
    }
}

/// A pair of positions in the same tree.
pub struct Range<S> {
    pub start: Position<S>,
    pub end: Position<S>,
}

pub type ModelRange = Range<Model>;
pub type ViewRange = Range<View>;

impl<S> Range<S> {
    pub fn new(start: Position<S>, end: Position<S>) -> Self {
        Self { start, end }
    }

    /// Spans all children of the node at `node_path`.
    pub fn inside(node_path: &[usize], child_count: usize) -> Self {
        Self::new(
            Position::at(node_path, 0),
            Position::at(node_path, child_count),
        )
    }

    /// Spans the node at `node_path` itself.
    pub fn on(node_path: &[usize]) -> Self {
        Self::new(
            Position::new(node_path.to_vec()),
            Position::after(node_path),
        )
    }
}

impl<S> Clone for Range<S> {
    fn clone(&self) -> Self {
        Self::new(self.start.clone(), self.end.clone())
    }
}

impl<S> PartialEq for Range<S> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<S> Eq for Range<S> {}

impl<S: Side> fmt::Debug for Range<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
