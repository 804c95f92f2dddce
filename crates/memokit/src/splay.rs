//! Splay tree: a self-adjusting binary search tree
//!
//! Every successful [`SplayTree::find`] rotates the located node up to the
//! root through zig, zig-zig and zig-zag steps, so recently accessed values
//! stay cheap to reach. Amortized cost is O(log n) per access; a single access
//! on a degenerate tree can still be O(n).
//!
//! Nodes are stored in an arena and never removed individually. Links
//! (including the parent back-link used for rotations) are arena indices.

use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicU64};

use tracing::trace;

use crate::error::{Error, Result};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

fn next_tree_id() -> u64 {
    NEXT_TREE_ID.fetch_add(1, atomic::Ordering::Relaxed)
}

/// Identifies a node inside one [`SplayTree`]
///
/// Ids stay valid until the tree is cleared. Ids from another tree, or from
/// before a [`SplayTree::clear`], are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    owner: u64,
    index: usize,
}

struct TreeNode<T> {
    value: T,
    parent: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// Splay tree over totally ordered values
///
/// Values smaller than a node go to its left; values not less than it go to
/// its right, so duplicates are kept. An in-order walk is always
/// non-decreasing.
pub struct SplayTree<T> {
    id: u64,
    nodes: Vec<TreeNode<T>>,
    root: Option<usize>,
    rotations: u64,
}

impl<T: Ord> Default for SplayTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> SplayTree<T> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self {
            id: next_tree_id(),
            nodes: Vec::new(),
            root: None,
            rotations: 0,
        }
    }

    /// Insert a value at a leaf position
    ///
    /// Does not splay: the new node stays where plain BST insertion puts it.
    pub fn insert(&mut self, value: T) {
        let idx = self.nodes.len();

        let Some(mut current) = self.root else {
            self.nodes.push(TreeNode {
                value,
                parent: None,
                left: None,
                right: None,
            });
            self.root = Some(idx);
            return;
        };

        loop {
            let go_left = value < self.nodes[current].value;
            let next = if go_left {
                self.nodes[current].left
            } else {
                self.nodes[current].right
            };

            match next {
                Some(child) => current = child,
                None => {
                    self.nodes.push(TreeNode {
                        value,
                        parent: Some(current),
                        left: None,
                        right: None,
                    });
                    if go_left {
                        self.nodes[current].left = Some(idx);
                    } else {
                        self.nodes[current].right = Some(idx);
                    }
                    return;
                }
            }
        }
    }

    /// Look up a value, splaying it to the root when found
    ///
    /// A miss leaves the tree untouched.
    pub fn find(&mut self, value: &T) -> Option<&T> {
        let idx = self.locate(value)?;
        self.splay(idx);
        Some(&self.nodes[idx].value)
    }

    /// Check for a value without restructuring the tree
    pub fn contains(&self, value: &T) -> bool {
        self.locate(value).is_some()
    }

    /// Rotate `node` left, promoting its right child into its place
    ///
    /// # Errors
    /// * `Error::InvalidHandle` - `node` is not part of this tree
    /// * `Error::PreconditionViolated` - `node` has no right child
    pub fn rotate_left(&mut self, node: NodeId) -> Result<()> {
        let idx = self.resolve(node)?;
        if self.nodes[idx].right.is_none() {
            return Err(Error::PreconditionViolated("rotate_left requires a right child"));
        }
        self.rotate_left_at(idx);
        Ok(())
    }

    /// Rotate `node` right, promoting its left child into its place
    ///
    /// # Errors
    /// * `Error::InvalidHandle` - `node` is not part of this tree
    /// * `Error::PreconditionViolated` - `node` has no left child
    pub fn rotate_right(&mut self, node: NodeId) -> Result<()> {
        let idx = self.resolve(node)?;
        if self.nodes[idx].left.is_none() {
            return Err(Error::PreconditionViolated("rotate_right requires a left child"));
        }
        self.rotate_right_at(idx);
        Ok(())
    }

    /// Value at the root
    pub fn root(&self) -> Option<&T> {
        self.root.map(|idx| &self.nodes[idx].value)
    }

    /// Id of the root node
    pub fn root_id(&self) -> Option<NodeId> {
        self.root.map(|idx| self.node_id(idx))
    }

    /// Value stored at `node`
    pub fn value(&self, node: NodeId) -> Option<&T> {
        let idx = self.resolve(node).ok()?;
        Some(&self.nodes[idx].value)
    }

    /// Left child of `node`
    pub fn left(&self, node: NodeId) -> Option<NodeId> {
        let idx = self.resolve(node).ok()?;
        self.nodes[idx].left.map(|child| self.node_id(child))
    }

    /// Right child of `node`
    pub fn right(&self, node: NodeId) -> Option<NodeId> {
        let idx = self.resolve(node).ok()?;
        self.nodes[idx].right.map(|child| self.node_id(child))
    }

    /// Parent of `node`
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let idx = self.resolve(node).ok()?;
        self.nodes[idx].parent.map(|parent| self.node_id(parent))
    }

    /// Number of stored values, duplicates included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Total single rotations performed so far
    pub fn rotations(&self) -> u64 {
        self.rotations
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(usize, usize)> = self.root.map(|idx| (idx, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max = max.max(depth);
            let node = &self.nodes[idx];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }

        max
    }

    /// Iterate values in order
    pub fn iter(&self) -> InOrder<'_, T> {
        let mut iter = InOrder {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Drop all values, invalidate outstanding ids and zero the rotation count
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.rotations = 0;
        self.id = next_tree_id();
    }

    fn node_id(&self, idx: usize) -> NodeId {
        NodeId {
            owner: self.id,
            index: idx,
        }
    }

    fn resolve(&self, node: NodeId) -> Result<usize> {
        if node.owner == self.id && node.index < self.nodes.len() {
            Ok(node.index)
        } else {
            Err(Error::InvalidHandle(node.index))
        }
    }

    fn locate(&self, value: &T) -> Option<usize> {
        let mut cursor = self.root;
        while let Some(idx) = cursor {
            let node = &self.nodes[idx];
            cursor = match value.cmp(&node.value) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Some(idx),
            };
        }
        None
    }

    fn splay(&mut self, idx: usize) {
        let before = self.rotations;

        while let Some(parent) = self.nodes[idx].parent {
            let is_left = self.nodes[parent].left == Some(idx);

            match self.nodes[parent].parent {
                // Zig
                None => {
                    if is_left {
                        self.rotate_right_at(parent);
                    } else {
                        self.rotate_left_at(parent);
                    }
                }
                Some(grand) => {
                    let parent_is_left = self.nodes[grand].left == Some(parent);
                    match (is_left, parent_is_left) {
                        // Zig-zig
                        (true, true) => {
                            self.rotate_right_at(grand);
                            self.rotate_right_at(parent);
                        }
                        (false, false) => {
                            self.rotate_left_at(grand);
                            self.rotate_left_at(parent);
                        }
                        // Zig-zag
                        (true, false) => {
                            self.rotate_right_at(parent);
                            self.rotate_left_at(grand);
                        }
                        (false, true) => {
                            self.rotate_left_at(parent);
                            self.rotate_right_at(grand);
                        }
                    }
                }
            }
        }

        trace!(rotations = self.rotations - before, "splayed node to root");
    }

    fn rotate_left_at(&mut self, idx: usize) {
        let Some(pivot) = self.nodes[idx].right else {
            return;
        };

        let inner = self.nodes[pivot].left;
        self.nodes[idx].right = inner;
        if let Some(child) = inner {
            self.nodes[child].parent = Some(idx);
        }

        self.replace_in_parent(idx, pivot);

        self.nodes[pivot].left = Some(idx);
        self.nodes[idx].parent = Some(pivot);
        self.rotations += 1;
    }

    fn rotate_right_at(&mut self, idx: usize) {
        let Some(pivot) = self.nodes[idx].left else {
            return;
        };

        let inner = self.nodes[pivot].right;
        self.nodes[idx].left = inner;
        if let Some(child) = inner {
            self.nodes[child].parent = Some(idx);
        }

        self.replace_in_parent(idx, pivot);

        self.nodes[pivot].right = Some(idx);
        self.nodes[idx].parent = Some(pivot);
        self.rotations += 1;
    }

    /// Put `new` into the slot `old` occupies under its parent (or the root)
    fn replace_in_parent(&mut self, old: usize, new: usize) {
        let parent = self.nodes[old].parent;
        self.nodes[new].parent = parent;

        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if self.nodes[p].left == Some(old) {
                    self.nodes[p].left = Some(new);
                } else {
                    self.nodes[p].right = Some(new);
                }
            }
        }
    }
}

/// In-order iterator over a [`SplayTree`]
pub struct InOrder<'a, T> {
    tree: &'a SplayTree<T>,
    stack: Vec<usize>,
}

impl<'a, T> InOrder<'a, T> {
    fn push_left_spine(&mut self, mut cursor: Option<usize>) {
        while let Some(idx) = cursor {
            self.stack.push(idx);
            cursor = self.tree.nodes[idx].left;
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = &self.tree.nodes[idx];
        self.push_left_spine(node.right);
        Some(&node.value)
    }
}
