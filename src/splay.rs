//! A splay tree. There is no balance information at all: instead every node that is inserted or
//! found is rotated all the way up to the root ("splayed"). Recently used keys stay near the top
//! and, while a single operation can walk a path of length `N`, any sequence of `M` operations
//! costs `O(M lg N)` in total.
//!
//! Deletion splits the tree around the deleted key and joins the two halves back together by
//! splaying the largest key of the left half to its root, which leaves that root without a right
//! child to hang the right half off.
//!
//! # Examples
//!
//! ```
//! use search_trees::splay::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [1, 2, 3] {
//!     tree.insert(key).unwrap();
//! }
//!
//! // The last key touched is always at the root.
//! assert_eq!(tree.root(), Some(&3));
//! assert!(tree.search(&1));
//! assert_eq!(tree.root(), Some(&1));
//!
//! // Misses leave the tree alone.
//! assert!(!tree.search(&42));
//! assert_eq!(tree.root(), Some(&1));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::{util, DuplicateKey, Order, SearchTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Clone)]
struct Node<K> {
    key: K,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K> Node<K> {
    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A self-adjusting Binary Search Tree of unique keys.
#[derive(Clone)]
pub struct Tree<K> {
    nodes: Vec<Node<K>>,
    root: Option<NodeId>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len())
            .field("pre_order", &self.traverse(Order::PreOrder))
            .finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The key at the root: the one most recently inserted or successfully searched for, unless
    /// a delete has happened since.
    pub fn root(&self) -> Option<&K> {
        self.root.map(|id| &self.nodes[id.0].key)
    }

    /// The number of nodes on the longest root-to-leaf path. Nothing bounds this: inserting
    /// sorted keys leaves a path as tall as the tree is large.
    pub fn height(&self) -> usize {
        util::height(self.root, |id| self.children(id))
    }

    /// All keys in the tree, visited in the given `order`. Traversals don't splay.
    pub fn traverse(&self, order: Order) -> Vec<&K> {
        let nodes = &self.nodes;
        util::traverse(
            self.root,
            order,
            |id| self.children(id),
            move |id: NodeId| &nodes[id.0].key,
        )
    }

    /// The smallest key in the tree. Doesn't splay.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root?;
        while let Some(left) = self.node(node).left {
            node = left;
        }
        Some(&self.node(node).key)
    }

    /// The largest key in the tree. Doesn't splay.
    pub fn max(&self) -> Option<&K> {
        self.root.map(|root| &self.node(self.maximum(root)).key)
    }

    fn node(&self, id: NodeId) -> &Node<K> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        &mut self.nodes[id.0]
    }

    fn children(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let node = self.node(id);
        (node.left, node.right)
    }

    fn maximum(&self, mut node: NodeId) -> NodeId {
        while let Some(right) = self.node(node).right {
            node = right;
        }
        node
    }

    /// Which child of `parent` the node `id` is.
    fn side_in(&self, parent: NodeId, id: NodeId) -> Side {
        if self.node(parent).left == Some(id) {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referred to `old` (its parent's child link, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: NodeId) {
        match parent {
            None => self.root = Some(new),
            Some(parent) => {
                let side = self.side_in(parent, old);
                *self.node_mut(parent).child_mut(side) = Some(new);
            }
        }
    }

    /// Rotates `node` down towards `side`, lifting its child on the opposite side into its place.
    ///
    /// ## Panics
    ///
    /// When `node` has no child on the opposite side.
    fn rotate(&mut self, node: NodeId, side: Side) {
        let riser = self
            .node(node)
            .child(side.opposite())
            .expect("rotation needs a child to lift");

        let inner = self.node(riser).child(side);
        *self.node_mut(node).child_mut(side.opposite()) = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(node);
        }

        let parent = self.node(node).parent;
        self.node_mut(riser).parent = parent;
        self.replace_child(parent, node, riser);

        *self.node_mut(riser).child_mut(side) = Some(node);
        self.node_mut(node).parent = Some(riser);
    }

    /// Rotates `node` up until it has no parent.
    fn splay(&mut self, node: NodeId) {
        while let Some(parent) = self.node(node).parent {
            let side = self.side_in(parent, node);
            let grandparent = self.node(parent).parent;
            match grandparent {
                None => {
                    log::trace!("splay {:?}: zig {:?}", node, side);
                    self.rotate(parent, side.opposite());
                }
                Some(grandparent) if self.side_in(grandparent, parent) == side => {
                    log::trace!("splay {:?}: zig-zig {:?}", node, side);
                    self.rotate(grandparent, side.opposite());
                    self.rotate(parent, side.opposite());
                }
                Some(grandparent) => {
                    log::trace!("splay {:?}: zig-zag {:?}", node, side);
                    self.rotate(parent, side.opposite());
                    self.rotate(grandparent, side);
                }
            }
        }
    }

    /// Joins two detached trees where every key in `left` is smaller than every key in `right`.
    fn join(&mut self, left: Option<NodeId>, right: Option<NodeId>) -> Option<NodeId> {
        let (Some(left), Some(right)) = (left, right) else {
            return left.or(right);
        };

        // After splaying its maximum to the top, the left tree's root has no right child.
        let max = self.maximum(left);
        self.splay(max);
        debug_assert_eq!(self.node(max).right, None);

        self.node_mut(max).right = Some(right);
        self.node_mut(right).parent = Some(max);
        Some(max)
    }

    /// Removes the fully detached node `id` from the arena. The last node in the arena is moved
    /// into the hole so every link that pointed at it is redirected to `id`.
    fn release(&mut self, id: NodeId) -> K {
        let last = NodeId(self.nodes.len() - 1);
        if id != last {
            let Node {
                parent, left, right, ..
            } = *self.node(last);
            self.replace_child(parent, last, id);
            for child in [left, right].into_iter().flatten() {
                self.node_mut(child).parent = Some(id);
            }
        }
        self.nodes.swap_remove(id.0).key
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Returns whether `key` is in the tree. A hit splays the key to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::splay::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    /// tree.insert(2).unwrap();
    ///
    /// assert!(tree.search(&1));
    /// assert_eq!(tree.root(), Some(&1));
    /// ```
    pub fn search(&mut self, key: &K) -> bool {
        match self.find(key) {
            Ok(found) => {
                self.splay(found);
                true
            }
            Err(_) => false,
        }
    }

    /// Inserts `key` as a leaf and splays it to the root. If the tree already holds `key` that
    /// node is splayed instead and the key is returned in the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::splay::Tree;
    /// use search_trees::DuplicateKey;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    /// tree.insert(2).unwrap();
    ///
    /// assert_eq!(tree.insert(1), Err(DuplicateKey(1)));
    /// assert_eq!(tree.root(), Some(&1));
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), DuplicateKey<K>> {
        let slot = match self.find(&key) {
            Ok(existing) => {
                self.splay(existing);
                return Err(DuplicateKey(key));
            }
            Err(slot) => slot,
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            parent: slot.map(|(parent, _)| parent),
            left: None,
            right: None,
        });
        match slot {
            None => self.root = Some(id),
            Some((parent, side)) => *self.node_mut(parent).child_mut(side) = Some(id),
        }

        self.splay(id);
        debug_assert_eq!(self.root, Some(id));
        Ok(())
    }

    /// Deletes `key` from the tree, returning whether it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::splay::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in [5, 3, 8] {
    ///     tree.insert(key).unwrap();
    /// }
    ///
    /// assert!(tree.delete(&5));
    /// assert!(!tree.delete(&5));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        let Ok(target) = self.find(key) else {
            return false;
        };

        // Split: with the target at the root its subtrees are exactly the keys below and above it.
        self.splay(target);
        let node = self.node_mut(target);
        let below = node.left.take();
        let above = node.right.take();
        for half in [below, above].into_iter().flatten() {
            self.node_mut(half).parent = None;
        }
        self.root = None;

        self.root = self.join(below, above);
        self.release(target);
        true
    }

    /// Finds the node holding `key` without splaying. On a miss, returns where a node for `key`
    /// would be attached: its parent and side, or `None` for an empty tree.
    fn find(&self, key: &K) -> Result<NodeId, Option<(NodeId, Side)>> {
        let mut slot = None;
        let mut current = self.root;
        while let Some(id) = current {
            let side = match key.cmp(&self.node(id).key) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Ok(id),
                Ordering::Greater => Side::Right,
            };
            slot = Some((id, side));
            current = self.node(id).child(side);
        }
        Err(slot)
    }
}

impl<K> SearchTree<K> for Tree<K>
where
    K: Ord,
{
    fn insert(&mut self, key: K) -> Result<(), DuplicateKey<K>> {
        Tree::insert(self, key)
    }

    fn search(&mut self, key: &K) -> bool {
        Tree::search(self, key)
    }

    fn delete(&mut self, key: &K) -> bool {
        Tree::delete(self, key)
    }

    fn height(&self) -> usize {
        Tree::height(self)
    }

    fn traverse(&self, order: Order) -> Vec<&K> {
        Tree::traverse(self, order)
    }

    fn len(&self) -> usize {
        Tree::len(self)
    }
}

/// Panics unless the BST invariant holds and every parent link agrees with its child links.
#[cfg(test)]
fn assert_invariants<K: Ord>(tree: &Tree<K>) {
    if let Some(root) = tree.root {
        assert_eq!(tree.node(root).parent, None, "root has no parent");
    }

    let mut reachable = 0;
    let mut stack = vec![(tree.root, None::<&K>, None::<&K>)];
    while let Some((id, low, high)) = stack.pop() {
        let Some(id) = id else {
            continue;
        };
        reachable += 1;
        let node = tree.node(id);
        assert!(low.map_or(true, |low| low < &node.key), "left subtree key out of order");
        assert!(high.map_or(true, |high| &node.key < high), "right subtree key out of order");

        for child in [node.left, node.right].into_iter().flatten() {
            assert_eq!(tree.node(child).parent, Some(id), "child's parent link is stale");
        }
        stack.push((node.left, low, Some(&node.key)));
        stack.push((node.right, Some(&node.key), high));
    }
    assert_eq!(reachable, tree.len(), "arena holds unreachable nodes");
}
