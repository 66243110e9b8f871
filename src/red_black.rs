//! A red-black tree. Every node is colored red or black and the tree maintains:
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from a node down to a leaf passes through the same number of black nodes (its
//!    "black height").
//!
//! Together these bound the height by `2 lg(N + 1)`. Insertion and deletion first do a plain BST
//! insert/delete and then walk back up repairing whichever rule they broke with recolorings and
//! at most three rotations.
//!
//! Nodes live in an arena and refer to each other by index. Absent children are the shared
//! `NIL` sentinel, which is always black, so the repair loops can ask for the color of an uncle
//! or a nephew without checking for its existence first. See [Wikipedia][wiki] or CLRS chapter 13
//! for the case analysis.
//!
//! [wiki]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
//!
//! # Examples
//!
//! ```
//! use search_trees::red_black::Tree;
//! use search_trees::Order;
//!
//! let mut tree = Tree::new();
//!
//! // Sorted input would make an unbalanced tree a path of height 7.
//! for key in 1..=7 {
//!     tree.insert(key).unwrap();
//! }
//! assert_eq!(tree.height(), 4);
//!
//! assert!(tree.delete(&4));
//! assert!(!tree.search(&4));
//! assert_eq!(tree.traverse(Order::InOrder), [&1, &2, &3, &5, &6, &7]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::{util, DuplicateKey, Order, SearchTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Black,
}

/// Which child of its parent a node is, or which way a rotation moves a node.
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

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

/// The sentinel standing in for every absent child and for the root's parent.
const NIL: NodeId = NodeId(usize::MAX);

#[derive(Clone)]
struct Node<K> {
    key: K,
    color: Color,
    parent: NodeId,
    left: NodeId,
    right: NodeId,
}

/// A red-black tree of unique keys.
#[derive(Clone)]
pub struct Tree<K> {
    nodes: Vec<Node<K>>,
    root: NodeId,
    /// The sentinel's parent link. It is black with no children, so this is its only state. The
    /// deletion fixup reads it when the node that replaced a deleted one is the sentinel itself.
    nil_parent: NodeId,
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
            root: NIL,
            nil_parent: NIL,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// The number of nodes on the longest root-to-leaf path. The sentinel doesn't count.
    pub fn height(&self) -> usize {
        util::height(self.root_id(), |id| self.children(id))
    }

    /// All keys in the tree, visited in the given `order`.
    pub fn traverse(&self, order: Order) -> Vec<&K> {
        let nodes = &self.nodes;
        util::traverse(
            self.root_id(),
            order,
            |id| self.children(id),
            move |id: NodeId| &nodes[id.0].key,
        )
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        self.root_id().map(|root| self.key(self.minimum(root)))
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root_id()?;
        while self.right(node) != NIL {
            node = self.right(node);
        }
        Some(self.key(node))
    }

    fn root_id(&self) -> Option<NodeId> {
        (self.root != NIL).then_some(self.root)
    }

    fn children(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let present = |child: NodeId| (child != NIL).then_some(child);
        (present(self.left(id)), present(self.right(id)))
    }

    fn minimum(&self, mut node: NodeId) -> NodeId {
        while self.left(node) != NIL {
            node = self.left(node);
        }
        node
    }

    fn key(&self, id: NodeId) -> &K {
        &self.nodes[id.0].key
    }

    fn color(&self, id: NodeId) -> Color {
        if id == NIL {
            Color::Black
        } else {
            self.nodes[id.0].color
        }
    }

    fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        if id == NIL {
            debug_assert_eq!(color, Color::Black, "the sentinel is always black");
        } else {
            self.nodes[id.0].color = color;
        }
    }

    fn parent(&self, id: NodeId) -> NodeId {
        if id == NIL {
            self.nil_parent
        } else {
            self.nodes[id.0].parent
        }
    }

    fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if id == NIL {
            self.nil_parent = parent;
        } else {
            self.nodes[id.0].parent = parent;
        }
    }

    fn left(&self, id: NodeId) -> NodeId {
        self.child(id, Side::Left)
    }

    fn right(&self, id: NodeId) -> NodeId {
        self.child(id, Side::Right)
    }

    fn child(&self, id: NodeId, side: Side) -> NodeId {
        if id == NIL {
            return NIL;
        }
        match side {
            Side::Left => self.nodes[id.0].left,
            Side::Right => self.nodes[id.0].right,
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: NodeId) {
        let node = &mut self.nodes[id.0];
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Which child of its parent `id` is. Also correct for the sentinel as long as the sentinel's
    /// parent has a real child on the other side, which black-height guarantees whenever the
    /// deletion fixup asks.
    fn side_of(&self, id: NodeId) -> Side {
        if self.left(self.parent(id)) == id {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points whatever referred to `old` (its parent's child link, or the root) at `new`. Doesn't
    /// touch `new`'s parent link.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent == NIL {
            self.root = new;
        } else if self.left(parent) == old {
            self.set_child(parent, Side::Left, new);
        } else {
            self.set_child(parent, Side::Right, new);
        }
    }

    /// Rotates `node` down towards `side`, lifting its child on the opposite side into its place.
    /// `rotate(x, Side::Left)` is the textbook left rotation.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      parent                     parent
    ///        |                          |
    ///        x        rotate(x, Left)   y
    ///       / \       ------------->   / \
    ///      a   y                      x   c
    ///         / \                    / \
    ///        b   c                  a   b
    /// ```
    ///
    /// ## Panics
    ///
    /// When `node` has no child on the opposite side.
    fn rotate(&mut self, node: NodeId, side: Side) {
        let riser = self.child(node, side.opposite());
        assert_ne!(riser, NIL, "rotation needs a child to lift");
        log::trace!("rotate {:?} {:?}", node, side);

        let inner = self.child(riser, side);
        self.set_child(node, side.opposite(), inner);
        if inner != NIL {
            self.set_parent(inner, node);
        }

        let parent = self.parent(node);
        self.set_parent(riser, parent);
        self.replace_child(parent, node, riser);

        self.set_child(riser, side, node);
        self.set_parent(node, riser);
    }

    /// Puts `new` (possibly the sentinel) where `old` hangs in the tree.
    fn transplant(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        self.replace_child(parent, old, new);
        self.set_parent(new, parent);
    }

    /// Restores rules 1 and 2 after `node` was attached as a red leaf.
    fn insert_fixup(&mut self, mut node: NodeId) {
        while self.is_red(self.parent(node)) {
            let parent = self.parent(node);
            // The parent is red so it isn't the root, so the grandparent is real.
            let grandparent = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grandparent, side.opposite());

            if self.is_red(uncle) {
                log::trace!("insert fixup: red uncle, recoloring at {:?}", grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                node = grandparent;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                log::trace!("insert fixup: inner child, rotating parent {:?}", parent);
                node = parent;
                self.rotate(node, side);
            }

            log::trace!("insert fixup: outer child, rotating grandparent {:?}", grandparent);
            let parent = self.parent(node);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Restores rule 3 after a black node was spliced out. `node` took the removed node's place
    /// and is carrying an "extra" black that has to be pushed up or absorbed.
    fn delete_fixup(&mut self, mut node: NodeId) {
        while node != self.root && !self.is_red(node) {
            let parent = self.parent(node);
            let side = self.side_of(node);
            let mut sibling = self.child(parent, side.opposite());

            if self.is_red(sibling) {
                log::trace!("delete fixup: red sibling {:?}", sibling);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                sibling = self.child(parent, side.opposite());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                log::trace!("delete fixup: black nephews, moving up to {:?}", parent);
                self.set_color(sibling, Color::Red);
                node = parent;
                continue;
            }

            if !self.is_red(far) {
                log::trace!("delete fixup: black far nephew, rotating sibling {:?}", sibling);
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.child(parent, side.opposite());
            }

            log::trace!("delete fixup: red far nephew, rotating parent {:?}", parent);
            let far = self.child(sibling, side.opposite());
            self.set_color(sibling, self.color(parent));
            self.set_color(parent, Color::Black);
            self.set_color(far, Color::Black);
            self.rotate(parent, side);
            node = self.root;
        }

        self.set_color(node, Color::Black);
    }

    /// Removes the already-unlinked node `id` from the arena. The last node in the arena is moved
    /// into the hole so every link that pointed at it is redirected to `id`.
    fn release(&mut self, id: NodeId) -> K {
        let last = NodeId(self.nodes.len() - 1);
        if id != last {
            let Node {
                parent, left, right, ..
            } = self.nodes[last.0];
            self.replace_child(parent, last, id);
            if left != NIL {
                self.set_parent(left, id);
            }
            if right != NIL {
                self.set_parent(right, id);
            }
        }
        self.nil_parent = NIL;
        self.nodes.swap_remove(id.0).key
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Returns whether `key` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::red_black::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert!(tree.search(&1));
    /// assert!(!tree.search(&42));
    /// ```
    pub fn search(&self, key: &K) -> bool {
        self.find(key) != NIL
    }

    /// Inserts `key`, rebalancing as needed. If the tree already holds `key` nothing changes and
    /// the key is returned in the error.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::red_black::Tree;
    /// use search_trees::DuplicateKey;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1), Ok(()));
    /// assert_eq!(tree.insert(1), Err(DuplicateKey(1)));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> Result<(), DuplicateKey<K>> {
        let mut parent = NIL;
        let mut side = Side::Left;
        let mut current = self.root;
        while current != NIL {
            parent = current;
            side = match key.cmp(self.key(current)) {
                Ordering::Less => Side::Left,
                Ordering::Equal => return Err(DuplicateKey(key)),
                Ordering::Greater => Side::Right,
            };
            current = self.child(current, side);
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            key,
            color: Color::Red,
            parent,
            left: NIL,
            right: NIL,
        });
        if parent == NIL {
            self.root = id;
        } else {
            self.set_child(parent, side, id);
        }

        self.insert_fixup(id);

        if cfg!(debug_assertions) {
            assert_eq!(self.color(self.root), Color::Black);
            assert_eq!(self.parent(self.root), NIL);
        }
        Ok(())
    }

    /// Deletes `key` from the tree, returning whether it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use search_trees::red_black::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert!(tree.delete(&1));
    /// assert!(!tree.delete(&1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        let target = self.find(key);
        if target == NIL {
            return false;
        }

        // `removed_color` is the color that physically disappears from its position: the target's
        // own if it has a free side, otherwise its successor's (the successor inherits the
        // target's color and position).
        let mut removed_color = self.color(target);
        let replacement;
        if self.left(target) == NIL {
            replacement = self.right(target);
            self.transplant(target, replacement);
        } else if self.right(target) == NIL {
            replacement = self.left(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.minimum(self.right(target));
            removed_color = self.color(successor);
            replacement = self.right(successor);

            if self.parent(successor) == target {
                // Covers the sentinel: the fixup must see it hanging off the successor.
                self.set_parent(replacement, successor);
            } else {
                self.transplant(successor, replacement);
                let right = self.right(target);
                self.set_child(successor, Side::Right, right);
                self.set_parent(right, successor);
            }

            self.transplant(target, successor);
            let left = self.left(target);
            self.set_child(successor, Side::Left, left);
            self.set_parent(left, successor);
            self.set_color(successor, self.color(target));
        }

        if removed_color == Color::Black {
            self.delete_fixup(replacement);
        }

        self.release(target);

        if cfg!(debug_assertions) && self.root != NIL {
            assert_eq!(self.color(self.root), Color::Black);
            assert_eq!(self.parent(self.root), NIL);
        }
        true
    }

    fn find(&self, key: &K) -> NodeId {
        let mut current = self.root;
        while current != NIL {
            current = match key.cmp(self.key(current)) {
                Ordering::Less => self.left(current),
                Ordering::Equal => return current,
                Ordering::Greater => self.right(current),
            };
        }
        NIL
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

/// Panics unless every red-black and BST invariant holds and every parent link agrees with its
/// child links.
#[cfg(test)]
fn assert_invariants<K: Ord>(tree: &Tree<K>) {
    assert_eq!(tree.color(tree.root), Color::Black, "root must be black");
    if tree.root != NIL {
        assert_eq!(tree.parent(tree.root), NIL, "root has no parent");
    }

    // (node, lower bound, upper bound) with the black height checked bottom-up below.
    let mut stack = vec![(tree.root, None::<&K>, None::<&K>)];
    let mut reachable = 0;
    while let Some((id, low, high)) = stack.pop() {
        if id == NIL {
            continue;
        }
        reachable += 1;
        let key = tree.key(id);
        assert!(low.map_or(true, |low| low < key), "left subtree key out of order");
        assert!(high.map_or(true, |high| key < high), "right subtree key out of order");

        for child in [tree.left(id), tree.right(id)] {
            if child != NIL {
                assert_eq!(tree.parent(child), id, "child's parent link is stale");
                assert!(
                    !(tree.is_red(id) && tree.is_red(child)),
                    "red node has a red child"
                );
            }
        }
        stack.push((tree.left(id), low, Some(key)));
        stack.push((tree.right(id), Some(key), high));
    }
    assert_eq!(reachable, tree.len(), "arena holds unreachable nodes");

    black_height(tree, tree.root);
}

/// Returns the black height of the subtree at `id`, panicking if two paths disagree.
#[cfg(test)]
fn black_height<K>(tree: &Tree<K>, id: NodeId) -> usize {
    if id == NIL {
        return 1;
    }
    let left = black_height(tree, tree.left(id));
    let right = black_height(tree, tree.right(id));
    assert_eq!(left, right, "black heights differ below a node");
    left + usize::from(tree.color(id) == Color::Black)
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::test::quick::{do_ops, Op};

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut set = BTreeSet::new();

            do_ops(&ops, &mut tree, &mut set, assert_invariants);
            set.iter().all(|key| tree.search(key))
        }
    }

    quickcheck::quickcheck! {
        fn height_is_logarithmic(xs: Vec<i16>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                let _ = tree.insert(*x);
            }
            assert_invariants(&tree);

            let bound = 2 * (usize::BITS - (tree.len() + 1).leading_zeros()) as usize;
            tree.height() <= bound
        }
    }
}
