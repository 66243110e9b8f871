//! A plain BST that never rebalances. It is the baseline the other two trees are measured
//! against: inserting sorted keys turns it into a linked list of height `N`.
//!
//! Deletion is deliberately naive. Rather than splicing in a predecessor or successor, the whole
//! subtree below the deleted node is detached and its remaining keys are inserted again from the
//! root. That keeps the code trivially correct at the cost of `O(N)` work per delete.
//!
//! # Examples
//!
//! ```
//! use search_trees::unbalanced::Tree;
//! use search_trees::{DuplicateKey, Order};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.search(&1));
//! assert_eq!(tree.height(), 0);
//!
//! tree.insert(2).unwrap();
//! tree.insert(1).unwrap();
//! tree.insert(3).unwrap();
//! assert!(tree.search(&1));
//! assert_eq!(tree.height(), 2);
//!
//! // Inserting the same key twice is rejected.
//! assert_eq!(tree.insert(1), Err(DuplicateKey(1)));
//!
//! assert!(tree.delete(&2));
//! assert!(!tree.delete(&2));
//! assert_eq!(tree.traverse(Order::InOrder), [&1, &3]);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::{util, DuplicateKey, Order, SearchTree};

type Link<K> = Option<Box<Node<K>>>;

/// An unbalanced Binary Search Tree of unique keys.
pub struct Tree<K> {
    root: Link<K>,
    len: usize,
}

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    fn drop(&mut self) {
        // The default drop glue recurses once per level, which a sorted-input tree would turn
        // into a stack overflow. Unhook children before each node is dropped instead.
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K> Clone for Tree<K>
where
    K: Ord + Clone,
{
    /// Rebuilds the tree by inserting a copy of every key in pre-order, which reproduces the
    /// exact same shape.
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        for key in self.traverse(Order::PreOrder) {
            let _ = tree.insert(key.clone());
        }
        tree
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("len", &self.len)
            .field("pre_order", &self.traverse(Order::PreOrder))
            .finish()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        util::height(self.root.as_deref(), Self::children)
    }

    /// All keys in the tree, visited in the given `order`.
    pub fn traverse(&self, order: Order) -> Vec<&K> {
        util::traverse(self.root.as_deref(), order, Self::children, |n| &n.key)
    }

    /// The smallest key in the tree.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// The largest key in the tree.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    fn children(node: &Node<K>) -> (Option<&Node<K>>, Option<&Node<K>>) {
        (node.left.as_deref(), node.right.as_deref())
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
    /// use search_trees::unbalanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1).unwrap();
    ///
    /// assert!(tree.search(&1));
    /// assert!(!tree.search(&42));
    /// ```
    pub fn search(&self, key: &K) -> bool {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Inserts `key` as a new leaf. If the tree already holds `key` nothing changes and the key is
    /// returned in the error.
    pub fn insert(&mut self, key: K) -> Result<(), DuplicateKey<K>> {
        let link = self.link_mut(&key);
        if link.is_some() {
            return Err(DuplicateKey(key));
        }
        *link = Some(Node::new_boxed(key));
        self.len += 1;
        Ok(())
    }

    /// Deletes `key` from the tree, returning whether it was present.
    ///
    /// Every key below the deleted node is reinserted from the root, so this costs `O(N)` in the
    /// worst case even on a balanced-looking tree.
    pub fn delete(&mut self, key: &K) -> bool {
        let Some(subtree) = self.link_mut(key).take() else {
            return false;
        };

        let mut survivors = preorder_keys(subtree);
        // `preorder_keys` yields the subtree root first, and the subtree root is the deleted node.
        survivors.remove(0);
        self.len -= survivors.len() + 1;

        if !survivors.is_empty() {
            log::debug!("rebuilding {} keys below a deleted node", survivors.len());
        }
        for survivor in survivors {
            let reinserted = self.insert(survivor);
            debug_assert!(reinserted.is_ok(), "survivors came out of the tree so are unique");
        }

        true
    }

    /// Returns the link that holds `key`, or the empty link `key` would be attached at.
    fn link_mut(&mut self, key: &K) -> &mut Link<K> {
        let mut link = &mut self.root;
        loop {
            let ordering = match link.as_deref() {
                Some(node) => key.cmp(&node.key),
                None => return link,
            };
            if ordering == Ordering::Equal {
                return link;
            }
            let node = link.as_mut().expect("just compared against a node in this link");
            link = if ordering == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }
    }
}

/// Consumes the subtree, returning its keys in pre-order. Like `Drop`, this never recurses.
fn preorder_keys<K>(root: Box<Node<K>>) -> Vec<K> {
    let mut keys = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        let Node { key, left, right } = *node;
        keys.push(key);
        stack.extend(right);
        stack.extend(left);
    }
    keys
}

/// Walks the whole tree checking every key sits strictly between the bounds its ancestors impose
/// and that `len` counts every node.
#[cfg(test)]
fn assert_invariants<K: Ord>(tree: &Tree<K>) {
    let mut reachable = 0;
    let mut stack = vec![(tree.root.as_deref(), None::<&K>, None::<&K>)];
    while let Some((node, low, high)) = stack.pop() {
        let Some(node) = node else {
            continue;
        };
        reachable += 1;
        assert!(low.map_or(true, |low| low < &node.key), "key below its lower bound");
        assert!(high.map_or(true, |high| &node.key < high), "key above its upper bound");

        stack.push((node.left.as_deref(), low, Some(&node.key)));
        stack.push((node.right.as_deref(), Some(&node.key), high));
    }
    assert_eq!(reachable, tree.len(), "len disagrees with the node count");
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
        fn in_order_is_sorted(xs: Vec<i16>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                let _ = tree.insert(*x);
            }

            tree.traverse(Order::InOrder).windows(2).all(|w| w[0] < w[1])
        }
    }

    quickcheck::quickcheck! {
        fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                let _ = tree.insert(*x);
            }
            for delete in &deletes {
                tree.delete(delete);
            }

            deletes.iter().all(|x| !tree.search(x))
                && xs.iter().filter(|x| !deletes.contains(*x)).all(|x| tree.search(x))
        }
    }
}
