//! This crate exposes three Binary Search Trees (BSTs) behind one interface so they can be
//! compared side by side: an [unbalanced] tree, a [red-black][red_black] tree and a
//! [splay] tree.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored keys. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! stores a key and will sometimes have child `Node`s. The most important invariants of a BST
//! are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than its own
//!    key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than its
//!    own key.
//!
//! Searching for a key takes `O(height)` where `height` is the number of `Node`s on the longest
//! path from the root down to a leaf. The three trees differ only in what they do to keep that
//! height down:
//!
//! - The [unbalanced] tree does nothing. Sorted input gives it height `N`.
//! - The [red-black][red_black] tree colors its nodes and rotates after every mutation so its
//!   height never exceeds `2 lg(N + 1)`.
//! - The [splay] tree moves every node it touches to the root. A single operation can still be
//!   `O(N)` but any sequence of `M` operations costs `O(M lg N)`.
//!
//! All three reject duplicate keys and implement [`SearchTree`], so a driver can pick one at run
//! time through [`AnyTree`].
//!
//! # Examples
//!
//! ```
//! use search_trees::{AnyTree, Engine, Order, SearchTree};
//!
//! let mut tree = AnyTree::new("rbt".parse::<Engine>().unwrap());
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert(key).unwrap();
//! }
//!
//! assert!(tree.search(&4));
//! assert!(tree.delete(&5));
//! assert!(!tree.search(&5));
//! assert_eq!(tree.traverse(Order::InOrder), [&1, &3, &4, &7, &8, &9]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod engine;
mod error;
pub mod red_black;
pub mod splay;
pub mod unbalanced;
mod util;

pub use engine::{AnyTree, Engine};
pub use error::{DuplicateKey, UnknownEngine};

/// The order in which [`SearchTree::traverse`] visits keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// A node, then its left subtree, then its right subtree.
    PreOrder,
    /// A node's left subtree, then the node, then its right subtree. This yields keys in
    /// ascending order.
    InOrder,
    /// A node's left subtree, then its right subtree, then the node.
    PostOrder,
}

/// The operations every tree in this crate supports.
pub trait SearchTree<K: Ord> {
    /// Adds `key` to the tree. If an equal key is already present the tree keeps its key and
    /// `key` is handed back inside the error.
    fn insert(&mut self, key: K) -> Result<(), DuplicateKey<K>>;

    /// Returns whether `key` is in the tree. This takes `&mut self` because a splay tree
    /// restructures itself on every successful search.
    fn search(&mut self, key: &K) -> bool;

    /// Removes `key` from the tree, returning whether it was present.
    fn delete(&mut self, key: &K) -> bool;

    /// The number of nodes on the longest root-to-leaf path. An empty tree has height 0.
    fn height(&self) -> usize;

    /// All keys in the tree, visited in the given `order`.
    fn traverse(&self, order: Order) -> Vec<&K>;

    /// The number of keys in the tree.
    fn len(&self) -> usize;

    /// Whether the tree holds no keys.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
