//! Picking a tree at run time. Benchmark records label each tree `bst`, `rbt` or `st`, so
//! [`Engine`] parses from and prints as those labels and [`AnyTree`] dispatches to whichever tree
//! was picked.

use std::fmt;
use std::str::FromStr;

use crate::{red_black, splay, unbalanced, DuplicateKey, Order, SearchTree, UnknownEngine};

/// The three kinds of tree this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    /// [`unbalanced::Tree`], labelled `bst`.
    Unbalanced,
    /// [`red_black::Tree`], labelled `rbt`.
    RedBlack,
    /// [`splay::Tree`], labelled `st`.
    Splay,
}

impl Engine {
    /// Every engine, in label order.
    pub const ALL: [Engine; 3] = [Engine::Unbalanced, Engine::RedBlack, Engine::Splay];

    /// The short label used in benchmark records.
    pub fn label(self) -> &'static str {
        match self {
            Engine::Unbalanced => "bst",
            Engine::RedBlack => "rbt",
            Engine::Splay => "st",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Engine {
    type Err = UnknownEngine;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Engine::ALL
            .into_iter()
            .find(|engine| engine.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownEngine(s.to_string()))
    }
}

/// One of the three trees, chosen at run time.
///
/// # Examples
///
/// ```
/// use search_trees::{AnyTree, Engine, SearchTree};
///
/// for engine in Engine::ALL {
///     let mut tree = AnyTree::new(engine);
///     tree.insert("b").unwrap();
///     tree.insert("a").unwrap();
///
///     assert_eq!(tree.engine(), engine);
///     assert!(tree.insert("a").is_err());
///     assert_eq!(tree.height(), 2);
/// }
/// ```
#[derive(Debug)]
pub enum AnyTree<K> {
    /// An [`unbalanced::Tree`].
    Unbalanced(unbalanced::Tree<K>),
    /// A [`red_black::Tree`].
    RedBlack(red_black::Tree<K>),
    /// A [`splay::Tree`].
    Splay(splay::Tree<K>),
}

impl<K> AnyTree<K> {
    /// Generates a new, empty tree of the given kind.
    pub fn new(engine: Engine) -> Self {
        match engine {
            Engine::Unbalanced => Self::Unbalanced(unbalanced::Tree::new()),
            Engine::RedBlack => Self::RedBlack(red_black::Tree::new()),
            Engine::Splay => Self::Splay(splay::Tree::new()),
        }
    }

    /// Which kind of tree this is.
    pub fn engine(&self) -> Engine {
        match self {
            Self::Unbalanced(_) => Engine::Unbalanced,
            Self::RedBlack(_) => Engine::RedBlack,
            Self::Splay(_) => Engine::Splay,
        }
    }
}

impl<K> Clone for AnyTree<K>
where
    K: Ord + Clone,
{
    fn clone(&self) -> Self {
        match self {
            Self::Unbalanced(t) => Self::Unbalanced(t.clone()),
            Self::RedBlack(t) => Self::RedBlack(t.clone()),
            Self::Splay(t) => Self::Splay(t.clone()),
        }
    }
}

impl<K> From<Engine> for AnyTree<K> {
    fn from(engine: Engine) -> Self {
        Self::new(engine)
    }
}

impl<K> SearchTree<K> for AnyTree<K>
where
    K: Ord,
{
    fn insert(&mut self, key: K) -> Result<(), DuplicateKey<K>> {
        match self {
            Self::Unbalanced(t) => t.insert(key),
            Self::RedBlack(t) => t.insert(key),
            Self::Splay(t) => t.insert(key),
        }
    }

    fn search(&mut self, key: &K) -> bool {
        match self {
            Self::Unbalanced(t) => t.search(key),
            Self::RedBlack(t) => t.search(key),
            Self::Splay(t) => t.search(key),
        }
    }

    fn delete(&mut self, key: &K) -> bool {
        match self {
            Self::Unbalanced(t) => t.delete(key),
            Self::RedBlack(t) => t.delete(key),
            Self::Splay(t) => t.delete(key),
        }
    }

    fn height(&self) -> usize {
        match self {
            Self::Unbalanced(t) => t.height(),
            Self::RedBlack(t) => t.height(),
            Self::Splay(t) => t.height(),
        }
    }

    fn traverse(&self, order: Order) -> Vec<&K> {
        match self {
            Self::Unbalanced(t) => t.traverse(order),
            Self::RedBlack(t) => t.traverse(order),
            Self::Splay(t) => t.traverse(order),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Unbalanced(t) => t.len(),
            Self::RedBlack(t) => t.len(),
            Self::Splay(t) => t.len(),
        }
    }
}
