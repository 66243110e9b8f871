//! Errors returned by the trees and by [`Engine`][crate::Engine] parsing.

/// Returned by `insert` when the tree already holds an equal key. The rejected key is handed
/// back to the caller and the tree is left as it was (the splay tree still splays the existing
/// node to the root).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("key is already present in the tree")]
pub struct DuplicateKey<K>(pub K);

impl<K> DuplicateKey<K> {
    /// Gives back the key that was rejected.
    pub fn into_key(self) -> K {
        self.0
    }
}

/// Returned when parsing an [`Engine`][crate::Engine] from an unrecognized label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tree engine `{0}` (expected one of `bst`, `rbt`, `st`)")]
pub struct UnknownEngine(pub String);
