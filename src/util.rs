//! Traversal helpers shared by the engines. Every engine lays its nodes out differently so these
//! work over an opaque, copyable node handle `N` and a `children` accessor instead of a common
//! node type.
//!
//! None of these recurse. The unbalanced tree (and a splay tree fed sorted input) can be as tall
//! as it has nodes, so each walk keeps its own explicit stack.

use crate::Order;

/// Collects references to every key in the tree rooted at `root` in the given `order`.
pub(crate) fn traverse<'a, N, K>(
    root: Option<N>,
    order: Order,
    children: impl Fn(N) -> (Option<N>, Option<N>),
    key: impl Fn(N) -> &'a K,
) -> Vec<&'a K>
where
    N: Copy,
    K: 'a,
{
    let mut keys = Vec::new();
    let mut stack = Vec::new();

    match order {
        Order::PreOrder => {
            stack.extend(root);
            while let Some(node) = stack.pop() {
                keys.push(key(node));
                let (left, right) = children(node);
                // Right goes on first so the left subtree is popped (and emitted) first.
                stack.extend(right);
                stack.extend(left);
            }
        }
        Order::InOrder => {
            let mut current = root;
            loop {
                while let Some(node) = current {
                    stack.push(node);
                    current = children(node).0;
                }
                let Some(node) = stack.pop() else {
                    break;
                };
                keys.push(key(node));
                current = children(node).1;
            }
        }
        Order::PostOrder => {
            // Node, right, left is exactly post-order reversed.
            stack.extend(root);
            while let Some(node) = stack.pop() {
                keys.push(key(node));
                let (left, right) = children(node);
                stack.extend(left);
                stack.extend(right);
            }
            keys.reverse();
        }
    }

    keys
}

/// The number of nodes on the longest path from `root` down to a leaf. An empty tree has height
/// 0 and a lone root has height 1.
pub(crate) fn height<N>(root: Option<N>, children: impl Fn(N) -> (Option<N>, Option<N>)) -> usize
where
    N: Copy,
{
    let mut tallest = 0;
    let mut stack: Vec<(N, usize)> = root.into_iter().map(|node| (node, 1)).collect();

    while let Some((node, depth)) = stack.pop() {
        tallest = tallest.max(depth);
        let (left, right) = children(node);
        stack.extend(left.map(|n| (n, depth + 1)));
        stack.extend(right.map(|n| (n, depth + 1)));
    }

    tallest
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tiny hand-built tree stored as `(key, left, right)` triples indexed by position.
    ///
    /// ```text
    ///       4
    ///     /   \
    ///    2     6
    ///   / \     \
    ///  1   3     7
    /// ```
    static TREE: [(i32, Option<usize>, Option<usize>); 6] = [
        (4, Some(1), Some(2)),
        (2, Some(3), Some(4)),
        (6, None, Some(5)),
        (1, None, None),
        (3, None, None),
        (7, None, None),
    ];

    fn walk(order: Order) -> Vec<i32> {
        traverse(
            Some(0),
            order,
            |i: usize| (TREE[i].1, TREE[i].2),
            |i| &TREE[i].0,
        )
        .into_iter()
        .copied()
        .collect()
    }

    #[test]
    fn orders() {
        assert_eq!(walk(Order::PreOrder), [4, 2, 1, 3, 6, 7]);
        assert_eq!(walk(Order::InOrder), [1, 2, 3, 4, 6, 7]);
        assert_eq!(walk(Order::PostOrder), [1, 3, 2, 7, 6, 4]);
    }

    #[test]
    fn empty() {
        let keys: Vec<&i32> = traverse(
            None,
            Order::InOrder,
            |i: usize| (TREE[i].1, TREE[i].2),
            |i| &TREE[i].0,
        );
        assert!(keys.is_empty());
        assert_eq!(height(None::<usize>, |i| (TREE[i].1, TREE[i].2)), 0);
    }

    #[test]
    fn test_height() {
        assert_eq!(height(Some(0), |i: usize| (TREE[i].1, TREE[i].2)), 3);
        assert_eq!(height(Some(5), |i: usize| (TREE[i].1, TREE[i].2)), 1);
    }

    #[test]
    fn deep_path_does_not_recurse() {
        // A right-leaning path a million nodes long.
        let len = 1_000_000;
        let next = |i: usize| (None, (i + 1 < len).then_some(i + 1));
        assert_eq!(height(Some(0), next), len);

        let keys: Vec<usize> = (0..len).collect();
        let walked = traverse(Some(0), Order::InOrder, next, |i| &keys[i]);
        assert_eq!(walked.len(), len);
        assert!(walked.windows(2).all(|w| w[0] < w[1]));
    }
}
