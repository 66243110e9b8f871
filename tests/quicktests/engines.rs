use quickcheck_macros::quickcheck;
use search_trees::{AnyTree, Engine, Order, SearchTree};

use std::collections::BTreeSet;

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same keys in both.
fn do_ops<K>(ops: &[Op<K>], tree: &mut AnyTree<K>, set: &mut BTreeSet<K>) -> bool
where
    K: Ord + Clone,
{
    ops.iter().all(|op| match op {
        Op::Insert(k) => tree.insert(k.clone()).is_ok() == set.insert(k.clone()),
        Op::Delete(k) => tree.delete(k) == set.remove(k),
        Op::Search(k) => tree.search(k) == set.contains(k),
    })
}

/// Runs `property` against a fresh tree of every engine.
fn for_each_engine<K>(property: impl Fn(AnyTree<K>) -> bool) -> bool {
    Engine::ALL.into_iter().all(|engine| property(AnyTree::new(engine)))
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    for_each_engine(|mut tree| {
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set)
            && tree.len() == set.len()
            && tree.traverse(Order::InOrder).into_iter().eq(set.iter())
    })
}

#[quickcheck]
fn in_order_is_strictly_ascending(xs: Vec<String>) -> bool {
    for_each_engine(|mut tree| {
        for x in &xs {
            let _ = tree.insert(x.clone());
        }

        tree.traverse(Order::InOrder).windows(2).all(|w| w[0] < w[1])
    })
}

#[quickcheck]
fn orders_visit_the_same_keys(xs: Vec<i16>) -> bool {
    for_each_engine(|mut tree| {
        for x in &xs {
            let _ = tree.insert(*x);
        }

        let mut pre = tree.traverse(Order::PreOrder);
        let mut post = tree.traverse(Order::PostOrder);
        pre.sort();
        post.sort();
        pre == tree.traverse(Order::InOrder) && post == pre
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    for_each_engine(|mut tree| {
        for x in &xs {
            let _ = tree.insert(*x);
        }

        nots.iter()
            .filter(|x| !xs.contains(*x))
            .all(|x| !tree.search(x))
    })
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    for_each_engine(|mut tree| {
        for x in &xs {
            let _ = tree.insert(*x);
        }
        for delete in &deletes {
            tree.delete(delete);
        }

        deletes.iter().all(|x| !tree.search(x))
            && xs
                .iter()
                .filter(|x| !deletes.contains(*x))
                .all(|x| tree.search(x))
    })
}

#[quickcheck]
fn missing_delete_changes_nothing(xs: Vec<i8>, missing: i8) -> bool {
    for_each_engine(|mut tree| {
        for x in xs.iter().filter(|x| **x != missing) {
            let _ = tree.insert(*x);
        }
        let before: Vec<i8> = tree.traverse(Order::InOrder).into_iter().copied().collect();

        !tree.delete(&missing) && tree.traverse(Order::InOrder).into_iter().eq(before.iter())
    })
}
