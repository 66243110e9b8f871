use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use search_trees::{AnyTree, Engine, SearchTree};

/// Helper to bench a function on a BST.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// engines before finishing the group.
///
/// Keys are inserted in middle-first order so the unbalanced tree comes out full with
/// `num_levels` levels, the same height a balanced tree would have. `benches/shapes.rs` covers
/// sorted input.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut AnyTree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let keys = balanced_keys(num_nodes);

        for engine in Engine::ALL {
            let mut tree = AnyTree::new(engine);
            for key in &keys {
                let _ = tree.insert(*key);
            }
            let largest_element_in_tree = num_nodes as i32 - 1;
            let id = BenchmarkId::new(engine.label(), largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(tree.clone());
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// `0..n` ordered so that inserting them without any self-balancing builds a full tree: each
/// range's middle key comes before either half.
fn balanced_keys(n: usize) -> Vec<i32> {
    let xs = (0..n as i32).collect::<Vec<_>>();
    let mut out = Vec::with_capacity(n);
    fill_balanced(&xs, &mut out);
    out
}

/// Recursive helper for [`balanced_keys`].
fn fill_balanced(xs: &[i32], out: &mut Vec<i32>) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        out.push(xs[mid]);
        fill_balanced(&xs[..mid], out);
        fill_balanced(&xs[mid + 1..], out);
    }
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "search", |tree, i| {
        let _found = black_box(tree.search(&i));
    });
    bench_helper(c, "delete", |tree, i| {
        tree.delete(&i);
    });

    bench_helper(c, "insert", |tree, i| {
        let _ = tree.insert(i + 1);
    });

    bench_helper(c, "search-miss", |tree, i| {
        let _found = black_box(tree.search(&(i + 1)));
    });
    bench_helper(c, "delete-miss", |tree, i| {
        tree.delete(&(i + 1));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
