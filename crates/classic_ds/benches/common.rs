use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{apply_runtime_config_for_size, default_rng, random_words, shuffled_keys};
use criterion::measurement::Measurement;
use criterion::{BenchmarkGroup, BenchmarkId};
use rand::Rng;

use classic_ds::{Avl, BalancePolicy, MinHeap, RedBlack, Tree, Trie, Unbalanced};

const SIZES: [usize; 3] = [1_000, 8_000, 64_000];
const LOOKUPS_PER_ITER: usize = 1_000;
const WORD_MAX_LEN: usize = 12;

fn bench_tree_insert<P, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    P: BalancePolicy,
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_runtime_config_for_size(size, group);
        let keys = shuffled_keys(&mut default_rng(), size);

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let start = Instant::now();
                    let mut tree = Tree::<i64, P>::new();
                    for &k in &keys {
                        black_box(tree.insert(k));
                    }
                    black_box(tree.height());
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

fn bench_tree_find<P, T>(group: &mut BenchmarkGroup<'_, T>, label: &str)
where
    P: BalancePolicy,
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_runtime_config_for_size(size, group);
        let mut rng = default_rng();
        let keys = shuffled_keys(&mut rng, size);
        let tree: Tree<i64, P> = keys.iter().copied().collect();
        // Half of the probes miss.
        let probes: Vec<i64> = (0..LOOKUPS_PER_ITER)
            .map(|_| rng.random_range(0..2 * size as i64))
            .collect();

        group.bench_function(BenchmarkId::new(label, size), |bencher| {
            bencher.iter(|| {
                for k in &probes {
                    black_box(tree.find(k));
                }
            })
        });
    }
}

pub fn bench_all_insert<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_tree_insert::<Unbalanced, _>(group, "bst");
    bench_tree_insert::<Avl, _>(group, "avl");
    bench_tree_insert::<RedBlack, _>(group, "rb");
}

pub fn bench_all_find<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    bench_tree_find::<Unbalanced, _>(group, "bst");
    bench_tree_find::<Avl, _>(group, "avl");
    bench_tree_find::<RedBlack, _>(group, "rb");
}

pub fn bench_heap<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_runtime_config_for_size(size, group);
        let keys = shuffled_keys(&mut default_rng(), size);

        group.bench_function(BenchmarkId::new("add_poll", size), |bencher| {
            bencher.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let start = Instant::now();
                    let mut heap = MinHeap::new();
                    for &k in &keys {
                        heap.add(k);
                    }
                    while let Some(k) = heap.poll() {
                        black_box(k);
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

pub fn bench_trie<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_runtime_config_for_size(size, group);
        let words = random_words(&mut default_rng(), size, WORD_MAX_LEN);
        let mut trie = Trie::new();
        for word in &words {
            trie.add_word(word);
        }

        group.bench_function(BenchmarkId::new("does_word_exist", size), |bencher| {
            bencher.iter(|| {
                for word in words.iter().take(LOOKUPS_PER_ITER) {
                    black_box(trie.does_word_exist(word));
                }
            })
        });
    }
}
