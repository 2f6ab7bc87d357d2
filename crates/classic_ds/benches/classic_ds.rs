use criterion::{Criterion, criterion_group, criterion_main};

mod common;

fn bench(c: &mut Criterion) {
    let mut insert = c.benchmark_group("classic_ds/tree_insert");
    common::bench_all_insert(&mut insert);
    insert.finish();

    let mut find = c.benchmark_group("classic_ds/tree_find");
    common::bench_all_find(&mut find);
    find.finish();

    let mut heap = c.benchmark_group("classic_ds/min_heap");
    common::bench_heap(&mut heap);
    heap.finish();

    let mut trie = c.benchmark_group("classic_ds/trie");
    common::bench_trie(&mut trie);
    trie.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
