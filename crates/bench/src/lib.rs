use std::time::Duration;

use criterion::BenchmarkGroup;
use criterion::measurement::Measurement;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const SMALL_RUNTIME_SAMPLE_SIZE: usize = 15;
const SMALL_RUNTIME_WARM_UP_MS: u64 = 100;
const SMALL_RUNTIME_MEASURE_MS: u64 = 200;
const MEDIUM_RUNTIME_SAMPLE_SIZE: usize = 15;
const MEDIUM_RUNTIME_WARM_UP_MS: u64 = 500;
const MEDIUM_RUNTIME_MEASURE_MS: u64 = 1000;
const MEDIUM_RUNTIME_THRESHOLD: usize = 10_000;
const RNG_SEED: u64 = 0x5EED_2026;
const WORD_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

pub fn apply_small_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(SMALL_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(SMALL_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(SMALL_RUNTIME_MEASURE_MS));
}

pub fn apply_medium_runtime_config<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    group.sample_size(MEDIUM_RUNTIME_SAMPLE_SIZE);
    group.warm_up_time(Duration::from_millis(MEDIUM_RUNTIME_WARM_UP_MS));
    group.measurement_time(Duration::from_millis(MEDIUM_RUNTIME_MEASURE_MS));
}

/// Picks the runtime profile for a workload of `size` elements.
pub fn apply_runtime_config_for_size<M: Measurement>(size: usize, group: &mut BenchmarkGroup<'_, M>) {
    if size >= MEDIUM_RUNTIME_THRESHOLD {
        apply_medium_runtime_config(group);
    } else {
        apply_small_runtime_config(group);
    }
}

pub fn default_rng() -> StdRng {
    StdRng::seed_from_u64(RNG_SEED)
}

/// `0..size` as `i64`, shuffled. Distinct keys keep every insert structural.
pub fn shuffled_keys<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..size as i64).collect();
    keys.shuffle(rng);
    keys
}

/// Lowercase words with lengths in `1..=max_len`.
pub fn random_words<R: Rng + ?Sized>(rng: &mut R, count: usize, max_len: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let len = rng.random_range(1..=max_len.max(1));
            (0..len)
                .map(|_| WORD_ALPHABET[rng.random_range(0..WORD_ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}
