//! Benchmark utilities.

use batchlog_core::WriteBatch;
use rand::Rng;

/// Generate random bytes of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}

/// Generate `count` key/value pairs with 16-byte keys and random values.
pub fn generate_pairs(count: usize, value_size: usize) -> Vec<(Vec<u8>, Vec<u8>)> {
    (0..count)
        .map(|i| (format!("key-{:012}", i).into_bytes(), random_data(value_size)))
        .collect()
}

/// Build a batch of puts from `pairs`.
pub fn build_put_batch(pairs: &[(Vec<u8>, Vec<u8>)]) -> WriteBatch {
    let mut batch = WriteBatch::new();
    for (key, value) in pairs {
        batch.put(key, value);
    }
    batch
}
