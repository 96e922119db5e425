// crates/infra/src/hashing.rs
use word_count_ports::hashing::KeyHasher;
use xxhash_rust::xxh32::xxh32;

/// 32-bit xxHash.
#[derive(Debug, Default, Clone, Copy)]
pub struct Xxh32Hasher {
    pub seed: u32,
}

impl KeyHasher for Xxh32Hasher {
    fn name(&self) -> &'static str {
        "xxh32"
    }

    #[inline]
    fn hash32(&self, key: &[u8]) -> u32 {
        xxh32(key, self.seed)
    }
}
