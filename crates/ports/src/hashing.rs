// crates/ports/src/hashing.rs

/// A non-cryptographic 32-bit hash over key bytes.
pub trait KeyHasher {
    /// Short algorithm name, used in diagnostics and statistics.
    fn name(&self) -> &'static str;

    fn hash32(&self, key: &[u8]) -> u32;
}

impl<H: KeyHasher + ?Sized> KeyHasher for Box<H> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn hash32(&self, key: &[u8]) -> u32 {
        (**self).hash32(key)
    }
}
