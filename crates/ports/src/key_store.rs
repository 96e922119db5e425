// crates/ports/src/key_store.rs
use word_count_shared_kernel::KeyRef;

/// Owner of key bytes referenced by [`KeyRef`] handles.
pub trait KeyStore {
    /// Bytes behind `key`. Handles must come from this store.
    fn resolve(&self, key: KeyRef) -> &[u8];
}

impl<S: KeyStore + ?Sized> KeyStore for &S {
    fn resolve(&self, key: KeyRef) -> &[u8] {
        (**self).resolve(key)
    }
}
