// crates/usecase/src/options.rs
use word_count_domain::Fnv1Hasher;
use word_count_infra::reader::ReaderOptions;
use word_count_ports::hashing::KeyHasher;

/// Key hash used by the dictionary table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HashAlgorithm {
    #[default]
    Fnv1,
    #[cfg(feature = "hash-xx")]
    Xxh32,
}

impl HashAlgorithm {
    pub fn hasher(self) -> Box<dyn KeyHasher> {
        match self {
            Self::Fnv1 => Box::new(Fnv1Hasher),
            #[cfg(feature = "hash-xx")]
            Self::Xxh32 => Box::new(word_count_infra::hashing::Xxh32Hasher::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryOptions {
    /// Map the dictionary file instead of reading it; keys then point into
    /// the mapping.
    pub mapped_dict: bool,
    /// Map each input text instead of reading it.
    pub mapped_text: bool,
    pub reader: ReaderOptions,
    /// Requested initial table size, rounded up to a prime.
    pub table_size: usize,
    pub hash: HashAlgorithm,
}

impl DictionaryOptions {
    pub const DEFAULT_TABLE_SIZE: usize = 1024;
}

impl Default for DictionaryOptions {
    fn default() -> Self {
        Self {
            mapped_dict: false,
            mapped_text: false,
            reader: ReaderOptions::default(),
            table_size: Self::DEFAULT_TABLE_SIZE,
            hash: HashAlgorithm::default(),
        }
    }
}
