//! # Domain
//!
//! The word-frequency dictionary proper:
//!
//! - [`prime`]: prime table sizing
//! - [`hash`]: the default FNV-1 key hasher
//! - [`table`]: the linear-probing hash table mapping keys to counters
//! - [`tokenizer`]: ASCII whitespace word splitting

// crates/domain/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod hash;
pub mod prime;
pub mod table;
pub mod tokenizer;

pub use hash::Fnv1Hasher;
pub use prime::next_prime;
pub use table::{Entry, HashTable, Insertion};
pub use tokenizer::{Words, words};
