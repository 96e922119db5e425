//! # Use Cases
//!
//! Application-level orchestration of the word-frequency dictionary.
//!
//! - [`options`]: how keys and texts are read and the table is sized
//! - [`dictionary`]: the `load`, `count` and `print` passes
//!
//! The dictionary owns both the hash table and the arena its keys live in.

#![allow(clippy::multiple_crate_versions)]

pub mod dictionary;
pub mod options;

pub use dictionary::{Dictionary, LoadSummary};
pub use options::{DictionaryOptions, HashAlgorithm};
