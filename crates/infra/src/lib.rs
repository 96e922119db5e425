// crates/infra/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod arena;
#[cfg(feature = "hash-xx")]
pub mod hashing;
pub mod mapping;
pub mod reader;
pub mod source;
pub mod stats;
