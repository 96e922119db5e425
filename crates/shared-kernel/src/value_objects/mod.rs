// crates/shared-kernel/src/value_objects/mod.rs
pub mod counts;
pub mod key_ref;

pub use counts::{Occurrences, WordTotal};
pub use key_ref::{ChunkId, KeyRef};
