// crates/shared-kernel/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub use error::{
    ErrorContext, FileRole, InvariantViolation, IoFailure, IoOperation, Result, WordCountError,
};

pub mod error;
pub mod value_objects;

pub use value_objects::{ChunkId, KeyRef, Occurrences, WordTotal};
