//! # Ports
//!
//! Interface definitions for the collaborators of the word-frequency core.
//!
//! - [`hashing`]: 32-bit key hashing for the dictionary table
//! - [`key_store`]: resolving arena-owned key handles back to bytes
//! - [`lines`]: newline-delimited record sources
//! - [`stats`]: optional instrumentation observer
//!
//! These ports let the domain table and the use-case layer stay independent
//! of the concrete arena, reader and statistics implementations.

// crates/ports/src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod hashing;
pub mod key_store;
pub mod lines;
pub mod stats;
