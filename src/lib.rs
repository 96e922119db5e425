//! # word_count
//!
//! Counts how often the words of a dictionary occur in a set of texts.
//!
//! The binary wires the layers together:
//!
//! - [`cli`]: command line surface
//! - [`config`]: environment and argument resolution
//! - [`logging`]: diagnostics on standard error
//! - [`app`]: the load, count and print passes

// src/lib.rs
#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

/// Name used as the prefix of every diagnostic.
pub const PROGRAM: &str = "word-count";

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
