// crates/infra/src/reader.rs
//! Newline-delimited record readers.
//!
//! Two implementations share the [`LineSource`](word_count_ports::lines::LineSource)
//! contract: [`BufferedLineReader`] reads into a growable buffer that can be
//! handed over to a [`BufferArena`](crate::arena::BufferArena), and
//! [`MappedLineReader`] walks a cursor over a mapped file.

pub mod buffered;
pub mod mapped;

pub use buffered::{BufferedLineReader, GrowthPolicy, ReaderOptions, StoredLine};
pub use mapped::MappedLineReader;
