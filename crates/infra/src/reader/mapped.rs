// crates/infra/src/reader/mapped.rs
use std::ops::Range;

use memchr::memchr;
use word_count_ports::lines::LineSource;
use word_count_shared_kernel::{Result, verify};

/// Line cursor over an immutable byte slice, typically a mapped file.
#[derive(Debug, Clone)]
pub struct MappedLineReader<'a> {
    data: &'a [u8],
    cursor: usize,
}

impl<'a> MappedLineReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, cursor: 0 }
    }

    /// Offset of the first unconsumed byte.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Range of the next line within the slice, terminator excluded.
    ///
    /// # Errors
    ///
    /// Fails only when the cursor has run past the data.
    pub fn next_span(&mut self) -> Result<Option<Range<usize>>> {
        let size = self.data.len();
        verify!(self.cursor <= size, "cursor {} beyond {size} bytes", self.cursor);
        if self.cursor == size {
            return Ok(None);
        }

        let start = self.cursor;
        let (end, consumed) = match memchr(b'\n', &self.data[start..]) {
            Some(at) => (start + at, at + 1),
            None => (size, size - start),
        };
        self.cursor += consumed;
        Ok(Some(start..end))
    }

    /// Next line, borrowed for the full lifetime of the data.
    ///
    /// # Errors
    ///
    /// See [`MappedLineReader::next_span`].
    pub fn next_slice(&mut self) -> Result<Option<&'a [u8]>> {
        let data = self.data;
        Ok(self.next_span()?.map(|span| &data[span]))
    }
}

impl LineSource for MappedLineReader<'_> {
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.next_slice()
    }
}
