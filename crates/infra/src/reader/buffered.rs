// crates/infra/src/reader/buffered.rs
use std::{
    io::{ErrorKind, Read},
    ops::Range,
    path::{Path, PathBuf},
    rc::Rc,
};

use log::debug;
use memchr::memchr;
use word_count_ports::{
    lines::LineSource,
    stats::{NoStats, StatsSink},
};
use word_count_shared_kernel::{
    ChunkId, FileRole, IoFailure, IoOperation, Result, invariant_violation, overflow, verify,
};

use crate::{
    arena::BufferArena,
    source::{FileReader, InputSource},
};

/// How the line buffer grows when a line does not fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// `size * 2`
    #[default]
    Double,
    /// `size + initial_capacity`
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// First buffer size; also the increment of [`GrowthPolicy::Linear`].
    pub initial_capacity: usize,
    pub growth: GrowthPolicy,
}

impl ReaderOptions {
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            growth: GrowthPolicy::default(),
        }
    }
}

/// A line that lives in an arena chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredLine {
    pub chunk: ChunkId,
    pub start: usize,
    pub len: usize,
}

impl StoredLine {
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Line reader over a blocking byte source.
///
/// Unconsumed input is the window `[off, off + len)` of a buffer of `size`
/// bytes; `off + len <= size` holds between calls. When an arena is supplied,
/// the first line finalized from a physical buffer moves that whole buffer
/// into the arena; later lines from it are read back from the arena, and the
/// reader never frees it.
pub struct BufferedLineReader<R> {
    source: R,
    role: FileRole,
    file: Option<PathBuf>,
    options: ReaderOptions,
    // empty while the physical buffer is committed
    buf: Vec<u8>,
    size: usize,
    off: usize,
    len: usize,
    eof: bool,
    committed: Option<ChunkId>,
    observer: Rc<dyn StatsSink>,
}

impl BufferedLineReader<InputSource> {
    /// Reader over `path`, or standard input when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an [`IoFailure`] when the file cannot be opened.
    pub fn open(path: Option<&Path>, role: FileRole, options: ReaderOptions) -> Result<Self> {
        let source = FileReader::open_input(path, role)?;
        Ok(Self::new(source, role, path, options))
    }
}

impl<R: Read> BufferedLineReader<R> {
    pub fn new(source: R, role: FileRole, file: Option<&Path>, options: ReaderOptions) -> Self {
        Self {
            source,
            role,
            file: file.map(Path::to_path_buf),
            options,
            buf: Vec::new(),
            size: 0,
            off: 0,
            len: 0,
            eof: false,
            committed: None,
            observer: Rc::new(NoStats),
        }
    }

    pub fn with_observer(mut self, observer: Rc<dyn StatsSink>) -> Self {
        self.observer = observer;
        self
    }

    /// Capacity of the current physical buffer.
    pub fn capacity(&self) -> usize {
        self.size
    }

    /// Next line, borrowed from the reader's own buffer.
    ///
    /// # Errors
    ///
    /// Read failures are fatal; so is calling this after lines were
    /// committed to an arena.
    pub fn read_line(&mut self) -> Result<Option<&[u8]>> {
        let Some(line) = self.advance(None)? else {
            return Ok(None);
        };
        Ok(Some(&self.buf[line]))
    }

    /// Next line, stored in `arena`.
    ///
    /// # Errors
    ///
    /// Read failures and arena overflows are fatal.
    pub fn read_into(&mut self, arena: &mut BufferArena) -> Result<Option<StoredLine>> {
        let Some(line) = self.advance(Some(arena))? else {
            return Ok(None);
        };
        let Some(chunk) = self.committed else {
            return Err(invariant_violation!("line finalized without a committed buffer").into());
        };
        Ok(Some(StoredLine {
            chunk,
            start: line.start,
            len: line.len(),
        }))
    }

    fn advance(&mut self, mut arena: Option<&mut BufferArena>) -> Result<Option<Range<usize>>> {
        loop {
            let end = self.off.checked_add(self.len).ok_or_else(|| overflow!("off + len"))?;
            verify!(end <= self.size, "window {}..{end} beyond buffer of {}", self.off, self.size);

            let newline = memchr(b'\n', self.window(arena.as_deref())?);
            if newline.is_none() && !self.eof {
                self.grow_and_fill(arena.as_deref())?;
                continue;
            }
            if newline.is_none() && self.len == 0 {
                return Ok(None);
            }

            if let Some(arena) = arena.as_deref_mut()
                && self.committed.is_none()
            {
                self.commit(arena)?;
            }

            let (line_len, consumed) = match newline {
                Some(at) => (at, at + 1),
                None => (self.len, self.len),
            };
            let start = self.off;
            self.off += consumed;
            self.len -= consumed;

            self.observer.on_line(line_len);
            return Ok(Some(start..start + line_len));
        }
    }

    fn window<'a>(&'a self, arena: Option<&'a BufferArena>) -> Result<&'a [u8]> {
        let range = self.off..self.off + self.len;
        match self.committed {
            None => Ok(&self.buf[range]),
            Some(chunk) => {
                let Some(arena) = arena else {
                    return Err(invariant_violation!("committed buffer {chunk} read without its arena").into());
                };
                Ok(&arena.chunk(chunk)[range])
            }
        }
    }

    fn commit(&mut self, arena: &mut BufferArena) -> Result<()> {
        let buffer = std::mem::take(&mut self.buf);
        let bytes = buffer.len();
        let chunk = arena.append(buffer)?;
        self.committed = Some(chunk);
        self.observer.on_commit(bytes);
        Ok(())
    }

    fn grown_size(&self) -> Result<usize> {
        let old = self.size;
        let grown = match self.options.growth {
            GrowthPolicy::Double => old.checked_mul(2),
            GrowthPolicy::Linear => old.checked_add(self.options.initial_capacity),
        }
        .ok_or_else(|| overflow!("line buffer growth"))?;
        let new = grown.max(self.options.initial_capacity);
        verify!(new > old, "line buffer does not grow beyond {old} bytes");
        Ok(new)
    }

    fn resize_to(&mut self, new_size: usize) {
        if self.size > 0 {
            debug!("line buffer grows {} -> {new_size} bytes", self.size);
        }
        self.observer.on_grow(self.size, new_size);
        self.size = new_size;
    }

    /// Makes room behind the unconsumed window, then reads into it.
    fn grow_and_fill(&mut self, arena: Option<&BufferArena>) -> Result<()> {
        match self.committed.take() {
            Some(chunk) => {
                // the old buffer belongs to the arena: carry the tail over
                let Some(arena) = arena else {
                    return Err(invariant_violation!("committed buffer {chunk} grown without its arena").into());
                };
                let new_size = self.grown_size()?;
                let mut fresh = vec![0; new_size];
                fresh[..self.len].copy_from_slice(&arena.chunk(chunk)[self.off..self.off + self.len]);
                self.buf = fresh;
                self.off = 0;
                self.resize_to(new_size);
            }
            None => {
                if self.off > 0 {
                    self.buf.copy_within(self.off..self.off + self.len, 0);
                    self.off = 0;
                }
                if self.len == self.size {
                    let new_size = self.grown_size()?;
                    self.buf.resize(new_size, 0);
                    self.resize_to(new_size);
                }
            }
        }
        self.fill()
    }

    fn fill(&mut self) -> Result<()> {
        while !self.eof {
            let end = self.off + self.len;
            if end >= self.size {
                break;
            }
            match self.source.read(&mut self.buf[end..self.size]) {
                Ok(0) => self.eof = true,
                Ok(n) => {
                    self.len += n;
                    self.observer.on_read(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(
                        IoFailure::new(IoOperation::Read, self.role, self.file.as_deref(), e).into(),
                    );
                }
            }
        }
        Ok(())
    }
}

impl<R: Read> LineSource for BufferedLineReader<R> {
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        self.read_line()
    }
}
