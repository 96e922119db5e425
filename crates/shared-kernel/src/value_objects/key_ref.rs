// crates/shared-kernel/src/value_objects/key_ref.rs
use std::{fmt, ops::Range};

use serde::{Deserialize, Serialize};

/// Index of a storage node inside a key arena, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(u32);

impl ChunkId {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle to a dictionary key living in arena-owned storage.
///
/// The handle does not borrow the arena; resolving it against any other
/// arena than the one that produced it yields unrelated bytes or a panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyRef {
    pub chunk: ChunkId,
    pub offset: usize,
    pub len: u32,
}

impl KeyRef {
    /// Longest key a handle can describe.
    pub const MAX_LEN: usize = u32::MAX as usize;

    #[inline]
    pub const fn new(chunk: ChunkId, offset: usize, len: u32) -> Self {
        Self { chunk, offset, len }
    }

    /// Handle for `len` bytes at `offset`, or `None` when `len` exceeds
    /// [`KeyRef::MAX_LEN`].
    #[inline]
    pub fn try_new(chunk: ChunkId, offset: usize, len: usize) -> Option<Self> {
        u32::try_from(len).ok().map(|len| Self::new(chunk, offset, len))
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte range of the key inside its chunk.
    #[inline]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len as usize
    }
}
