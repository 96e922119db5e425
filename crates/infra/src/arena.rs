// crates/infra/src/arena.rs
//! Backing storage for dictionary keys.
//!
//! Keys are addressed by [`KeyRef`] handles (chunk index, offset, length) and
//! stay valid for the arena's lifetime. Chunks are released in reverse
//! creation order.

use log::debug;
use word_count_ports::key_store::KeyStore;
use word_count_shared_kernel::{ChunkId, KeyRef, Result, overflow};

use crate::mapping::{AccessHint, MappedRegion};

fn next_chunk_id(len: usize) -> Result<ChunkId> {
    let id = u32::try_from(len).map_err(|_| overflow!("arena chunk count"))?;
    Ok(ChunkId::new(id))
}

/// Chain of whole line-reader buffers, taken over without copying.
#[derive(Debug, Default)]
pub struct BufferArena {
    chunks: Vec<Vec<u8>>,
    bytes: usize,
}

impl BufferArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `buffer`.
    ///
    /// # Errors
    ///
    /// Fails when the chunk count or byte total overflows.
    pub fn append(&mut self, buffer: Vec<u8>) -> Result<ChunkId> {
        let id = next_chunk_id(self.chunks.len())?;
        self.bytes = self
            .bytes
            .checked_add(buffer.len())
            .ok_or_else(|| overflow!("arena byte total"))?;
        debug!("arena took buffer {id} ({} bytes)", buffer.len());
        self.chunks.push(buffer);
        Ok(id)
    }

    pub fn chunk(&self, id: ChunkId) -> &[u8] {
        &self.chunks[id.index()]
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Bytes held across all chunks.
    pub fn total_bytes(&self) -> usize {
        self.bytes
    }
}

impl KeyStore for BufferArena {
    fn resolve(&self, key: KeyRef) -> &[u8] {
        &self.chunk(key.chunk)[key.range()]
    }
}

impl Drop for BufferArena {
    fn drop(&mut self) {
        while self.chunks.pop().is_some() {}
    }
}

/// Chain of memory-mapped files whose bytes serve directly as keys.
#[derive(Default)]
pub struct MapArena {
    regions: Vec<MappedRegion>,
}

impl MapArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `region` mapped until the arena is dropped.
    ///
    /// # Errors
    ///
    /// Fails when the chunk count overflows.
    pub fn append(&mut self, region: MappedRegion) -> Result<ChunkId> {
        let id = next_chunk_id(self.regions.len())?;
        self.regions.push(region);
        Ok(id)
    }

    pub fn region(&self, id: ChunkId) -> &MappedRegion {
        &self.regions[id.index()]
    }

    /// # Errors
    ///
    /// Propagates `madvise` failures.
    pub fn advise(&self, id: ChunkId, hint: AccessHint) -> Result<()> {
        self.region(id).advise(hint)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl KeyStore for MapArena {
    fn resolve(&self, key: KeyRef) -> &[u8] {
        &self.region(key.chunk).as_bytes()[key.range()]
    }
}

impl Drop for MapArena {
    fn drop(&mut self) {
        while self.regions.pop().is_some() {}
    }
}

/// Key storage chosen once, when the dictionary is created.
pub enum Arena {
    Buffered(BufferArena),
    Mapped(MapArena),
}

impl Arena {
    pub fn new(mapped: bool) -> Self {
        if mapped {
            Self::Mapped(MapArena::new())
        } else {
            Self::Buffered(BufferArena::new())
        }
    }
}

impl KeyStore for Arena {
    fn resolve(&self, key: KeyRef) -> &[u8] {
        match self {
            Self::Buffered(arena) => arena.resolve(key),
            Self::Mapped(arena) => arena.resolve(key),
        }
    }
}
