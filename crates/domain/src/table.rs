// crates/domain/src/table.rs
//! Linear-probing hash table from arena-owned keys to occurrence counters.
//!
//! Table sizes are always prime. Probing starts at `hash % size` and walks
//! backward, wrapping from slot 0 to slot `size - 1`. A new key that would
//! push `used` past `floor(size * 3 / 4)` first doubles the table (rounded up
//! to the next prime) and re-places every entry.

use std::{io, rc::Rc};

use log::debug;
use word_count_ports::{
    hashing::KeyHasher,
    key_store::KeyStore,
    stats::{NoStats, StatsSink},
};
use word_count_shared_kernel::{KeyRef, Occurrences, Result, overflow, verify};

use crate::{hash::Fnv1Hasher, prime::next_prime};

/// Size requested when the caller asks for zero.
pub const DEFAULT_REQUEST: usize = 512;

// load factor 3/4, Knuth TAOCP vol. 3, 6.4
const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

const GROWTH_FACTOR: usize = 2;

/// An occupied slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub key: KeyRef,
    pub count: Occurrences,
}

/// Outcome of [`HashTable::insert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    /// `false` when an equal key was already present.
    pub created: bool,
    pub slot: usize,
}

enum Probe {
    Found(usize),
    Vacant(usize),
}

pub struct HashTable<H = Fnv1Hasher> {
    slots: Vec<Option<Entry>>,
    used: usize,
    max_load: usize,
    hasher: H,
    observer: Rc<dyn StatsSink>,
}

impl HashTable<Fnv1Hasher> {
    /// Table of at least `requested` slots hashing with FNV-1.
    ///
    /// # Errors
    ///
    /// Fails only on size arithmetic violations.
    pub fn new(requested: usize) -> Result<Self> {
        Self::with_hasher(requested, Fnv1Hasher)
    }
}

impl<H: KeyHasher> HashTable<H> {
    /// # Errors
    ///
    /// Fails when `requested` is beyond the prime ceiling.
    pub fn with_hasher(requested: usize, hasher: H) -> Result<Self> {
        let requested = if requested == 0 { DEFAULT_REQUEST } else { requested };
        let size = next_prime(requested)?;
        let max_load = max_load_for(size)?;

        Ok(Self {
            slots: vec![None; size],
            used: 0,
            max_load,
            hasher,
            observer: Rc::new(NoStats),
        })
    }

    pub fn with_observer(mut self, observer: Rc<dyn StatsSink>) -> Self {
        observer.on_create(self.capacity());
        self.observer = observer;
        self
    }

    /// Occupied slots.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Total slots; always prime.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Largest `len()` reachable without a rehash.
    pub fn max_load(&self) -> usize {
        self.max_load
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn entry(&self, slot: usize) -> Option<&Entry> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Occupied slots in storage order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.slots.iter().flatten()
    }

    /// Inserts `key` with a zero counter unless an equal key is present, in
    /// which case the existing slot is returned untouched.
    ///
    /// `key` must be non-empty and resolvable through `store`.
    ///
    /// # Errors
    ///
    /// Fails on size arithmetic violations while growing.
    pub fn insert<S: KeyStore + ?Sized>(&mut self, key: KeyRef, store: &S) -> Result<Insertion> {
        debug_assert!(!key.is_empty());
        let bytes = store.resolve(key);
        let hash = self.hasher.hash32(bytes);

        let (probe, probes) = self.probe(bytes, hash, store);
        let mut slot = match probe {
            Probe::Found(slot) => {
                self.observer.on_insert(false, probes);
                return Ok(Insertion {
                    created: false,
                    slot,
                });
            }
            Probe::Vacant(slot) => slot,
        };

        debug_assert!(self.max_load < self.capacity());
        if self.used >= self.max_load {
            // used < old size < new size, so a vacant slot exists afterwards
            self.rehash(store)?;
            slot = vacant_slot(&self.slots, hash);
        }

        self.slots[slot] = Some(Entry {
            key,
            count: Occurrences::zero(),
        });
        self.used = self.used.checked_add(1).ok_or_else(|| overflow!("used + 1"))?;
        verify!(self.used < self.capacity());

        self.observer.on_insert(true, probes);
        Ok(Insertion {
            created: true,
            slot,
        })
    }

    /// Slot holding a key byte-equal to `key`, if any.
    pub fn lookup<S: KeyStore + ?Sized>(&self, key: &[u8], store: &S) -> Option<usize> {
        debug_assert!(!key.is_empty());
        let hash = self.hasher.hash32(key);
        let (probe, probes) = self.probe(key, hash, store);
        match probe {
            Probe::Found(slot) => {
                self.observer.on_lookup(true, probes);
                Some(slot)
            }
            Probe::Vacant(_) => {
                self.observer.on_lookup(false, probes);
                None
            }
        }
    }

    /// Bumps the counter at `slot`.
    ///
    /// # Errors
    ///
    /// Fails when the slot is empty or the counter would overflow.
    pub fn increment(&mut self, slot: usize) -> Result<Occurrences> {
        let entry = self.slots.get_mut(slot).and_then(Option::as_mut);
        let Some(entry) = entry else {
            return Err(word_count_shared_kernel::invariant_violation!(
                "increment of empty slot {slot}"
            )
            .into());
        };
        entry.count = entry
            .count
            .checked_increment()
            .ok_or_else(|| overflow!("occurrence counter + 1"))?;
        Ok(entry.count)
    }

    /// Grows the table to the next prime at or above twice its size and
    /// re-places every entry. Keys and counters are moved as-is.
    ///
    /// # Errors
    ///
    /// Fails when the new size overflows or does not strictly grow.
    pub fn rehash<S: KeyStore + ?Sized>(&mut self, store: &S) -> Result<()> {
        let old_size = self.capacity();
        let doubled = old_size
            .checked_mul(GROWTH_FACTOR)
            .ok_or_else(|| overflow!("table size * 2"))?;
        verify!(doubled > old_size);
        let new_size = next_prime(doubled)?;
        verify!(new_size > old_size);

        let mut slots = vec![None; new_size];
        for entry in self.slots.iter().flatten() {
            let hash = self.hasher.hash32(store.resolve(entry.key));
            let slot = vacant_slot(&slots, hash);
            slots[slot] = Some(*entry);
        }

        self.slots = slots;
        self.max_load = max_load_for(new_size)?;

        debug!("rehashed dictionary table: {old_size} -> {new_size} slots ({} used)", self.used);
        self.observer.on_rehash(old_size, new_size);
        Ok(())
    }

    /// Writes `count\tword` for every entry with a nonzero counter, in
    /// storage order.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn print<S, W>(&self, store: &S, out: &mut W) -> io::Result<()>
    where
        S: KeyStore + ?Sized,
        W: io::Write + ?Sized,
    {
        for entry in self.entries().filter(|e| !e.count.is_zero()) {
            write!(out, "{}\t", entry.count)?;
            out.write_all(store.resolve(entry.key))?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    fn probe<S: KeyStore + ?Sized>(&self, key: &[u8], hash: u32, store: &S) -> (Probe, usize) {
        let size = self.capacity();
        let mut slot = start_slot(hash, size);
        let mut probes = 1;

        // terminates: used < size leaves at least one vacant slot
        while let Some(entry) = &self.slots[slot] {
            if entry.key.len() == key.len() && store.resolve(entry.key) == key {
                return (Probe::Found(slot), probes);
            }
            slot = previous_slot(slot, size);
            probes += 1;
        }
        (Probe::Vacant(slot), probes)
    }
}

impl<H> std::fmt::Debug for HashTable<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashTable")
            .field("size", &self.slots.len())
            .field("used", &self.used)
            .field("max_load", &self.max_load)
            .finish_non_exhaustive()
    }
}

#[inline]
fn start_slot(hash: u32, size: usize) -> usize {
    hash as usize % size
}

#[inline]
fn previous_slot(slot: usize, size: usize) -> usize {
    if slot == 0 { size - 1 } else { slot - 1 }
}

fn vacant_slot(slots: &[Option<Entry>], hash: u32) -> usize {
    let size = slots.len();
    let mut slot = start_slot(hash, size);
    while slots[slot].is_some() {
        slot = previous_slot(slot, size);
    }
    slot
}

fn max_load_for(size: usize) -> Result<usize> {
    let scaled = size
        .checked_mul(LOAD_NUM)
        .ok_or_else(|| overflow!("table size * 3"))?;
    let max_load = scaled / LOAD_DEN;
    verify!(max_load < size);
    verify!(max_load > 0);
    Ok(max_load)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use word_count_shared_kernel::ChunkId;

    use super::*;

    /// Every key in its own chunk at offset 0.
    #[derive(Default)]
    struct VecStore(Vec<Vec<u8>>);

    impl VecStore {
        fn add(&mut self, word: &[u8]) -> KeyRef {
            let id = ChunkId::new(u32::try_from(self.0.len()).unwrap());
            self.0.push(word.to_vec());
            KeyRef::try_new(id, 0, word.len()).unwrap()
        }
    }

    impl KeyStore for VecStore {
        fn resolve(&self, key: KeyRef) -> &[u8] {
            &self.0[key.chunk.index()][key.range()]
        }
    }

    /// Sends every key to the same start bucket.
    struct ConstHasher(u32);

    impl KeyHasher for ConstHasher {
        fn name(&self) -> &'static str {
            "const"
        }

        fn hash32(&self, _key: &[u8]) -> u32 {
            self.0
        }
    }

    #[derive(Default)]
    struct RehashCounter {
        rehashes: Cell<usize>,
        size: Cell<usize>,
    }

    impl StatsSink for RehashCounter {
        fn on_create(&self, size: usize) {
            self.size.set(size);
        }

        fn on_rehash(&self, _old: usize, new: usize) {
            self.rehashes.set(self.rehashes.get() + 1);
            self.size.set(new);
        }
    }

    #[test]
    fn new_table_is_prime_sized_and_empty() {
        let table = HashTable::new(1024).unwrap();
        assert_eq!(table.capacity(), 1031);
        assert_eq!(table.max_load(), 1031 * 3 / 4);
        assert!(table.is_empty());

        let table = HashTable::new(0).unwrap();
        assert_eq!(table.capacity(), 521);
    }

    #[test]
    fn duplicate_insert_keeps_first_slot_and_counter() {
        let mut store = VecStore::default();
        let mut table = HashTable::new(16).unwrap();

        let first = store.add(b"apple");
        let ins = table.insert(first, &store).unwrap();
        assert!(ins.created);
        table.increment(ins.slot).unwrap();

        let second = store.add(b"apple");
        let dup = table.insert(second, &store).unwrap();
        assert!(!dup.created);
        assert_eq!(dup.slot, ins.slot);
        assert_eq!(table.entry(dup.slot).unwrap().key, first);
        assert_eq!(table.entry(dup.slot).unwrap().count, Occurrences::new(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn collisions_probe_backward_and_wrap() {
        let mut store = VecStore::default();
        let mut table = HashTable::with_hasher(7, ConstHasher(1)).unwrap();

        let slots: Vec<usize> = [&b"a"[..], b"b", b"c"]
            .iter()
            .map(|w| {
                let key = store.add(w);
                table.insert(key, &store).unwrap().slot
            })
            .collect();
        // start at 1, then 0, then wrap to 6
        assert_eq!(slots, vec![1, 0, 6]);

        for (word, slot) in [&b"a"[..], b"b", b"c"].iter().zip(&slots) {
            assert_eq!(table.lookup(word, &store), Some(*slot));
        }
        assert_eq!(table.lookup(b"d", &store), None);
    }

    #[test]
    fn growth_triggers_only_past_max_load() {
        let mut store = VecStore::default();
        let counter = Rc::new(RehashCounter::default());
        let mut table = HashTable::new(7).unwrap().with_observer(counter.clone());
        assert_eq!(table.max_load(), 5);
        assert_eq!(counter.size.get(), 7);

        for i in 0..5 {
            let key = store.add(format!("w{i}").as_bytes());
            table.insert(key, &store).unwrap();
        }
        assert_eq!(table.capacity(), 7);
        assert_eq!(counter.rehashes.get(), 0);

        let key = store.add(b"w5");
        table.insert(key, &store).unwrap();
        assert_eq!(table.capacity(), 17);
        assert_eq!(table.len(), 6);
        assert_eq!(counter.rehashes.get(), 1);
        assert_eq!(counter.size.get(), 17);
    }

    #[test]
    fn duplicate_at_max_load_does_not_grow() {
        let mut store = VecStore::default();
        let mut table = HashTable::new(7).unwrap();
        for i in 0..5 {
            let key = store.add(format!("w{i}").as_bytes());
            table.insert(key, &store).unwrap();
        }
        let dup = store.add(b"w0");
        assert!(!table.insert(dup, &store).unwrap().created);
        assert_eq!(table.capacity(), 7);
    }

    #[test]
    fn increment_of_empty_slot_is_internal_error() {
        let mut table = HashTable::new(7).unwrap();
        assert!(table.increment(3).unwrap_err().is_internal());
        assert!(table.increment(100).unwrap_err().is_internal());
    }

    #[test]
    fn increment_overflow_is_internal_error() {
        let mut store = VecStore::default();
        let mut table = HashTable::new(7).unwrap();
        let key = store.add(b"x");
        let slot = table.insert(key, &store).unwrap().slot;
        table.slots[slot].as_mut().unwrap().count = Occurrences::new(u32::MAX);
        assert!(table.increment(slot).unwrap_err().is_internal());
    }

    #[test]
    fn print_skips_zero_counters() {
        let mut store = VecStore::default();
        let mut table = HashTable::new(7).unwrap();
        let seen = store.add(b"seen");
        let unseen = store.add(b"unseen");
        let slot = table.insert(seen, &store).unwrap().slot;
        table.insert(unseen, &store).unwrap();
        table.increment(slot).unwrap();
        table.increment(slot).unwrap();

        let mut out = Vec::new();
        table.print(&store, &mut out).unwrap();
        assert_eq!(out, b"2\tseen\n");
    }
}
