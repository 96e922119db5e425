// crates/usecase/src/dictionary.rs
use std::{
    io::Write,
    path::Path,
    rc::Rc,
    time::Instant,
};

use log::{debug, trace, warn};
use word_count_domain::{HashTable, words};
use word_count_infra::{
    arena::{Arena, BufferArena},
    mapping::{AccessHint, MappedRegion},
    reader::{BufferedLineReader, MappedLineReader},
};
use word_count_ports::{
    hashing::KeyHasher,
    key_store::KeyStore,
    lines::LineSource,
    stats::{NoStats, Phase, StatsSink},
};
use word_count_shared_kernel::{
    ChunkId, ErrorContext, FileRole, KeyRef, Occurrences, Result, WordTotal, overflow,
};

use crate::options::DictionaryOptions;

type Table = HashTable<Box<dyn KeyHasher>>;

/// Tallies of one dictionary load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub lines: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub truncated: usize,
    /// Over-long keys dropped with a warning.
    pub rejected: usize,
}

/// A word list and the occurrence counters of its words.
///
/// Load the word list once with [`Dictionary::load`], feed any number of
/// texts to [`Dictionary::count`], then [`Dictionary::print`] the result.
pub struct Dictionary {
    table: Table,
    arena: Arena,
    options: DictionaryOptions,
    total: WordTotal,
    observer: Rc<dyn StatsSink>,
}

impl Dictionary {
    /// # Errors
    ///
    /// Fails when the requested table size is out of range.
    pub fn new(options: DictionaryOptions) -> Result<Self> {
        Self::with_observer(options, Rc::new(NoStats))
    }

    /// Dictionary whose table and readers report to `observer`.
    ///
    /// # Errors
    ///
    /// Fails when the requested table size is out of range.
    pub fn with_observer(options: DictionaryOptions, observer: Rc<dyn StatsSink>) -> Result<Self> {
        let table = HashTable::with_hasher(options.table_size, options.hash.hasher())?
            .with_observer(Rc::clone(&observer));
        debug!(
            "dictionary table: {} slots, {} hash, {} keys",
            table.capacity(),
            table.hasher().name(),
            if options.mapped_dict { "mapped" } else { "buffered" }
        );
        Ok(Self {
            table,
            arena: Arena::new(options.mapped_dict),
            options,
            total: WordTotal::zero(),
            observer,
        })
    }

    /// Distinct words loaded.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Words seen across all counted texts, dictionary words or not.
    pub fn total(&self) -> WordTotal {
        self.total
    }

    pub fn table(&self) -> &HashTable<Box<dyn KeyHasher>> {
        &self.table
    }

    /// Counter of `word`, if it is a dictionary word.
    pub fn occurrences(&self, word: &[u8]) -> Option<Occurrences> {
        if word.is_empty() {
            return None;
        }
        let slot = self.table.lookup(word, &self.arena)?;
        self.table.entry(slot).map(|e| e.count)
    }

    /// Dictionary words with their counters, in table storage order.
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], Occurrences)> {
        self.table
            .entries()
            .map(|e| (self.arena.resolve(e.key), e.count))
    }

    /// Reads the newline-separated word list at `path` into the table.
    ///
    /// Blank lines and lines starting with `#` are ignored. Lines holding a
    /// NUL byte are cut there. Duplicates keep their first occurrence.
    ///
    /// # Errors
    ///
    /// I/O failures on the dictionary file and internal size overflows.
    pub fn load(&mut self, path: &Path) -> Result<LoadSummary> {
        let started = Instant::now();
        let mut summary = LoadSummary::default();

        match &mut self.arena {
            Arena::Buffered(arena) => {
                let mut reader =
                    BufferedLineReader::open(Some(path), FileRole::Dictionary, self.options.reader)?
                        .with_observer(Rc::clone(&self.observer));
                while let Some(line) = reader.read_into(arena)? {
                    let store: &BufferArena = arena;
                    let bytes = &store.chunk(line.chunk)[line.range()];
                    admit(&mut self.table, store, line.chunk, line.start, bytes, &mut summary)?;
                }
                trace!("dictionary keys held in {} buffers, {} bytes", arena.len(), arena.total_bytes());
            }
            Arena::Mapped(arena) => {
                let region = MappedRegion::open(Some(path), FileRole::Dictionary)?;
                region.advise(AccessHint::Sequential)?;
                self.observer.on_map(region.len());
                let chunk = arena.append(region)?;

                let store = &*arena;
                let data = store.region(chunk).as_bytes();
                let mut reader = MappedLineReader::new(data);
                while let Some(span) = reader.next_span()? {
                    let start = span.start;
                    admit(&mut self.table, store, chunk, start, &data[span], &mut summary)?;
                }
                store.advise(chunk, AccessHint::Random)?;
                trace!("dictionary keys held in {} mapped regions", store.len());
            }
        }

        debug!(
            "loaded dictionary '{}': {} words from {} lines, {} duplicates, table {}/{} slots",
            path.display(),
            summary.inserted,
            summary.lines,
            summary.duplicates,
            self.table.len(),
            self.table.capacity()
        );
        self.observer.on_phase(Phase::Load, started.elapsed());
        Ok(summary)
    }

    /// Counts the dictionary words of the text at `path`, or of standard
    /// input when `path` is `None`. Returns the number of words seen.
    ///
    /// # Errors
    ///
    /// I/O failures on the text and counter overflows.
    pub fn count(&mut self, path: Option<&Path>) -> Result<WordTotal> {
        let started = Instant::now();

        let seen = if self.options.mapped_text {
            let region = MappedRegion::open(path, FileRole::Input)?;
            region.advise(AccessHint::Sequential)?;
            self.observer.on_map(region.len());
            let mut reader = MappedLineReader::new(region.as_bytes());
            tally(&mut reader, &mut self.table, &self.arena)?
        } else {
            let mut reader = BufferedLineReader::open(path, FileRole::Input, self.options.reader)?
                .with_observer(Rc::clone(&self.observer));
            tally(&mut reader, &mut self.table, &self.arena)?
        };

        self.total = self
            .total
            .checked_add_total(seen)
            .ok_or_else(|| overflow!("total word count"))?;
        trace!(
            "counted '{}': {seen} words",
            path.map_or_else(|| "<stdin>".into(), |p| p.display().to_string())
        );
        self.observer.on_phase(Phase::Count, started.elapsed());
        Ok(seen)
    }

    /// Writes `count\tword` for every word seen at least once, in table
    /// storage order, then `total\ttotal`.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn print<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let started = Instant::now();
        self.table
            .print(&self.arena, out)
            .context("writing word counters")?;
        writeln!(out, "{}\ttotal", self.total).context("writing word total")?;
        self.observer.on_phase(Phase::Print, started.elapsed());
        Ok(())
    }
}

/// Feeds one dictionary line, stored at `start` in `chunk`, to the table.
fn admit<S: KeyStore + ?Sized>(
    table: &mut Table,
    store: &S,
    chunk: ChunkId,
    start: usize,
    line: &[u8],
    summary: &mut LoadSummary,
) -> Result<()> {
    summary.lines = summary.lines.checked_add(1).ok_or_else(|| overflow!("line number"))?;
    let lineno = summary.lines;

    let mut len = line.len();
    if let Some(nul) = line.iter().position(|&b| b == 0) {
        warn!("NUL char in line #{lineno}: truncating it from length {len} to {nul}");
        summary.truncated += 1;
        len = nul;
    }
    let word = &line[..len];
    if word.is_empty() || word[0] == b'#' {
        return Ok(());
    }

    let Some(key) = KeyRef::try_new(chunk, start, len) else {
        warn!(
            "ignoring word on line #{lineno}: its length {len} exceeds the maximum allowed {}",
            KeyRef::MAX_LEN
        );
        summary.rejected += 1;
        return Ok(());
    };

    let insertion = table.insert(key, store)?;
    if insertion.created {
        summary.inserted += 1;
    } else {
        warn!(
            "duplicated word in line #{lineno}: '{}'",
            String::from_utf8_lossy(word)
        );
        summary.duplicates += 1;
    }
    Ok(())
}

/// Counts every word of `source`, bumping the counters of dictionary words.
fn tally(source: &mut dyn LineSource, table: &mut Table, store: &Arena) -> Result<WordTotal> {
    let mut seen = WordTotal::zero();
    while let Some(line) = source.next_line()? {
        for word in words(line) {
            seen = seen.checked_add(1).ok_or_else(|| overflow!("word count + 1"))?;
            if let Some(slot) = table.lookup(word, store) {
                table.increment(slot)?;
            }
        }
    }
    Ok(seen)
}
