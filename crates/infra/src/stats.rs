// crates/infra/src/stats.rs
//! Counters and timings collected through the [`StatsSink`] hooks.

use std::{
    cell::Cell,
    io::{self, Write},
    time::Duration,
};

use serde::Serialize;
use word_count_ports::stats::{Phase, StatsSink};

/// Output format of a [`StatsReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatsFormat {
    #[default]
    Text,
    Json,
}

fn bump(cell: &Cell<u64>, by: u64) {
    cell.set(cell.get().saturating_add(by));
}

fn widen(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// Observer that accumulates everything it is told.
#[derive(Debug, Default)]
pub struct CollectingStats {
    inserts: Cell<u64>,
    duplicates: Cell<u64>,
    insert_probes: Cell<u64>,
    lookups: Cell<u64>,
    hits: Cell<u64>,
    lookup_probes: Cell<u64>,
    rehashes: Cell<u64>,
    table_size: Cell<u64>,
    reads: Cell<u64>,
    bytes_read: Cell<u64>,
    grows: Cell<u64>,
    largest_buffer: Cell<u64>,
    commits: Cell<u64>,
    committed_bytes: Cell<u64>,
    mappings: Cell<u64>,
    mapped_bytes: Cell<u64>,
    lines: Cell<u64>,
    longest_line: Cell<u64>,
    load: Cell<Duration>,
    count: Cell<Duration>,
    print: Cell<Duration>,
}

impl CollectingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counters so far.
    pub fn report(&self) -> StatsReport {
        let ms = |d: &Cell<Duration>| d.get().as_secs_f64() * 1e3;
        StatsReport {
            table: TableStats {
                inserts: self.inserts.get(),
                duplicates: self.duplicates.get(),
                insert_probes: self.insert_probes.get(),
                lookups: self.lookups.get(),
                hits: self.hits.get(),
                lookup_probes: self.lookup_probes.get(),
                rehashes: self.rehashes.get(),
                final_size: self.table_size.get(),
            },
            io: IoStats {
                reads: self.reads.get(),
                bytes_read: self.bytes_read.get(),
                buffer_grows: self.grows.get(),
                largest_buffer: self.largest_buffer.get(),
                commits: self.commits.get(),
                committed_bytes: self.committed_bytes.get(),
                mappings: self.mappings.get(),
                mapped_bytes: self.mapped_bytes.get(),
                lines: self.lines.get(),
                longest_line: self.longest_line.get(),
            },
            timing: TimingStats {
                load_ms: ms(&self.load),
                count_ms: ms(&self.count),
                print_ms: ms(&self.print),
            },
        }
    }
}

impl StatsSink for CollectingStats {
    fn on_create(&self, size: usize) {
        self.table_size.set(widen(size));
    }

    fn on_insert(&self, created: bool, probes: usize) {
        bump(if created { &self.inserts } else { &self.duplicates }, 1);
        bump(&self.insert_probes, widen(probes));
    }

    fn on_lookup(&self, found: bool, probes: usize) {
        bump(&self.lookups, 1);
        if found {
            bump(&self.hits, 1);
        }
        bump(&self.lookup_probes, widen(probes));
    }

    fn on_rehash(&self, _old_size: usize, new_size: usize) {
        bump(&self.rehashes, 1);
        self.table_size.set(widen(new_size));
    }

    fn on_read(&self, bytes: usize) {
        bump(&self.reads, 1);
        bump(&self.bytes_read, widen(bytes));
    }

    fn on_grow(&self, old_size: usize, new_size: usize) {
        // the first allocation is not growth
        if old_size > 0 {
            bump(&self.grows, 1);
        }
        self.largest_buffer.set(self.largest_buffer.get().max(widen(new_size)));
    }

    fn on_commit(&self, bytes: usize) {
        bump(&self.commits, 1);
        bump(&self.committed_bytes, widen(bytes));
    }

    fn on_map(&self, bytes: usize) {
        bump(&self.mappings, 1);
        bump(&self.mapped_bytes, widen(bytes));
    }

    fn on_line(&self, len: usize) {
        bump(&self.lines, 1);
        self.longest_line.set(self.longest_line.get().max(widen(len)));
    }

    fn on_phase(&self, phase: Phase, elapsed: Duration) {
        let cell = match phase {
            Phase::Load => &self.load,
            Phase::Count => &self.count,
            Phase::Print => &self.print,
        };
        cell.set(cell.get().saturating_add(elapsed));
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableStats {
    pub inserts: u64,
    pub duplicates: u64,
    pub insert_probes: u64,
    pub lookups: u64,
    pub hits: u64,
    pub lookup_probes: u64,
    pub rehashes: u64,
    /// Slots after the last rehash, or at creation.
    pub final_size: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IoStats {
    pub reads: u64,
    pub bytes_read: u64,
    pub buffer_grows: u64,
    pub largest_buffer: u64,
    pub commits: u64,
    pub committed_bytes: u64,
    pub mappings: u64,
    pub mapped_bytes: u64,
    pub lines: u64,
    pub longest_line: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingStats {
    pub load_ms: f64,
    pub count_ms: f64,
    pub print_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub table: TableStats,
    pub io: IoStats,
    pub timing: TimingStats,
}

impl StatsReport {
    /// Writes the report in `format`.
    ///
    /// # Errors
    ///
    /// Propagates write and serialization failures.
    pub fn render<W: Write>(&self, format: StatsFormat, out: &mut W) -> io::Result<()> {
        match format {
            StatsFormat::Text => self.render_text(out),
            StatsFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
        }
    }

    fn render_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let t = &self.table;
        let io = &self.io;
        let avg = |probes: u64, ops: u64| if ops == 0 { 0.0 } else { probes as f64 / ops as f64 };

        writeln!(out, "table:")?;
        writeln!(
            out,
            "  inserts {:>12}  duplicates {:>8}  probes/insert {:>8.2}",
            t.inserts,
            t.duplicates,
            avg(t.insert_probes, t.inserts + t.duplicates)
        )?;
        writeln!(
            out,
            "  lookups {:>12}  hits {:>14}  probes/lookup {:>8.2}",
            t.lookups,
            t.hits,
            avg(t.lookup_probes, t.lookups)
        )?;
        writeln!(out, "  rehashes {:>11}  final size {:>8}", t.rehashes, t.final_size)?;
        writeln!(out, "io:")?;
        writeln!(out, "  reads {:>14}  bytes {:>13}", io.reads, io.bytes_read)?;
        writeln!(
            out,
            "  buffer grows {:>7}  largest {:>11}",
            io.buffer_grows, io.largest_buffer
        )?;
        writeln!(
            out,
            "  commits {:>12}  committed {:>9}",
            io.commits, io.committed_bytes
        )?;
        writeln!(out, "  mappings {:>11}  mapped {:>12}", io.mappings, io.mapped_bytes)?;
        writeln!(out, "  lines {:>14}  longest {:>11}", io.lines, io.longest_line)?;
        writeln!(out, "time (ms):")?;
        writeln!(
            out,
            "  load {:>10.3}  count {:>10.3}  print {:>10.3}",
            self.timing.load_ms, self.timing.count_ms, self.timing.print_ms
        )
    }
}
