// src/cli.rs
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::config::MmapSpec;

/// Largest `--table-size` accepted; the table still grows past it on demand.
pub const MAX_TABLE_SIZE: u32 = 1 << 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum BufferGrowth {
    /// Double the line buffer
    #[default]
    Double,
    /// Add the initial buffer size
    Linear,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum HashName {
    /// FNV-1, 32 bit
    #[default]
    Fnv,
    /// xxHash, 32 bit
    Xxh32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum StatsOutput {
    #[default]
    Text,
    Json,
}

/// Count occurrences of dictionary words in text files.
///
/// Prints `count<TAB>word` for every dictionary word found in the texts,
/// then `total<TAB>total` with the number of all words seen.
#[derive(Parser, Debug)]
#[command(name = "word-count", version = crate::VERSION, about, long_about = None)]
pub struct Args {
    /// Use memory-mapped I/O instead of buffered I/O: one of 'dict', 'text',
    /// 'none' or 'all'; '-' is a shortcut for 'none' and '+' for 'all'
    /// [env: WORD_COUNT_USE_MMAP_IO]
    #[arg(short = 'm', long = "use-mmap-io", value_name = "SPEC", allow_hyphen_values = true)]
    pub use_mmap_io: Option<MmapSpec>,

    /// How the line buffer grows when a line does not fit
    #[arg(long, value_enum, default_value_t = BufferGrowth::Double, value_name = "POLICY")]
    pub buffer_growth: BufferGrowth,

    /// Initial line buffer size in bytes
    #[arg(long, default_value_t = 65536, value_name = "BYTES", value_parser = clap::value_parser!(u32).range(1..))]
    pub buffer_size: u32,

    /// Initial dictionary table size; rounded up to a prime
    #[arg(
        long,
        default_value_t = 1024,
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_TABLE_SIZE))
    )]
    pub table_size: u32,

    /// Hash function of the dictionary table
    #[arg(long, value_enum, default_value_t = HashName::Fnv, value_name = "ALGO")]
    pub hash: HashName,

    /// Print internal statistics to stderr when done
    #[arg(
        long,
        value_enum,
        value_name = "FMT",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "text"
    )]
    pub print_stats: Option<StatsOutput>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Dictionary file: one word per line, '#' comments
    #[arg(value_name = "DICT")]
    pub dict: PathBuf,

    /// Text files; standard input when none is given
    #[arg(value_name = "TEXT")]
    pub texts: Vec<PathBuf>,
}
