// src/config.rs
use std::{path::PathBuf, str::FromStr};

use word_count_infra::{
    reader::{GrowthPolicy, ReaderOptions},
    stats::StatsFormat,
};
use word_count_usecase::{DictionaryOptions, HashAlgorithm};

use crate::cli::{Args, BufferGrowth, HashName, StatsOutput};

/// Environment variable pre-setting `--use-mmap-io`.
pub const MMAP_ENV: &str = "WORD_COUNT_USE_MMAP_IO";

/// Which inputs are memory-mapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MmapSpec {
    pub dict: bool,
    pub text: bool,
}

impl FromStr for MmapSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dict, text) = match s {
            "dict" => (true, false),
            "text" => (false, true),
            "none" | "-" => (false, false),
            "all" | "+" => (true, true),
            _ => {
                return Err(format!(
                    "invalid argument '{s}': expected one of 'dict', 'text', 'none', 'all', '+', '-'"
                ));
            }
        };
        Ok(Self { dict, text })
    }
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub dict: PathBuf,
    /// Empty means standard input.
    pub texts: Vec<PathBuf>,
    pub dictionary: DictionaryOptions,
    pub stats: Option<StatsFormat>,
    pub verbosity: u8,
}

impl AppConfig {
    /// Merges `args` over the value of [`MMAP_ENV`], if any. An
    /// unrecognized environment value is ignored.
    pub fn resolve(args: Args, env_mmap: Option<&str>) -> Self {
        let mmap = args
            .use_mmap_io
            .or_else(|| env_mmap.and_then(|v| v.parse().ok()))
            .unwrap_or_default();

        let reader = ReaderOptions {
            initial_capacity: args.buffer_size as usize,
            growth: match args.buffer_growth {
                BufferGrowth::Double => GrowthPolicy::Double,
                BufferGrowth::Linear => GrowthPolicy::Linear,
            },
        };
        let hash = match args.hash {
            HashName::Fnv => HashAlgorithm::Fnv1,
            HashName::Xxh32 => HashAlgorithm::Xxh32,
        };

        Self {
            dict: args.dict,
            texts: args.texts,
            dictionary: DictionaryOptions {
                mapped_dict: mmap.dict,
                mapped_text: mmap.text,
                reader,
                table_size: args.table_size as usize,
                hash,
            },
            stats: args.print_stats.map(|s| match s {
                StatsOutput::Text => StatsFormat::Text,
                StatsOutput::Json => StatsFormat::Json,
            }),
            verbosity: args.verbose,
        }
    }

    /// [`AppConfig::resolve`] against the process environment.
    pub fn from_env(args: Args) -> Self {
        let env = std::env::var(MMAP_ENV).ok();
        Self::resolve(args, env.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn mmap_spec_words() {
        assert_eq!("dict".parse(), Ok(MmapSpec { dict: true, text: false }));
        assert_eq!("text".parse(), Ok(MmapSpec { dict: false, text: true }));
        assert_eq!("+".parse::<MmapSpec>(), "all".parse::<MmapSpec>());
        assert_eq!("-".parse::<MmapSpec>(), "none".parse::<MmapSpec>());
        assert!("both".parse::<MmapSpec>().is_err());
    }

    #[test]
    fn defaults() {
        let config = AppConfig::resolve(parse(&["word-count", "dict.txt"]), None);
        assert_eq!(config.dict, PathBuf::from("dict.txt"));
        assert!(config.texts.is_empty());
        assert_eq!(config.dictionary, DictionaryOptions::default());
        assert_eq!(config.stats, None);
    }

    #[test]
    fn env_presets_and_cli_overrides() {
        let config = AppConfig::resolve(parse(&["word-count", "d"]), Some("all"));
        assert!(config.dictionary.mapped_dict && config.dictionary.mapped_text);

        let config = AppConfig::resolve(parse(&["word-count", "-m", "-", "d"]), Some("all"));
        assert!(!config.dictionary.mapped_dict && !config.dictionary.mapped_text);

        let config = AppConfig::resolve(parse(&["word-count", "d"]), Some("bogus"));
        assert!(!config.dictionary.mapped_dict && !config.dictionary.mapped_text);
    }

    #[test]
    fn tuning_options() {
        let args = parse(&[
            "word-count",
            "--use-mmap-io=text",
            "--buffer-growth",
            "linear",
            "--buffer-size",
            "128",
            "--table-size",
            "7",
            "--hash",
            "xxh32",
            "--print-stats",
            "d",
            "a.txt",
            "b.txt",
        ]);
        let config = AppConfig::resolve(args, None);
        assert!(config.dictionary.mapped_text && !config.dictionary.mapped_dict);
        assert_eq!(config.dictionary.reader.initial_capacity, 128);
        assert_eq!(config.dictionary.reader.growth, GrowthPolicy::Linear);
        assert_eq!(config.dictionary.table_size, 7);
        assert_eq!(config.dictionary.hash, HashAlgorithm::Xxh32);
        assert_eq!(config.stats, Some(StatsFormat::Text));
        assert_eq!(config.texts.len(), 2);
    }

    #[test]
    fn json_stats_need_equals() {
        let config = AppConfig::resolve(parse(&["word-count", "--print-stats=json", "d"]), None);
        assert_eq!(config.stats, Some(StatsFormat::Json));
    }

    #[test]
    fn table_size_is_bounded() {
        let max = crate::cli::MAX_TABLE_SIZE.to_string();
        let config = AppConfig::resolve(parse(&["word-count", "--table-size", max.as_str(), "d"]), None);
        assert_eq!(config.dictionary.table_size, 1 << 24);

        let over = (u64::from(crate::cli::MAX_TABLE_SIZE) + 1).to_string();
        assert!(Args::try_parse_from(["word-count", "--table-size", over.as_str(), "d"]).is_err());
        assert!(Args::try_parse_from(["word-count", "--table-size", "5000000000", "d"]).is_err());
    }

    #[test]
    fn missing_dictionary_is_a_usage_error() {
        assert!(Args::try_parse_from(["word-count"]).is_err());
        assert!(Args::try_parse_from(["word-count", "--buffer-size", "0", "d"]).is_err());
    }
}
