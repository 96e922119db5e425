// src/app.rs
use std::{
    io::{self, BufWriter, Write},
    rc::Rc,
};

use anyhow::Result;
use log::debug;
use word_count_infra::stats::CollectingStats;
use word_count_ports::stats::{NoStats, StatsSink};
use word_count_shared_kernel::WordCountError;
use word_count_usecase::Dictionary;

use crate::config::AppConfig;

/// Loads the dictionary, counts every text (or standard input) and prints
/// the counters to standard output.
///
/// # Errors
///
/// Any I/O failure or internal invariant violation; nothing is printed to
/// standard output in that case unless the failure happened while printing.
pub fn run(config: &AppConfig) -> Result<()> {
    let stats = config.stats.map(|_| Rc::new(CollectingStats::new()));
    let observer: Rc<dyn StatsSink> = match &stats {
        Some(stats) => Rc::clone(stats) as Rc<dyn StatsSink>,
        None => Rc::new(NoStats),
    };

    debug!(
        "{} {}: dictionary '{}', {} text(s), {:?}",
        crate::PROGRAM,
        crate::VERSION,
        config.dict.display(),
        config.texts.len(),
        config.dictionary
    );

    let mut dictionary = Dictionary::with_observer(config.dictionary, observer)?;
    dictionary.load(&config.dict)?;

    if config.texts.is_empty() {
        dictionary.count(None)?;
    } else {
        for text in &config.texts {
            dictionary.count(Some(text))?;
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    dictionary.print(&mut out)?;
    out.flush().map_err(WordCountError::Output)?;

    if let (Some(stats), Some(format)) = (&stats, config.stats) {
        let stderr = io::stderr();
        stats
            .report()
            .render(format, &mut stderr.lock())
            .map_err(WordCountError::Output)?;
    }
    Ok(())
}
