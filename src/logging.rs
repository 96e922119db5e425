// src/logging.rs
use std::io::Write;

use env_logger::Builder;
use log::{Level, LevelFilter};

use crate::PROGRAM;

/// Warnings by default; each `-v` opens one more level.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn label(level: Level) -> &'static str {
    match level {
        Level::Error => "error",
        Level::Warn => "warning",
        Level::Info => "info",
        Level::Debug => "debug",
        Level::Trace => "trace",
    }
}

/// Installs the global logger writing `word-count: <level>: <message>` lines
/// to standard error. A second call is a no-op.
pub fn init(verbosity: u8) {
    let _ = Builder::new()
        .filter_level(level_for(verbosity))
        .format(|buf, record| {
            writeln!(buf, "{PROGRAM}: {}: {}", label(record.level()), record.args())
        })
        .try_init();
}
