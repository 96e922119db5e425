// src/main.rs
use std::process::ExitCode;

use clap::Parser;
use word_count::{PROGRAM, app, cli::Args, config::AppConfig, logging};

/// Exit status of every fatal error.
const FATAL: u8 = 127;

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);
    let config = AppConfig::from_env(args);

    match app::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{PROGRAM}: error: {e}");
            ExitCode::from(FATAL)
        }
    }
}
