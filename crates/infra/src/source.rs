// crates/infra/src/source.rs
use std::{
    fs::File,
    io::{self, Read, StdinLock},
    path::Path,
};

use word_count_shared_kernel::{FileRole, IoFailure, IoOperation, Result};

/// A readable input: a named file or standard input.
pub enum InputSource {
    File(File),
    Stdin(StdinLock<'static>),
}

impl Read for InputSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.read(buf),
            Self::Stdin(stdin) => stdin.read(buf),
        }
    }
}

/// Convenience helpers for opening inputs with consistent error reporting.
pub struct FileReader;

impl FileReader {
    /// Open the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an [`IoFailure`] naming `role` and `path`.
    pub fn open(path: &Path, role: FileRole) -> Result<File> {
        File::open(path)
            .map_err(|e| IoFailure::new(IoOperation::Open, role, Some(path), e).into())
    }

    /// Open `path`, or standard input when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an [`IoFailure`] when the file cannot be opened.
    pub fn open_input(path: Option<&Path>, role: FileRole) -> Result<InputSource> {
        match path {
            Some(path) => Self::open(path, role).map(InputSource::File),
            None => Ok(InputSource::Stdin(io::stdin().lock())),
        }
    }
}
