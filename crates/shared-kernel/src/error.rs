// crates/shared-kernel/src/error.rs
use std::{
    fmt, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Display name used for standard input in diagnostics.
pub const STDIN_NAME: &str = "<stdin>";

/// Root error type shared across the workspace.
///
/// Every variant is fatal: warnings never travel through this type, they are
/// logged where they are detected.
#[derive(Debug, Error)]
pub enum WordCountError {
    /// Adds human context while preserving original error as the source.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<WordCountError>,
    },

    #[error(transparent)]
    Io(#[from] IoFailure),

    #[error(transparent)]
    Internal(#[from] InvariantViolation),

    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, WordCountError>;

impl WordCountError {
    /// True when the error (or the error it wraps) is an internal invariant
    /// violation rather than an environment failure.
    pub fn is_internal(&self) -> bool {
        match self {
            Self::Context { source, .. } => source.is_internal(),
            Self::Internal(_) => true,
            Self::Io(_) | Self::Output(_) => false,
        }
    }
}

/// The system call family that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Open,
    Read,
    Stat,
    Map,
    Advise,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "opening",
            Self::Read => "reading",
            Self::Stat => "stating",
            Self::Map => "mapping",
            Self::Advise => "advising",
        })
    }
}

/// What a file is used for, reported alongside I/O failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    Dictionary,
    Input,
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dictionary => "dictionary",
            Self::Input => "input",
        })
    }
}

/// Fatal I/O or environment failure on a named file.
#[derive(Debug, Error)]
#[error("failed {operation} {role} file '{}': {source}", display_name(.file.as_deref()))]
pub struct IoFailure {
    pub operation: IoOperation,
    pub role: FileRole,
    /// `None` stands for standard input.
    pub file: Option<PathBuf>,
    #[source]
    pub source: io::Error,
}

impl IoFailure {
    pub fn new(operation: IoOperation, role: FileRole, file: Option<&Path>, source: io::Error) -> Self {
        Self {
            operation,
            role,
            file: file.map(Path::to_path_buf),
            source,
        }
    }
}

fn display_name(file: Option<&Path>) -> String {
    file.map_or_else(|| STDIN_NAME.to_string(), |p| p.display().to_string())
}

/// A broken internal invariant: overflowing size or counter arithmetic, or
/// an impossible table/reader state. Always a bug, never a user error.
#[derive(Debug, Error)]
#[error("unexpected error: {file}:{line}:{module}: {message}")]
pub struct InvariantViolation {
    pub file: &'static str,
    pub line: u32,
    pub module: &'static str,
    pub message: String,
}

impl InvariantViolation {
    pub fn new(file: &'static str, line: u32, module: &'static str, message: String) -> Self {
        Self {
            file,
            line,
            module,
            message,
        }
    }
}

/// Builds an [`InvariantViolation`] carrying the caller's source location.
#[macro_export]
macro_rules! invariant_violation {
    ($($arg:tt)+) => {
        $crate::error::InvariantViolation::new(
            file!(),
            line!(),
            module_path!(),
            format!($($arg)+),
        )
    };
}

/// Returns early with an invariant violation unless the condition holds.
#[macro_export]
macro_rules! verify {
    ($cond:expr) => {
        $crate::verify!($cond, "{}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err($crate::invariant_violation!($($arg)+).into());
        }
    };
}

/// Invariant violation for a failed checked arithmetic operation.
#[macro_export]
macro_rules! overflow {
    ($what:expr) => {
        $crate::invariant_violation!("arithmetic overflow: {}", $what)
    };
}

/// Extension trait to add additional context to results.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<WordCountError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| WordCountError::Context {
            context: context.into(),
            source: Box::new(e.into()),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| WordCountError::Context {
            context: f(),
            source: Box::new(e.into()),
        })
    }
}
