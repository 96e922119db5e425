// crates/infra/src/mapping.rs
//! Read-only whole-file memory maps with access-pattern hints.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use log::debug;
use memmap2::Mmap;
use word_count_shared_kernel::{FileRole, IoFailure, IoOperation, Result};

use crate::source::FileReader;

/// Expected access pattern of a mapped region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessHint {
    Normal,
    /// Scanned front to back once.
    Sequential,
    /// Probed at arbitrary offsets, e.g. dictionary keys after loading.
    Random,
}

/// A file mapped read-only in its entirety. Unmapped on drop.
pub struct MappedRegion {
    // empty files are not mapped at all
    map: Option<Mmap>,
    role: FileRole,
    file: Option<PathBuf>,
}

impl MappedRegion {
    /// Maps `path`, or standard input when `path` is `None`. The input must
    /// be a regular file.
    ///
    /// # Errors
    ///
    /// Returns an [`IoFailure`] for open, stat and mmap failures, and for
    /// inputs that are not regular files.
    pub fn open(path: Option<&Path>, role: FileRole) -> Result<Self> {
        let file = match path {
            Some(path) => FileReader::open(path, role)?,
            None => stdin_file().map_err(|e| IoFailure::new(IoOperation::Open, role, None, e))?,
        };
        let fail = |op, e| IoFailure::new(op, role, path, e);

        let meta = file.metadata().map_err(|e| fail(IoOperation::Stat, e))?;
        if !meta.is_file() {
            return Err(fail(IoOperation::Stat, io::Error::other("not a regular file")).into());
        }

        let map = if meta.len() == 0 {
            None
        } else {
            // SAFETY: the map is private and read-only; the file is not
            // modified by this process while mapped.
            let map = unsafe { Mmap::map(&file) }.map_err(|e| fail(IoOperation::Map, e))?;
            Some(map)
        };
        debug!(
            "mapped {role} file '{}' ({} bytes)",
            path.map_or_else(|| "<stdin>".into(), |p| p.display().to_string()),
            meta.len()
        );

        Ok(Self {
            map,
            role,
            file: path.map(Path::to_path_buf),
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.map.as_deref().unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-tags the region's expected access pattern.
    ///
    /// # Errors
    ///
    /// Returns an [`IoFailure`] when the kernel rejects the advice.
    pub fn advise(&self, hint: AccessHint) -> Result<()> {
        let Some(map) = &self.map else {
            return Ok(());
        };
        advise(map, hint).map_err(|e| {
            IoFailure::new(IoOperation::Advise, self.role, self.file.as_deref(), e).into()
        })
    }
}

#[cfg(unix)]
fn advise(map: &Mmap, hint: AccessHint) -> io::Result<()> {
    use memmap2::Advice;

    map.advise(match hint {
        AccessHint::Normal => Advice::Normal,
        AccessHint::Sequential => Advice::Sequential,
        AccessHint::Random => Advice::Random,
    })
}

#[cfg(not(unix))]
fn advise(_map: &Mmap, _hint: AccessHint) -> io::Result<()> {
    Ok(())
}

#[cfg(unix)]
fn stdin_file() -> io::Result<File> {
    use std::os::fd::AsFd;

    let fd = io::stdin().as_fd().try_clone_to_owned()?;
    Ok(File::from(fd))
}

#[cfg(not(unix))]
fn stdin_file() -> io::Result<File> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "mapping standard input is not supported on this platform",
    ))
}
