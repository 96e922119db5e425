//! Shared fixtures for the integration suites.

use std::{io::Write, path::Path};

use tempfile::TempDir;

pub const DICT: &[u8] = b"apple\nbanana\n# comment\n\nbanana\n";
pub const TEXT: &[u8] = b"apple banana apple fig\n";

/// A scratch directory holding named fixture files.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn file(&self, name: &str, contents: &[u8]) -> String {
        let path = self.dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

/// Counter lines of the output, sorted, without the total.
pub fn counted(stdout: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(stdout);
    let mut lines: Vec<String> = text
        .lines()
        .filter(|l| !l.ends_with("\ttotal"))
        .map(str::to_owned)
        .collect();
    lines.sort_unstable();
    lines
}
