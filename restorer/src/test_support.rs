//! Test-only helpers for scratch directories with seeded documents.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Temporary directory that is removed on drop.
pub struct TestDir {
    temp: TempDir,
}

impl TestDir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `contents` to `name` under the directory, creating parents.
    ///
    /// Panics on failure; only used from tests.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(&path, contents).expect("write fixture");
        path
    }

    /// Read `name` under the directory as UTF-8.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp.path().join(name)).expect("read fixture")
    }
}
