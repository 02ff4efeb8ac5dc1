//! Restorer configuration stored in `restorer.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "restorer.toml";
pub const DEFAULT_SOURCE: &str = "tests/e2e/stage-gather-scrape.test.ts.broken";
pub const DEFAULT_DESTINATION: &str = "tests/e2e/stage-gather-scrape.test.ts";

/// Restorer configuration (TOML).
///
/// Missing fields fall back to the fixed paths the tool has always used, so an
/// absent or empty file behaves like a bare `restorer` invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RestorerConfig {
    /// Corrupted input document.
    pub source: PathBuf,

    /// Where the restored document is written (overwritten if present).
    pub destination: PathBuf,
}

impl Default for RestorerConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            destination: PathBuf::from(DEFAULT_DESTINATION),
        }
    }
}

impl RestorerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(anyhow!("source must not be empty"));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(anyhow!("destination must not be empty"));
        }
        Ok(())
    }

    /// Replace file values with command-line values where given.
    pub fn with_overrides(
        mut self,
        source: Option<PathBuf>,
        destination: Option<PathBuf>,
    ) -> Self {
        if let Some(source) = source {
            self.source = source;
        }
        if let Some(destination) = destination {
            self.destination = destination;
        }
        self
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RestorerConfig::default()`.
pub fn load_config(path: &Path) -> Result<RestorerConfig> {
    if !path.exists() {
        return Ok(RestorerConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: RestorerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RestorerConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
