//! Mutant configuration stored in `mutant.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::core::grid::RUN_LENGTH;

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "mutant.toml";

/// Mutant configuration (TOML).
///
/// Missing fields default to values suitable for a local single-node setup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MutantConfig {
    /// Largest accepted grid side length. Larger samples are rejected before
    /// validation or scanning.
    pub max_dimension: usize,

    pub store: StoreConfig,
}

/// Which verdict store backs the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// JSON document on disk at `store.path`.
    File,
    /// Process-local; verdicts are lost on exit.
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,
    /// Path of the JSON store document (ignored for `memory`).
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::File,
            path: PathBuf::from(".mutant").join("verdicts.json"),
        }
    }
}

impl Default for MutantConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1000,
            store: StoreConfig::default(),
        }
    }
}

impl MutantConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_dimension < RUN_LENGTH {
            return Err(anyhow!("max_dimension must be >= {RUN_LENGTH}"));
        }
        if self.store.kind == StoreKind::File && self.store.path.as_os_str().is_empty() {
            return Err(anyhow!("store.path must be set for the file store"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `MutantConfig::default()`.
pub fn load_config(path: &Path) -> Result<MutantConfig> {
    if !path.exists() {
        let cfg = MutantConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: MutantConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &MutantConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    super::write_atomic(path, &buf)
}
