//! Config model and persistence helpers.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where notes and accounts are kept.
    pub store: StoreCfg,
    /// Log file settings.
    pub log: LogCfg,
}

/// Note store location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreCfg {
    /// JSON file holding users and notes.
    pub path: PathBuf,
}

/// Logging output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogCfg {
    /// File the tracing subscriber writes to.
    pub file: String,
    /// Maximum level: trace, debug, info, warn or error.
    pub level: String,
}

impl Config {
    /// Load from disk or create defaults when missing.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            let s = fs::read_to_string(path)?;
            Ok(toml::from_str(&s)?)
        } else {
            let cfg = Self::default();
            cfg.save(path)?;
            Ok(cfg)
        }
    }

    /// Persist the config as pretty TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let s = toml::to_string_pretty(self)?;
        fs::write(path, s)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreCfg {
                path: PathBuf::from("notes.json"),
            },
            log: LogCfg {
                file: "note_tui.log".into(),
                level: "info".into(),
            },
        }
    }
}
