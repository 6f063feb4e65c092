use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:4221";

/// Server settings.
///
/// Every field has a default, so a YAML file only needs the keys it wants
/// to change.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_addr: String,
    /// Serving root for the `/files` routes.
    pub directory: PathBuf,
    pub limits: Limits,
}

/// Per-connection resource bounds.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub max_header_bytes: usize,
    pub max_body_bytes: usize,
    pub read_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            directory: PathBuf::from("."),
            limits: Limits::default(),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_header_bytes: 8 * 1024,
            max_body_bytes: 16 * 1024 * 1024,
            read_timeout_secs: 30,
        }
    }
}

impl Limits {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

impl Config {
    /// Defaults, with the listen address taken from `LISTEN` when set.
    pub fn load() -> Self {
        Self::default().with_env()
    }

    /// Reads a YAML file, then applies `LISTEN` on top.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;

        Ok(Self::from_yaml(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?
            .with_env())
    }

    pub fn from_yaml(raw: &str) -> anyhow::Result<Self> {
        // An empty document deserializes as null rather than an empty map.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    fn with_env(mut self) -> Self {
        if let Ok(addr) = std::env::var("LISTEN") {
            self.listen_addr = addr;
        }
        self
    }
}
