//! Process-wide configuration.
//!
//! Built once at startup and shared read-only with every worker.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Env var naming an optional YAML config file.
pub const CONFIG_ENV: &str = "VERBFS_CONFIG";
/// Env var overriding `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";
/// Env var overriding `files.root`.
pub const ROOT_ENV: &str = "VERBFS_ROOT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub error_page: ErrorPageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Number of connections served at the same time.
    pub workers: usize,
    /// How long a fresh connection may stay silent before it is dropped.
    pub ready_timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    /// Prepended verbatim to every request path.
    pub root: PathBuf,
    /// `Accept` values a GET may ask for.
    pub allowed_mime_types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ErrorPageConfig {
    pub image_base: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            workers: 10,
            ready_timeout_ms: 500,
        }
    }
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            allowed_mime_types: vec!["text/html".to_string(), "text/plain".to_string()],
        }
    }
}

impl Default for ErrorPageConfig {
    fn default() -> Self {
        Self {
            image_base: "https://http.cat/".to_string(),
        }
    }
}

impl Config {
    /// Loads the YAML file named by `VERBFS_CONFIG` (or the defaults) and
    /// applies the `LISTEN` / `VERBFS_ROOT` overrides.
    pub fn load() -> Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var(LISTEN_ENV) {
            cfg.server.listen_addr = addr;
        }
        if let Ok(root) = std::env::var(ROOT_ENV) {
            cfg.files.root = PathBuf::from(root);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            anyhow::bail!("server.workers must be at least 1");
        }
        if self.files.allowed_mime_types.is_empty() {
            anyhow::bail!("files.allowed_mime_types must not be empty");
        }
        self.image_base()?;
        Ok(())
    }

    pub fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.server.ready_timeout_ms)
    }

    pub fn allowed_mime_types(&self) -> HashSet<String> {
        self.files.allowed_mime_types.iter().cloned().collect()
    }

    pub fn image_base(&self) -> Result<Url> {
        Url::parse(&self.error_page.image_base)
            .with_context(|| format!("invalid error_page.image_base {:?}", self.error_page.image_base))
    }
}
