//! Configuration types for quill.
//!
//! [`Config::load`] layers, in order: the embedded defaults, an optional TOML
//! file, then `QUILL_`-prefixed environment variables (`__` separates the
//! section from the key, e.g. `QUILL_PAGINATION__PAGE_SIZE=25`).
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem or the environment (useful in tests).

use std::net::SocketAddr;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::Deserialize;
use url::Url;

use crate::pagination::Paginator;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:8000"

[storage]
backend = "sqlite"
path    = "quill.db"

[pagination]
page_size = 10
"#;

const ENV_PREFIX: &str = "QUILL";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
    /// Absolute base used for page links. When unset, links are built from
    /// the request's `Host` header.
    #[serde(default)]
    pub public_url: Option<String>,
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8000))
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            public_url: None,
        }
    }
}

/// Which [`TextStore`](crate::TextStore) implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

/// `[storage]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    /// SQLite database file. Ignored by the memory backend.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_backend() -> StorageBackend {
    StorageBackend::Sqlite
}
fn default_storage_path() -> PathBuf {
    PathBuf::from("quill.db")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_storage_path(),
        }
    }
}

/// `[pagination]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page_size() -> u64 {
    10
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `path` overrides the default file
    /// location; an explicitly given file must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env_prefix(path, ENV_PREFIX)
    }

    fn load_with_env_prefix(path: Option<&Path>, env_prefix: &str) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("reading configuration")?
            .try_deserialize()
            .context("parsing configuration")?;

        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Reject values that parse but cannot be served.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.pagination.page_size == 0 {
            bail!("pagination.page_size must be at least 1");
        }
        self.public_url()?;
        Ok(())
    }

    pub fn paginator(&self) -> anyhow::Result<Paginator> {
        let size = NonZeroU64::new(self.pagination.page_size)
            .context("pagination.page_size must be at least 1")?;
        Ok(Paginator::new(size))
    }

    /// `server.public_url` parsed, if set.
    pub fn public_url(&self) -> anyhow::Result<Option<Url>> {
        let Some(raw) = self.server.public_url.as_deref() else {
            return Ok(None);
        };
        let url = Url::parse(raw).with_context(|| format!("server.public_url {raw:?}"))?;
        if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
            bail!("server.public_url must be an absolute http(s) URL, got {raw:?}");
        }
        Ok(Some(url))
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("quill")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
