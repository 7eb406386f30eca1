use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::errors::{ActivityError, Result};
use crate::core::services::pagination::DEFAULT_PAGE_SIZE;

/// Name of the configuration file inside the actman directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Current format version supported by this build of actman.
pub const CURRENT_FORMAT_VERSION: u32 = 1;

/// Which persistence backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON file next to the configuration
    Local,
    /// Hosted PostgREST-compatible database
    Remote,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Top-level configuration read from `.actman/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub actman: ActmanSection,
    #[serde(default)]
    pub local: LocalSection,
    pub remote: Option<RemoteSection>,
}

impl AppConfig {
    /// Defaults written by `actman init`.
    pub fn new(backend: Backend, remote: Option<RemoteSection>) -> Self {
        Self {
            actman: ActmanSection {
                version: env!("CARGO_PKG_VERSION").to_string(),
                format_version: CURRENT_FORMAT_VERSION,
                backend,
                page_size: DEFAULT_PAGE_SIZE,
            },
            local: LocalSection::default(),
            remote,
        }
    }

    /// Load the configuration from `{dir}/config.toml`.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Err(ActivityError::NotInitialized { path: config_path });
        }
        let content = std::fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ActivityError::InvalidConfig {
            detail: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })?;

        if config.actman.format_version > CURRENT_FORMAT_VERSION {
            return Err(ActivityError::FormatVersionTooNew {
                project_version: config.actman.format_version,
                supported_version: CURRENT_FORMAT_VERSION,
            });
        }

        if config.actman.page_size == 0 {
            return Err(ActivityError::InvalidConfig {
                detail: "page_size must be 1 or greater".into(),
            });
        }

        if config.remote.as_ref().is_some_and(|r| r.timeout_secs == 0) {
            return Err(ActivityError::InvalidConfig {
                detail: "[remote] timeout_secs must be 1 or greater".into(),
            });
        }

        validate_simple_filename(&config.local.file)?;

        Ok(config)
    }

    /// Serialize and write to `{dir}/config.toml`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ActivityError::InvalidConfig {
            detail: format!("Failed to serialize configuration: {e}"),
        })?;
        std::fs::write(dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    /// Path of the local activity file.
    pub fn local_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.local.file)
    }
}

/// The `[actman]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActmanSection {
    pub version: String,
    /// Format version for backward compatibility. Defaults to 1 if missing.
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    pub backend: Backend,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_format_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// The `[local]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSection {
    pub file: String,
}

impl Default for LocalSection {
    fn default() -> Self {
        Self {
            file: "activities.json".to_string(),
        }
    }
}

/// The `[remote]` section. The key is never stored here; it comes from
/// `ACTMAN_REMOTE_KEY`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSection {
    pub url: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteSection {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            url: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_table() -> String {
    "activities".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Reject file names that would escape the actman directory.
fn validate_simple_filename(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name == "."
        || name == "..";
    if invalid {
        return Err(ActivityError::InvalidConfig {
            detail: format!("[local] file must be a plain file name, got '{name}'"),
        });
    }
    Ok(())
}
