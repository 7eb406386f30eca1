use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::app_config::CONFIG_FILE;

/// Directory used when `--config` is not given.
pub const DEFAULT_DIR: &str = ".actman";

/// The per-project directory holding `config.toml` and, for the local
/// backend, the activities file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDir {
    root: PathBuf,
}

impl ProjectDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// True once `actman init` has written a config here.
    pub fn is_initialized(&self) -> bool {
        self.config_file().is_file()
    }
}

impl Default for ProjectDir {
    fn default() -> Self {
        Self::new(DEFAULT_DIR)
    }
}

static PROJECT: OnceLock<ProjectDir> = OnceLock::new();

/// Select the project directory for this run. Only the first call counts.
pub fn init(custom: Option<&Path>) {
    let project = custom.map(ProjectDir::new).unwrap_or_default();
    tracing::debug!(dir = %project.root().display(), "project directory selected");
    let _ = PROJECT.set(project);
}

/// The project directory selected by [`init`], or the default.
pub fn project() -> &'static ProjectDir {
    PROJECT.get_or_init(ProjectDir::default)
}
