use std::path::PathBuf;

/// All domain errors for actman.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    #[error(
        "Could not reach the activity store: {reason}\n\n  \
         Your local view is unchanged. Check the remote URL and key:\n    \
         → ACTMAN_REMOTE_URL / [remote] url in .actman/config.toml\n    \
         → ACTMAN_REMOTE_KEY\n    \
         → Or switch backend: actman --backend local <command>"
    )]
    Connection { reason: String },

    #[error("Invalid activity: {detail}")]
    Validation { detail: String },

    #[error(
        "Activity '{id}' not found\n\n  \
         Run 'actman list' to see the ids of stored activities."
    )]
    NotFound { id: String },

    #[error(
        "actman is not initialized here (no {path})\n\n  \
         Run 'actman init' first, or point --config at an existing directory."
    )]
    NotInitialized { path: PathBuf },

    #[error("actman is already initialized in this directory ({path} exists)")]
    AlreadyInitialized { path: PathBuf },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(
        "Activity file {path} is unreadable: {detail}\n\n  \
         The file must contain a JSON array of activities.\n  \
         Restore it from a backup or move it aside to start fresh."
    )]
    Storage { path: PathBuf, detail: String },

    #[error(
        "This project uses format version {project_version}, but your actman \
         only supports up to version {supported_version}.\n\n  \
         Install a newer actman: cargo install actman --force"
    )]
    FormatVersionTooNew {
        project_version: u32,
        supported_version: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ActivityError>;

impl ActivityError {
    /// Shorthand for a validation failure.
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation {
            detail: detail.into(),
        }
    }

    /// Shorthand for a connection failure.
    pub fn connection(reason: impl Into<String>) -> Self {
        Self::Connection {
            reason: reason.into(),
        }
    }
}
