//! CLI error types.

use pagesync_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid document settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// The command reported an error to the user.
    #[error("{0}")]
    Command(String),

    #[error("Cancelled")]
    Cancelled,
}
