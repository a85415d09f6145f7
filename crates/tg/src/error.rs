//! CLI error types.

use tg_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The guide request ended in the error state.
    #[error("{0}")]
    Guide(String),

    #[error("{0}")]
    Validation(String),
}
