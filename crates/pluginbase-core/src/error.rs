use thiserror::Error;

/// Top-level error type for pluginbase.
#[derive(Debug, Error)]
pub enum PluginBaseError {
    /// A registry query was made for an owner that never registered messages.
    #[error("owner '{0}' has no registered messages")]
    NotRegistered(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Theme definition error.
    #[error("theme error: {0}")]
    Theme(String),

    /// Language file load/save error.
    #[error("store error: {0}")]
    Store(String),

    /// A message template could not be formatted with its arguments.
    #[error("format error: {0}")]
    Format(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
