//! Error types for the dev menu coordinator.
//!
//! Most failure conditions in the coordinator are absorbed locally: an
//! unreachable host bridge degrades to "no extensions", a denied consent check
//! surfaces as a boolean `false`, and a dispatch with no matching action is a
//! silent no-op. Only caller mistakes and settings persistence problems are
//! reported through this type.

use thiserror::Error;

/// Errors that can occur in the dev menu coordinator.
#[derive(Debug, Error)]
pub enum DevMenuError {
    /// The caller supplied a missing or malformed argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error while reading or writing persisted settings.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted settings file could not be parsed.
    #[error("Settings parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Persisted settings could not be serialized.
    #[error("Settings serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type alias for dev menu operations.
pub type DevMenuResult<T> = Result<T, DevMenuError>;
