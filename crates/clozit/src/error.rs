//! Error types for clozit.

use thiserror::Error;

/// Result type for clozit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or rendering clozes.
#[derive(Debug, Error)]
pub enum Error {
    /// A template referenced a `{token}` that has no value.
    #[error("unknown token '{{{token}}}' in template '{template}'")]
    UnknownToken {
        /// Token name without braces.
        token: String,
        /// The template that referenced it.
        template: String,
    },

    /// The keep regex could not be compiled.
    #[error("invalid keep pattern: {0}")]
    InvalidKeepPattern(#[from] regex::Error),

    /// The replacement character was empty.
    #[error("replace character must not be empty")]
    EmptyReplaceChar,

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The card host failed to provide or accept content.
    #[error("host error: {0}")]
    Host(String),
}
