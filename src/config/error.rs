use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("unparsable line: [{0}]")]
    UnparsableLine(String),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read config stream: {0}")]
    StreamError(std::io::Error),

    #[error("circular context inheritance involving '{0}'")]
    CircularInheritance(String),

    #[error("no configuration value for key '{0}'")]
    MissingKey(String),

    #[error("invalid value '{value}' for key '{key}': {message}")]
    TypeConversion {
        key: String,
        value: String,
        message: String,
    },
}
