//! Line sources feeding the parser.
//!
//! The parser never does I/O itself; it consumes a snapshot of lines from a
//! [`LineSource`]. Missing content is not an error at this layer: a source
//! may legitimately produce zero lines (an empty configuration).

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// A provider of raw configuration lines.
pub trait LineSource: Send + Sync + fmt::Debug {
    /// Returns every line of the underlying resource, in order.
    fn lines(&self) -> Result<Vec<String>, ConfigError>;
}

/// A line source backed by a file on disk.
///
/// The file is read on every [`LineSource::lines`] call, so a store reset
/// picks up edits made since the last parse. An unreadable file is a
/// `ReadError`; an empty file is an empty configuration.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn lines(&self) -> Result<Vec<String>, ConfigError> {
        let contents =
            std::fs::read_to_string(&self.path).map_err(|source| ConfigError::ReadError {
                path: self.path.clone(),
                source,
            })?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}

/// A line source backed by an in-memory buffer, captured eagerly from any
/// reader. Useful for configuration arriving over a socket or embedded in
/// a binary.
#[derive(Debug, Clone)]
pub struct StreamSource {
    text: String,
}

impl StreamSource {
    /// Captures the whole reader up front.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, ConfigError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(ConfigError::StreamError)?;
        Ok(Self { text })
    }

    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl LineSource for StreamSource {
    fn lines(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.text.lines().map(str::to_string).collect())
    }
}
