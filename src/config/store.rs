//! The configuration store and its builder.
//!
//! [`Config`] owns the merged key/value map produced by the parser and
//! layers a typed accessor API on top. The map sits behind a mutex so a
//! single store can be read, overridden, and reset from multiple threads.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use tracing::info;

use super::env::env_seed;
use super::parser::parse_lines;
use super::source::{FileSource, LineSource, StreamSource};
use super::ConfigError;

/// Environment variable naming the configuration file for the shared store.
pub const FILE_VAR: &str = "CONF_FILE";

/// Environment variable naming the target context for the shared store.
pub const CONTEXT_VAR: &str = "CONF_CONTEXT";

/// Default separator for list-valued entries.
const ITEM_SEPARATOR: &str = ",";

static SHARED: OnceLock<Config> = OnceLock::new();

/// An owned configuration store.
///
/// Built from at most one line source plus an optional environment seed,
/// parsed once at construction. Values read back as strings or any
/// [`FromStr`] type; [`set`](Self::set) overrides individual entries and
/// [`reset`](Self::reset) re-parses the source, discarding overrides.
///
/// ```no_run
/// use layercfg::Config;
///
/// let config = Config::builder()
///     .with_file("conf/app.cfg")
///     .context("Staging")
///     .build()?;
///
/// let retries: u32 = config.get_or("http.retries", 3)?;
/// # Ok::<(), layercfg::ConfigError>(())
/// ```
#[derive(Debug)]
pub struct Config {
    values: Mutex<HashMap<String, String>>,
    seed: HashMap<String, String>,
    source: Option<Box<dyn LineSource>>,
    context: Option<String>,
}

impl Config {
    /// Creates a new store builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The process-wide shared store, built once from the `CONF_FILE` and
    /// `CONF_CONTEXT` environment variables.
    ///
    /// With neither variable set this is an empty (but usable) store.
    /// Concurrent first calls may build more than once; exactly one result
    /// is published.
    pub fn shared() -> Result<&'static Config, ConfigError> {
        if let Some(config) = SHARED.get() {
            return Ok(config);
        }
        let built = Config::from_env()?;
        info!("initialized shared configuration");
        Ok(SHARED.get_or_init(|| built))
    }

    fn from_env() -> Result<Config, ConfigError> {
        let mut builder = Config::builder();
        if let Ok(path) = std::env::var(FILE_VAR) {
            builder = builder.with_file(path);
        }
        if let Ok(context) = std::env::var(CONTEXT_VAR) {
            builder = builder.context(context);
        }
        builder.build()
    }

    /// Every key currently in the store.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// The raw value for `key`, if present.
    pub fn get_opt(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// The raw value for `key`; absent keys are a `MissingKey` error.
    pub fn get_str(&self, key: &str) -> Result<String, ConfigError> {
        self.get_opt(key)
            .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
    }

    /// The raw value for `key`, or `default` if absent.
    pub fn get_str_or(&self, key: &str, default: impl Into<String>) -> String {
        self.get_opt(key).unwrap_or_else(|| default.into())
    }

    /// The value for `key` converted via [`FromStr`].
    ///
    /// Absent keys are `MissingKey`; values that fail to convert are
    /// `TypeConversion`.
    pub fn get<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.get_str(key)?;
        parse_value(key, &value)
    }

    /// Like [`get`](Self::get), but an absent key yields `default`.
    /// A present-but-unconvertible value is still a `TypeConversion` error.
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.get_opt(key) {
            Some(value) => parse_value(key, &value),
            None => Ok(default),
        }
    }

    /// Splits the value for `key` on commas and converts each trimmed item.
    pub fn get_list<T>(&self, key: &str) -> Result<Vec<T>, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.get_list_sep(key, ITEM_SEPARATOR)
    }

    /// Splits the value for `key` on `separator` and converts each trimmed
    /// item.
    pub fn get_list_sep<T>(&self, key: &str, separator: &str) -> Result<Vec<T>, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.get_str(key)?;
        value
            .split(separator)
            .map(|item| parse_value(key, item.trim()))
            .collect()
    }

    /// Sets or overrides a single entry.
    pub fn set(&self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let item = value.to_string();
        info!(key = %key, value = %item, "set configuration property");
        self.lock().insert(key, item);
    }

    /// Sets or overrides a batch of entries.
    pub fn set_all<K, V>(&self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: ToString,
    {
        for (key, value) in entries {
            self.set(key, value);
        }
    }

    /// Removes an entry, if present.
    pub fn remove(&self, key: &str) {
        info!(key = %key, "unset configuration property");
        self.lock().remove(key);
    }

    /// Restores the store to its freshly-built state: the environment seed
    /// plus a re-parse of the source. Overrides made through
    /// [`set`](Self::set) are discarded; source edits made since the last
    /// parse are picked up.
    pub fn reset(&self) -> Result<(), ConfigError> {
        self.reload()?;
        info!("configuration properties have been reset");
        Ok(())
    }

    fn reload(&self) -> Result<(), ConfigError> {
        let parsed = match &self.source {
            Some(source) => parse_lines(&source.lines()?, self.context.as_deref())?,
            None => HashMap::new(),
        };
        let mut values = self.lock();
        values.clear();
        values.extend(self.seed.iter().map(|(k, v)| (k.clone(), v.clone())));
        values.extend(parsed);
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .parse()
        .map_err(|err: T::Err| ConfigError::TypeConversion {
            key: key.to_string(),
            value: value.to_string(),
            message: err.to_string(),
        })
}

/// Builder for a [`Config`] store.
///
/// At most one line source applies; registering a second replaces the
/// first. A builder with no source produces an empty store, which is valid.
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct ConfigBuilder {
    source: Option<Box<dyn LineSource>>,
    context: Option<String>,
    env_prefix: Option<String>,
}

impl ConfigBuilder {
    /// Reads configuration from a file.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.source = Some(Box::new(FileSource::new(path)));
        self
    }

    /// Reads configuration from an in-memory string.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(Box::new(StreamSource::new(text)));
        self
    }

    /// Reads configuration from an arbitrary reader, captured eagerly.
    pub fn with_reader(mut self, reader: impl Read) -> Result<Self, ConfigError> {
        self.source = Some(Box::new(StreamSource::from_reader(reader)?));
        Ok(self)
    }

    /// Reads configuration from any custom [`LineSource`].
    pub fn with_source(mut self, source: impl LineSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Selects the context whose ancestry is merged on top of `Default`.
    pub fn context(mut self, name: impl Into<String>) -> Self {
        self.context = Some(name.into());
        self
    }

    /// Seeds the store from environment variables carrying `PREFIX_`
    /// before the source is applied, so parsed values win over the
    /// environment.
    pub fn with_env(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Parses the source and builds the store.
    pub fn build(self) -> Result<Config, ConfigError> {
        let seed = match &self.env_prefix {
            Some(prefix) => env_seed(prefix),
            None => HashMap::new(),
        };
        let config = Config {
            values: Mutex::new(HashMap::new()),
            seed,
            source: self.source,
            context: self.context,
        };
        config.reload()?;
        Ok(config)
    }
}
