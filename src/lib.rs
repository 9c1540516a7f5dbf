//! Layered, context-sectioned configuration loading.
//!
//! `layercfg` reads a properties-style text format where key/value pairs are
//! grouped into named `[Context]` sections. A lookup merges the reserved
//! `[Default]` section with the requested context (and any `[Child:Parent]`
//! ancestors), resolves `${key}` references between entries, and exposes the
//! result through a typed-accessor store.
//!
//! Files without any section header are treated as flat `key = value`
//! property files.
//!
//! ```no_run
//! use layercfg::Config;
//!
//! let config = Config::builder()
//!     .with_file("conf/app.cfg")
//!     .context("Production")
//!     .build()?;
//!
//! let port: u16 = config.get("server.port")?;
//! let hosts: Vec<String> = config.get_list("db.hosts")?;
//! # Ok::<(), layercfg::ConfigError>(())
//! ```

pub mod config;

pub use config::source::{FileSource, LineSource, StreamSource};
pub use config::{Config, ConfigBuilder, ConfigError};
