//! Configuration parsing, merging, and the typed-accessor store.

mod context;
mod env;
mod error;
mod lines;
mod parser;
mod resolve;
pub mod source;
mod store;

pub use error::ConfigError;
pub use parser::parse_lines;
pub use store::{Config, ConfigBuilder, CONTEXT_VAR, FILE_VAR};

/// The reserved root context, merged before any named context.
pub const DEFAULT_CONTEXT: &str = "Default";
