//! Environment variable seeding for the configuration store.

use std::collections::HashMap;

/// Collects environment variables carrying `PREFIX_` into a seed map.
///
/// The prefix and separator are stripped and the remaining name is
/// lowercased, so `APP_DB_HOST=x` with prefix `APP` seeds `db_host = x`.
/// Seeds are applied before the parsed file, so file values override them.
pub(crate) fn env_seed(prefix: &str) -> HashMap<String, String> {
    let prefix_with_sep = format!("{prefix}_");
    let mut seed = HashMap::new();

    for (key, value) in std::env::vars() {
        if let Some(name) = key.strip_prefix(&prefix_with_sep) {
            if name.is_empty() {
                continue;
            }
            seed.insert(name.to_lowercase(), value);
        }
    }

    seed
}
