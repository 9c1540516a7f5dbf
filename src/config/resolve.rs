//! Variable substitution for configuration values.
//!
//! A value that is exactly `${otherKey}` is replaced by the value of
//! `otherKey`. Resolution runs to a fixed point so chains of references
//! settle in dependency order; anything dangling or circular is left as its
//! literal `${...}` text.

use std::collections::HashMap;

const LEFT_SUBSTITUTION: &str = "${";
const RIGHT_SUBSTITUTION: &str = "}";

/// Resolves all `${key}` references in the map, in place.
///
/// Multi-pass relaxation: each pass rewrites every entry whose referenced
/// key already holds a settled value, and stops once a pass makes no
/// progress. Unresolvable entries (missing target, or a member of a
/// reference cycle) keep their literal text; that is a silent best-effort
/// policy, not an error.
pub(crate) fn resolve_substitutions(map: &mut HashMap<String, String>) {
    let mut unresolved: HashMap<String, String> = map
        .iter()
        .filter_map(|(key, value)| {
            substitution_target(value).map(|target| (key.clone(), target.to_string()))
        })
        .collect();

    loop {
        let before = unresolved.len();
        let settled: Vec<(String, String)> = unresolved
            .iter()
            .filter(|(_, target)| map.contains_key(*target) && !unresolved.contains_key(*target))
            .map(|(key, target)| (key.clone(), target.clone()))
            .collect();
        for (key, target) in settled {
            if let Some(value) = map.get(&target).cloned() {
                map.insert(key.clone(), value);
            }
            unresolved.remove(&key);
        }
        if unresolved.len() == before {
            return;
        }
    }
}

/// The referenced key, if the value is exactly a `${...}` reference.
fn substitution_target(value: &str) -> Option<&str> {
    if value.starts_with(LEFT_SUBSTITUTION) && value.ends_with(RIGHT_SUBSTITUTION) {
        Some(&value[LEFT_SUBSTITUTION.len()..value.len() - RIGHT_SUBSTITUTION.len()])
    } else {
        None
    }
}
