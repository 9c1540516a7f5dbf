//! Context section extraction and inheritance resolution.
//!
//! A context is every pair line lexically enclosed by a matching header, up
//! to the next header or end of input. A header may declare a single parent
//! (`[Child:Parent]`); a context with no declared parent inherits from the
//! reserved `Default` context.

use std::collections::HashMap;

use super::lines::{header_parent, is_context_header, is_named_header, parse_pair};
use super::{ConfigError, DEFAULT_CONTEXT};

/// Collects the key/value pairs of every section named `context`.
///
/// Sections may repeat; all of them contribute, and a later pair with the
/// same key overwrites an earlier one. An undeclared context yields an
/// empty map.
pub(crate) fn extract_context(
    lines: &[String],
    context: &str,
) -> Result<HashMap<String, String>, ConfigError> {
    let mut section = HashMap::new();
    let mut inside = false;
    for line in lines {
        if is_named_header(line, context) {
            inside = true;
        } else if inside && is_context_header(line) {
            inside = false;
        } else if inside {
            if let Some((key, value)) = parse_pair(line)? {
                section.insert(key, value);
            }
        }
    }
    Ok(section)
}

/// Computes the ordered list of contexts to merge for `context`,
/// general-to-specific.
///
/// `Default` is always the first element, exactly once; a `None` or
/// `Default` target yields just `[Default]`. Parent links are followed
/// through `[Child:Parent]` headers; a context without a declared parent
/// (or without any header) falls back to `Default`. Revisiting a name
/// during one resolution means the parent chain loops, which is a fatal
/// parse error rather than an infinite walk.
pub(crate) fn resolve_ancestry(
    context: Option<&str>,
    lines: &[String],
) -> Result<Vec<String>, ConfigError> {
    let mut path = vec![DEFAULT_CONTEXT.to_string()];
    let Some(name) = context else {
        return Ok(path);
    };
    if name.eq_ignore_ascii_case(DEFAULT_CONTEXT) {
        return Ok(path);
    }

    let mut chain: Vec<String> = Vec::new();
    let mut current = name.to_string();
    while !current.eq_ignore_ascii_case(DEFAULT_CONTEXT) {
        if chain.iter().any(|seen| seen.eq_ignore_ascii_case(&current)) {
            return Err(ConfigError::CircularInheritance(current));
        }
        chain.push(current.clone());
        current = match declared_parent(lines, &current) {
            Some(parent) => parent,
            None => break,
        };
    }

    chain.reverse();
    path.extend(chain);
    Ok(path)
}

/// The parent declared by the first header named `context`, if any.
fn declared_parent(lines: &[String], context: &str) -> Option<String> {
    lines
        .iter()
        .find(|line| is_named_header(line, context))
        .and_then(|line| header_parent(line))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn extracts_only_the_named_section() {
        let input = lines(&[
            "[Default]",
            "key1 = value1",
            "[Test-2]",
            "key2 = value2",
            "[Test]",
            "key3 = value3",
            "[Test-3]",
            "key4 = value4",
        ]);
        let section = extract_context(&input, "Test").unwrap();
        assert_eq!(section.len(), 1);
        assert_eq!(section["key3"], "value3");
    }

    #[test]
    fn repeated_sections_merge_with_last_write_wins() {
        let input = lines(&["[Test]", "a = 1", "b = 2", "[Other]", "x = 9", "[Test]", "a = 3"]);
        let section = extract_context(&input, "Test").unwrap();
        assert_eq!(section["a"], "3");
        assert_eq!(section["b"], "2");
        assert!(!section.contains_key("x"));
    }

    #[test]
    fn section_matching_is_case_insensitive_and_parent_blind() {
        let input = lines(&["[staging:Default]", "a = 1"]);
        let section = extract_context(&input, "Staging").unwrap();
        assert_eq!(section["a"], "1");
    }

    #[test]
    fn missing_section_is_empty() {
        let input = lines(&["[Default]", "a = 1"]);
        assert!(extract_context(&input, "Absent").unwrap().is_empty());
    }

    #[test]
    fn bad_pair_inside_section_aborts() {
        let input = lines(&["[Test]", "garbage without separator"]);
        assert!(matches!(
            extract_context(&input, "Test"),
            Err(ConfigError::UnparsableLine(_))
        ));
    }

    #[test]
    fn no_context_resolves_to_default_only() {
        let path = resolve_ancestry(None, &lines(&["[Default]", "a = 1"])).unwrap();
        assert_eq!(path, ["Default"]);
    }

    #[test]
    fn default_target_is_not_duplicated() {
        let path = resolve_ancestry(Some("default"), &lines(&["[Default]", "a = 1"])).unwrap();
        assert_eq!(path, ["Default"]);
    }

    #[test]
    fn undeclared_parent_falls_back_to_default() {
        let path = resolve_ancestry(Some("Test"), &lines(&["[Test]", "a = 1"])).unwrap();
        assert_eq!(path, ["Default", "Test"]);
    }

    #[test]
    fn declared_parents_are_followed_general_first() {
        let input = lines(&[
            "[Base]",
            "a = 1",
            "[Mid:Base]",
            "b = 2",
            "[Leaf:Mid]",
            "c = 3",
        ]);
        let path = resolve_ancestry(Some("Leaf"), &input).unwrap();
        assert_eq!(path, ["Default", "Base", "Mid", "Leaf"]);
    }

    #[test]
    fn unknown_target_still_gets_a_path() {
        let path = resolve_ancestry(Some("Nowhere"), &lines(&["[Default]"])).unwrap();
        assert_eq!(path, ["Default", "Nowhere"]);
    }

    #[test]
    fn self_parent_is_circular() {
        let input = lines(&["[A:A]", "a = 1"]);
        assert!(matches!(
            resolve_ancestry(Some("A"), &input),
            Err(ConfigError::CircularInheritance(_))
        ));
    }

    #[test]
    fn two_step_cycle_is_circular() {
        let input = lines(&["[A:B]", "a = 1", "[B:A]", "b = 2"]);
        assert!(matches!(
            resolve_ancestry(Some("A"), &input),
            Err(ConfigError::CircularInheritance(_))
        ));
    }
}
