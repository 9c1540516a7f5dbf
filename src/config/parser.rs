//! Top-level parse: raw lines plus a target context in, one flat map out.

use std::collections::HashMap;

use super::context::{extract_context, resolve_ancestry};
use super::lines::{is_flat_format, parse_pair};
use super::resolve::resolve_substitutions;
use super::ConfigError;

/// Parses configuration lines into a flat key/value map for `context`.
///
/// Input without any `[Section]` header is a flat property file: every pair
/// line is taken unconditionally and `context` is ignored. Otherwise the
/// ancestry of `context` is resolved and each section is merged in order,
/// most general first, so more specific contexts override their ancestors.
/// `${key}` references are resolved on the merged result either way.
///
/// A fresh map is built per call; any parse error aborts the whole call
/// with no partial result.
pub fn parse_lines(
    lines: &[String],
    context: Option<&str>,
) -> Result<HashMap<String, String>, ConfigError> {
    let mut merged = HashMap::new();

    if is_flat_format(lines) {
        for line in lines {
            if let Some((key, value)) = parse_pair(line)? {
                merged.insert(key, value);
            }
        }
    } else {
        for name in resolve_ancestry(context, lines)? {
            merged.extend(extract_context(lines, &name)?);
        }
    }

    resolve_substitutions(&mut merged);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(input: &[&str]) -> Vec<String> {
        input.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_is_an_empty_configuration() {
        assert!(parse_lines(&[], None).unwrap().is_empty());
        assert!(parse_lines(&[], Some("Test")).unwrap().is_empty());
    }

    #[test]
    fn flat_format_ignores_the_context_argument() {
        let input = lines(&["key1=value1", " ", "key3=value3"]);
        let with_context = parse_lines(&input, Some("Test")).unwrap();
        let without = parse_lines(&input, None).unwrap();
        assert_eq!(with_context, without);
        assert_eq!(with_context.len(), 2);
        assert_eq!(with_context["key1"], "value1");
        assert_eq!(with_context["key3"], "value3");
    }

    #[test]
    fn flat_format_rejects_garbage_lines() {
        let input = lines(&["key1=value1", "garbage text with no equals sign"]);
        assert!(matches!(
            parse_lines(&input, None),
            Err(ConfigError::UnparsableLine(_))
        ));
    }

    #[test]
    fn default_section_applies_to_every_context() {
        let input = lines(&["[Default]", "a=1", "[Test]", "b=2"]);
        let map = parse_lines(&input, Some("Test")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], "1");
        assert_eq!(map["b"], "2");
    }

    #[test]
    fn specific_context_overrides_default() {
        let input = lines(&[
            "[Default]",
            "somekey = somevalue",
            "newkey = newvalue",
            "[Test]",
            "newkey = 123",
        ]);
        let map = parse_lines(&input, Some("Test")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["somekey"], "somevalue");
        assert_eq!(map["newkey"], "123");
    }

    #[test]
    fn inherited_parent_sits_between_default_and_child() {
        let input = lines(&[
            "[Default]",
            "x = base",
            "y = base",
            "z = base",
            "[Parent]",
            "x = 1",
            "y = parent",
            "[Child:Parent]",
            "y = 2",
        ]);
        let map = parse_lines(&input, Some("Child")).unwrap();
        assert_eq!(map["x"], "1");
        assert_eq!(map["y"], "2");
        assert_eq!(map["z"], "base");
    }

    #[test]
    fn inheritance_scenario_from_two_sections() {
        let input = lines(&["[Parent]", "x = 1", "[Child:Parent]", "y = 2"]);
        let map = parse_lines(&input, Some("Child")).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["x"], "1");
        assert_eq!(map["y"], "2");
    }

    #[test]
    fn substitution_within_default() {
        let input = lines(&["[Default]", "key1 = value", "key2 = ${key1}"]);
        let map = parse_lines(&input, None).unwrap();
        assert_eq!(map["key1"], "value");
        assert_eq!(map["key2"], "value");
    }

    #[test]
    fn substitution_across_contexts() {
        let input = lines(&["[Default]", "key1 = value", "[Test]", "key2 = ${key1}"]);
        let map = parse_lines(&input, Some("Test")).unwrap();
        assert_eq!(map["key2"], "value");
    }

    #[test]
    fn substitution_sees_post_override_values() {
        let input = lines(&[
            "[Default]",
            "key0 = 0",
            "key1 = value",
            "key2 = ${key1}",
            "[Test]",
            "key2 = ${key0}",
            "key3 = ${key0}",
        ]);
        let map = parse_lines(&input, Some("Test")).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map["key2"], "0");
        assert_eq!(map["key3"], "0");
    }

    #[test]
    fn circular_substitution_is_left_alone() {
        let input = lines(&["[Default]", "key1 = ${key2}", "key2 = ${key1}"]);
        let map = parse_lines(&input, None).unwrap();
        assert_eq!(map["key1"], "${key2}");
        assert_eq!(map["key2"], "${key1}");
    }

    #[test]
    fn circular_inheritance_is_fatal() {
        let input = lines(&["[A:B]", "a = 1", "[B:A]", "b = 2"]);
        assert!(matches!(
            parse_lines(&input, Some("A")),
            Err(ConfigError::CircularInheritance(_))
        ));
    }

    #[test]
    fn complex_value_survives_intact() {
        let url = "https://www.google.com/fp=dfc3525e9a3b356a&q=hello&safe=off/";
        let input = lines(&["[Default]", &format!("key = {url}")]);
        let map = parse_lines(&input, Some("Test")).unwrap();
        assert_eq!(map["key"], url);
    }
}
