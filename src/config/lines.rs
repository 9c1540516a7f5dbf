//! Line classification for the sectioned properties format.
//!
//! A line is one of: blank/comment-only, a context header (`[Name]` or
//! `[Name:Parent]`), or a `key = value` pair. Anything from the first `#`
//! onward is a comment.

use super::ConfigError;

const COMMENT: char = '#';
const IDENTITY: char = '=';
const PARENT_SEPARATOR: char = ':';

/// Parses a line into a key/value pair.
///
/// Returns `Ok(None)` for blank and comment-only lines. A non-empty line
/// without an `=` separator is a fatal parse error.
pub(crate) fn parse_pair(line: &str) -> Result<Option<(String, String)>, ConfigError> {
    let text = match line.find(COMMENT) {
        Some(idx) => &line[..idx],
        None => line,
    };
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }
    match text.split_once(IDENTITY) {
        Some((key, value)) => Ok(Some((key.trim().to_string(), value.trim().to_string()))),
        None => Err(ConfigError::UnparsableLine(line.to_string())),
    }
}

/// True for any context header line, regardless of its name.
pub(crate) fn is_context_header(line: &str) -> bool {
    let line = line.trim();
    line.starts_with('[') && line.ends_with(']') && line.len() >= 2
}

/// True for a header whose declared name matches `context`, ignoring case
/// and any `:Parent` suffix.
pub(crate) fn is_named_header(line: &str, context: &str) -> bool {
    match header_name(line) {
        Some(name) => name.eq_ignore_ascii_case(context),
        None => false,
    }
}

/// The declared name of a header line, with any `:Parent` suffix stripped.
pub(crate) fn header_name(line: &str) -> Option<&str> {
    let inner = header_inner(line)?;
    match inner.split_once(PARENT_SEPARATOR) {
        Some((name, _)) => Some(name.trim()),
        None => Some(inner),
    }
}

/// The declared parent of a header line, if it carries a `:Parent` suffix.
pub(crate) fn header_parent(line: &str) -> Option<&str> {
    let inner = header_inner(line)?;
    let (_, parent) = inner.split_once(PARENT_SEPARATOR)?;
    let parent = parent.trim();
    if parent.is_empty() {
        None
    } else {
        Some(parent)
    }
}

fn header_inner(line: &str) -> Option<&str> {
    let line = line.trim();
    if is_context_header(line) {
        Some(line[1..line.len() - 1].trim())
    } else {
        None
    }
}

/// True iff the input contains no context header at all, in which case it is
/// a flat property file: every pair line belongs to one implicit context and
/// inheritance never applies.
pub(crate) fn is_flat_format<S: AsRef<str>>(lines: &[S]) -> bool {
    !lines.iter().any(|line| is_context_header(line.as_ref()))
}
