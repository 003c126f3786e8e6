//! Escape-aware text scanning primitives.
//!
//! Template text reserves a handful of punctuation characters; a literal
//! occurrence must be preceded by the escape marker `\`. Everything in this
//! module is a pure function over immutable text with no knowledge of the
//! template syntax built on top of it.

use thiserror::Error;

/// The escape marker.
pub const ESCAPE: char = '\\';

/// Characters reserved by the template syntax. Any literal occurrence in
/// raw text must be escaped.
pub const RESERVED: &str = "\n#(),:=>\\";

/// The subset of [`RESERVED`] that [`escape`] marks on output. `)` and the
/// newline are readable without escaping, but remain unescape-able on input.
pub const ESCAPABLE: &str = "#(,:=>\\";

/// Whitespace characters trimmed by [`strip_unescaped`] callers.
pub const WHITESPACE: &str = " \t\n\r\x0B\x0C";

/// Error returned by [`split_unescaped_exact`] when the haystack does not
/// contain exactly the requested number of unescaped separators.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected exactly {wanted} unescaped occurrence(s) of {needle:?}, found {found}")]
pub struct SplitError {
    pub needle: String,
    pub wanted: usize,
    pub found: usize,
}

/// Whether the character at `index` is escaped: preceded by an odd-length
/// run of escape markers (an even run is a sequence of escaped markers and
/// leaves the character literal).
fn is_escaped(haystack: &str, index: usize) -> bool {
    let bytes = haystack.as_bytes();
    let mut run = 0;
    while run < index && bytes[index - run - 1] == b'\\' {
        run += 1;
    }
    run % 2 == 1
}

/// Find the first unescaped occurrence of `needle` in `haystack` at or
/// after `start`. An empty needle matches trivially at `start`.
pub fn find_unescaped(needle: &str, haystack: &str, start: usize) -> Option<usize> {
    if start > haystack.len() {
        return None;
    }
    if needle.is_empty() {
        return Some(start);
    }
    let haystack_bytes = haystack.as_bytes();
    let needle_bytes = needle.as_bytes();
    let mut index = start;
    while index + needle_bytes.len() <= haystack_bytes.len() {
        if &haystack_bytes[index..index + needle_bytes.len()] == needle_bytes
            && !is_escaped(haystack, index)
        {
            return Some(index);
        }
        index += 1;
    }
    None
}

/// Split `haystack` at every unescaped occurrence of `needle`. The
/// separators themselves are removed; escaped occurrences stay in place.
pub fn split_unescaped(needle: &str, haystack: &str) -> Vec<String> {
    if needle.is_empty() {
        return vec![haystack.to_string()];
    }
    let mut fields = Vec::new();
    let mut last = 0;
    let mut index = find_unescaped(needle, haystack, 0);
    while let Some(found) = index {
        fields.push(haystack[last..found].to_string());
        last = found + needle.len();
        index = find_unescaped(needle, haystack, last);
    }
    fields.push(haystack[last..].to_string());
    fields
}

/// Split `haystack` at exactly `wanted` unescaped occurrences of `needle`,
/// yielding `wanted + 1` fields. Any other occurrence count is a
/// [`SplitError`]; callers use this where a record requires an exact number
/// of fields.
pub fn split_unescaped_exact(
    needle: &str,
    haystack: &str,
    wanted: usize,
) -> Result<Vec<String>, SplitError> {
    let fields = split_unescaped(needle, haystack);
    let found = fields.len() - 1;
    if found != wanted {
        return Err(SplitError { needle: needle.to_string(), wanted, found });
    }
    Ok(fields)
}

/// Trim unescaped leading and trailing `charset` characters. Escaped
/// boundary characters survive, together with their markers.
pub fn strip_unescaped(string: &str, charset: &str) -> String {
    let bytes = string.as_bytes();
    let mut start = 0;
    while start < bytes.len()
        && charset.contains(bytes[start] as char)
        && !is_escaped(string, start)
    {
        start += 1;
    }
    let mut end = bytes.len();
    while end > start
        && charset.contains(bytes[end - 1] as char)
        && !is_escaped(string, end - 1)
    {
        end -= 1;
    }
    string[start..end].to_string()
}

/// Escape a string: insert the marker before every [`ESCAPABLE`] character.
pub fn escape(string: &str) -> String {
    let mut escaped = String::with_capacity(string.len());
    for c in string.chars() {
        if ESCAPABLE.contains(c) {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Unescape a string: drop each marker and keep the following character
/// literally, whether or not it is reserved. A trailing marker with nothing
/// to escape is kept as a literal backslash.
pub fn unescape(string: &str) -> String {
    let mut unescaped = String::with_capacity(string.len());
    let mut chars = string.chars();
    while let Some(c) = chars.next() {
        if c == ESCAPE {
            match chars.next() {
                Some(next) => unescaped.push(next),
                None => unescaped.push(ESCAPE),
            }
        } else {
            unescaped.push(c);
        }
    }
    unescaped
}
