//! Record classification: preprocessed lines into Options and Paths.
//!
//! One left-to-right scan over the preprocessed line sequence builds the
//! finished [`Template`]. Every structural failure is fatal for the whole
//! parse; no partial template is ever produced.

use std::path::Path as FsPath;

use log::debug;

use crate::error::{Error, Result};
use crate::macros::{preprocess, MacroTable, Preprocessed};
use crate::scanner::{
    find_unescaped, split_unescaped, split_unescaped_exact, strip_unescaped, unescape,
    WHITESPACE,
};
use crate::template::{OptionBlock, PathEntry, Template};

/// Parse a complete raw template body.
///
/// Returns the immutable [`Template`] together with the macro table, which
/// the populate step still needs for the `title` and `wd` conventions.
pub fn parse(text: &str) -> Result<(Template, MacroTable)> {
    let Preprocessed { lines, macros } = preprocess(text);
    let mut options = Vec::new();
    let mut paths = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line_number = i + 1;
        let stripped = strip_unescaped(&lines[i], WHITESPACE);
        if stripped.is_empty() {
            i += 1;
            continue;
        }
        if let Some(names_part) = option_opener(&stripped) {
            let names = option_names(names_part);
            let (script, next) = capture_block(&lines, i + 1);
            if names.is_empty() {
                // bare ':' separator: consume its block, record nothing
                debug!("no-op option separator on line {}", line_number);
            } else {
                debug!("option {:?} on line {}", names, line_number);
                options.push(OptionBlock { names, script });
            }
            i = next;
            continue;
        }
        paths.push(parse_path(&stripped, line_number)?);
        i += 1;
    }

    Ok((Template::new(options, paths), macros))
}

/// A stripped line ending in an unescaped `:` opens an option; returns the
/// text before the colon.
fn option_opener(stripped: &str) -> Option<&str> {
    if !stripped.ends_with(':') {
        return None;
    }
    let index = stripped.len() - 1;
    if find_unescaped(":", stripped, index) != Some(index) {
        return None;
    }
    Some(&stripped[..index])
}

/// Comma-separated option names, each stripped and unescaped; empty and
/// repeated names are discarded.
fn option_names(names_part: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for field in split_unescaped(",", names_part) {
        let name = unescape(&strip_unescaped(&field, WHITESPACE));
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Capture an option's script body: every following non-blank line that
/// begins with whitespace, leading whitespace preserved and escapes
/// removed. Blank lines inside the block are skipped; the block ends at
/// the first non-blank unindented line or end of input. Returns the body
/// and the index of the first line past the block.
fn capture_block(lines: &[String], mut i: usize) -> (String, usize) {
    let mut script = Vec::new();
    while i < lines.len() {
        let line = &lines[i];
        if !strip_unescaped(line, WHITESPACE).is_empty() {
            if !line.starts_with(|c: char| c.is_whitespace()) {
                break;
            }
            script.push(unescape(line));
        }
        i += 1;
    }
    (script.join("\n"), i)
}

/// Parse a path line into a [`PathEntry`].
fn parse_path(stripped: &str, line: usize) -> Result<PathEntry> {
    if stripped.starts_with('>') {
        return Err(Error::Syntax { line, message: "path with empty source".to_string() });
    }

    let (source, destination) = if find_unescaped(">", stripped, 0).is_some() {
        let fields = split_unescaped_exact(">", stripped, 1)
            .map_err(|e| Error::Parse { line, message: e.to_string() })?;
        let source = unescape(&strip_unescaped(&fields[0], WHITESPACE));
        let destination = unescape(&strip_unescaped(&fields[1], WHITESPACE));
        if destination.is_empty() {
            // empty destination falls back to the source
            (source.clone(), source)
        } else {
            (source, destination)
        }
    } else {
        let source = unescape(stripped);
        (source.clone(), source)
    };

    let destination = if FsPath::new(&destination).is_absolute() {
        if destination != source {
            return Err(Error::Syntax {
                line,
                message: format!("destination {:?} cannot be absolute", destination),
            });
        }
        // identity copy of an absolute source lands at its final component
        FsPath::new(&destination)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string()
    } else {
        destination
    };

    Ok(PathEntry { source, destination, line })
}
