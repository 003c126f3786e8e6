//! Preprocessing: comment stripping, macro extraction, and expansion.
//!
//! The preprocessor makes two strict passes over the logical lines of a
//! template. Pass one strips comments and lifts macro definitions into a
//! [`MacroTable`]; pass two expands macro references in every remaining line
//! against the completed table. Fixing the table before any expansion makes
//! the result order independent: a single pass reaches the fixed point.

use indexmap::IndexMap;
use log::debug;

use crate::scanner::{
    find_unescaped, split_unescaped, strip_unescaped, unescape, WHITESPACE,
};

/// Insertion-ordered macro table. Names and definitions are case and
/// whitespace sensitive; redefining a name overwrites its definition
/// (last occurrence wins).
#[derive(Debug, Default, Clone)]
pub struct MacroTable {
    entries: IndexMap<String, String>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, definition: impl Into<String>) {
        self.entries.insert(name.into(), definition.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Expand every macro reference in a line, left to right, in a single
    /// pass. A reference is an unescaped `(` ... `)` span whose enclosed
    /// text, stripped and unescaped, names a table entry; the whole span is
    /// replaced by the definition verbatim and never re-scanned. Spans that
    /// match no entry keep their parentheses, as does an unmatched `(`.
    pub fn expand(&self, line: &str) -> String {
        let mut expanded = String::with_capacity(line.len());
        let mut position = 0;
        while let Some(open) = find_unescaped("(", line, position) {
            let Some(close) = find_unescaped(")", line, open + 1) else {
                break;
            };
            let name = unescape(&strip_unescaped(&line[open + 1..close], WHITESPACE));
            match self.entries.get(&name) {
                Some(definition) => {
                    expanded.push_str(&line[position..open]);
                    expanded.push_str(definition);
                    position = close + 1;
                }
                None => {
                    expanded.push_str(&line[position..open + 1]);
                    position = open + 1;
                }
            }
        }
        expanded.push_str(&line[position..]);
        expanded
    }
}

/// A preprocessed template body: logical lines with comments removed,
/// definition lines blanked, and macros expanded, plus the table extracted
/// along the way (retained for the `title`/`wd` conventions downstream).
#[derive(Debug)]
pub struct Preprocessed {
    pub lines: Vec<String>,
    pub macros: MacroTable,
}

/// Truncate a line at its first unescaped `#`.
pub fn strip_comment(line: &str) -> &str {
    match find_unescaped("#", line, 0) {
        Some(index) => &line[..index],
        None => line,
    }
}

/// Parse a macro definition from an uncommented line, if it carries an
/// unescaped `=`. Both sides are stripped of unescaped whitespace, then
/// unescaped.
pub fn parse_macro(line: &str) -> Option<(String, String)> {
    let index = find_unescaped("=", line, 0)?;
    let name = unescape(&strip_unescaped(&line[..index], WHITESPACE));
    let definition = unescape(&strip_unescaped(&line[index + 1..], WHITESPACE));
    Some((name, definition))
}

/// Run both preprocessor passes over raw template text.
///
/// Lines are logical: an escaped newline joins two physical lines (the
/// line-continuation mechanism). Definition lines are replaced with empty
/// text rather than removed, so later diagnostics keep stable line numbers.
pub fn preprocess(text: &str) -> Preprocessed {
    let mut lines = split_unescaped("\n", text);
    let mut macros = MacroTable::new();

    for line in lines.iter_mut() {
        let uncommented = strip_comment(line).to_string();
        *line = match parse_macro(&uncommented) {
            Some((name, definition)) => {
                debug!("macro {:?} = {:?}", name, definition);
                macros.define(name, definition);
                String::new()
            }
            None => uncommented,
        };
    }

    for line in lines.iter_mut() {
        *line = macros.expand(line);
    }

    Preprocessed { lines, macros }
}
