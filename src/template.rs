//! The parsed template read model.
//!
//! A [`Template`] is built exactly once from a complete text body and is
//! read-only afterwards. It owns its options and paths exclusively and
//! offers the two queries the interpreter consumes: option selection and
//! path resolution.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{Error, Result};

/// A named, user-selectable block of command text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionBlock {
    /// Names this block answers to. Unique within the block; the same name
    /// may appear on other blocks (first declared block wins on selection).
    pub names: Vec<String>,
    /// Newline-joined command lines, leading whitespace preserved.
    pub script: String,
}

/// A source/destination pair describing a file or directory to be copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    pub source: String,
    pub destination: String,
    /// 1-based logical line the entry came from, for diagnostics raised at
    /// resolution time.
    pub line: usize,
}

/// The finished parse result: ordered options and paths.
#[derive(Debug, Default, Clone)]
pub struct Template {
    options: Vec<OptionBlock>,
    paths: Vec<PathEntry>,
}

impl Template {
    pub fn new(options: Vec<OptionBlock>, paths: Vec<PathEntry>) -> Self {
        Self { options, paths }
    }

    pub fn options(&self) -> &[OptionBlock] {
        &self.options
    }

    pub fn paths(&self) -> &[PathEntry] {
        &self.paths
    }

    /// Build the execution plan for the requested option names.
    ///
    /// Names are honored in caller order. Each name resolves to the first
    /// declared option carrying it that this call has not already selected,
    /// so every option runs at most once and the plan is deterministic.
    /// Names matching no option are silently ignored.
    pub fn select_options(&self, requested: &[String]) -> Vec<&str> {
        let mut selected: HashSet<usize> = HashSet::new();
        let mut plan = Vec::new();
        for name in requested {
            let found = self.options.iter().enumerate().find(|(index, option)| {
                option.names.iter().any(|n| n == name) && !selected.contains(index)
            });
            if let Some((index, option)) = found {
                selected.insert(index);
                plan.push(option.script.as_str());
            }
        }
        plan
    }

    /// Check the glob-consistency invariant and hand the path records to
    /// the interpreter: a source whose final component globs must map to a
    /// destination whose final component globs too. Matching against the
    /// real filesystem is the interpreter's job, not the model's.
    pub fn resolve_paths(&self) -> Result<Vec<&PathEntry>> {
        for path in &self.paths {
            if final_component_globs(&path.source) && !final_component_globs(&path.destination) {
                return Err(Error::Syntax {
                    line: path.line,
                    message: format!(
                        "source {:?} globs but destination {:?} does not",
                        path.source, path.destination
                    ),
                });
            }
        }
        Ok(self.paths.iter().collect())
    }
}

/// Whether a path's final component contains a glob wildcard.
pub fn final_component_globs(path: &str) -> bool {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains('*'))
}
