//! Destination-tree population.
//!
//! Consumes a parsed [`Template`] plus the retained macro table: the
//! `title` macro names the root directory created under the destination,
//! and `wd` offsets the source working directory relative to the template
//! file. Copying is idempotent: a source already resolving to its
//! destination is skipped, as is rewriting a destination file whose
//! content hash matches the source.

use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use log::{debug, info};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::macros::MacroTable;
use crate::template::{final_component_globs, PathEntry, Template};

/// Populate the destination with the template's path entries and return
/// the populated root.
///
/// `template_dir` is the directory containing the template file; `wd`
/// (when defined non-empty) is joined onto it to form the source working
/// directory. `dest_root` is joined with `title` the same way. An existing
/// destination root is an error unless `overwrite` is set.
pub fn populate(
    template: &Template,
    macros: &MacroTable,
    template_dir: &Path,
    dest_root: &Path,
    overwrite: bool,
) -> Result<PathBuf> {
    let source_root = match macros.get("wd") {
        Some(wd) if !wd.is_empty() => template_dir.join(wd),
        _ => template_dir.to_path_buf(),
    };
    let dest_root = match macros.get("title") {
        Some(title) if !title.is_empty() => dest_root.join(title),
        _ => dest_root.to_path_buf(),
    };

    if dest_root.exists() {
        if !overwrite {
            return Err(Error::Populate(format!(
                "destination {} exists (pass --overwrite to reuse it)",
                dest_root.display()
            )));
        }
    } else {
        fs::create_dir_all(&dest_root)?;
    }

    for entry in template.resolve_paths()? {
        populate_entry(entry, &source_root, &dest_root)?;
    }
    Ok(dest_root)
}

/// Copy everything one path entry matches into the destination tree.
fn populate_entry(entry: &PathEntry, source_root: &Path, dest_root: &Path) -> Result<()> {
    let dest_base = dest_root.join(&entry.destination);

    for source in expand_source(entry, source_root)? {
        let mut dest = dest_base.clone();
        if final_component_globs(&entry.destination) {
            // a globbed destination takes each matched source's file name
            if let (Some(parent), Some(name)) = (dest.parent(), source.file_name()) {
                dest = parent.join(name);
            }
        }
        if same_file(&source, &dest) {
            debug!("skipping {}: already in place", source.display());
            continue;
        }
        if source.is_dir() {
            copy_dir(&source, &dest)?;
        } else {
            copy_file(&source, &dest)?;
        }
    }
    Ok(())
}

/// Expand a path entry's source against the filesystem. A globbed source
/// matches relative paths under the source root (`*` does not cross path
/// separators); no match is a failure, not an empty success.
fn expand_source(entry: &PathEntry, source_root: &Path) -> Result<Vec<PathBuf>> {
    if !entry.source.contains('*') {
        let source = source_root.join(&entry.source);
        if !source.exists() {
            return Err(Error::Populate(format!("no source matches {:?}", entry.source)));
        }
        return Ok(vec![source]);
    }

    let matcher = GlobBuilder::new(&entry.source)
        .literal_separator(true)
        .build()
        .map_err(|e| Error::Populate(format!("bad source pattern {:?}: {}", entry.source, e)))?
        .compile_matcher();

    let mut matches = Vec::new();
    for walked in WalkDir::new(source_root) {
        let walked = walked.map_err(|e| Error::Populate(e.to_string()))?;
        let relative = match walked.path().strip_prefix(source_root) {
            Ok(relative) if !relative.as_os_str().is_empty() => relative,
            _ => continue,
        };
        if matcher.is_match(relative) {
            matches.push(walked.path().to_path_buf());
        }
    }
    if matches.is_empty() {
        return Err(Error::Populate(format!("no source matches {:?}", entry.source)));
    }
    matches.sort();
    Ok(matches)
}

/// Whether two paths resolve to the same existing file.
fn same_file(source: &Path, dest: &Path) -> bool {
    match (source.canonicalize(), dest.canonicalize()) {
        (Ok(source), Ok(dest)) => source == dest,
        _ => false,
    }
}

/// Copy one file, creating missing parents. An existing destination with
/// identical content is left untouched.
fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if dest.is_file() && hash_file(source)? == hash_file(dest)? {
        debug!("skipping {}: content unchanged", dest.display());
        return Ok(());
    }
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    info!("{} -> {}", source.display(), dest.display());
    fs::copy(source, dest)?;
    Ok(())
}

/// Copy a directory tree recursively.
fn copy_dir(source: &Path, dest: &Path) -> Result<()> {
    for walked in WalkDir::new(source) {
        let walked = walked.map_err(|e| Error::Populate(e.to_string()))?;
        let relative = walked
            .path()
            .strip_prefix(source)
            .map_err(|e| Error::Populate(e.to_string()))?;
        let target = dest.join(relative);
        if walked.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_file(walked.path(), &target)?;
        }
    }
    Ok(())
}

fn hash_file(path: &Path) -> Result<blake3::Hash> {
    let mut hasher = blake3::Hasher::new();
    let mut file = fs::File::open(path)?;
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hasher.finalize())
}
