//! The reference replacer.
//!
//! Given a [`RevvedFile`] record, rewrites textual references to the source
//! file so they point at the current revved copy. Two passes run in a fixed
//! order: previously-revved names first (the record's match pattern, which
//! recognizes any revision of the source, stale ones included), then bare
//! occurrences of the original basename at word boundaries. The first pass
//! must run first so its more specific matches are never re-matched by the
//! plainer boundary rule.

use std::fs::{self, OpenOptions};
use std::path::Path;

use regex::{NoExpand, Regex};

use crate::error::{Result, RevError};
use crate::revver::RevvedFile;

/// Rewrite references to the revved source within a string.
///
/// Returns the substituted text and the total substitution count, summed
/// over both passes. The bare-name pass is case-sensitive and exact: for a
/// source named `empty.txt`, neither `notempty.txt` nor `empty.css` is
/// touched.
///
/// # Errors
///
/// Returns [`RevError::Config`] if the bare-name pattern fails to compile,
/// which cannot happen for basenames the revving engine accepts.
pub fn replace_in_str(subject: &str, info: &RevvedFile) -> Result<(String, usize)> {
    let replacement = info.destination_name();

    let pattern = info.match_pattern();
    let revved_count = pattern.find_iter(subject).count();
    let value = pattern
        .replace_all(subject, NoExpand(replacement))
        .into_owned();

    let bare_pattern = bare_name_pattern(info.source_name())?;
    let bare_count = bare_pattern.find_iter(&value).count();
    let value = bare_pattern
        .replace_all(&value, NoExpand(replacement))
        .into_owned();

    Ok((value, revved_count + bare_count))
}

/// Rewrite references to the revved source within a file, in place.
///
/// The whole file is read, substituted, and written back; the call returns
/// the total substitution count. The overwrite is not atomic: a write
/// failure after a successful read can leave the target truncated unless
/// the OS write itself is atomic.
///
/// # Errors
///
/// Returns [`RevError::NotAFile`] or [`RevError::UnwritableFile`] before
/// any read if the target is not a writable regular file, and
/// [`RevError::Io`] if the read or the write fails.
pub fn replace_in_file(target: impl AsRef<Path>, info: &RevvedFile) -> Result<usize> {
    let target = target.as_ref();
    if !target.is_file() {
        return Err(RevError::NotAFile(target.to_path_buf()));
    }

    // Probe writability up front so a read-only target fails before the
    // read rather than after
    OpenOptions::new()
        .write(true)
        .open(target)
        .map_err(|source| RevError::UnwritableFile {
            path: target.to_path_buf(),
            source,
        })?;

    let content = fs::read_to_string(target).map_err(|source| RevError::Io {
        path: target.to_path_buf(),
        source,
    })?;

    let (value, count) = replace_in_str(&content, info)?;
    fs::write(target, value).map_err(|source| RevError::Io {
        path: target.to_path_buf(),
        source,
    })?;

    Ok(count)
}

/// Pattern matching the bare original basename at word boundaries.
fn bare_name_pattern(source_name: &str) -> Result<Regex> {
    let pattern = format!(r"\b{}\b", regex::escape(source_name));
    Regex::new(&pattern).map_err(|error| {
        RevError::Config(format!(
            "Failed to compile the replacement pattern for '{source_name}': {error}"
        ))
    })
}
