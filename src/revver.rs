//! The revving engine.
//!
//! Revving copies a source file into the destination directory under a name
//! that encodes the file's content digest and a unique, time-ordered
//! revision id: `stem-<digest>-<id>.ext`. Changed content always gets a new
//! name, so downstream caches can treat revved names as immutable. The
//! destination directory is self-describing: everything the engine needs to
//! know about a revision (which source it belongs to, its digest, its age
//! relative to its siblings) is parsed back out of the filename, with no
//! sidecar state.
//!
//! [`Revver::rev_file`] is the single entry point. It is idempotent for
//! unchanged content: a source whose digest already appears among its revved
//! siblings is reused rather than copied again. With cleanup enabled, each
//! call also prunes superseded revisions beyond the configured retention
//! count.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use uuid::timestamp::context::ContextV7;
use uuid::{Timestamp, Uuid};

use crate::error::{Result, RevError};
use crate::hashing::{DIGEST_HEX_LEN, content_digest};
use crate::options::RevverOptions;

/// Pattern for the hyphenated textual form of a revision id.
const ID_PATTERN: &str = "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}";

/// The record produced by one [`Revver::rev_file`] call.
///
/// Immutable once returned. The [`match_pattern`](RevvedFile::match_pattern)
/// depends only on the source's basename, so it recognizes every revved
/// sibling of that source, past or present, not just the destination this
/// record points at.
#[derive(Clone, Debug)]
pub struct RevvedFile {
    source: PathBuf,
    destination: PathBuf,
    match_pattern: Regex,
    deleted_revisions: Vec<PathBuf>,
}

impl RevvedFile {
    /// The original file path as supplied by the caller.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Path to the (possibly pre-existing) revved copy.
    ///
    /// Always exists on disk after a successful `rev_file` call.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Pattern matching any revved filename derived from the source's
    /// basename.
    pub fn match_pattern(&self) -> &Regex {
        &self.match_pattern
    }

    /// Destinations removed by this call's cleanup pass, in deletion order.
    ///
    /// Empty when cleanup is disabled or nothing was removed. Never contains
    /// the destination itself.
    pub fn deleted_revisions(&self) -> &[PathBuf] {
        &self.deleted_revisions
    }

    /// Basename of the source file.
    pub fn source_name(&self) -> &str {
        self.source
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    /// Basename of the revved copy.
    pub fn destination_name(&self) -> &str {
        self.destination
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// The revving engine.
///
/// Holds validated [`RevverOptions`] and a UUIDv7 clock context; otherwise
/// stateless, so one instance can rev any number of files sharing a
/// destination directory. Ids minted by the same instance are strictly
/// increasing even within one millisecond.
pub struct Revver {
    options: RevverOptions,
    clock: ContextV7,
}

impl Revver {
    /// Create an engine from validated options.
    pub fn new(options: RevverOptions) -> Self {
        Self {
            options,
            clock: ContextV7::new(),
        }
    }

    /// Rev a single source file into the destination directory.
    ///
    /// If a revved sibling with the same content digest already exists, it
    /// is reused: no copy is performed, no revision id is minted, and no
    /// cleanup runs. Otherwise the source's bytes are copied verbatim to
    /// `stem-<digest>-<id>.ext` (extension omitted when the source has
    /// none), and, with cleanup enabled, superseded revisions beyond the
    /// retention count are deleted.
    ///
    /// # Errors
    ///
    /// Precondition failures ([`RevError::NotAFile`],
    /// [`RevError::UnreadableFile`], [`RevError::InvalidFileName`]) are
    /// raised before any side effect. A cleanup failure
    /// ([`RevError::MissingExpectedFile`], [`RevError::Deletion`]) aborts
    /// the call even though the copy already succeeded; the new revision
    /// stays on disk but the retention invariant may be violated.
    pub fn rev_file(&self, source: impl AsRef<Path>) -> Result<RevvedFile> {
        let source = source.as_ref();
        assert_readable_file(source)?;
        let digest = content_digest(source)?;

        let file_name = source
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| RevError::InvalidFileName(source.to_path_buf()))?;
        let pattern = filename_match_pattern(file_name)?;

        if let Some(existing) = self.existing_destination(&pattern, &digest)? {
            return Ok(RevvedFile {
                source: source.to_path_buf(),
                destination: existing,
                match_pattern: pattern,
                deleted_revisions: Vec::new(),
            });
        }

        let (stem, extension) = split_name(file_name);
        let id = Uuid::new_v7(Timestamp::now(&self.clock));
        let revved_name = format!("{stem}-{digest}-{id}{extension}");
        let destination = self.options.destination_directory().join(revved_name);
        fs::copy(source, &destination).map_err(|io| RevError::Copy {
            from: source.to_path_buf(),
            to: destination.clone(),
            source: io,
        })?;

        let mut info = RevvedFile {
            source: source.to_path_buf(),
            destination,
            match_pattern: pattern,
            deleted_revisions: Vec::new(),
        };

        if !self.options.clean_up() {
            return Ok(info);
        }

        info.deleted_revisions = self.clean_up_revisions(&info)?;
        Ok(info)
    }

    /// Find an existing revved copy whose captured digest equals `digest`.
    fn existing_destination(&self, pattern: &Regex, digest: &str) -> Result<Option<PathBuf>> {
        for entry in self.read_destination_dir()? {
            let (name, path) = entry;
            if let Some(captures) = captures_whole_name(pattern, &name)
                && captures
                    .get(1)
                    .is_some_and(|capture| capture.as_str() == digest)
            {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Delete superseded revisions beyond the retention count.
    ///
    /// Scans the destination directory for siblings matching the record's
    /// pattern, excluding the current destination, orders them newest first
    /// by revision id, and deletes everything past the retention count.
    fn clean_up_revisions(&self, info: &RevvedFile) -> Result<Vec<PathBuf>> {
        let mut candidates: Vec<(String, PathBuf)> = Vec::new();
        for (name, path) in self.read_destination_dir()? {
            if path == info.destination {
                continue;
            }

            if let Some(captures) = captures_whole_name(&info.match_pattern, &name)
                && let Some(id) = captures.get(2)
            {
                candidates.push((id.as_str().to_string(), path));
            }
        }

        // The leading digits of a UUIDv7's textual form are its millisecond
        // timestamp, so lexicographic order on the captured id is
        // chronological. Newest first.
        candidates.sort_by(|a, b| b.0.cmp(&a.0));

        let keep = self.options.revision_count() as usize;
        let mut deleted = Vec::new();
        for (_, path) in candidates.into_iter().skip(keep) {
            if !path.exists() {
                return Err(RevError::MissingExpectedFile(path));
            }

            fs::remove_file(&path).map_err(|io| RevError::Deletion {
                path: path.clone(),
                source: io,
            })?;
            deleted.push(path);
        }

        Ok(deleted)
    }

    /// List regular files in the destination directory as (UTF-8 name, path)
    /// pairs. Entries with non-UTF-8 names cannot match any pattern and are
    /// skipped.
    fn read_destination_dir(&self) -> Result<Vec<(String, PathBuf)>> {
        let dir = self.options.destination_directory();
        let entries = fs::read_dir(dir).map_err(|source| RevError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RevError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let file_type = entry.file_type().map_err(|source| RevError::Io {
                path: entry.path(),
                source,
            })?;
            if !file_type.is_file() {
                continue;
            }

            if let Some(name) = entry.file_name().to_str() {
                files.push((name.to_string(), entry.path()));
            }
        }

        Ok(files)
    }
}

/// Build the pattern recognizing revved filenames for one source basename.
///
/// The stem and extension are escaped for literal matching; the digest and
/// revision id are captured as groups 1 and 2. The pattern is deterministic
/// given only the basename, so it matches any revved sibling regardless of
/// content or age.
pub(crate) fn filename_match_pattern(file_name: &str) -> Result<Regex> {
    let (stem, extension) = split_name(file_name);
    let pattern = format!(
        "{}-([0-9a-f]{{{DIGEST_HEX_LEN}}})-({ID_PATTERN}){}",
        regex::escape(stem),
        regex::escape(&extension),
    );

    Regex::new(&pattern).map_err(|error| {
        RevError::Config(format!(
            "Failed to compile the match pattern for '{file_name}': {error}"
        ))
    })
}

/// Match a directory entry's name against a revved-filename pattern,
/// requiring the match to span the whole name.
///
/// The pattern itself is unanchored because the replacer applies it to
/// filenames embedded in running text. Directory scans must not treat a
/// `notempty-...` entry as a sibling of `empty.txt` just because it contains
/// an `empty-...` substring, so here the match has to cover the entire
/// filename.
fn captures_whole_name<'n>(pattern: &Regex, name: &'n str) -> Option<regex::Captures<'n>> {
    pattern
        .captures(name)
        .filter(|captures| {
            captures
                .get(0)
                .is_some_and(|whole| whole.start() == 0 && whole.end() == name.len())
        })
}

/// Split a basename into stem and dotted extension.
///
/// An extensionless name, or a dotfile like `.gitignore`, is treated as all
/// stem with an empty extension.
fn split_name(file_name: &str) -> (&str, String) {
    match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, format!(".{extension}")),
        _ => (file_name, String::new()),
    }
}

fn assert_readable_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(RevError::NotAFile(path.to_path_buf()));
    }

    fs::File::open(path)
        .map(drop)
        .map_err(|source| RevError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })
}
