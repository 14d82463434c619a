//! Error types for asset-rev.
//!
//! This module defines all error types used throughout asset-rev, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`RevError`]
//! - Each variant includes helpful error messages and diagnostic codes
//! - Errors surface immediately to the caller of the operation that raised
//!   them; there are no silent retries and no partial-success suppression
//! - Precondition failures are always raised before any mutating side effect
//!
//! A cleanup error is the one deliberate exception to "never partial": it
//! aborts `rev_file` even though the copy already succeeded, so callers must
//! read it as "new revision created, but the retention invariant may now be
//! violated" rather than as a rollback.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use asset_rev::error::{Result, RevError};
//!
//! fn check_source(path: &Path) -> Result<()> {
//!     if !path.is_file() {
//!         return Err(RevError::NotAFile(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in asset-rev operations
#[derive(Error, Debug, Diagnostic)]
pub enum RevError {
    /// A caller-supplied path does not reference a regular file.
    ///
    /// Raised for rev sources that are directories, sockets, or simply
    /// absent, and for replacement targets that are not regular files.
    /// Detected before any I/O side effect.
    #[error("The given argument is not a file: '{0}'")]
    #[diagnostic(
        code(asset_rev::input::not_a_file),
        help("Check that the path exists and refers to a regular file.")
    )]
    NotAFile(
        /// The path that is not a regular file
        PathBuf,
    ),

    /// A source file exists but could not be opened for reading.
    ///
    /// Typically a permissions problem. Checked up front so that a rev
    /// never gets partway through before discovering the source is
    /// inaccessible.
    #[error("The given file cannot be read: '{path}'")]
    #[diagnostic(
        code(asset_rev::input::unreadable),
        help("Ensure you have read permissions for the file.")
    )]
    UnreadableFile {
        /// The unreadable path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A replacement target exists but cannot be opened for writing.
    ///
    /// Checked before the target is read, so a read-only target is never
    /// read and then abandoned half-processed.
    #[error("The replacement target cannot be written to: '{path}'")]
    #[diagnostic(
        code(asset_rev::input::unwritable),
        help("Ensure you have write permissions for the file.")
    )]
    UnwritableFile {
        /// The unwritable path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A source path has no usable basename, or the basename is not UTF-8.
    ///
    /// Revved filenames embed the source's stem and extension literally,
    /// so both must be representable as UTF-8 text.
    #[error("Invalid file name for '{0}'")]
    #[diagnostic(
        code(asset_rev::input::invalid_file_name),
        help("Source file names must be valid UTF-8 and non-empty.")
    )]
    InvalidFileName(
        /// The path with the unusable name
        PathBuf,
    ),

    /// Failed to compute the content digest of a source file.
    ///
    /// Raised when the file cannot be memory-mapped or read mid-digest,
    /// e.g. because it was truncated or unlinked between the readability
    /// check and the hash pass.
    #[error("Failed to compute a content hash of the file at '{path}'")]
    #[diagnostic(code(asset_rev::hash::error))]
    Hash {
        /// The file being digested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Copying source bytes to the destination failed.
    #[error("Failed to copy '{from}' to '{to}'")]
    #[diagnostic(
        code(asset_rev::copy::error),
        help("Check free disk space and write permissions on the destination directory.")
    )]
    Copy {
        /// The source being copied
        from: PathBuf,
        /// The destination that could not be written
        to: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A file found by the cleanup scan vanished before it could be deleted.
    ///
    /// The directory listing and the filesystem disagree, which signals a
    /// consistency break (most likely a concurrent writer). Treated as
    /// fatal for the whole `rev_file` call rather than silently skipped.
    #[error("Expected the file at '{0}' to exist for deletion but it wasn't found")]
    #[diagnostic(
        code(asset_rev::cleanup::missing_file),
        help(
            "Another process may be modifying the destination directory. asset-rev assumes \
             single-process usage."
        )
    )]
    MissingExpectedFile(
        /// The path that disappeared between scan and delete
        PathBuf,
    ),

    /// Deleting a superseded revision failed.
    #[error("Failed to delete the old revision at '{path}'")]
    #[diagnostic(
        code(asset_rev::cleanup::delete_error),
        help("Ensure the file is not in use and you have write permissions for the directory.")
    )]
    Deletion {
        /// The revision that could not be deleted
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Generic read/write failure while rewriting a replacement target.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(asset_rev::io_error))]
    Io {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configured destination directory is not a directory.
    #[error("The destination directory is not a directory: '{0}'")]
    #[diagnostic(
        code(asset_rev::config::not_a_directory),
        help("Make sure the destination directory exists before revving into it.")
    )]
    NotADirectory(
        /// The path that is not a directory
        PathBuf,
    ),

    /// The configured destination directory cannot be written to.
    #[error("The destination directory cannot be written to: '{0}'")]
    #[diagnostic(
        code(asset_rev::config::unwritable_directory),
        help("Ensure you have write permissions for the destination directory.")
    )]
    UnwritableDirectory(
        /// The unwritable directory
        PathBuf,
    ),

    /// Invalid option value supplied to configuration.
    ///
    /// Raised for a non-numeric or negative retention count and for
    /// malformed glob patterns.
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(asset_rev::config::error),
        help("Check the supplied option values.")
    )]
    Config(
        /// Description of the configuration error
        String,
    ),
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, RevError>;
