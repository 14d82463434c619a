//! # asset-rev
//!
//! A build-time asset fingerprinting tool: each source file is copied into
//! a destination directory under a content-derived name ("revving"), older
//! revisions beyond a retention count are optionally pruned, and references
//! to the original filename inside templates, stylesheets, and manifests
//! are rewritten to point at the new revved name.
//!
//! ## How revving works
//!
//! A revved copy is named `stem-<digest>-<id>.ext`, where `<digest>` is the
//! BLAKE3 hash of the file's bytes and `<id>` is a time-ordered UUIDv7.
//! Because the digest is content-derived, unchanged content maps to an
//! existing copy (revving is idempotent) and changed content always gets a
//! fresh name that downstream caches can treat as immutable. The filename
//! encodes everything: the destination directory is self-describing, with
//! no sidecar index to keep in sync.
//!
//! ## Architecture
//!
//! - [`revver`]: the revving engine — hashing, naming, existing-revision
//!   detection, retention cleanup
//! - [`replacer`]: reference rewriting inside arbitrary text files
//! - [`options`]: validated engine configuration
//! - [`cli`]: command-line interface definitions using clap
//! - [`commands`]: the rev-and-replace run driving both components
//! - [`error`]: error types and handling with thiserror + miette
//!
//! Internal modules (not part of the public API):
//! - `hashing`: BLAKE3-based content digests
//! - `logging`: verbosity-aware console output
//!
//! ## Library Usage
//!
//! The engine and replacer are usable without the CLI:
//!
//! ```no_run
//! use asset_rev::options::RevverOptions;
//! use asset_rev::replacer;
//! use asset_rev::revver::Revver;
//!
//! let options = RevverOptions::builder()
//!     .destination_directory("public/assets")
//!     .clean_up(true)
//!     .revision_count(2)
//!     .build()?;
//!
//! let revver = Revver::new(options);
//! let revved = revver.rev_file("assets/app.css")?;
//! let replaced = replacer::replace_in_file("templates/layout.html", &revved)?;
//! println!(
//!     "{} now references {} ({} substitutions)",
//!     "templates/layout.html",
//!     revved.destination().display(),
//!     replaced
//! );
//! # Ok::<(), asset_rev::error::RevError>(())
//! ```
//!
//! ## Concurrency
//!
//! Everything is single-threaded, synchronous, blocking I/O. The engine
//! assumes single-process usage (a build step run once): two processes
//! revving into the same directory can race on destination names or delete
//! each other's revisions during cleanup. No locking is implemented.

// Re-export public modules for library usage
pub mod cli;
pub mod commands;
pub mod error;
pub mod options;
pub mod replacer;
pub mod revver;

// Internal modules
mod hashing;
mod logging;
