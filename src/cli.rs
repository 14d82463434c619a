//! Command-line interface definitions for asset-rev.
//!
//! This module defines the CLI structure using clap. asset-rev is a single
//! command, so there are no subcommands; [`Cli`] carries the full option
//! set, and [`CliBuilder`] offers programmatic construction for library and
//! test use.
//!
//! # Example
//!
//! ```no_run
//! use asset_rev::cli::Cli;
//!
//! let cli = Cli::parse_args();
//! println!("revving {} into {}", cli.source(), cli.target().display());
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::{Result, RevError};

/// Command-line interface for asset-rev.
///
/// Revs each file matched by `--source` into `--target`, then rewrites
/// references to it inside every file matched by the `--replace` globs.
#[derive(Debug, Parser)]
#[command(
    name = "asset-rev",
    bin_name = "asset-rev",
    author,
    version,
    about = "Rev file names and replace references to them in files",
    long_about = None
)]
pub struct Cli {
    /// A glob to match file names that will be revved
    #[arg(short, long, env = "ASSET_REV_SOURCE")]
    source: String,

    /// A target directory, where the revved copies will be placed
    #[arg(short, long, env = "ASSET_REV_TARGET")]
    target: PathBuf,

    /// Whether to delete old revisions or not
    #[arg(short, long, env = "ASSET_REV_DELETE")]
    delete: bool,

    /// The number of old revisions to keep. Defaults to none
    ///
    /// Accepted as free text so a non-numeric value is reported as a
    /// configuration error rather than a usage error.
    #[arg(
        short = 'c',
        long,
        default_value = "0",
        env = "ASSET_REV_REVISION_COUNT"
    )]
    revision_count: String,

    /// Replacement targets such as layout files, HTML files etc (glob)
    #[arg(short = 'r', long = "replace", env = "ASSET_REV_REPLACE")]
    replace: Vec<String>,

    /// Enable verbose output (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, env = "ASSET_REV_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors
    #[arg(short, long, conflicts_with = "verbose", env = "ASSET_REV_QUIET")]
    quiet: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Create a builder for programmatic construction.
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }

    /// The source glob.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The destination directory for revved copies.
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Whether old revisions are deleted.
    pub fn delete(&self) -> bool {
        self.delete
    }

    /// The retention count argument, as supplied.
    pub fn revision_count(&self) -> &str {
        &self.revision_count
    }

    /// The replacement-target globs.
    pub fn replace(&self) -> &[String] {
        &self.replace
    }

    /// The verbose level.
    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    /// Whether quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.quiet
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    source: Option<String>,
    target: Option<PathBuf>,
    delete: bool,
    revision_count: Option<String>,
    replace: Vec<String>,
    verbose: u8,
    quiet: bool,
}

impl CliBuilder {
    /// Set the source glob.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the destination directory.
    pub fn target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Enable or disable deletion of old revisions.
    pub fn delete(mut self, delete: bool) -> Self {
        self.delete = delete;
        self
    }

    /// Set the retention count argument.
    pub fn revision_count(mut self, count: impl Into<String>) -> Self {
        self.revision_count = Some(count.into());
        self
    }

    /// Add a replacement-target glob.
    pub fn replace(mut self, pattern: impl Into<String>) -> Self {
        self.replace.push(pattern.into());
        self
    }

    /// Set the verbose level.
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    /// Enable quiet mode.
    pub fn quiet(mut self, enabled: bool) -> Self {
        self.quiet = enabled;
        self
    }

    /// Build the Cli instance.
    ///
    /// # Errors
    ///
    /// Returns [`RevError::Config`] if the source glob or target directory
    /// was not set.
    pub fn build(self) -> Result<Cli> {
        let source = self
            .source
            .ok_or_else(|| RevError::Config("The source glob is required".to_string()))?;
        let target = self
            .target
            .ok_or_else(|| RevError::Config("The target directory is required".to_string()))?;

        Ok(Cli {
            source,
            target,
            delete: self.delete,
            revision_count: self.revision_count.unwrap_or_else(|| "0".to_string()),
            replace: self.replace,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "asset-rev",
            "--source",
            "assets/*.css",
            "--target",
            "public/assets",
        ]);
        assert_eq!(cli.source(), "assets/*.css");
        assert_eq!(cli.target(), Path::new("public/assets"));
        assert!(!cli.delete());
        assert_eq!(cli.revision_count(), "0");
        assert!(cli.replace().is_empty());
        assert_eq!(cli.verbose(), 0);
        assert!(!cli.quiet());
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from([
            "asset-rev",
            "-s",
            "*.js",
            "-t",
            "out",
            "-d",
            "-c",
            "3",
            "-r",
            "templates/*.html",
            "-r",
            "css/*.css",
        ]);
        assert_eq!(cli.source(), "*.js");
        assert_eq!(cli.target(), Path::new("out"));
        assert!(cli.delete());
        assert_eq!(cli.revision_count(), "3");
        assert_eq!(cli.replace(), ["templates/*.html", "css/*.css"]);
    }

    #[test]
    fn test_verbose_flag_is_counted() {
        let cli = Cli::parse_from(["asset-rev", "-s", "*.js", "-t", "out", "-vv"]);
        assert_eq!(cli.verbose(), 2);
    }

    #[test]
    fn test_non_numeric_revision_count_is_accepted_by_the_parser() {
        // Validation happens in the command layer so the exit code matches
        // the documented -1, not clap's usage-error code
        let cli = Cli::parse_from(["asset-rev", "-s", "*.js", "-t", "out", "-c", "lots"]);
        assert_eq!(cli.revision_count(), "lots");
    }

    #[test]
    fn test_cli_builder() {
        let cli = Cli::builder()
            .source("assets/*")
            .target("public")
            .delete(true)
            .revision_count("2")
            .replace("*.html")
            .verbose(1)
            .build()
            .expect("Failed to build CLI");

        assert_eq!(cli.source(), "assets/*");
        assert_eq!(cli.target(), Path::new("public"));
        assert!(cli.delete());
        assert_eq!(cli.revision_count(), "2");
        assert_eq!(cli.replace(), ["*.html"]);
        assert_eq!(cli.verbose(), 1);
    }

    #[test]
    fn test_cli_builder_requires_source_and_target() {
        let result = Cli::builder().target("public").build();
        assert!(result.is_err());

        let result = Cli::builder().source("assets/*").build();
        assert!(result.is_err());
    }
}
