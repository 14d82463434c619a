//! Command execution for asset-rev.
//!
//! [`execute`] drives the whole run: it validates options, expands the
//! source and replacement globs, revs each source file in order, and
//! rewrites references in the replacement targets. Sources are processed
//! strictly sequentially; the only state shared between the revving engine
//! and the replacer is the [`RevvedFile`] record passed by value.
//!
//! # Exit codes
//!
//! - `0`: success, including a source glob that matched nothing (reported
//!   as a warning)
//! - `255`: option validation failed (bad retention count, invalid glob,
//!   missing or unwritable destination directory)
//! - revving or replacement failures after validation propagate as errors
//!   and exit through the miette handler

use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Result, RevError};
use crate::logging::Logger;
use crate::options::RevverOptions;
use crate::replacer;
use crate::revver::{RevvedFile, Revver};

/// Exit code for configuration failures, the unsigned form of -1.
const CONFIG_FAILURE: u8 = 255;

/// Execute a full rev-and-replace run from parsed CLI arguments.
///
/// Returns the process exit code: `0` on success, `255` (the unsigned form
/// of -1) when option validation fails.
///
/// # Errors
///
/// Configuration problems are reported on stderr and mapped to the exit
/// code rather than returned. Errors raised while revving or replacing
/// propagate to the caller.
pub fn execute(cli: &Cli) -> Result<u8> {
    let quiet = cli.quiet();
    let verbose = if quiet { 0 } else { cli.verbose() };
    let log = Logger::new(verbose, quiet);

    let (options, targets) = match validate(cli) {
        Ok(validated) => validated,
        Err(error) => {
            log.error(format!("Invalid option: {error}"));
            return Ok(CONFIG_FAILURE);
        }
    };

    let sources = expand_glob(cli.source())?;
    if sources.is_empty() {
        log.warn(format!(
            "The --source|-s argument {} yielded no source files to process",
            cli.source()
        ));
        return Ok(0);
    }

    let revver = Revver::new(options);
    for source in &sources {
        let revved = revver.rev_file(source)?;
        log.verbose(
            1,
            format!(
                "File {} copied as {}. {} old revisions removed",
                revved.source().display(),
                revved.destination().display(),
                revved.deleted_revisions().len()
            ),
        );

        replace_in_targets(&targets, &revved, &log)?;
    }

    Ok(0)
}

/// Build validated revver options and expand the replacement-target globs.
fn validate(cli: &Cli) -> Result<(RevverOptions, Vec<PathBuf>)> {
    let revision_count: u32 = cli.revision_count().parse().map_err(|_| {
        RevError::Config(format!(
            "The revision count argument must be a number, received '{}'",
            cli.revision_count()
        ))
    })?;

    let options = RevverOptions::builder()
        .destination_directory(cli.target())
        .clean_up(cli.delete())
        .revision_count(revision_count)
        .build()?;

    // Validating the source glob here too keeps all pattern errors on the
    // configuration exit path
    glob::Pattern::new(cli.source())
        .map_err(|error| RevError::Config(format!("Invalid source glob: {error}")))?;

    let mut targets = Vec::new();
    for pattern in cli.replace() {
        targets.extend(expand_glob(pattern)?);
    }

    Ok((options, targets))
}

/// Expand a glob pattern into matched paths.
fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let matches = glob::glob(pattern)
        .map_err(|error| RevError::Config(format!("Invalid glob '{pattern}': {error}")))?;

    let mut paths = Vec::new();
    for entry in matches {
        let path = entry.map_err(|error| RevError::Io {
            path: PathBuf::from(pattern),
            source: error.into_error(),
        })?;
        paths.push(path);
    }

    Ok(paths)
}

/// Rewrite references to one revved file across all replacement targets.
fn replace_in_targets(targets: &[PathBuf], info: &RevvedFile, log: &Logger) -> Result<()> {
    if targets.is_empty() {
        return Ok(());
    }

    let mut count = 0;
    for target in targets {
        count += replacer::replace_in_file(target, info)?;
    }

    log.verbose(
        1,
        format!(
            "Replaced {} references to {} within {} target files",
            count,
            info.source().display(),
            targets.len()
        ),
    );

    Ok(())
}
