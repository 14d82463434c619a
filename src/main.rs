//! # asset-rev CLI
//!
//! The command-line interface for asset-rev, a build-time tool that copies
//! assets under content-hashed names ("revving") and rewrites references to
//! them in templates, stylesheets, and manifests.
//!
//! ## Usage
//!
//! ```bash
//! # Rev every CSS file into public/assets and update the layouts
//! asset-rev --source 'assets/*.css' --target public/assets \
//!     --replace 'templates/*.html'
//!
//! # Keep only the two most recent old revisions per file
//! asset-rev -s 'assets/*' -t public/assets -d -c 2 -r 'templates/*.html'
//! ```
//!
//! ## Environment Variables
//!
//! - `ASSET_REV_SOURCE`: source glob
//! - `ASSET_REV_TARGET`: destination directory
//! - `ASSET_REV_DELETE`: delete old revisions
//! - `ASSET_REV_REVISION_COUNT`: retention count
//! - `ASSET_REV_REPLACE`: replacement-target glob
//! - `ASSET_REV_VERBOSE`: enable verbose output
//! - `ASSET_REV_QUIET`: silence all output except errors

use std::io::IsTerminal;
use std::process::ExitCode;

use asset_rev::cli::Cli;

fn main() -> miette::Result<ExitCode> {
    // Install miette's fancy panic and error report handler
    miette::set_panic_hook();

    // Configure miette handler based on terminal capabilities
    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        // Use a simpler handler for non-TTY environments (CI, logs, etc.)
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse_args();

    asset_rev::commands::execute(&cli)
        .map(ExitCode::from)
        .map_err(Into::into)
}
