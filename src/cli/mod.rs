//! Command-line interface for pkgmeta.
//!
//! Each command is implemented as a separate module with its own argument
//! structure and execution logic, dispatched from the [`Cli`] root parser.
//!
//! # Available Commands
//!
//! - `build` - run the full pipeline: extract metadata from the package
//!   initializer, enumerate bundled data, discover sub-packages, assemble
//!   the package specification, and hand it to the packaging backend
//! - `show` - extract and print the metadata record without packaging
//!
//! # Usage
//!
//! ```bash
//! # Produce dist metadata for the package `cligen` in the current project
//! pkgmeta build cligen
//!
//! # Inspect the metadata record as JSON
//! pkgmeta show cligen --format json
//!
//! # Apply a logging configuration document to the whole run
//! pkgmeta --log-config logging.yml build cligen
//! ```
//!
//! # Global Options
//!
//! All commands support:
//! - `--verbose` - debug-level output
//! - `--quiet` - errors only
//! - `--log-config` - path to a YAML logging configuration document; when
//!   given, the document wins over the verbosity flags
//!
//! Logging is initialized exactly once, before the command executes; a
//! missing or invalid configuration document aborts the run before any
//! command logic runs.

mod build;
mod show;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::{self, LevelName};

/// Main CLI structure for pkgmeta.
///
/// Uses the `clap` derive API to generate parsing, help text, and
/// validation. Options marked `global = true` are available to all
/// subcommands.
#[derive(Parser)]
#[command(
    name = "pkgmeta",
    about = "Package metadata bootstrap - extract initializer metadata and produce dist metadata",
    version,
    author,
    long_about = "pkgmeta scans a package initializer module for metadata assignments without \
                  executing it, assembles the full package specification, and hands it to a \
                  packaging backend."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Path to a YAML logging configuration document
    #[arg(long, global = true, value_name = "FILE")]
    log_config: Option<PathBuf>,
}

/// Available pkgmeta commands.
#[derive(Subcommand)]
enum Commands {
    /// Extract metadata and hand the assembled package to the packaging backend
    Build(build::BuildCommand),

    /// Extract and print the metadata record without packaging
    Show(show::ShowCommand),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Applies the logging configuration first, then dispatches. Every
    /// failure propagates to the binary entry point for user-friendly
    /// rendering.
    pub fn execute(self) -> Result<()> {
        self.init_logging()?;

        match self.command {
            Commands::Build(cmd) => cmd.execute(),
            Commands::Show(cmd) => cmd.execute(),
        }
    }

    fn init_logging(&self) -> Result<()> {
        if let Some(path) = &self.log_config {
            return logging::init_from_file(path);
        }

        let level = if self.quiet {
            Some(LevelName::Error)
        } else if self.verbose {
            Some(LevelName::Debug)
        } else {
            None
        };
        logging::init_default(level)
    }
}
