//! pkgmeta CLI entry point
//!
//! This is the executable for the package metadata bootstrap tool. It
//! handles command-line argument parsing, error display, and command
//! execution:
//! - `build` - extract metadata and produce dist metadata via the packaging backend
//! - `show` - extract and print the metadata record

use anyhow::Result;
use clap::Parser;
use pkgmeta::cli;
use pkgmeta::core::error::user_friendly_error;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    // Execute the command
    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
