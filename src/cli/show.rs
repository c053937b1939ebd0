//! Print the extracted metadata record without packaging.
//!
//! `show` runs only the extraction stage, so a metadata problem can be
//! inspected without touching the dist directory.
//!
//! ```bash
//! pkgmeta show cligen
//! pkgmeta show cligen --format json
//! ```

use anyhow::{Result, anyhow};
use clap::Args;
use std::path::PathBuf;

use crate::constants::INIT_MODULE;
use crate::metadata::MetadataExtractor;

/// Command to extract and print a package's metadata record.
#[derive(Args)]
pub struct ShowCommand {
    /// Name of the package to inspect
    package: String,

    /// Project root containing the package directory
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Output format (text, json)
    #[arg(short = 'f', long, default_value = "text")]
    format: String,
}

impl ShowCommand {
    /// Execute the show command.
    pub fn execute(self) -> Result<()> {
        let init_path = self.path.join(&self.package).join(INIT_MODULE);
        let record = MetadataExtractor::extract(&init_path)?;

        match self.format.as_str() {
            "text" => {
                println!("author: {}", record.author);
                println!("version: {}", record.version);
                println!("description: {}", record.description);
            }
            "json" => {
                println!("{}", serde_json::to_string_pretty(&record)?);
            }
            other => {
                return Err(anyhow!("Unknown output format: {other} (expected text or json)"));
            }
        }
        Ok(())
    }
}
