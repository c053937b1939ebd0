//! Run the full build pipeline and hand off to the packaging backend.
//!
//! `build` scans the package initializer for the metadata record, reads
//! `README.md` as the long description, enumerates the bundled-data
//! directory, discovers sub-packages, and passes the assembled package
//! specification to the packaging backend. Whether packaging succeeds is
//! entirely the backend's call; the command only relays its result.
//!
//! ```bash
//! pkgmeta build cligen
//! pkgmeta build cligen --path ./checkout --dist out
//! pkgmeta build cligen --homepage https://example.com/cligen
//! ```

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::packaging::{Contact, DistWriter, PackageSpec, Packager};

/// Command to build dist metadata for a package.
#[derive(Args)]
pub struct BuildCommand {
    /// Name of the package to build
    package: String,

    /// Project root containing the package directory and README.md
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Output directory for dist metadata, relative to the project root
    #[arg(long, default_value = "dist")]
    dist: PathBuf,

    /// Contact address recorded as the author email
    #[arg(long, value_name = "ADDRESS")]
    author_email: Option<String>,

    /// Project homepage recorded in the dist metadata
    #[arg(long, value_name = "URL")]
    homepage: Option<String>,
}

impl BuildCommand {
    /// Execute the build command.
    pub fn execute(self) -> Result<()> {
        let contact = Contact {
            author_email: self.author_email,
            homepage: self.homepage,
        };
        let spec = PackageSpec::assemble(&self.path, &self.package, contact)?;

        let dist_dir = if self.dist.is_absolute() {
            self.dist
        } else {
            self.path.join(self.dist)
        };
        let writer = DistWriter::new(dist_dir);
        writer.package(&spec)?;

        println!(
            "{} {} {} ({} packages, {} data files)",
            "Packaged".green().bold(),
            spec.name,
            spec.version,
            spec.packages.len(),
            spec.package_data.data_files().len()
        );
        Ok(())
    }
}
