//! Package specification assembly and the packaging backend seam.
//!
//! The build pipeline ends here: the extracted metadata record, the long
//! description, the discovered packages, and the package-data mapping are
//! assembled into a [`PackageSpec`] and handed to a [`Packager`]. The
//! backend owns success or failure of the packaging step; the pipeline lets
//! its errors propagate without interpretation.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::bundle::{self, PackageDataMap};
use crate::constants::{self, CLASSIFIERS, INIT_MODULE, LICENSE, LICENSE_FILE, README_FILE};
use crate::core::PkgmetaError;
use crate::discovery;
use crate::metadata::MetadataExtractor;

/// Contact fields declared at invocation time.
///
/// These accompany the extracted metadata in the dist document but are not
/// scanned from the initializer.
#[derive(Debug, Clone, Default)]
pub struct Contact {
    /// Address recorded as the author email.
    pub author_email: Option<String>,
    /// Project homepage URL.
    pub homepage: Option<String>,
}

/// The full package specification handed to the packaging backend.
///
/// Combines the extracted metadata record with the static metadata every
/// distribution carries: classifiers, license identifiers, discovered
/// packages, declared entry scripts, and the package-data mapping.
#[derive(Debug, Clone, Serialize)]
pub struct PackageSpec {
    /// Distribution name (the root package name).
    pub name: String,
    /// Extracted `__author__` value.
    pub author: String,
    /// Contact address, when declared at invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    /// Extracted `__version__` value.
    pub version: String,
    /// Extracted `__description__` value.
    pub description: String,
    /// Project homepage, when declared at invocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// `README.md` content, verbatim.
    pub long_description: String,
    /// License identifier.
    pub license: String,
    /// License file shipped with the distribution.
    pub license_file: String,
    /// Static trove classifiers.
    pub classifiers: Vec<String>,
    /// Discovered packages, dotted and sorted.
    pub packages: Vec<String>,
    /// Declared console entry scripts.
    pub scripts: Vec<String>,
    /// Bundled data files, grouped under the empty-string key.
    pub package_data: PackageDataMap,
}

impl PackageSpec {
    /// Assemble the specification for `package` under the project `root`.
    ///
    /// Runs the whole extraction pipeline: scans the initializer for the
    /// metadata record, reads `README.md` verbatim as the long description,
    /// enumerates the bundled-data directory, and discovers sub-packages.
    /// Any failing stage aborts assembly.
    pub fn assemble(root: &Path, package: &str, contact: Contact) -> Result<Self> {
        let init_path = root.join(package).join(INIT_MODULE);
        let record = MetadataExtractor::extract(&init_path)?;
        tracing::debug!(
            package,
            version = %record.version,
            "extracted metadata record"
        );

        let readme_path = root.join(README_FILE);
        let long_description =
            fs::read_to_string(&readme_path).map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => PkgmetaError::ReadmeNotFound {
                    path: readme_path.display().to_string(),
                },
                _ => PkgmetaError::FileSystemError {
                    operation: "read".to_string(),
                    path: readme_path.display().to_string(),
                },
            })?;

        let package_data = bundle::enumerate(root, package)?;
        let packages = discovery::find_packages(root)?;
        tracing::debug!(
            packages = packages.len(),
            data_files = package_data.data_files().len(),
            "discovered package layout"
        );

        Ok(Self {
            name: package.to_string(),
            author: record.author,
            author_email: contact.author_email,
            version: record.version,
            description: record.description,
            homepage: contact.homepage,
            long_description,
            license: LICENSE.to_string(),
            license_file: LICENSE_FILE.to_string(),
            classifiers: CLASSIFIERS.iter().map(ToString::to_string).collect(),
            packages,
            scripts: constants::console_scripts(package),
            package_data,
        })
    }
}

/// Packaging backend invoked with the assembled specification.
///
/// The trait is the seam between assembly and artifact production, so the
/// pipeline can be exercised against any backend in tests.
pub trait Packager {
    /// Produce distribution artifacts for `spec`.
    fn package(&self, spec: &PackageSpec) -> Result<()>;
}

/// Default packaging backend.
///
/// Renders the specification to a TOML metadata document
/// (`<name>-<version>.dist.toml`) and writes the bundled-file record
/// (`<name>-<version>.files`, newline-delimited) next to it in the dist
/// directory.
pub struct DistWriter {
    dist_dir: PathBuf,
}

impl DistWriter {
    /// Create a backend writing into `dist_dir`.
    pub fn new(dist_dir: impl Into<PathBuf>) -> Self {
        Self {
            dist_dir: dist_dir.into(),
        }
    }

    fn stem(spec: &PackageSpec) -> String {
        format!("{}-{}", spec.name, spec.version)
    }

    /// Path of the metadata document for `spec`.
    #[must_use]
    pub fn metadata_path(&self, spec: &PackageSpec) -> PathBuf {
        self.dist_dir.join(format!("{}.dist.toml", Self::stem(spec)))
    }

    /// Path of the bundled-file record for `spec`.
    #[must_use]
    pub fn record_path(&self, spec: &PackageSpec) -> PathBuf {
        self.dist_dir.join(format!("{}.files", Self::stem(spec)))
    }
}

impl Packager for DistWriter {
    fn package(&self, spec: &PackageSpec) -> Result<()> {
        fs::create_dir_all(&self.dist_dir).map_err(|e| PkgmetaError::PackagingFailed {
            reason: format!("cannot create {}: {e}", self.dist_dir.display()),
        })?;

        let document = toml::to_string_pretty(spec).map_err(|e| PkgmetaError::PackagingFailed {
            reason: format!("cannot render dist metadata: {e}"),
        })?;
        let metadata_path = self.metadata_path(spec);
        fs::write(&metadata_path, document)
            .with_context(|| format!("Failed to write {}", metadata_path.display()))?;

        let mut record = String::new();
        for path in spec.package_data.data_files() {
            record.push_str(&path.to_string_lossy());
            record.push('\n');
        }
        let record_path = self.record_path(spec);
        fs::write(&record_path, record)
            .with_context(|| format!("Failed to write {}", record_path.display()))?;

        tracing::info!(
            package = %spec.name,
            version = %spec.version,
            dist = %self.dist_dir.display(),
            "wrote dist metadata"
        );
        Ok(())
    }
}
