//! Bundled-data enumeration for the package-data mapping.
//!
//! Every direct entry of the package's `_data` directory becomes a bundled
//! data file. The resulting mapping uses a single empty-string group key
//! whose value is the sequence of paths relative to the project root, in
//! directory-listing order.

use anyhow::Result;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::DATA_DIR;
use crate::core::PkgmetaError;

/// Mapping from distribution group key to bundled file paths.
///
/// The flat `_data` layout produces exactly one group, keyed by the empty
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageDataMap(pub BTreeMap<String, Vec<PathBuf>>);

impl PackageDataMap {
    /// The bundled file paths of the default (empty-string) group.
    #[must_use]
    pub fn data_files(&self) -> &[PathBuf] {
        self.0.get("").map_or(&[], Vec::as_slice)
    }
}

/// Enumerate `<root>/<package>/_data` into a package-data mapping.
///
/// Paths in the mapping are relative to the project root
/// (`<package>/_data/<entry>`). Only direct entries are listed; the data
/// directory is flat by convention.
///
/// # Errors
///
/// Fails with [`PkgmetaError::DataDirMissing`] when the directory does not
/// exist - the build cannot proceed without bundled data.
pub fn enumerate(root: &Path, package: &str) -> Result<PackageDataMap> {
    let dir = root.join(package).join(DATA_DIR);
    if !dir.is_dir() {
        return Err(PkgmetaError::DataDirMissing {
            path: dir.display().to_string(),
        }
        .into());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        files.push(Path::new(package).join(DATA_DIR).join(entry.file_name()));
    }

    let mut map = BTreeMap::new();
    map.insert(String::new(), files);
    Ok(PackageDataMap(map))
}
