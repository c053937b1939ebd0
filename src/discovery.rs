//! Recursive sub-package discovery.
//!
//! A directory is a package when it contains an initializer module. Walking
//! the project root yields every such directory as a dotted package name
//! (`pkg`, `pkg.sub`), sorted for deterministic output.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::WalkDir;

use crate::constants::INIT_MODULE;

/// Discover packages under `root`.
///
/// Hidden directories and their contents are skipped. Names are dotted
/// paths relative to `root`, sorted lexicographically; duplicates cannot
/// occur because each package maps to exactly one directory.
pub fn find_packages(root: &Path) -> Result<Vec<String>> {
    let mut packages = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        !(e.file_type().is_dir() && e.file_name().to_string_lossy().starts_with('.'))
    });

    for entry in walker {
        let entry =
            entry.with_context(|| format!("Failed to walk directory {}", root.display()))?;
        if !entry.file_type().is_dir() || entry.depth() == 0 {
            continue;
        }
        if !entry.path().join(INIT_MODULE).is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("Walked entry escaped root {}", root.display()))?;
        let name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(".");
        packages.push(name);
    }

    packages.sort();
    Ok(packages)
}
