//! Fixed names and static packaging metadata used throughout pkgmeta.
//!
//! This module contains the layout conventions (initializer file name, data
//! directory name) and the static metadata attached to every generated
//! distribution. Defining them centrally keeps the fixed relative locations
//! the extractor depends on discoverable in one place.

/// File name of a package initializer module.
///
/// The root package's initializer is the metadata source; any directory
/// containing a file with this name is treated as a package during
/// sub-package discovery.
pub const INIT_MODULE: &str = "__init__.py";

/// Name of the bundled-data subdirectory inside a package.
///
/// Every direct entry of this directory becomes a bundled data file in the
/// package-data mapping. The directory must exist at build time.
pub const DATA_DIR: &str = "_data";

/// File name of the long-description document at the project root.
pub const README_FILE: &str = "README.md";

/// Reserved identifiers scanned from the initializer, in record order.
///
/// All three must be assigned a string literal at the top level of the
/// initializer; a missing identifier or a non-literal value aborts the
/// build.
pub const METADATA_IDENTIFIERS: [&str; 3] = ["__author__", "__version__", "__description__"];

/// Logger name used when the factory is called without a name.
pub const ROOT_LOGGER: &str = "root";

/// License identifier recorded in generated dist metadata.
pub const LICENSE: &str = "MIT";

/// License file shipped alongside the distribution.
pub const LICENSE_FILE: &str = "LICENSE-MIT";

/// Static trove classifiers attached to every distribution.
pub const CLASSIFIERS: &[&str] = &[
    "Development Status :: 3 - Alpha",
    "Environment :: Console",
    "Intended Audience :: Developers",
    "License :: OSI Approved :: MIT License",
    "Natural Language :: English",
    "Operating System :: OS Independent",
    "Topic :: Software Development",
    "Topic :: Software Development :: Build Tools",
];

/// Console entry scripts declared for a package.
///
/// The package's own top-level module script is the sole declared entry
/// point.
pub fn console_scripts(package: &str) -> Vec<String> {
    vec![format!("{package}.py")]
}
