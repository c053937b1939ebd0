//! pkgmeta - package metadata bootstrap
//!
//! A build tool for source trees following the initializer-module
//! convention: every package directory carries an `__init__.py`, and the
//! root package's initializer declares `__author__`, `__version__`, and
//! `__description__` as top-level string-literal assignments. pkgmeta
//! extracts that metadata **without executing any code**, assembles the
//! full package specification, and hands it to a packaging backend.
//!
//! # Architecture Overview
//!
//! Two independent utilities share this crate:
//! - the **metadata extractor** pipeline (build-time): initializer scan,
//!   bundled-data enumeration, sub-package discovery, specification
//!   assembly, packaging handoff
//! - the **logger factory** (process-wide): a YAML configuration document
//!   applied exactly once, plus named logger handles and the shared root
//!   handle
//!
//! The two never call each other and share no data; each runs to completion
//! or fails with a fatal error that propagates to the CLI boundary.
//!
//! # Core Modules
//!
//! - [`metadata`] - restricted literal scanning of initializer modules
//! - [`bundle`] - bundled-data enumeration into the package-data mapping
//! - [`discovery`] - recursive sub-package discovery
//! - [`packaging`] - package specification assembly and the backend seam
//! - [`logging`] - YAML-driven logging bootstrap and logger factory
//! - [`cli`] - command-line interface (`build`, `show`)
//! - [`core`] - error types and user-friendly error rendering
//! - [`constants`] - layout conventions and static packaging metadata
//!
//! # Example Layout
//!
//! ```text
//! project/
//!   README.md              # long description, verbatim
//!   cligen/
//!     __init__.py          # metadata source: scanned, never executed
//!     _data/               # bundled data files
//!       logging.yml
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Produce dist metadata under project/dist/
//! pkgmeta build cligen --path project
//!
//! # Inspect the metadata record
//! pkgmeta show cligen --path project --format json
//! ```

pub mod bundle;
pub mod cli;
pub mod constants;
pub mod core;
pub mod discovery;
pub mod logging;
pub mod metadata;
pub mod packaging;
