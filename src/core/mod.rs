//! Core types for pkgmeta
//!
//! This module provides the foundation of pkgmeta's type system: the
//! strongly-typed error enumeration, the user-friendly error context used at
//! the CLI boundary, and the conversion entry point between the two.
//!
//! # Error First Design
//!
//! Every operation that can fail returns a [`Result`] with meaningful error
//! information. pkgmeta never catches and recovers: each failure propagates
//! to the caller, and the CLI renders it through [`user_friendly_error`]
//! before exiting non-zero. This matches the single-shot, build-time nature
//! of the work.

pub mod error;

pub use error::{ErrorContext, PkgmetaError, user_friendly_error};
