//! Error handling for pkgmeta
//!
//! This module provides the error types and user-friendly error reporting for
//! the pkgmeta build tool. The error system is designed around two core
//! principles:
//! 1. **Strongly-typed errors** for precise error handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! The error system consists of two main types:
//! - [`PkgmetaError`] - Enumerated error types for all failure cases
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! # Error Categories
//!
//! - **Metadata extraction**: [`PkgmetaError::InitializerNotFound`],
//!   [`PkgmetaError::MetadataFieldMissing`], [`PkgmetaError::MetadataNotLiteral`]
//! - **Bundled data**: [`PkgmetaError::DataDirMissing`]
//! - **Long description**: [`PkgmetaError::ReadmeNotFound`]
//! - **Packaging backend**: [`PkgmetaError::PackagingFailed`]
//! - **Logging configuration**: [`PkgmetaError::LogConfigError`]
//!
//! Every failure is fatal: nothing in pkgmeta retries or recovers, so each
//! variant propagates to the CLI boundary, where [`user_friendly_error`]
//! renders it with context before the process exits non-zero.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for pkgmeta operations
///
/// Each variant represents a specific failure mode in the build or logging
/// bootstrap pipeline. Variants carry the details needed to render an
/// actionable message (file paths, identifier names, reasons).
#[derive(Error, Debug, Clone)]
pub enum PkgmetaError {
    /// The package initializer module does not exist
    ///
    /// The initializer is the metadata source; without it there is nothing
    /// to scan and the build cannot proceed.
    #[error("Initializer module not found: {path}")]
    InitializerNotFound {
        /// Path where the initializer was expected
        path: String,
    },

    /// The initializer could not be read or decoded as text
    #[error("Failed to read initializer {file}: {reason}")]
    InitializerUnreadable {
        /// Path to the initializer
        file: String,
        /// The underlying I/O or decoding failure
        reason: String,
    },

    /// A required metadata identifier was never assigned in the initializer
    ///
    /// All of `__author__`, `__version__`, and `__description__` must be
    /// assigned at the top level; a partial record is never returned.
    #[error("Metadata identifier '{name}' is not assigned in {file}")]
    MetadataFieldMissing {
        /// The reserved identifier that was not found
        name: String,
        /// Path to the scanned initializer
        file: String,
    },

    /// A matched metadata identifier was assigned a non-literal value
    #[error("Metadata identifier '{name}' is not assigned a string literal (found {found})")]
    MetadataNotLiteral {
        /// The reserved identifier whose assignment was rejected
        name: String,
        /// Short description of the rejected value form
        found: String,
    },

    /// The bundled-data directory does not exist
    #[error("Bundled data directory not found: {path}")]
    DataDirMissing {
        /// Path where the `_data` directory was expected
        path: String,
    },

    /// The long-description document does not exist at the project root
    #[error("Long-description file not found: {path}")]
    ReadmeNotFound {
        /// Path where README.md was expected
        path: String,
    },

    /// The packaging backend rejected the assembled package specification
    #[error("Packaging failed: {reason}")]
    PackagingFailed {
        /// Reason reported by the backend
        reason: String,
    },

    /// The logging configuration document is missing, malformed, or invalid
    #[error("Invalid logging configuration in {file}: {reason}")]
    LogConfigError {
        /// Path (or origin) of the configuration document
        file: String,
        /// Specific reason the document was rejected
        reason: String,
    },

    /// General file system error
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read", "write", "enumerate")
        operation: String,
        /// Path involved in the failed operation
        path: String,
    },

    /// Insufficient permissions for a file operation
    #[error("Permission denied: cannot {operation} {path}")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// Path involved in the denied operation
        path: String,
    },

    /// Generic error with a plain message
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// Rich error context for user-friendly CLI error display
///
/// `ErrorContext` wraps a [`PkgmetaError`] and adds optional suggestions for
/// resolution and additional details. This is the primary way pkgmeta
/// presents errors to CLI users.
///
/// # Display Format
///
/// When displayed, errors show:
/// 1. **Error**: the main error message in red
/// 2. **Details**: additional context in yellow (optional)
/// 3. **Suggestion**: actionable steps in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying pkgmeta error
    pub error: PkgmetaError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context from a [`PkgmetaError`]
    #[must_use]
    pub const fn new(error: PkgmetaError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    ///
    /// Suggestions should be actionable steps the user can take. They are
    /// displayed in green to draw attention.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    ///
    /// Details provide context about why the error occurred. They are
    /// displayed in yellow, less prominent than the error or suggestion.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// Prints the error, details, and suggestion to stderr using color
    /// coding: the error message red and bold, details yellow, suggestion
    /// green. This is how the CLI presents every fatal error.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// This function is the single entry point for converting arbitrary errors
/// into user-friendly messages for CLI display. It recognizes common error
/// types and provides appropriate context:
/// - [`PkgmetaError`] variants with tailored suggestions
/// - [`std::io::Error`] with filesystem-specific guidance
/// - [`serde_yaml::Error`] with YAML syntax help
/// - Generic errors with their full cause chain
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(pkgmeta_error) = error.downcast_ref::<PkgmetaError>() {
        return create_error_context(pkgmeta_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PkgmetaError::PermissionDenied {
                    operation: "access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership, or re-run with sufficient permissions")
                .with_details("pkgmeta does not have permission to read or write a file");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PkgmetaError::FileSystemError {
                    operation: "access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details("A required file or directory could not be found");
            }
            _ => {}
        }
    }

    if let Some(yaml_error) = error.downcast_ref::<serde_yaml::Error>() {
        return ErrorContext::new(PkgmetaError::LogConfigError {
            file: "logging configuration".to_string(),
            reason: yaml_error.to_string(),
        })
        .with_suggestion(
            "Check the YAML syntax of the logging configuration. Verify indentation and quoting",
        )
        .with_details("The logging configuration document could not be parsed as YAML");
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PkgmetaError::Other { message })
}

/// Create an [`ErrorContext`] with suggestions for specific pkgmeta errors
///
/// Maps each [`PkgmetaError`] variant to an appropriate context with tailored
/// suggestions and details. Used by [`user_friendly_error`] to keep messages
/// consistent across commands.
fn create_error_context(error: PkgmetaError) -> ErrorContext {
    match &error {
        PkgmetaError::InitializerNotFound { path } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Create {path} with `__author__`, `__version__`, and `__description__` assigned as string literals"
                ))
                .with_details("The initializer module is the metadata source for the build")
        }

        PkgmetaError::MetadataFieldMissing { name, file } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Add a top-level assignment like {name} = \"...\" to {file}"
                ))
                .with_details(
                    "All of __author__, __version__, and __description__ must be assigned; \
                     a partial metadata record is never used",
                )
        }

        PkgmetaError::MetadataNotLiteral { name, .. } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Assign {name} a plain quoted string; expressions, calls, and concatenation are not scanned"
                ))
                .with_details(
                    "Metadata values are extracted without executing the initializer, \
                     so only literal strings can be read",
                )
        }

        PkgmetaError::DataDirMissing { path } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!("Create the directory {path} and place bundled data files in it"))
                .with_details("The build cannot proceed without the bundled-data directory")
        }

        PkgmetaError::ReadmeNotFound { path } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!("Create {path}; its content is used verbatim as the long description"))
        }

        PkgmetaError::LogConfigError { file, .. } => {
            ErrorContext::new(error.clone())
                .with_suggestion(format!(
                    "Check {file} against the expected schema: version, formatters, handlers, loggers, root"
                ))
                .with_details("No logger can be produced from an invalid configuration document")
        }

        _ => ErrorContext::new(error.clone()),
    }
}
