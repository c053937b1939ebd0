//! Build-time metadata extraction from package initializer modules.
//!
//! This module handles the extraction of the three-field metadata record
//! (author, version, description) from a package initializer. The
//! initializer is read as text and handed to the restricted literal scanner
//! in [`scanner`]; the file is never executed, so arbitrary code in it
//! cannot run at build time.

pub mod scanner;

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::constants::METADATA_IDENTIFIERS;
use crate::core::PkgmetaError;

pub use scanner::LiteralAssignment;

/// The metadata record extracted from a package initializer.
///
/// An ordered triple of free-text strings, each sourced from exactly one
/// top-level assignment in the scanned file. The record is only ever
/// constructed complete: a missing identifier or a non-literal value aborts
/// extraction instead of producing a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetadataRecord {
    /// Value assigned to `__author__`.
    pub author: String,
    /// Value assigned to `__version__`.
    pub version: String,
    /// Value assigned to `__description__`.
    pub description: String,
}

impl MetadataRecord {
    /// The record as an ordered triple, in identifier order.
    #[must_use]
    pub fn as_tuple(&self) -> (&str, &str, &str) {
        (&self.author, &self.version, &self.description)
    }
}

/// Metadata extractor for package initializer modules.
///
/// Reads the initializer as text, scans its top-level statements for the
/// reserved identifiers, and assembles the [`MetadataRecord`].
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract the metadata record from the initializer at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file does not exist, cannot be read as text, does not
    /// assign all three reserved identifiers at the top level, or assigns
    /// one of them a non-literal value.
    pub fn extract(path: &Path) -> Result<MetadataRecord> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PkgmetaError::InitializerNotFound {
                path: path.display().to_string(),
            },
            _ => PkgmetaError::InitializerUnreadable {
                file: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        Self::extract_from_str(&content, &path.display().to_string())
    }

    /// Extract the metadata record from initializer `content`.
    ///
    /// `origin` names the source in error messages. When an identifier is
    /// assigned more than once, the last top-level assignment wins.
    pub fn extract_from_str(content: &str, origin: &str) -> Result<MetadataRecord> {
        let assignments = scanner::scan(content, &METADATA_IDENTIFIERS)?;

        let value_of = |name: &str| -> Result<String> {
            assignments
                .iter()
                .rev()
                .find(|a| a.name == name)
                .map(|a| a.value.clone())
                .ok_or_else(|| {
                    PkgmetaError::MetadataFieldMissing {
                        name: name.to_string(),
                        file: origin.to_string(),
                    }
                    .into()
                })
        };

        let [author, version, description] = METADATA_IDENTIFIERS;
        Ok(MetadataRecord {
            author: value_of(author)?,
            version: value_of(version)?,
            description: value_of(description)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_complete_record() {
        let content = r#"
__author__ = "A"
__version__ = "1.0"
__description__ = "D"
"#;
        let record = MetadataExtractor::extract_from_str(content, "test").unwrap();
        assert_eq!(record.as_tuple(), ("A", "1.0", "D"));
    }

    #[test]
    fn test_extract_order_independent_of_source_order() {
        let content = r#"
__description__ = "D"
__author__ = "A"
__version__ = "1.0"
"#;
        let record = MetadataExtractor::extract_from_str(content, "test").unwrap();
        assert_eq!(record.as_tuple(), ("A", "1.0", "D"));
    }

    #[test]
    fn test_extract_fails_on_missing_identifier() {
        let content = "__author__ = \"A\"\n__version__ = \"1.0\"\n";
        let err = MetadataExtractor::extract_from_str(content, "test").unwrap_err();
        let err = err.downcast_ref::<PkgmetaError>().unwrap();
        assert!(matches!(
            err,
            PkgmetaError::MetadataFieldMissing { name, .. } if name == "__description__"
        ));
    }

    #[test]
    fn test_extract_fails_on_non_literal() {
        let content = "__author__ = \"A\"\n__version__ = version()\n__description__ = \"D\"\n";
        let err = MetadataExtractor::extract_from_str(content, "test").unwrap_err();
        assert!(err.to_string().contains("__version__"));
    }

    #[test]
    fn test_extract_last_assignment_wins() {
        let content = r#"
__author__ = "first"
__version__ = "1.0"
__description__ = "D"
__author__ = "second"
"#;
        let record = MetadataExtractor::extract_from_str(content, "test").unwrap();
        assert_eq!(record.author, "second");
    }

    #[test]
    fn test_extract_missing_file() {
        let err = MetadataExtractor::extract(Path::new("/nonexistent/__init__.py")).unwrap_err();
        let err = err.downcast_ref::<PkgmetaError>().unwrap();
        assert!(matches!(err, PkgmetaError::InitializerNotFound { .. }));
    }

    #[test]
    fn test_extract_from_file() {
        use std::io::Write as _;

        let temp = tempfile::tempdir().unwrap();
        let init = temp.path().join("__init__.py");
        let mut f = fs::File::create(&init).unwrap();
        writeln!(f, "__author__ = 'A'").unwrap();
        writeln!(f, "__version__ = '2.0rc3'").unwrap();
        writeln!(f, "__description__ = 'generator for command-line interfaces'").unwrap();

        let record = MetadataExtractor::extract(&init).unwrap();
        assert_eq!(record.version, "2.0rc3");
    }
}
