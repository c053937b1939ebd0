//! Shared fixtures for pkgmeta integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use pkgmeta::constants::{DATA_DIR, INIT_MODULE, README_FILE};

/// A temporary project tree driven through the pkgmeta binary.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    /// An empty project root.
    #[allow(dead_code)]
    pub fn empty() -> Self {
        Self {
            temp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// A complete, valid project for `package`: initializer with all three
    /// metadata assignments, README, bundled data, and one sub-package.
    pub fn with_package(package: &str) -> Self {
        let project = Self {
            temp: TempDir::new().expect("failed to create temp dir"),
        };

        project.write(
            &format!("{package}/{INIT_MODULE}"),
            "__author__ = \"Ada Lovelace\"\n\
             __version__ = \"2.0rc3\"\n\
             __description__ = \"generator for command-line interfaces\"\n",
        );
        project.write(&format!("{package}/sub/{INIT_MODULE}"), "");
        project.write(&format!("{package}/{DATA_DIR}/logging.yml"), "version: 1\n");
        project.write(&format!("{package}/{DATA_DIR}/grammar.txt"), "usage:\n");
        project.write(README_FILE, "# demo\n\nA demo project.\n");
        project
    }

    /// The project root path.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture directories");
        }
        fs::write(path, content).expect("failed to write fixture file");
    }

    /// Remove the file or directory at `rel`.
    #[allow(dead_code)]
    pub fn remove(&self, rel: &str) {
        let path = self.root().join(rel);
        if path.is_dir() {
            fs::remove_dir_all(path).expect("failed to remove fixture directory");
        } else {
            fs::remove_file(path).expect("failed to remove fixture file");
        }
    }

    /// Absolute path of the default dist directory.
    #[allow(dead_code)]
    pub fn dist_dir(&self) -> PathBuf {
        self.root().join("dist")
    }

    /// A pkgmeta command running in the project root.
    pub fn pkgmeta_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("pkgmeta").expect("pkgmeta binary not built");
        cmd.current_dir(self.root());
        cmd
    }
}
