use predicates::prelude::*;
use std::fs;

mod fixtures;
use fixtures::TestProject;

use pkgmeta::constants::DATA_DIR;

/// Test a full build against a valid project layout
#[test]
fn test_build_produces_dist_metadata() {
    let project = TestProject::with_package("demo");

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Packaged"))
        .stdout(predicate::str::contains("demo 2.0rc3"));

    let document =
        fs::read_to_string(project.dist_dir().join("demo-2.0rc3.dist.toml")).unwrap();
    assert!(document.contains("name = \"demo\""));
    assert!(document.contains("author = \"Ada Lovelace\""));
    assert!(document.contains("version = \"2.0rc3\""));
    assert!(document.contains("description = \"generator for command-line interfaces\""));
    assert!(document.contains("A demo project."));
    assert!(document.contains("\"demo.sub\""));
    assert!(document.contains("license = \"MIT\""));

    let record = fs::read_to_string(project.dist_dir().join("demo-2.0rc3.files")).unwrap();
    assert!(record.contains("grammar.txt"));
    assert!(record.contains("logging.yml"));
}

/// Test that the dist directory can be redirected
#[test]
fn test_build_custom_dist_directory() {
    let project = TestProject::with_package("demo");

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build").arg("demo").arg("--dist").arg("out").assert().success();

    assert!(project.root().join("out").join("demo-2.0rc3.dist.toml").is_file());
}

/// Test that a missing metadata identifier aborts the build
#[test]
fn test_build_fails_on_missing_identifier() {
    let project = TestProject::with_package("demo");
    project.write(
        "demo/__init__.py",
        "__author__ = \"Ada Lovelace\"\n__version__ = \"2.0rc3\"\n",
    );

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("__description__"))
        .stderr(predicate::str::contains("is not assigned"));

    assert!(!project.dist_dir().exists());
}

/// Test that a non-literal metadata value aborts the build
#[test]
fn test_build_fails_on_non_literal_value() {
    let project = TestProject::with_package("demo");
    project.write(
        "demo/__init__.py",
        "__author__ = \"Ada Lovelace\"\n\
         __version__ = read_version()\n\
         __description__ = \"D\"\n",
    );

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("__version__"))
        .stderr(predicate::str::contains("string literal"));
}

/// Test that a missing data directory aborts the build
#[test]
fn test_build_fails_on_missing_data_dir() {
    let project = TestProject::with_package("demo");
    project.remove(&format!("demo/{DATA_DIR}"));

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Bundled data directory not found"));
}

/// Test that a missing README aborts the build
#[test]
fn test_build_fails_on_missing_readme() {
    let project = TestProject::with_package("demo");
    project.remove("README.md");

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Long-description file not found"));
}

/// Test that a missing initializer aborts the build with a suggestion
#[test]
fn test_build_fails_without_initializer() {
    let project = TestProject::empty();
    project.write("README.md", "# empty\n");

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Initializer module not found"))
        .stderr(predicate::str::contains("suggestion"));
}

/// Test contact fields recorded at invocation
#[test]
fn test_build_records_contact_fields() {
    let project = TestProject::with_package("demo");

    let mut cmd = project.pkgmeta_command();
    cmd.arg("build")
        .arg("demo")
        .arg("--author-email")
        .arg("ada@example.com")
        .arg("--homepage")
        .arg("https://example.com/demo")
        .assert()
        .success();

    let document =
        fs::read_to_string(project.dist_dir().join("demo-2.0rc3.dist.toml")).unwrap();
    assert!(document.contains("author_email = \"ada@example.com\""));
    assert!(document.contains("homepage = \"https://example.com/demo\""));
}
