//! CLI behavior: argument parsing, error reporting, exit codes.
//!
//! These tests exercise the binary itself; none of them need a real PDF
//! because every covered path fails before the document is opened.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tarja_cmd() -> Command {
    Command::cargo_bin("tarja").unwrap()
}

mod argument_parsing {
    use super::*;

    #[test]
    fn test_help_flag() {
        tarja_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--input"))
            .stdout(predicate::str::contains("--output"))
            .stdout(predicate::str::contains("--documents"))
            .stdout(predicate::str::contains("--email"))
            .stdout(predicate::str::contains("--phone"))
            .stdout(predicate::str::contains("--print-scale"))
            .stdout(predicate::str::contains("scan"));
    }

    #[test]
    fn test_version_flag() {
        tarja_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("tarja"));
    }

    #[test]
    fn test_missing_input() {
        tarja_cmd()
            .arg("--output")
            .arg("out.pdf")
            .arg("--documents")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--input is required"));
    }

    #[test]
    fn test_missing_output() {
        tarja_cmd()
            .arg("--input")
            .arg("in.pdf")
            .arg("--documents")
            .assert()
            .failure()
            .stderr(predicate::str::contains("--output is required"));
    }

    #[test]
    fn test_scan_requires_input() {
        tarja_cmd()
            .arg("scan")
            .arg("--documents")
            .assert()
            .failure()
            .stderr(predicate::str::contains("input").or(predicate::str::contains("required")));
    }
}

mod error_handling {
    use super::*;

    #[test]
    fn test_no_detectors_specified() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.pdf");
        let output = temp.path().join("out.pdf");
        std::fs::write(&input, b"%PDF-1.4").unwrap();

        tarja_cmd()
            .arg("--input")
            .arg(&input)
            .arg("--output")
            .arg(&output)
            .assert()
            .failure()
            .stderr(predicate::str::contains("No detectors specified"));
    }

    #[test]
    fn test_nonexistent_input_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.pdf");
        let output = temp.path().join("out.pdf");

        tarja_cmd()
            .arg("--input")
            .arg(&missing)
            .arg("--output")
            .arg(&output)
            .arg("--documents")
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not exist"));
    }

    #[test]
    fn test_scan_nonexistent_input_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.pdf");

        tarja_cmd()
            .arg("scan")
            .arg("--input")
            .arg(&missing)
            .arg("--email")
            .assert()
            .failure()
            .stderr(predicate::str::contains("does not exist"));
    }

    #[test]
    fn test_scan_without_detectors() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.pdf");
        std::fs::write(&input, b"%PDF-1.4").unwrap();

        tarja_cmd()
            .arg("scan")
            .arg("--input")
            .arg(&input)
            .assert()
            .failure()
            .stderr(predicate::str::contains("No detectors specified"));
    }
}
