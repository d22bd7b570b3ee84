//! End-to-end tests: compile a layout and write the package to disk.

mod fixtures;

use std::fs;

use matrixpcb::{compile, emitter};
use tempfile::TempDir;

#[test]
fn test_write_package_round_trip() {
    let output = compile(fixtures::SIXTY_PERCENT_FRAGMENT, &fixtures::options("sixty")).unwrap();

    let dir = TempDir::new().unwrap();
    let out = dir.path().join("sixty");
    emitter::write_package(&out, &output.files).unwrap();

    for file in &output.files {
        let written = fs::read_to_string(out.join(&file.file_name)).unwrap();
        assert_eq!(written, file.content);
        assert!(!written.is_empty());
    }
}

#[test]
fn test_rewrite_is_byte_identical() {
    let options = fixtures::options("demo");
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("demo");

    let first = compile(fixtures::TWO_ROW_SCENARIO, &options).unwrap();
    emitter::write_package(&out, &first.files).unwrap();
    let before = fs::read(out.join("demo.kicad_pcb")).unwrap();

    let second = compile(fixtures::TWO_ROW_SCENARIO, &options).unwrap();
    emitter::write_package(&out, &second.files).unwrap();
    let after = fs::read(out.join("demo.kicad_pcb")).unwrap();

    assert_eq!(before, after);
}

#[test]
fn test_failed_compile_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("overflow");

    let result = compile(&fixtures::eight_rows(), &fixtures::options("overflow"));
    assert!(result.is_err());
    // The caller never reaches the emitter; the directory stays absent.
    assert!(!out.exists());
}
