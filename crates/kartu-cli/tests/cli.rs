//! Integration tests for the kartu binary.
//!
//! These exercise the --text input path so no OCR model files are needed.

use assert_cmd::Command;
use predicates::prelude::*;

fn write_lines(dir: &tempfile::TempDir, name: &str, lines: &[&str]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}

#[test]
fn process_text_file_prints_json_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_lines(
        &dir,
        "card.txt",
        &[
            "PROVINSI DKI JAKARTA",
            "NIK: 3171234567890001",
            "Nama: BUDI SANTOSO",
            "Tempat/Tgl Lahir: JAKARTA, 17-08-1990",
        ],
    );

    Command::cargo_bin("kartu")
        .unwrap()
        .arg("process")
        .arg("--text")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"NIK\":\"3171234567890001\""))
        .stdout(predicate::str::contains("BUDI SANTOSO"))
        .stdout(predicate::str::contains("17-08-1990"));
}

#[test]
fn process_text_format_prints_sentinels_for_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_lines(&dir, "card.txt", &["NIK: 1234567890123456"]);

    Command::cargo_bin("kartu")
        .unwrap()
        .args(["process", "--text", "--format", "text"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("NIK:           1234567890123456"))
        .stdout(predicate::str::contains("Nama:          Not found"))
        .stdout(predicate::str::contains("Tanggal Lahir: Not found"));
}

#[test]
fn process_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_lines(&dir, "card.txt", &["NIK: 1234567890123456"]);
    let output = dir.path().join("record.json");

    Command::cargo_bin("kartu")
        .unwrap()
        .arg("process")
        .arg("--text")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.contains("1234567890123456"));
}

#[test]
fn process_missing_input_fails() {
    Command::cargo_bin("kartu")
        .unwrap()
        .args(["process", "no-such-file.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_empty_text_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_lines(&dir, "empty.txt", &["  "]);

    Command::cargo_bin("kartu")
        .unwrap()
        .args(["process", "--text"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No text detected"));
}

#[test]
fn batch_processes_text_files_with_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_lines(&dir, "a.txt", &["NIK: 1234567890123456", "Nama: JOHN DOE"]);
    write_lines(&dir, "b.txt", &["no identity number here"]);
    let out_dir = dir.path().join("out");

    Command::cargo_bin("kartu")
        .unwrap()
        .arg("batch")
        .arg(format!("{}/*.txt", dir.path().display()))
        .arg("--output-dir")
        .arg(&out_dir)
        .arg("--summary")
        .assert()
        .success();

    let summary = std::fs::read_to_string(out_dir.join("summary.csv")).unwrap();
    assert!(summary.contains("1234567890123456"));
    assert!(summary.contains("Not found"));
    assert!(out_dir.join("a.json").exists());
    assert!(out_dir.join("b.json").exists());
}

#[test]
fn batch_without_matches_fails() {
    Command::cargo_bin("kartu")
        .unwrap()
        .args(["batch", "/definitely/not/here/*.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}
