//! Tests for the hash command runner
//!
//! These tests drive `commands::hash::run` end to end against temporary
//! directory trees.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use clap::Parser;
use dirhash_cli::Cli;
use dirhash_cli::commands::hash::{RunSummary, run};
use tempfile::TempDir;

const HELLO_MD5: &str = "5eb63bbbe01eeed093cb22bb8f5acdc3";
const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

fn sample_tree() -> TempDir {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("hello.txt"), b"hello world").expect("Failed to write file");
    fs::create_dir(temp_dir.path().join("nested")).expect("Failed to create dir");
    fs::write(temp_dir.path().join("nested").join("empty.bin"), b"").expect("Failed to write file");
    temp_dir
}

fn cli_for(input: &Path, extra: &[&str]) -> Cli {
    let input = input.to_str().expect("Non-UTF-8 temp path");
    let mut args = vec!["dirhash", "-i", input];
    args.extend_from_slice(extra);
    Cli::try_parse_from(args).expect("Failed to parse args")
}

fn run_captured(cli: &Cli) -> (RunSummary, String) {
    let mut out = Vec::new();
    let summary = run(cli, &mut out).expect("Run failed");
    (summary, String::from_utf8(out).expect("Output is not UTF-8"))
}

#[test]
fn test_run_echoes_table_without_output_file() {
    let tree = sample_tree();
    let cli = cli_for(tree.path(), &[]);

    let (summary, out) = run_captured(&cli);

    assert_eq!(
        summary,
        RunSummary {
            found: 2,
            hashed: 2,
            failed: 0
        }
    );
    assert!(out.starts_with("File Name"));
    assert!(out.contains(HELLO_MD5));
    assert!(out.contains(EMPTY_MD5));
}

#[test]
fn test_run_writes_csv_and_stays_quiet() {
    let tree = sample_tree();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let report = out_dir.path().join("hashes.csv");
    let cli = cli_for(
        tree.path(),
        &["-o", report.to_str().unwrap(), "-a", "md5", "sha256", "-f", "condensed"],
    );

    let (summary, out) = run_captured(&cli);

    assert_eq!(summary.hashed, 2);
    assert!(out.is_empty());

    let contents = fs::read_to_string(&report).expect("Failed to read report");
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "Path,FileName,Size,md5,sha256");
    assert_eq!(lines.len(), 3);
    let hello_line = lines
        .iter()
        .find(|line| line.contains("hello.txt"))
        .expect("hello.txt row");
    assert!(hello_line.ends_with(&format!(",11,{HELLO_MD5},{HELLO_SHA256}")));
}

#[test]
fn test_run_terminal_flag_echoes_alongside_file() {
    let tree = sample_tree();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let report = out_dir.path().join("hashes.json");
    let cli = cli_for(
        tree.path(),
        &["-o", report.to_str().unwrap(), "-f", "json", "-t"],
    );

    let (_, out) = run_captured(&cli);

    let echoed: serde_json::Value = serde_json::from_str(&out).expect("Invalid JSON on terminal");
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).expect("Invalid JSON file");
    assert_eq!(echoed, written);
    assert_eq!(echoed.as_array().unwrap().len(), 2);
}

#[test]
fn test_run_output_sorted_by_path() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    for name in ["c.txt", "a.txt", "b.txt"] {
        fs::write(temp_dir.path().join(name), name).expect("Failed to write file");
    }
    let cli = cli_for(temp_dir.path(), &["-f", "json", "-j", "3"]);

    let (_, out) = run_captured(&cli);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let names: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["filename"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
}

#[test]
fn test_run_writes_yara_and_kql() {
    let tree = sample_tree();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let yara = out_dir.path().join("rule.yar");
    let kql = out_dir.path().join("query.kql");
    let cli = cli_for(
        tree.path(),
        &[
            "-o",
            out_dir.path().join("report.csv").to_str().unwrap(),
            "-y",
            yara.to_str().unwrap(),
            "--yara-rule-name",
            "case-42",
            "-q",
            kql.to_str().unwrap(),
            "--kql-hash-only",
        ],
    );

    run_captured(&cli);

    let rule = fs::read_to_string(&yara).expect("Missing YARA rule");
    assert!(rule.starts_with("rule case_42\n"));
    assert!(rule.contains("$md5_hello = { 5E B6 3B BB"));
    assert!(rule.contains("$filename_hello = \"hello.txt\""));

    let query = fs::read_to_string(&kql).expect("Missing KQL query");
    assert!(query.starts_with("// KQL Query: dirhash_generated_query\n"));
    assert!(query.contains(HELLO_MD5));
    assert!(!query.contains("FileName in~"));
    assert!(query.ends_with("| take 1000\n"));
}

#[test]
fn test_run_yara_hash_only_uses_selected_algorithms() {
    let tree = sample_tree();
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let yara = out_dir.path().join("rule.yar");
    let cli = cli_for(
        tree.path(),
        &[
            "-o",
            out_dir.path().join("report.csv").to_str().unwrap(),
            "-a",
            "sha256",
            "-y",
            yara.to_str().unwrap(),
            "--yara-hash-only",
        ],
    );

    run_captured(&cli);

    let rule = fs::read_to_string(&yara).unwrap();
    assert!(rule.contains("$sha256_hello"));
    assert!(!rule.contains("$md5_"));
    assert!(!rule.contains("$filename_"));
}

#[test]
fn test_run_rejects_unknown_algorithm() {
    let tree = sample_tree();
    let cli = cli_for(tree.path(), &["-a", "md4"]);

    let err = run(&cli, &mut Vec::<u8>::new()).unwrap_err();
    assert!(err.to_string().contains("md4"));
}

#[test]
fn test_run_missing_input_directory() {
    let tree = sample_tree();
    let missing = tree.path().join("does-not-exist");
    let cli = cli_for(&missing, &[]);

    let err = run(&cli, &mut Vec::<u8>::new()).unwrap_err();
    assert!(err.to_string().contains("Error enumerating files"));
}

#[test]
fn test_run_empty_directory() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let cli = cli_for(temp_dir.path(), &[]);

    let (summary, out) = run_captured(&cli);

    assert_eq!(summary.found, 0);
    assert_eq!(out, "No files to display\n");
}

#[test]
fn test_run_yara_on_empty_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let out_dir = TempDir::new().expect("Failed to create temp dir");
    let yara = out_dir.path().join("rule.yar");
    let cli = cli_for(temp_dir.path(), &["-y", yara.to_str().unwrap()]);

    let err = run(&cli, &mut Vec::<u8>::new()).unwrap_err();
    assert!(err.to_string().contains("YARA"));
    assert!(!yara.exists());
}

#[cfg(unix)]
#[test]
fn test_run_unreadable_file_is_not_fatal() {
    use std::os::unix::fs::PermissionsExt;

    let tree = sample_tree();
    let locked = tree.path().join("locked.bin");
    fs::write(&locked, b"secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root can read the file regardless of mode bits
    if fs::File::open(&locked).is_ok() {
        return;
    }

    let cli = cli_for(tree.path(), &[]);
    let (summary, out) = run_captured(&cli);

    assert_eq!(summary.found, 3);
    assert_eq!(summary.hashed, 2);
    assert_eq!(summary.failed, 1);
    assert!(!out.contains("locked.bin"));
}
