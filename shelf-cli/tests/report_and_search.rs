use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const SEARCH_CATALOG: &str = r#"
books:
  - id: "1"
    title: Amos Daragon Tome 1
    author: { name: Julien, nationality: Canadien }
  - id: "2"
    title: Travaillier avec Julien
    author: { name: Alexandre, nationality: Canadien }
  - id: "3"
    title: La construction pour les nulls
    author: { name: Alexandre, nationality: Canadien }
borrowers:
  - { id: "1", name: Luc }
loans:
  - { book: "1", borrower: "1" }
"#;

fn shelf_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("shelf"));
    cmd.env_remove("SHELF_CATALOG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn write_catalog(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("catalog.yaml");
    fs::write(&path, SEARCH_CATALOG).expect("write catalog");
    path
}

fn stdout_json(cmd: &mut Command) -> Value {
    let assert = cmd.assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("stdout utf8");
    serde_json::from_str(&stdout).expect("stdout must be valid JSON")
}

fn ids(books: &Value) -> Vec<&str> {
    books
        .as_array()
        .expect("array")
        .iter()
        .map(|b| b["id"].as_str().expect("id"))
        .collect()
}

fn catalog_arg(path: &Path) -> String {
    path.display().to_string()
}

// ---------------------------------------------------------------------------
// 1. report
// ---------------------------------------------------------------------------

#[test]
fn report_prints_demo_catalog() {
    shelf_cmd()
        .arg("report")
        .assert()
        .success()
        .stdout(contains("6 books | 2 authors | 2 borrowers | 2 on loan"))
        .stdout(contains("Amos daragon tome 2"))
        .stdout(contains("Charles"));
}

#[test]
fn report_json_has_summary_and_unique_works() {
    let report = stdout_json(shelf_cmd().args(["report", "--json"]));

    assert_eq!(report["summary"]["books"], 6);
    assert_eq!(report["summary"]["authors"], 2);
    assert_eq!(report["summary"]["on_loan"], 2);

    let authors = report["authors"].as_array().expect("authors");
    let julien = authors
        .iter()
        .find(|a| a["name"] == "Julien")
        .expect("Julien listed");
    assert_eq!(
        julien["works"],
        serde_json::json!(["Amos daragon tome 1", "Amos daragon tome 2"])
    );

    let books = report["books"].as_array().expect("books");
    let first = books.iter().find(|b| b["id"] == "1").expect("book 1");
    assert_eq!(first["available"], false);
    assert_eq!(first["borrower"], "1");
}

#[test]
fn report_reads_catalog_from_env() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(&dir);

    let report = stdout_json(
        shelf_cmd()
            .env("SHELF_CATALOG", &path)
            .args(["report", "--json"]),
    );
    assert_eq!(report["summary"]["books"], 3);
    assert_eq!(report["summary"]["borrowers"], 1);
}

#[test]
fn report_with_missing_catalog_fails() {
    let dir = TempDir::new().expect("tempdir");
    shelf_cmd()
        .args(["report", "--catalog"])
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .stderr(contains("catalog seed not found"));
}

// ---------------------------------------------------------------------------
// 2. search
// ---------------------------------------------------------------------------

#[test]
fn search_json_matches_title_or_author() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(&dir);

    let books = stdout_json(shelf_cmd().args([
        "search",
        "ju",
        "--json",
        "--catalog",
        &catalog_arg(&path),
    ]));
    assert_eq!(ids(&books), vec!["1", "2"]);
}

#[test]
fn search_table_lists_matches() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_catalog(&dir);

    shelf_cmd()
        .args(["search", "NULLS", "--catalog", &catalog_arg(&path)])
        .assert()
        .success()
        .stdout(contains("1 match(es) for 'NULLS'"))
        .stdout(contains("La construction pour les nulls"));
}

#[test]
fn search_without_match_fails() {
    shelf_cmd()
        .args(["search", "Non Existant Book"])
        .assert()
        .failure()
        .stderr(contains("no book matches 'Non Existant Book'"));
}

// ---------------------------------------------------------------------------
// 3. demo
// ---------------------------------------------------------------------------

#[test]
fn demo_returns_book_and_searches() {
    shelf_cmd()
        .arg("demo")
        .assert()
        .success()
        .stdout(contains("Borrower 2 returned book 3"))
        .stdout(contains("1 on loan"))
        .stdout(contains("match(es) for 'ju'"));
}

#[test]
fn demo_takes_no_query_flag() {
    shelf_cmd()
        .args(["demo", "--query", "amos"])
        .assert()
        .failure();
}
