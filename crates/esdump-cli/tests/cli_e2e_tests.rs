//! End-to-end tests for the esdump binary
//!
//! These tests run the compiled binary against a mock search backend and
//! validate:
//! - Output files and printed transfer counts
//! - Host selection from flags and environment
//! - Exit status on fatal errors

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

/// Build an esdump command isolated from the caller's environment
fn esdump(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("esdump").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("ESDUMP_HOST")
        .env_remove("ESDUMP_REQUEST_TIMEOUT_SECS")
        .env_remove("ESDUMP_MAX_LINE_BYTES")
        .env_remove("ESDUMP_LOG_LEVEL")
        .env_remove("ESDUMP_LOG_OUTPUT");
    cmd
}

fn search_page(count: usize) -> Value {
    let hits: Vec<Value> = (0..count)
        .map(|i| json!({"_index": "books", "_id": format!("b{}", i), "_source": {"n": i}}))
        .collect();
    json!({"_scroll_id": "scroll-1", "hits": {"hits": hits}})
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "error": {"type": "index_not_found_exception", "reason": "no such index"},
        "status": 404
    }))
}

/// Answers a bulk request with one result per create action
struct BulkEcho {
    conflicts: Vec<&'static str>,
}

impl Respond for BulkEcho {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = String::from_utf8_lossy(&request.body);
        let items: Vec<Value> = body
            .lines()
            .step_by(2)
            .map(|line| {
                let action: Value = serde_json::from_str(line).unwrap();
                let id = action["create"]["_id"].as_str().unwrap().to_string();
                let status = if self.conflicts.contains(&id.as_str()) { 409 } else { 201 };
                json!({"create": {"_id": id, "status": status}})
            })
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({"errors": false, "items": items}))
    }
}

async fn mount_scroll(server: &MockServer, hits: usize) {
    Mock::given(method("POST"))
        .and(path("/books/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(hits)))
        .mount(server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/_search/scroll"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"succeeded": true})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_dump_data_writes_file_and_prints_counts() {
    let server = MockServer::start().await;
    mount_scroll(&server, 3).await;
    let dir = TempDir::new().unwrap();

    esdump(&dir)
        .args(["--host", &server.uri(), "dump", "data", "--index", "books"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dumped index 'books'"))
        .stdout(predicate::str::contains("Transferred: 3"))
        .stdout(predicate::str::contains("Failed:      0"));

    let content = fs::read_to_string(dir.path().join("books-data.json")).unwrap();
    assert_eq!(content.lines().count(), 3);
}

#[tokio::test]
async fn test_dump_data_passes_query_and_page_size() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books/_search"))
        .and(query_param("q", "title:dune"))
        .and(query_param("size", "2"))
        .and(query_param("scroll", "5s"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_page(1)))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    esdump(&dir)
        .env("ESDUMP_HOST", server.uri())
        .args([
            "dump", "data", "--index", "books", "-q", "title:dune", "-b", "2", "--timeout", "5",
            "-f", "dune.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transferred: 1"));

    assert!(dir.path().join("dune.json").exists());
}

#[tokio::test]
async fn test_load_data_reports_rejected_documents() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(BulkEcho { conflicts: vec!["b"] })
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("books-data.json"),
        "{\"_id\":\"a\",\"_source\":{}}\n{\"_id\":\"b\",\"_source\":{}}\n{\"_id\":\"c\",\"_source\":{}}\n",
    )
    .unwrap();

    esdump(&dir)
        .args(["--host", &server.uri(), "load", "data", "--index", "books"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transferred: 2"))
        .stdout(predicate::str::contains("Failed:      1"));
}

#[tokio::test]
async fn test_load_data_with_delete_on_missing_index() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/books"))
        .respond_with(not_found())
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(BulkEcho { conflicts: vec![] })
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("in.json"), "{\"_id\":\"a\",\"_source\":{}}\n").unwrap();

    esdump(&dir)
        .args([
            "--host", &server.uri(), "load", "data", "--index", "books", "--file", "in.json",
            "--delete",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transferred: 1"));
}

#[tokio::test]
async fn test_gen_testdata() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_bulk"))
        .respond_with(BulkEcho { conflicts: vec![] })
        .expect(2)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    esdump(&dir)
        .args([
            "--host", &server.uri(), "gen", "testdata", "--index", "books", "--epoch", "2",
            "--batch", "5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Transferred: 10"));
}

#[tokio::test]
async fn test_mapping_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": {
                "mappings": {"properties": {"n": {"type": "long"}}},
                "settings": {"index": {"uuid": "u1", "number_of_shards": "1"}}
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/books-copy"))
        .and(wiremock::matchers::body_json(json!({
            "mappings": {"properties": {"n": {"type": "long"}}},
            "settings": {"index": {"number_of_shards": "1"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"acknowledged": true})))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    esdump(&dir)
        .args(["--host", &server.uri(), "dump", "mapping", "--index", "books"])
        .assert()
        .success()
        .stdout(predicate::str::contains("books-mapping.json"));

    esdump(&dir)
        .args([
            "--host", &server.uri(), "load", "mapping", "--index", "books-copy", "--file",
            "books-mapping.json",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created"));
}

#[tokio::test]
async fn test_delete_missing_index_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/books"))
        .respond_with(not_found())
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    esdump(&dir)
        .args(["--host", &server.uri(), "delete", "index", "--index", "books"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist"));
}

#[tokio::test]
async fn test_backend_error_exits_with_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books/_search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("cluster on fire"))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let host = server.uri().replacen("http://", "http://elastic:secret@", 1);

    esdump(&dir)
        .args(["--host", &host, "dump", "data", "--index", "books"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("cluster on fire"))
        .stderr(predicate::str::contains("secret").not())
        .stdout(predicate::str::contains("Transferred: 0"));
}

#[tokio::test]
async fn test_missing_input_file_exits_with_failure() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    esdump(&dir)
        .args(["--host", &server.uri(), "load", "data", "--index", "nothing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nothing-data.json"));
}

#[test]
fn test_no_arguments_prints_help() {
    let dir = TempDir::new().unwrap();
    esdump(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
