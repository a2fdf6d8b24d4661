//! Integration tests for the `storefront` CLI binary.
//!
//! Argument parsing, help output and error handling run without a
//! backend; catalog commands run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `storefront` binary with env isolation.
///
/// Clears all `STOREFRONT_*` env vars and points config directories at
/// `home` so tests never touch the user's real configuration.
fn storefront_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("storefront");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .env_remove("STOREFRONT_PROFILE")
        .env_remove("STOREFRONT_BACKEND")
        .env_remove("STOREFRONT_API_KEY")
        .env_remove("STOREFRONT_ACCESS_TOKEN")
        .env_remove("STOREFRONT_USER_ID")
        .env_remove("STOREFRONT_OUTPUT")
        .env_remove("STOREFRONT_INSECURE")
        .env_remove("STOREFRONT_TIMEOUT")
        .env_remove("STOREFRONT_PASSWORD");
    cmd
}

/// Command preconfigured to talk to `server` without a config file.
fn backend_cmd(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = storefront_cmd(home);
    cmd.args(["--backend", &server.uri(), "--api-key", "anon-key"]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn product(id: &str, category_id: &str, cost: i64) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Shoe {id}"),
        "cost": cost,
        "is_best_seller": id == "p1",
        "category_id": category_id,
        "description": format!("About {id}")
    })
}

async fn mount_catalog(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "c-snk", "title": "Sneakers" },
            { "id": "c-out", "title": "Outdoor" }
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("category_id", "eq.c-out"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product("p1", "c-out", 752)])),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("category_id", "eq.c-snk"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product("p2", "c-snk", 120)])),
        )
        .mount(server)
        .await;
}

/// Run a prepared command off the async runtime.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = storefront_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("categories")
                .and(predicate::str::contains("products"))
                .and(predicate::str::contains("favorites"))
                .and(predicate::str::contains("sign-in")),
        );
}

#[test]
fn test_version_flag() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("storefront"));
}

#[test]
fn test_completions_zsh() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_favorites_subcommands_exist() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args(["favorites", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list").and(predicate::str::contains("toggle")));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_products_without_backend() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .arg("products")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No backend configured"));
}

#[test]
fn test_unknown_profile() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args(["--profile", "nope", "categories"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'nope' not found"));
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    let output = storefront_cmd(home.path())
        .args(["--output", "invalid", "categories"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let text = combined_output(&output);
    assert!(text.contains("invalid") || text.contains("possible values"));
}

#[test]
fn test_favorites_need_user() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args([
            "--backend",
            "http://127.0.0.1:9",
            "--api-key",
            "anon-key",
            "favorites",
            "list",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("signed-in user"));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args([
            "config",
            "init",
            "--backend",
            "https://shop.example.com",
            "--name",
            "shop",
            "--api-key-env",
            "SHOP_KEY",
        ])
        .assert()
        .success();

    storefront_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("default_profile = \"shop\"")
                .and(predicate::str::contains("[profiles.shop]"))
                .and(predicate::str::contains("api_key_env = \"SHOP_KEY\"")),
        );

    storefront_cmd(home.path())
        .args(["config", "init", "--backend", "https://other.example.com", "--name", "shop"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_init_rejects_bad_url() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args(["config", "init", "--backend", "not a url"])
        .assert()
        .code(2);
}

// ── Catalog against a mock backend ──────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_products_default_to_fallback_category() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args(["--output", "json", "products"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cards[0]["id"], "p1");
    assert_eq!(cards[0]["price"], "₽752");
    assert_eq!(cards[0]["is_best_seller"], true);
    assert_eq!(cards[0]["is_favorite"], false);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_products_by_category_title() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args(["--output", "plain", "products", "--category", "sneakers"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "p2");

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args(["products", "--category", "Boots"]);
    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(4));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_categories_plain_output() {
    let server = MockServer::start().await;
    mount_catalog(&server).await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args(["--output", "plain", "categories"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert_eq!(text.lines().collect::<Vec<_>>(), vec!["All", "Sneakers", "Outdoor"]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_backend_error_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/categories"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "down" })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.arg("categories");
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("HTTP 503"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_favorite_toggle_adds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/favourite"))
        .and(query_param("user_id", "eq.u1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/favourite"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args([
        "--user-id",
        "u1",
        "--access-token",
        "user-token",
        "--output",
        "plain",
        "favorites",
        "toggle",
        "p1",
    ]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "true");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_favorite_toggle_failure_reports_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/favourite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "product_id": "p1" }])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/favourite"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args([
        "--user-id",
        "u1",
        "--access-token",
        "user-token",
        "favorites",
        "toggle",
        "p1",
    ]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("HTTP 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_favorites_list_fetches_batch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/favourite"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "product_id": "p2" },
            { "product_id": null }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .and(query_param("id", "in.(p2)"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([product("p2", "c-snk", 120)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args([
        "--user-id",
        "u1",
        "--access-token",
        "user-token",
        "--output",
        "json",
        "favorites",
        "list",
    ]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let cards: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(cards.as_array().unwrap().len(), 1);
    assert_eq!(cards[0]["is_favorite"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_product_detail_loads_whole_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product("p1", "c-out", 752),
            product("p2", "c-snk", 120)
        ])))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args(["product", "p2"]);
    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("₽120"));
    assert!(text.contains("About p2"));

    let mut cmd = backend_cmd(home.path(), &server);
    cmd.args(["product", "p9"]);
    assert_eq!(run(cmd).await.status.code(), Some(4));
}

// ── Profile against a mock backend ──────────────────────────────────

fn profile_cmd(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = backend_cmd(home, server);
    cmd.args(["--user-id", "u1", "--access-token", "user-token"]);
    cmd
}

#[test]
fn test_profile_needs_user() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args([
            "--backend",
            "http://127.0.0.1:9",
            "--api-key",
            "anon-key",
            "profile",
            "show",
        ])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("signed-in user"));
}

#[test]
fn test_profile_update_needs_a_field() {
    let home = tempfile::tempdir().unwrap();
    storefront_cmd(home.path())
        .args([
            "--backend",
            "http://127.0.0.1:9",
            "--api-key",
            "anon-key",
            "--user-id",
            "u1",
            "profile",
            "update",
            "--firstname",
            "  ",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--firstname"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_show_uses_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("user_id", "eq.u1"))
        .and(header("authorization", "Bearer user-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "pr1",
            "user_id": "u1",
            "firstname": "Anna",
            "lastname": "Petrova"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = profile_cmd(home.path(), &server);
    cmd.args(["profile", "show"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("Anna"));
    assert!(text.contains("Petrova"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_show_missing_row() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = profile_cmd(home.path(), &server);
    cmd.args(["profile", "show"]);
    let output = run(cmd).await;

    assert_eq!(output.status.code(), Some(4));
    assert!(combined_output(&output).contains("profile update"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_update_creates_missing_row() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("user_id", "eq.u1"))
        .and(body_json(json!({ "phone": "+7 900" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(body_json(json!({ "user_id": "u1", "phone": "+7 900" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "id": "pr1",
            "user_id": "u1",
            "phone": "+7 900"
        }])))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = profile_cmd(home.path(), &server);
    cmd.args(["--output", "json", "profile", "update", "--phone", "+7 900"]);
    let output = run(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["user_id"], "u1");
    assert_eq!(profile["phone"], "+7 900");
}
