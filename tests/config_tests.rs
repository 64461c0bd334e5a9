//! Tests for the root configuration assembler
//!
//! Loads full descriptor trees from disk and verifies root field decoding,
//! the base-directory default, group lookup semantics, and the example
//! fixture lifecycle (maps, inheritance, attachment to groups and routes).

mod common;

use plugboard::{Config, ConfigError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_root_load_with_includes() {
    common::init_tracing();
    let dir = TempDir::new().unwrap();
    let extra = write(
        dir.path(),
        "routes.toml",
        r#"
        [[route]]
        name = "list_users"
        group = "api"
        httpPath = "/users"
        handlers = ["users.List"]
        "#,
    );
    let root = write(
        dir.path(),
        "service.toml",
        &format!(
            r#"
            name = "demo"
            port = 8080
            tlsPort = 8443
            include = [{:?}]

            [[group]]
            name = "api"
            httpPath = "/api"
            "#,
            extra.to_string_lossy()
        ),
    );

    let cfg = Config::from_file(&root).unwrap();
    assert_eq!(cfg.name, "demo");
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.tls_port, 8443);
    assert_eq!(cfg.dir, "./");
    assert_eq!(cfg.document.groups.len(), 1);
    assert_eq!(cfg.document.routes.len(), 1);
    assert_eq!(cfg.document.routes[0].handlers, vec!["users.List"]);
}

#[test]
fn test_declared_dir_is_kept() {
    let dir = TempDir::new().unwrap();
    let root = write(dir.path(), "service.toml", "name = \"demo\"\ndir = \"/srv\"\n");

    let cfg = Config::from_file(&root).unwrap();
    assert_eq!(cfg.dir, "/srv");
}

#[test]
fn test_missing_root_file_fails() {
    assert!(Config::from_file("/nonexistent/service.toml").is_err());
}

#[test]
fn test_include_failure_aborts_load() {
    let dir = TempDir::new().unwrap();
    let root = write(
        dir.path(),
        "service.toml",
        "name = \"demo\"\ninclude = [\"/nonexistent/stray.bin\"]\n",
    );

    assert!(Config::from_file(&root).is_err());
}

#[test]
fn test_group_lookup_semantics() {
    let dir = TempDir::new().unwrap();
    let root = write(
        dir.path(),
        "service.toml",
        r#"
        name = "demo"

        [[group]]
        name = "api"
        httpPath = "/api/v1"

        [[group]]
        name = "api"
        httpPath = "/api/v2"
        "#,
    );

    let cfg = Config::from_file(&root).unwrap();

    // Empty name: no match, no error.
    assert!(cfg.group("").unwrap().is_none());

    // Duplicate name: first occurrence in declared order wins.
    let g = cfg.group("api").unwrap().unwrap();
    assert_eq!(g.http_path, "/api/v1");

    let err = cfg.group("admin").unwrap_err();
    assert!(matches!(err, ConfigError::GroupNotFound { .. }));
}

#[test]
fn test_example_fixtures_resolved_and_attached() {
    let dir = TempDir::new().unwrap();
    let root = write(
        dir.path(),
        "service.toml",
        r#"
        name = "demo"

        [[group]]
        name = "api"
        httpPath = "/api"

        [[route]]
        name = "get_user"
        group = "api"
        httpPath = "/users/:id"

        [[response]]
        name = "ok"
        code = 200

        [[response]]
        name = "ok_user"
        parent = "ok"

        [[request]]
        name = "get_user"
        group = "api"
        responses = ["ok_user"]

        [[request]]
        name = "get_admin"
        group = "api"
        parent = "get_user"
        "#,
    );

    let cfg = Config::from_file(&root).unwrap();

    // Response inheritance resolved into the map.
    assert_eq!(cfg.example_responses["ok_user"].code, 200);

    // The child request inherited its parent's responses list, appended
    // after its own (it declared none).
    let admin = &cfg.example_requests["get_admin"];
    assert_eq!(admin.responses, vec!["ok_user".to_string()]);
    assert_eq!(admin.response_examples.len(), 1);
    assert_eq!(admin.response_examples[0].code, 200);

    // Fixtures attached to their owning group and same-named route.
    let group = cfg.group("api").unwrap().unwrap();
    assert!(group.requests.contains_key("get_user"));
    assert!(group.requests.contains_key("get_admin"));

    let route = &cfg.document.routes[0];
    let example = route.request_example.as_ref().unwrap();
    assert_eq!(example.name, "get_user");
    assert_eq!(example.response_examples[0].code, 200);
}
