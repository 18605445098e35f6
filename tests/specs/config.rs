//! Config file specs.

use crate::prelude::*;

/// > list.interface and list.param come from suitelist.toml
#[test]
fn interface_from_config() {
    let project = Project::empty();
    project.file("tools/iface.sh", &std::fs::read_to_string(worker("echo_param")).unwrap());
    project.config("[list]\ninterface = \"tools/iface.sh\"\nparam = \"from-config\"\n");

    let run = list("echo_param")
        .no_interface()
        .pwd(project.path())
        .json()
        .args(&["suite.js"])
        .passes();

    assert_eq!(
        run.json()[0]["tests"][0]["path"]["path"],
        serde_json::json!(["from-config"])
    );
}

/// > CLI flags override config values
#[test]
fn cli_overrides_config() {
    let project = Project::empty();
    project.config("[list]\nparam = \"from-config\"\n");

    let run = list("echo_param")
        .pwd(project.path())
        .json()
        .args(&["--param", "from-cli", "suite.js"])
        .passes();

    assert_eq!(
        run.json()[0]["tests"][0]["path"]["path"],
        serde_json::json!(["from-cli"])
    );
}

/// > list.timeout from config bounds the worker
#[test]
fn timeout_from_config() {
    let project = Project::empty();
    project.config("[list]\ntimeout = \"100ms\"\n");

    let run = list("hang")
        .pwd(project.path())
        .json()
        .args(&["stuck.js"])
        .fails();

    assert_eq!(run.json()[0]["error"]["timeout"], true);
}

/// > -C selects an explicit config file
#[test]
fn explicit_config_flag() {
    let project = Project::empty();
    project.file("custom.toml", "version = 1\n[list]\nparam = \"custom\"\n");

    let run = list("echo_param")
        .pwd(project.path())
        .json()
        .args(&["-C", "custom.toml", "suite.js"])
        .passes();

    assert_eq!(
        run.json()[0]["tests"][0]["path"]["path"],
        serde_json::json!(["custom"])
    );
}

/// > Unknown keys warn but do not fail
#[test]
fn unknown_keys_warn() {
    let project = Project::empty();
    project.config("[list]\nretries = 3\n");

    list("list")
        .pwd(project.path())
        .args(&["suite.js"])
        .passes()
        .stderr_has("unrecognized field `list.retries`");
}

/// > Unsupported config versions are config errors (exit 2)
#[test]
fn unsupported_version_is_config_error() {
    let project = Project::empty();
    project.file("suitelist.toml", "version = 2\n");

    list("list")
        .pwd(project.path())
        .args(&["suite.js"])
        .exits(2)
        .stderr_has("unsupported config version 2");
}

/// > Without --interface or list.interface there is nothing to run (exit 2)
#[test]
fn missing_interface_is_argument_error() {
    list("list")
        .no_interface()
        .args(&["suite.js"])
        .exits(2)
        .stderr_has("no interface module");
}

/// > A missing explicit config file is a config error
#[test]
fn missing_explicit_config() {
    list("list")
        .env("SUITELIST_CONFIG", "/nonexistent/suitelist.toml")
        .args(&["suite.js"])
        .exits(2)
        .stderr_has("config file not found");
}

/// > A hidden .suitelist.toml is discovered from a subdirectory
#[test]
fn hidden_config_found_from_subdirectory() {
    let project = Project::empty();
    project.file(".suitelist.toml", "version = 1\n[list]\nparam = \"hidden\"\n");
    project.file("test/unit/.keep", "");

    let run = list("echo_param")
        .pwd(project.path().join("test/unit"))
        .json()
        .args(&["suite.js"])
        .passes();

    assert_eq!(
        run.json()[0]["tests"][0]["path"]["path"],
        serde_json::json!(["hidden"])
    );
}

/// > -C accepts a directory holding the config
#[test]
fn explicit_config_directory() {
    let project = Project::empty();
    project.file("ci/suitelist.toml", "version = 1\n[list]\nparam = \"from-ci\"\n");

    let run = list("echo_param")
        .pwd(project.path())
        .json()
        .args(&["suite.js"])
        .env("SUITELIST_CONFIG", "ci")
        .passes();

    assert_eq!(
        run.json()[0]["tests"][0]["path"]["path"],
        serde_json::json!(["from-ci"])
    );
}
