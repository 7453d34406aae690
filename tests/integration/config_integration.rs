//! Configuration loading feeding the run context.

use crate::integration::with_xdg_env;
use clap::Parser;
use graphbatch::cli::{Cli, RunContext};
use graphbatch::config::ConfigLoader;
use std::fs;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

fn write_workspace_config(workspace: &TempDir, contents: &str) {
    let dir = workspace.path().join("config");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), contents).unwrap();
}

#[tokio::test]
async fn test_workspace_protected_types_reach_the_service() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace_config(
        &workspace,
        r#"
[service]
protected_types = ["Experimenter"]

[defaults]
report = true
"#,
    );

    let context = with_xdg_env(&xdg, || {
        RunContext::new(workspace.path().to_path_buf(), None).unwrap()
    });
    assert!(context.config().defaults.report);

    let cli = Cli::try_parse_from(["graphbatch", "delete", "Experimenter:1"]).unwrap();
    let output = context
        .execute(&cli.command, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(output.exit_code, 1);
    assert!(output.text.contains("failed: Security Violation"));
    assert!(output.text.contains("flags: FAILURE"));
}

#[test]
fn test_global_config_applies_without_workspace_file() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    let global_dir = xdg.path().join("graphbatch");
    fs::create_dir_all(&global_dir).unwrap();
    fs::write(
        global_dir.join("config.toml"),
        "[tracker]\nloops = 4\ninterval_ms = 250\n",
    )
    .unwrap();

    let config = with_xdg_env(&xdg, || ConfigLoader::load(workspace.path()).unwrap());

    assert_eq!(config.tracker.loops, 4);
    assert_eq!(config.tracker.interval_ms, 250);
    assert_eq!(config.defaults.wait_secs, -1);
}

#[test]
fn test_invalid_tracker_config_is_rejected() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    write_workspace_config(&workspace, "[tracker]\nloops = 0\n");

    let result = with_xdg_env(&xdg, || RunContext::new(workspace.path().to_path_buf(), None));

    let err = result.err().expect("zero loops should fail validation");
    assert!(err.to_string().contains("Tracker"));
}

#[test]
fn test_env_sets_protected_types_list() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();

    let config = with_xdg_env(&xdg, || {
        std::env::set_var("GRAPHBATCH__SERVICE__PROTECTED_TYPES", "Experimenter,Group");
        let result = ConfigLoader::load(workspace.path());
        std::env::remove_var("GRAPHBATCH__SERVICE__PROTECTED_TYPES");
        result.unwrap()
    });

    let protected: Vec<&str> = config
        .service
        .protected_types
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(protected, vec!["Experimenter", "Group"]);
}
