//! Runs the built binary and checks log-to-file output alongside stdout.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

#[test]
fn test_log_file_receives_command_events() {
    let temp_dir = TempDir::new().unwrap();
    let config_home = temp_dir.path().join("config");
    let home = temp_dir.path().join("home");
    let workspace = temp_dir.path().join("ws");
    let log_file = temp_dir.path().join("logs").join("graphbatch.log");
    fs::create_dir_all(&config_home).unwrap();
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&workspace).unwrap();

    let bin = env!("CARGO_BIN_EXE_graphbatch");
    let output = Command::new(bin)
        .env("XDG_CONFIG_HOME", config_home.as_os_str())
        .env("HOME", home.as_os_str())
        .env_remove("GRAPHBATCH_LOG")
        .env_remove("GRAPHBATCH_LOG_OUTPUT")
        .env_remove("GRAPHBATCH_LOG_FORMAT")
        .arg("--workspace")
        .arg(&workspace)
        .arg("--log-level")
        .arg("info")
        .arg("--log-output")
        .arg("file")
        .arg("--log-file")
        .arg(&log_file)
        .arg("delete")
        .arg("Image:1,2")
        .arg("Image:3")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "graphbatch delete should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Delete Image:3"), "stdout={}", stdout);

    let contents = fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("Submitting graph request"), "log={}", contents);
    assert!(contents.contains("Command finished"), "log={}", contents);
}

#[test]
fn test_quiet_parse_error_exits_non_zero() {
    let temp_dir = TempDir::new().unwrap();
    let bin = env!("CARGO_BIN_EXE_graphbatch");
    let output = Command::new(bin)
        .env("XDG_CONFIG_HOME", temp_dir.path().as_os_str())
        .env("HOME", temp_dir.path().as_os_str())
        .arg("--workspace")
        .arg(temp_dir.path())
        .arg("--quiet")
        .arg("delete")
        .arg("Image:abc")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Type[/Type...]:id"), "stderr={}", stderr);
}
