//! Binary-level checks on what the CLI writes where.

use std::process::Command;

fn jobboard() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_jobboard"));
    cmd.env_remove("RUST_LOG")
        .env_remove("JOBBOARD_API_BASE_URL")
        .env_remove("JOBBOARD_STORAGE_PATH")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn logs_go_to_stderr_and_stdout_stays_clean() {
    let dir = tempfile::tempdir().unwrap();
    let output = jobboard()
        .args(["--base-url", "http://127.0.0.1:9", "--storage-path"])
        .arg(dir.path().join("storage.json"))
        .arg("logout")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert_eq!(stdout, "signed out\n");
    assert!(stderr.contains("logout request failed"), "stderr was: {stderr}");
}

#[test]
fn status_prints_only_json_on_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let output = jobboard()
        .args(["--base-url", "http://127.0.0.1:9", "--storage-path"])
        .arg(dir.path().join("storage.json"))
        .arg("status")
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["isAuthenticated"], false);
}
