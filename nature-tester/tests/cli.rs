use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "nature-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_nature-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("random-play"));
}

#[test]
fn cli_runs_catalog_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_nature-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "all",
            "--iterations",
            "2",
            "--seeds",
            "1,0x2A",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Nature Explorer Play Tester"));

    let report = std::fs::read_to_string(output_path).expect("read report");
    let value: serde_json::Value = serde_json::from_str(&report).expect("json report");
    let runs = value.as_array().expect("array of results");
    assert_eq!(runs.len(), 22);
    assert!(runs.iter().all(|run| run["passed"] == true));
}

#[test]
fn cli_rejects_bad_seeds() {
    let exe = env!("CARGO_BIN_EXE_nature-tester");
    let output = Command::new(exe)
        .args(["--seeds", "not-a-seed"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid seed"));
}

#[test]
fn cli_keeps_saves_on_disk() {
    let exe = env!("CARGO_BIN_EXE_nature-tester");
    let save_dir = temp_path("saves");
    let output = Command::new(exe)
        .args([
            "--scenarios",
            "persistence-roundtrip",
            "--iterations",
            "1",
            "--seeds",
            "9",
            "--report",
            "markdown",
            "--save-dir",
        ])
        .arg(&save_dir)
        .output()
        .expect("run cli");
    assert!(output.status.success());
    assert!(
        save_dir
            .join("persistence-roundtrip")
            .join("seed-9")
            .join("gameState.json")
            .exists()
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("# Nature Explorer Play Test Results"));
}
