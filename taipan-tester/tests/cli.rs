use std::process::Command;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "taipan-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_writes_json_report_to_file() {
    let exe = env!("CARGO_BIN_EXE_taipan-tester");
    let output_path = temp_path("json");
    let status = Command::new(exe)
        .args([
            "--seeds",
            "1860,GN-LORCHA07",
            "--voyages",
            "3",
            "--report",
            "json",
            "--output",
        ])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());

    let content = std::fs::read_to_string(&output_path).expect("read output");
    let records: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let records = records.as_array().expect("array of campaigns");
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["seed_code"], "GN-LORCHA07");
    assert_eq!(records[1]["start"], "guns");
    let _ = std::fs::remove_file(output_path);
}

#[test]
fn cli_console_report_is_deterministic() {
    let exe = env!("CARGO_BIN_EXE_taipan-tester");
    let run = || {
        let output = Command::new(exe)
            .args(["--seeds", "42", "--voyages", "4", "--report", "markdown"])
            .output()
            .expect("run cli");
        assert!(output.status.success());
        String::from_utf8_lossy(&output.stdout).into_owned()
    };
    let first = run();
    assert!(first.contains("Taipan Autopilot Results"));
    assert_eq!(first, run());
}

#[test]
fn cli_rejects_bad_seed_tokens() {
    let exe = env!("CARGO_BIN_EXE_taipan-tester");
    let output = Command::new(exe)
        .args(["--seeds", "XX-NOTACODE"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unrecognized seed token"));
}
