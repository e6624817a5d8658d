use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn checksy() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_checksy"));
    cmd.env("NO_COLOR", "1").env_remove("CHECKSY_LOG");
    cmd
}

#[test]
fn test_diagnose_exit_codes_follow_fail_severity() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".checksy.yaml"),
        "rules:\n  - name: ok\n    check: exit 0\n  - name: flaky\n    check: echo nope; exit 1\n    severity: warning\n    hint: rerun it\n",
    )
    .unwrap();

    let out = checksy().arg("diagnose").current_dir(dir.path()).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("✅ ok"), "{}", stdout);
    assert!(stdout.contains("⚠️ flaky"), "{}", stdout);
    assert!(String::from_utf8_lossy(&out.stderr).contains("hint: rerun it"));

    let out = checksy()
        .args(["diagnose", "--fail-severity", "warn"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));
    assert!(String::from_utf8_lossy(&out.stdout).contains("1 rules failed validation"));
}

#[test]
fn test_diagnose_runs_in_config_directory() {
    let dir = tempdir().unwrap();
    let ws = dir.path().join("ws");
    fs::create_dir(&ws).unwrap();
    fs::write(ws.join("Cargo.toml"), "").unwrap();
    let cfg = ws.join("checks.yaml");
    fs::write(&cfg, "rules:\n  - check: test -f Cargo.toml\n").unwrap();

    let out = checksy()
        .args(["diagnose", "--output", "json", "--config"])
        .arg(&cfg)
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["summary"]["ok"], true);
    assert_eq!(json["rules"][0]["name"], "test -f Cargo.toml");
}

#[test]
fn test_operational_errors_exit_two() {
    let dir = tempdir().unwrap();
    let out = checksy().arg("diagnose").current_dir(dir.path()).output().unwrap();
    assert_eq!(out.status.code(), Some(2));

    fs::write(dir.path().join(".checksy.yaml"), "rules:\n  - name: x\n").unwrap();
    let out = checksy().arg("diagnose").current_dir(dir.path()).output().unwrap();
    assert_eq!(out.status.code(), Some(2));

    let out = checksy()
        .args(["diagnose", "--min-severity", "loud"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn test_schema_command_prints_json() {
    let out = checksy().args(["schema", "--pretty"]).output().unwrap();
    assert_eq!(out.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["required"][0], "rules");
}

#[test]
fn test_failing_rule_below_threshold_logs_nothing_by_default() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(".checksy.yaml"),
        "rules:\n  - name: flaky\n    check: echo nope; exit 1\n    severity: info\n",
    )
    .unwrap();

    for extra in [&[][..], &["--output", "json"][..]] {
        let out = checksy()
            .arg("diagnose")
            .args(extra)
            .env_remove("RUST_LOG")
            .current_dir(dir.path())
            .output()
            .unwrap();
        assert_eq!(out.status.code(), Some(0));
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(!stderr.contains(" WARN "), "{}", stderr);
        assert!(!stderr.contains("check failed"), "{}", stderr);
    }
}

#[test]
fn test_unknown_output_mode_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".checksy.yaml"), "rules:\n  - check: exit 0\n").unwrap();
    let out = checksy()
        .args(["diagnose", "--output", "yaml"])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("--output"));
}
