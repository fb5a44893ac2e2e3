//! Integration tests for the `poolguard` CLI binary.
//!
//! Every test runs with `--offline` against the built-in sample data and a
//! throwaway config path, so nothing touches the network or the user's
//! real configuration.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Bare command with env isolation and a config file inside `dir`.
fn poolguard_at(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("poolguard");
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("POOLGUARD_OUTPUT")
        .env_remove("POOLGUARD_STORE_URL")
        .env_remove("POOLGUARD_TIMEOUT")
        .env_remove("POOLGUARD_OFFLINE")
        .env_remove("SUPABASE_URL")
        .env_remove("SUPABASE_ANON_KEY")
        .env_remove("GEMINI_API_KEY")
        .env("POOLGUARD_CONFIG", dir.join("config.toml"));
    cmd
}

/// Isolated command pinned to sample data.
fn offline(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = poolguard_at(dir.path());
    cmd.arg("--offline");
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn no_args_shows_help() {
    let dir = TempDir::new().unwrap();
    poolguard_at(dir.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    poolguard_at(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("status")
            .and(predicate::str::contains("stock"))
            .and(predicate::str::contains("tasks"))
            .and(predicate::str::contains("advice")),
    );
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    poolguard_at(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("poolguard"));
}

#[test]
fn completions_bash() {
    let dir = TempDir::new().unwrap();
    poolguard_at(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Status / dose / history ─────────────────────────────────────────

#[test]
fn status_reports_sample_backend() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["status", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""backend": "sample""#)
                .and(predicate::str::contains(r#""water_state": "green""#))
                .and(predicate::str::contains(r#""ph_warning": true"#)),
        );
}

#[test]
fn status_table_shows_green_warning() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Pool status")
                .and(predicate::str::contains("feeding algae growth")),
        );
}

#[test]
fn status_records_a_new_reading() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["status", "--ph", "7.4", "--chlorine", "1.5", "--water", "clear"])
        .args(["-o", "plain"])
        .assert()
        .success()
        .stdout("clear\n");
}

#[test]
fn status_clamps_out_of_range_readings() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["status", "--ph", "12", "--chlorine", "-3", "-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""ph": 8.5"#)
                .and(predicate::str::contains(r#""chlorine": 0.0"#)),
        );
}

#[test]
fn dose_plain_prints_acid_millilitres() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["dose", "--ph", "8.2", "--target", "7.2", "-o", "plain"])
        .assert()
        .success()
        .stdout("7000\n");
}

#[test]
fn dose_table_shows_all_three_doses() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["dose", "--ph", "8.2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("7 L")
                .and(predicate::str::contains("1.4 kg"))
                .and(predicate::str::contains("Algaecide shock: 1.4 L")),
        );
}

#[test]
fn dose_below_target_needs_no_acid() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["dose", "--ph", "7.0", "-o", "plain"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn history_lists_newest_first() {
    let dir = TempDir::new().unwrap();
    let output = offline(&dir)
        .args(["history", "-o", "plain"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines.first().copied(), Some("8.2"));
    assert_eq!(lines.last().copied(), Some("7.2"));
}

#[test]
fn history_table_includes_trend() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("pH over 7 readings"));
}

// ── Stock ───────────────────────────────────────────────────────────

#[test]
fn stock_list_plain_ids() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "list", "-o", "plain"])
        .assert()
        .success()
        .stdout("1\n2\n3\n4\n");
}

#[test]
fn stock_adjust_by_name_floors_at_zero() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "adjust", "granular chlorine", "-20", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""quantity": 0.0"#));
}

#[test]
fn stock_adjust_unknown_item_is_not_found() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "adjust", "Bromine", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Bromine"));
}

#[test]
fn stock_adjust_rejects_nan() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "adjust", "1", "NaN"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("delta"));
}

#[test]
fn stock_add_rejects_infinite_quantity() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "add", "pH Plus", "--quantity", "inf"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("quantity"));
}

#[test]
fn stock_add_returns_new_item() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "add", "pH Plus", "--quantity", "2", "--target", "4", "--unit", "kg"])
        .args(["-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""name": "pH Plus""#)
                .and(predicate::str::contains(r#""unit": "kg""#)),
        );
}

#[test]
fn stock_remove_requires_yes_when_not_interactive() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "remove", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn stock_remove_with_yes() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["stock", "remove", "1", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed Granular Chlorine"));
}

// ── Tasks ───────────────────────────────────────────────────────────

#[test]
fn tasks_pending_filter() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["tasks", "list", "--pending", "-o", "plain"])
        .assert()
        .success()
        .stdout("t1\nt2\nt3\nt5\n");
}

#[test]
fn tasks_add_prints_the_task() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["tasks", "add", "Backwash filter", "-f", "biweekly", "-c", "mechanical"])
        .args(["-o", "json"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""description": "Backwash filter""#)
                .and(predicate::str::contains(r#""frequency": "biweekly""#)),
        );
}

#[test]
fn tasks_add_blank_is_rejected() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["tasks", "add", "   "])
        .assert()
        .code(2);
}

#[test]
fn tasks_toggle_marks_done() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["tasks", "toggle", "t1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("marked done"));
}

#[test]
fn tasks_toggle_is_ignored_while_configuring() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["tasks", "toggle", "t1", "--edit-mode", "configuring"])
        .assert()
        .success()
        .stderr(predicate::str::contains("being configured"));
}

#[test]
fn tasks_toggle_unknown_is_not_found() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["tasks", "toggle", "nope"])
        .assert()
        .code(4);
}

// ── Log / advice ────────────────────────────────────────────────────

#[test]
fn log_plain_ids() {
    let dir = TempDir::new().unwrap();
    offline(&dir)
        .args(["log", "-o", "plain"])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[test]
fn advice_without_key_prints_fixed_message() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[advisory]\napi_key_env = \"POOLGUARD_TEST_UNSET_ADVISORY_KEY\"\n",
    )
    .unwrap();

    offline(&dir)
        .arg("advice")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not reach the pool advisor."));
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn config_path_honours_flag() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("elsewhere.toml");
    poolguard_at(dir.path())
        .args(["config", "path", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("elsewhere.toml"));
}

#[test]
fn config_set_then_show() {
    let dir = TempDir::new().unwrap();
    poolguard_at(dir.path())
        .args(["config", "set", "pool.location", "Arica, Chile"])
        .assert()
        .success();

    assert!(dir.path().join("config.toml").exists());

    poolguard_at(dir.path())
        .args(["config", "show", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Arica, Chile"));
}

#[test]
fn config_show_masks_secrets() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[store]\nanon_key = \"very-secret-anon\"\n",
    )
    .unwrap();

    poolguard_at(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("****").and(predicate::str::contains("very-secret").not()),
        );
}

#[test]
fn config_set_unknown_key_is_usage_error() {
    let dir = TempDir::new().unwrap();
    poolguard_at(dir.path())
        .args(["config", "set", "pool.depth", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown config key"));
}

#[test]
fn invalid_dosage_config_is_usage_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[dosage]\npool_volume_m3 = 0\n",
    )
    .unwrap();

    offline(&dir).arg("status").assert().code(2);
}
