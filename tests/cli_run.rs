//! Behavioural tests for the `volscope` bulk and manual commands.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;
use tempfile::TempDir;

// Large enough that at least one PROD volume is generated and included.
const VOLUMES: &str = "500";

#[test]
fn cli_bulk_above_threshold_requires_yes() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.args(["--volumes", VOLUMES, "--confirm-threshold", "0", "exclude", "PROD"]);

    cmd.assert()
        .code(2)
        .stdout(contains("You are about to exclude all volumes matching \"PROD\""))
        .stdout(contains("Re-run with --yes to confirm."));
}

#[test]
fn cli_bulk_with_yes_applies_rule() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.args([
        "--volumes",
        VOLUMES,
        "--confirm-threshold",
        "0",
        "exclude",
        "--yes",
        "PROD",
    ]);

    cmd.assert()
        .success()
        .stdout(contains("volumes excluded from backup"))
        .stdout(contains("Total volumes:  500"));
}

#[test]
fn cli_threshold_reads_environment() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.env("VOLSCOPE_CONFIRM_THRESHOLD", "0");
    cmd.args(["--volumes", VOLUMES, "exclude", "--match", "starts-with", "prod"]);

    cmd.assert().code(2).stdout(contains("(starts with)"));
}

#[test]
fn cli_threshold_reads_config_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("volscope.toml");
    fs::write(&path, "confirm_threshold = 0\nseed_volume_count = 500\n").expect("write config");

    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.env("VOLSCOPE_CONFIG_PATH", &path);
    cmd.args(["exclude", "PROD"]);

    cmd.assert().code(2);
}

#[test]
fn cli_rejects_zero_volume_count() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.env("VOLSCOPE_SEED_VOLUME_COUNT", "0");
    cmd.arg("summary");

    cmd.assert()
        .failure()
        .code(1)
        .stderr(contains("VOLSCOPE_SEED_VOLUME_COUNT"));
}

#[test]
fn cli_move_in_reports_moved_count() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.args(["--volumes", "20", "move-in", "vol-404"]);

    cmd.assert()
        .success()
        .stdout(contains("No selected volumes to include"));
}

#[test]
fn cli_preview_counts_matches_as_json() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.args(["--volumes", "20", "--json", "preview", "--match", "contains", "ZZZZ"]);

    cmd.assert()
        .success()
        .stdout(contains("\"matches\": 0"))
        .stdout(contains("\"match_type\": \"contains\""));
}

#[test]
fn cli_rejects_blank_pattern() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.args(["--volumes", "20", "preview", "   "]);

    cmd.assert().failure().code(1).stderr(contains("pattern"));
}

#[test]
fn cli_reports_unknown_sysplex() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.args(["--volumes", "20", "--sysplex", "sysplex-9", "summary"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(contains("unknown sysplex 'sysplex-9'"));
}

#[test]
fn cli_move_out_all_empties_included_list() {
    let mut cmd = cargo_bin_cmd!("volscope");
    cmd.args(["--volumes", "20", "move-out", "--all"]);

    cmd.assert()
        .success()
        .stdout(contains("volumes excluded from backup"))
        .stdout(contains("Included:       0 (0.0%)"));
}
