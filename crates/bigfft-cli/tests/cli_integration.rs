//! Integration tests for the bigfft CLI binary.
//!
//! These tests verify the CLI behavior by running the actual binary and
//! checking its output and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;

/// Returns a Command configured to run the bigfft CLI binary.
fn bigfft_cmd() -> Command {
    Command::cargo_bin("bigfft").unwrap()
}

// ============================================================================
// Basic Parse Tests
// ============================================================================

#[test]
fn cli_parses_decimal_digit_string() {
    bigfft_cmd()
        .arg("123456789012345678901234567890")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bit length"))
        .stdout(predicate::str::contains("Limb count"));
}

#[test]
fn cli_parses_single_digit() {
    bigfft_cmd()
        .arg("7")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign"));
}

#[test]
fn cli_parses_leading_zeros() {
    bigfft_cmd()
        .arg("0007")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bit length"));
}

// ============================================================================
// Flag Tests
// ============================================================================

#[test]
fn cli_detail_flag_shows_analysis() {
    bigfft_cmd()
        .args(["123456789012345678901234567890", "--detail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detailed analysis"))
        .stdout(predicate::str::contains("Input digit count"));
}

#[test]
fn cli_detail_short_flag() {
    bigfft_cmd()
        .args(["12345", "-d"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Detailed analysis"));
}

#[test]
fn cli_sequential_flag_reports_sequential_mode() {
    bigfft_cmd()
        .args(["12345", "--seq"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sequential"));
}

#[test]
fn cli_sequential_short_flag() {
    bigfft_cmd().args(["12345", "-s"]).assert().success();
}

#[test]
fn cli_default_mode_reports_parallel() {
    bigfft_cmd()
        .arg("12345")
        .assert()
        .success()
        .stdout(predicate::str::contains("Parallel"));
}

// ============================================================================
// Bench Subcommand Tests
// ============================================================================

#[test]
fn cli_bench_subcommand_default_sizes() {
    bigfft_cmd()
        .args(["bench", "--sizes", "10,100"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Comparison Summary"));
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn cli_help_displays() {
    bigfft_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Arbitrary-precision decimal parsing harness",
        ))
        .stdout(predicate::str::contains("--detail"));
}

#[test]
fn cli_version_displays() {
    bigfft_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bigfft"));
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn cli_invalid_digit_shows_error() {
    bigfft_cmd()
        .arg("12a45")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid digit"));
}

#[test]
fn cli_file_and_positional_conflict() {
    bigfft_cmd()
        .args(["12345", "--file", "/nonexistent/path"])
        .assert()
        .failure();
}

// ============================================================================
// Output Consistency Tests
// ============================================================================

#[test]
fn cli_shows_execution_configuration() {
    bigfft_cmd()
        .arg("100")
        .assert()
        .success()
        .stdout(predicate::str::contains("Execution Configuration"))
        .stdout(predicate::str::contains("bigfft"))
        .stdout(predicate::str::contains("logical processors"));
}

#[test]
fn cli_no_args_prints_help() {
    bigfft_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Arbitrary-precision decimal parsing harness",
        ));
}
