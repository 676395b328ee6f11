// slipclean/tests/cli_integration_tests.rs
//! Command-line integration tests for the `slipclean` binary.
//!
//! Each test runs the real executable with `assert_cmd`, feeding stdin or a
//! temporary input file, and checks stdout, stderr and the exit status.

use anyhow::Result;
use assert_cmd::Command;
use assert_cmd::assert::Assert;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn slipclean() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("slipclean"));
    cmd.env_remove("SLIPCLEAN_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn run_with_stdin(input: &str, args: &[&str]) -> Assert {
    slipclean().args(args).write_stdin(input).assert()
}

#[test]
fn test_sanitizes_each_line_from_stdin() {
    run_with_stdin("<b>hi</b>\n<script>alert(1)</script>\n", &[])
        .success()
        .stdout("<b>hi</b>\n&lt;script&gt;alert(1)&lt;/script&gt;\n")
        .stderr("");
}

#[test]
fn test_autolinks_urls() {
    run_with_stdin("see http://example.com/a now\n", &[])
        .success()
        .stdout("see <a href=\"http://example.com/a\">[url]</a> now\n");
}

#[test]
fn test_whole_mode_keeps_tags_open_across_lines() {
    run_with_stdin("<i>a\nb</i>\n", &["--whole"])
        .success()
        .stdout("<i>ab</i>\n");
}

#[test]
fn test_validate_exits_with_status_two_on_rejection() {
    run_with_stdin("fine\n2024-01-02T03:04:05\n", &["--validate"])
        .code(2)
        .stdout("fine\n")
        .stderr(predicate::str::contains("line 2 rejected: disallowed timestamp-like content"))
        .stderr(predicate::str::contains("processed 2, rejected 1"));
}

#[test]
fn test_validate_quiet_suppresses_summary() {
    run_with_stdin("fine\n", &["--validate", "--quiet"])
        .success()
        .stdout("fine\n")
        .stderr("");
}

#[test]
fn test_json_output() {
    run_with_stdin("<u>x</u>\n\n", &["--validate", "--json", "-q"])
        .code(2)
        .stdout(
            "{\"line\":1,\"status\":\"accepted\",\"text\":\"<u>x</u>\"}\n\
             {\"line\":2,\"status\":\"rejected\",\"reason\":\"empty input not accepted\"}\n",
        );
}

#[test]
fn test_disable_rule_from_command_line() {
    run_with_stdin("2024-01-02T03:04:05\n", &["--validate", "-q", "-x", "timestamp"])
        .success()
        .stdout("2024-01-02T03:04:05\n");
}

#[test]
fn test_input_and_output_files() -> Result<()> {
    let dir = tempdir()?;
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    fs::write(&input, "<em>a</em> & <p>b</p>\n")?;

    slipclean()
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("")
        .stderr(predicate::str::contains("Writing sanitized content to file"));

    assert_eq!(fs::read_to_string(&output)?, "<em>a</em> &amp; &lt;p&gt;b&lt;/p&gt;\n");
    Ok(())
}

#[test]
fn test_custom_config_file() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("policy.yaml");
    fs::write(
        &config,
        r#"
policy:
  allowed_tags: [p]
validation:
  - name: shouting
    pattern: "[A-Z]{5}"
    reason: too loud
"#,
    )?;

    slipclean()
        .arg("--config")
        .arg(&config)
        .args(["--validate", "-q"])
        .write_stdin("<p>ok</p><b>no</b>\nHELLO\n")
        .assert()
        .code(2)
        .stdout("<p>ok</p>&lt;b&gt;no&lt;/b&gt;\n")
        .stderr(predicate::str::contains("line 2 rejected: too loud"));
    Ok(())
}

#[test]
fn test_invalid_config_fails_with_message() -> Result<()> {
    let dir = tempdir()?;
    let config = dir.path().join("bad.yaml");
    fs::write(&config, "validation:\n  - name: broken\n    pattern: \"(\"\n")?;

    slipclean()
        .arg("--config")
        .arg(&config)
        .write_stdin("x\n")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("'broken' has an invalid regex"));
    Ok(())
}

#[test]
fn test_missing_input_file_fails() {
    slipclean()
        .args(["--input", "/definitely/not/here.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to open input file"));
}

#[test]
fn test_print_config_shows_defaults() {
    slipclean()
        .arg("--print-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("allowed_tags"))
        .stdout(predicate::str::contains("name: timestamp"));
}

#[test]
fn test_debug_flag_enables_core_logging() {
    run_with_stdin("<b>open\n", &["--debug"])
        .success()
        .stdout("&lt;b&gt;open\n")
        .stderr(predicate::str::contains("Flattening unclosed <b>"));
}
