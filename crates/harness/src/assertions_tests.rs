#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

fn result_with(output: &str, exit_code: i32) -> CommandResult {
    CommandResult {
        command: "license_finder --quiet".to_string(),
        output: output.to_string(),
        exit_code,
    }
}

#[test]
fn test_contains_text_substring() {
    let result = result_with("argparse, 1.2.1, MIT\n", 0);

    assert!(result.contains_text("argparse"));
    assert!(result.contains_text("1.2.1, MIT"));
    assert!(!result.contains_text("gmaps"));
}

#[test]
fn test_contains_line_anchors_on_full_lines() {
    let result = result_with("Dependencies that need approval:\nargparse, 1.2.1, MIT\n", 0);

    assert!(result.contains_line("argparse, 1.2.1, MIT"));
    assert!(result.contains_line("Dependencies that need approval:"));
    assert!(!result.contains_line("argparse"));
}

#[test]
fn test_contains_line_escapes_regex_metacharacters() {
    let result = result_with("version (approved)\n", 0);

    assert!(result.contains_line("version (approved)"));
    assert!(!result.contains_line("version .approved."));
}

#[test]
fn test_matches_arbitrary_pattern() {
    let result = result_with("argparse, 1.2.1, MIT\n", 0);

    assert!(result.matches(&Regex::new(r"argparse.*MIT").unwrap()));
    assert!(result.matches(&Regex::new(r"(?m)^argparse").unwrap()));
    assert!(!result.matches(&Regex::new(r"^MIT").unwrap()));
}

#[test]
fn test_exit_code_is_exact() {
    let result = result_with("", 130);

    assert!(result.exit_code_is(130));
    assert!(!result.exit_code_is(0));
    assert!(!result.exit_code_is(1));
}
