#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

const REPORT: &str = r#"
<html>
  <body>
    <h1>Dependencies</h1>
    <div class="dependency" id="argparse">
      <span class="version">1.2.1</span>
      <span class="license">MIT</span>
    </div>
    <div class="dependency" id="http-server">
      <span class="version">0.6.1</span>
      <span class="license">unknown</span>
    </div>
  </body>
</html>
"#;

#[test]
fn test_find_by_id_returns_the_dependency_fragment() {
    let fragment = find_by_id(REPORT, "argparse").unwrap();

    assert!(fragment.text.contains("1.2.1"));
    assert!(fragment.text.contains("MIT"));
    assert!(fragment.html.contains(r#"id="argparse""#));
}

#[test]
fn test_find_by_id_handles_hyphenated_names() {
    let fragment = find_by_id(REPORT, "http-server").unwrap();

    assert!(fragment.text.contains("0.6.1"));
}

#[test]
fn test_find_by_id_fails_for_missing_fragment() {
    let err = find_by_id(REPORT, "gmaps").unwrap_err();

    assert!(matches!(err, HarnessError::Lookup(_)));
    assert!(err.to_string().contains("gmaps"));
}

#[test]
fn test_find_tag_returns_the_title() {
    let fragment = find_tag(REPORT, "h1").unwrap();

    assert_eq!(fragment.text, "Dependencies");
}

#[test]
fn test_find_tag_fails_when_absent() {
    let err = find_tag("<p>no heading here</p>", "h1").unwrap_err();

    assert!(matches!(err, HarnessError::Lookup(_)));
}

#[test]
fn test_lookup_reparses_every_call() {
    // Two lookups over the same text are independent; nothing is cached, so
    // each sees exactly the text it was handed.
    assert!(find_tag(REPORT, "h1").is_ok());
    assert!(find_tag("<h1>Other</h1>", "h1").unwrap().text == "Other");
}
