//! Tests for identifier and literal helpers

use rstest::rstest;

use crate::rules::text::{quoted, sanitize_identifier};

#[rstest]
#[case("threat_detection", "threat_detection")]
#[case("my-rule name", "my_rule_name")]
#[case("2024_hunt", "_2024_hunt")]
#[case("", "fallback")]
#[case("évil", "_vil")]
fn test_sanitize_identifier(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(sanitize_identifier(raw, "fallback"), expected);
}

#[test]
fn test_quoted_escapes() {
    assert_eq!(quoted("plain"), "\"plain\"");
    assert_eq!(quoted(r#"a"b\c"#), r#""a\"b\\c""#);
}
