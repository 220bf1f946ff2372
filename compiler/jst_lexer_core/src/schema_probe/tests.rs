use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn jsight(source: &str) -> Result<u32, ProbeError> {
    probe_length(source.as_bytes(), SchemaGrammar::Jsight)
}

fn regex(source: &str) -> Result<u32, ProbeError> {
    probe_length(source.as_bytes(), SchemaGrammar::Regex)
}

fn len(source: &str) -> u32 {
    u32::try_from(source.len()).unwrap_or(u32::MAX)
}

// === JSight values ===

#[test]
fn object_spans_exactly_its_bytes() {
    let body = "{\n  \"id\": 1,\n  \"name\": \"Tom\"\n}";
    assert_eq!(jsight(body), Ok(len(body)));
}

#[test]
fn stops_at_end_of_closing_line() {
    let body = "{\"a\": [1, 2]}";
    let source = format!("{body}   \nGET /next");
    assert_eq!(jsight(&source), Ok(len(body)));
}

#[test]
fn nested_containers() {
    let body = "[{\"a\": [[], {}]}, [1, [2, [3]]]]";
    assert_eq!(jsight(body), Ok(len(body)));
}

#[test]
fn scalar_values() {
    for body in ["123", "-1.5e3", "true", "null", "@cat", "\"text\"", "@cat|@dog"] {
        assert_eq!(jsight(body), Ok(len(body)), "{body}");
    }
}

#[test]
fn braces_inside_strings_are_ignored() {
    let body = r#"{"a": "}]{[", "b": "quote \" inside"}"#;
    assert_eq!(jsight(body), Ok(len(body)));
}

#[test]
fn annotations_and_comments_inside_object() {
    let body = "{\n  \"id\": 1, // {min: 1}\n  # comment }\n  /# block } #/\n  \"x\": 2 // plain\n}";
    assert_eq!(jsight(body), Ok(len(body)));
}

#[test]
fn multi_line_rules_annotation() {
    let body = "{\n  \"id\": 1 // {\n    min: 1,\n    max: \"}\"\n  } trailing\n}";
    assert_eq!(jsight(body), Ok(len(body)));
}

#[test]
fn trailing_annotation_is_part_of_body() {
    let body = "{\"a\": 1} // {additionalProperties: true}";
    let source = format!("{body}\n");
    assert_eq!(jsight(&source), Ok(len(body)));
}

#[test]
fn trailing_comment_is_part_of_body() {
    let body = "42 # the answer";
    assert_eq!(jsight(body), Ok(len(body)));
}

#[test]
fn unclosed_object_reports_expected_closer() {
    let err = jsight("{\"a\": [1, 2]").err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.message, "unexpected end of file, expecting \"}\"");
}

#[test]
fn mismatched_closer_is_rejected() {
    let err = jsight("{\"a\": 1]").err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.offset, 7);
    assert_eq!(
        err.message,
        "invalid character \"]\" in schema, expecting value or \"}\""
    );
}

#[test]
fn garbage_after_value_is_rejected() {
    let err = jsight("{} x").err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.offset, 3);
    assert_eq!(
        err.message,
        "invalid character \"x\" after schema, expecting end of line or annotation"
    );
}

#[test]
fn string_may_not_span_lines() {
    let err = jsight("{\"a\n\"}").err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.offset, 3);
    assert_eq!(err.message, "unterminated string in schema");
}

#[test]
fn invalid_start_byte() {
    let err = jsight(")").err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.offset, 0);
    assert_eq!(
        err.message,
        "invalid character \")\" at schema start, expecting schema value"
    );
}

// === Regex ===

#[test]
fn regex_body() {
    let body = r"/^[a-z]+\/\d{2}$/";
    assert_eq!(regex(&format!("{body}\n")), Ok(len(body)));
}

#[test]
fn regex_with_annotation() {
    let body = "/^a$/ // letters only";
    assert_eq!(regex(body), Ok(len(body)));
}

#[test]
fn regex_must_start_with_slash() {
    let err = regex("abc/").err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(
        err.message,
        "invalid character \"a\" at regex start, expecting \"/\""
    );
}

#[test]
fn regex_must_close_on_its_line() {
    let err = regex("/abc\n/").err();
    let err = err.unwrap_or_else(|| panic!("expected an error"));
    assert_eq!(err.offset, 4);
    assert_eq!(err.message, "unterminated regex");
}

// === Rendering ===

#[test]
fn describe_byte_escapes_control_bytes() {
    assert_eq!(describe_byte(b'a'), "a");
    assert_eq!(describe_byte(b'\n'), "\\n");
    assert_eq!(describe_byte(0xFF), "\\xFF");
}

// === Properties ===

proptest! {
    #[test]
    fn nested_arrays_span_every_bracket(depth in 1usize..200) {
        let body = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let source = format!("{body}\nGET /next");
        prop_assert_eq!(jsight(&source), Ok(len(&body)));
    }

    #[test]
    fn trailing_blanks_are_not_counted(blanks in "[ \t]{0,8}") {
        let body = "{\"a\": 1}";
        let source = format!("{body}{blanks}\n");
        prop_assert_eq!(jsight(&source), Ok(len(body)));
    }
}
