use super::*;
use crate::ErrorKind;
use pretty_assertions::assert_eq;

fn source(name: &str, text: &str) -> Arc<SourceText> {
    match SourceText::new(name, text.as_bytes()) {
        Ok(source) => Arc::new(source),
        Err(err) => panic!("{err}"),
    }
}

#[test]
fn invalid_character_message() {
    let root = source("root.jst", "get /cats\n");
    let err = JstError::invalid_character(
        Coordinates::at(root, 0),
        b'g',
        "in keyword \"\"",
        "directive",
    );
    assert_eq!(
        err.message(),
        "invalid character \"g\" in keyword \"\", expecting directive"
    );
    assert_eq!(err.code().kind(), ErrorKind::Lexical);
    assert_eq!(err.file_name(), "root.jst");
    assert_eq!(err.line(), Some(1));
    assert_eq!(err.quote().as_deref(), Some("get /cats"));
}

#[test]
fn sub_scanner_offsets_are_translated() {
    let root = source("root.jst", "TYPE @cat\n  {\n    \"a\": ]\n  }\n");
    let probe = ProbeError {
        offset: 11,
        message: "invalid character \"]\" in schema, expecting value".to_string(),
    };
    // The body starts at the `{` on line 2.
    let err = JstError::sub_scanner(root, 12, &probe);
    assert_eq!(err.code(), ErrorCode::E0003);
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.quote().as_deref(), Some("\"a\": ]"));
    assert_eq!(
        err.coordinates().map(|c| c.span()),
        Some(Span::at(23))
    );
}

#[test]
fn load_errors_have_no_line() {
    let err = JstError::load("missing.jst", "file not found");
    assert_eq!(err.file_name(), "missing.jst");
    assert_eq!(err.line(), None);
    assert_eq!(err.quote(), None);
    assert_eq!(err.to_string(), "error[E9001]: file not found\n --> missing.jst");
}

#[test]
fn unset_span_is_never_quoted() {
    let root = source("root.jst", "URL /\n");
    let err = JstError::context(Coordinates::new(root, Span::UNSET), "no place");
    assert_eq!(err.line(), None);
    assert_eq!(err.quote(), None);
}

#[test]
fn trace_renders_innermost_first() {
    let inner = source("b.jst", "TYPE @b\n  oops\n");
    let middle = source("a.jst", "INFO\nPASTE @b\n");
    let root = source("root.jst", "JSIGHT 0.3\n\nURL /\n  PASTE @a\n");

    let err = JstError::lexical(Coordinates::at(inner, 10), "bad schema")
        .attach_include_trace(&middle, 5)
        .attach_include_trace(&root, 21);

    assert_eq!(
        err.trace(),
        &[
            IncludeTraceEntry {
                file: "a.jst".into(),
                line: 2
            },
            IncludeTraceEntry {
                file: "root.jst".into(),
                line: 4
            },
        ]
    );
    assert_eq!(
        err.to_string(),
        "error[E0001]: bad schema\n --> b.jst:2\n  | oops\na.jst:2\nroot.jst:4"
    );
}

#[test]
fn oversized_sources_become_load_errors() {
    let err = JstError::from(SourceTooLarge {
        name: "huge.jst".into(),
        len: usize::MAX,
    });
    assert_eq!(err.code().kind(), ErrorKind::Load);
    assert_eq!(err.file_name(), "huge.jst");
}
