//! Checks how request-decoding failures are classified before they reach stderr.
//! The decode helpers are compiled in straight from `src/json/parse.rs`, so the
//! categories stay internal to the crate while still being asserted here.
//! Assertions look at category labels and hint text, never at echoed payloads.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_eof_errors() {
    let syntax_err = parse::from_str::<Value>(r#"[{"input":}]"#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_str::<Value>(r#"[{"input":"1""#).unwrap_err();
    assert_eq!(parse::categorize_error(&eof_err), ParseFailureCategory::Eof);
}

#[test]
fn shape_mismatch_is_a_data_error() {
    let err = parse::from_str::<Vec<Value>>(r#"{"input":"1","base":10}"#).unwrap_err();
    assert_eq!(parse::categorize_error(&err), ParseFailureCategory::Data);
    assert_eq!(ParseFailureCategory::Data.label(), "data");
}

#[test]
fn out_of_range_number_is_a_syntax_error() {
    let err = parse::from_str::<Value>("[1e400]").unwrap_err();
    assert_eq!(parse::categorize_error(&err), ParseFailureCategory::Syntax);
}

#[test]
fn hint_contains_category_position_and_context() {
    let err = parse::from_str::<Value>("[1,\n  2,]").unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: syntax"));
    assert!(hint.contains("line 2"));
    assert!(hint.contains("context: test.context"));
}

#[test]
fn valid_payload_decodes() {
    let value: Vec<Value> = parse::from_str(r#"[{"input":"1f","base":16}]"#).unwrap();
    assert_eq!(value.len(), 1);
    assert_eq!(value[0]["base"], 16);
}
