//! emitter module tests

use super::*;
use crate::parser::{MathToken, Operator, Value};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn as_json(records: Vec<Record>) -> Json {
    Json::Array(records.into_iter().map(Json::Object).collect())
}

#[test]
fn test_format_utc() {
    assert_eq!(format_utc(at(0)), "01-01-1970 00:00:00");
    assert_eq!(format_utc(at(1_700_000_000)), "14-11-2023 22:13:20");
    assert_eq!(format_utc(at(951_782_400)), "29-02-2000 00:00:00");
}

#[test]
fn test_format_utc_calendar_edges() {
    assert_eq!(format_utc(at(946_684_799)), "31-12-1999 23:59:59");
    assert_eq!(format_utc(at(1_709_208_001)), "29-02-2024 12:00:01");
    // 2100 is not a leap year
    assert_eq!(format_utc(at(4_107_542_400)), "01-03-2100 00:00:00");
}

#[test]
fn test_header_record() {
    let records = emit_at(&[], &ParserOptions::default(), at(0));
    assert_eq!(
        as_json(records),
        json!([{
            "line": 0,
            "type": "_HEADER",
            "format": "pax3",
            "info": format!("Parsed by asp3 version {}, 01-01-1970 00:00:00", env!("CARGO_PKG_VERSION"))
        }])
    );
}

#[test]
fn test_custom_header_title() {
    let options = ParserOptions::default().with_header_title("MAIN");
    let records = emit(&[], &options);
    assert_eq!(records[0]["type"], json!("MAIN"));
}

#[test]
fn test_emit_nested_blocks() {
    let tree = vec![Node::block(
        1,
        Stmt::While {
            condition: vec![
                MathToken::Name("i".to_string()),
                MathToken::Op(Operator::Csm),
                MathToken::Num(3.0),
            ],
        },
        vec![Node::leaf(
            2,
            Stmt::Call {
                name: "step".to_string(),
                params: vec![Value::Var("i".to_string())],
            },
        )],
    )];

    let records = emit_at(&tree, &ParserOptions::default(), at(0));
    assert_eq!(
        Json::Object(records[1].clone()),
        json!({
            "line": 1,
            "type": "while",
            "condition": ["i", "CSM", 3.0],
            "code": [
                {"line": 2, "type": "call", "name": "step", "params": [["var", "i"]]}
            ]
        })
    );
}

#[test]
fn test_assignment_keyword_option() {
    let tree = vec![Node::leaf(
        3,
        Stmt::Assignment {
            var: "x".to_string(),
            value: Value::Bool(false),
        },
    )];
    let options = ParserOptions::default().with_assignment_kw("value");
    let records = emit_at(&tree, &options, at(0));
    assert_eq!(
        Json::Object(records[1].clone()),
        json!({"line": 3, "type": "assignment", "var": "x", "value": ["bool", false]})
    );
}

#[test]
fn test_for_stub_flagged() {
    let records = emit_at(&[Node::leaf(1, Stmt::For)], &ParserOptions::default(), at(0));
    assert_eq!(
        Json::Object(records[1].clone()),
        json!({"line": 1, "type": "for", "unimplemented": true})
    );
}

#[test]
fn test_empty_block_emits_empty_code() {
    let records = emit_at(
        &[Node::block(1, Stmt::Try, vec![])],
        &ParserOptions::default(),
        at(0),
    );
    assert_eq!(records[1]["code"], json!([]));
}
