//! parser module tests
//!
//! Kept out of mod.rs to keep the classifier readable.

use super::*;
use crate::config::ParserOptions;
use crate::lexer::tokenize;
use pretty_assertions::assert_eq;

fn parse_src(src: &str) -> Result<Vec<Node>> {
    let lines: Vec<&str> = src.lines().collect();
    parse(tokenize(&lines, &ParserOptions::default())?)
}

fn name(s: &str) -> MathToken {
    MathToken::Name(s.to_string())
}

#[test]
fn test_shape_priority() {
    assert_eq!(shape_of("import math"), Some(Shape::Import));
    assert_eq!(shape_of("importer = 1"), Some(Shape::Assignment));
    assert_eq!(shape_of("if a > 1:"), Some(Shape::If));
    assert_eq!(shape_of("iffy"), Some(Shape::Statement));
    assert_eq!(shape_of("#main(a, b):"), Some(Shape::Function));
    assert_eq!(shape_of("x = a == b"), Some(Shape::Assignment));
    assert_eq!(shape_of("x == 1"), Some(Shape::Statement));
    assert_eq!(shape_of("print(1)"), Some(Shape::Call));
    assert_eq!(shape_of("print 1, 2"), Some(Shape::Statement));
    assert_eq!(shape_of("@mixin lib.func"), Some(Shape::Mixin));
    assert_eq!(shape_of("f(1) + g(2)"), None);
    assert_eq!(shape_of("1 + 2"), None);
}

#[test]
fn test_parse_import_and_delete() {
    assert_eq!(
        classify("import math", 1).unwrap(),
        Stmt::Import {
            name: "math".to_string()
        }
    );
    assert_eq!(
        classify("delete counter", 1).unwrap(),
        Stmt::Delete {
            var: "counter".to_string()
        }
    );
}

#[test]
fn test_empty_import_rejected() {
    let err = classify("import", 4).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Syntax error @ line 4: Import statement cannot be empty"
    );
    let err = classify("delete   ", 5).unwrap_err();
    assert_eq!(err.line(), Some(5));
}

#[test]
fn test_parse_if_condition() {
    assert_eq!(
        classify("if c == 2:", 1).unwrap(),
        Stmt::If {
            condition: vec![name("c"), MathToken::Op(Operator::Ceq), MathToken::Num(2.0)]
        }
    );
}

#[test]
fn test_condition_keyword_not_stripped_inside_names() {
    assert_eq!(
        classify("elif diff >= 1:", 1).unwrap(),
        Stmt::Elif {
            condition: vec![name("diff"), MathToken::Op(Operator::Cle), MathToken::Num(1.0)]
        }
    );
}

#[test]
fn test_condition_without_operator_rejected() {
    let err = classify("while running:", 3).unwrap_err();
    assert_eq!(err.to_string(), "Syntax error @ line 3: Invalid equation");
}

#[test]
fn test_header_requires_trailing_colon() {
    let err = classify("if a > 1: b()", 2).unwrap_err();
    assert!(matches!(err, AspError::Syntax { line: 2, .. }));
    let err = classify("else: b()", 2).unwrap_err();
    assert!(matches!(err, AspError::Syntax { line: 2, .. }));
}

#[test]
fn test_parse_function_header() {
    assert_eq!(
        classify("#add(a, b):", 1).unwrap(),
        Stmt::Function {
            name: "add".to_string(),
            parameters: vec!["a".to_string(), "b".to_string()]
        }
    );
    assert_eq!(
        classify("#main():", 1).unwrap(),
        Stmt::Function {
            name: "main".to_string(),
            parameters: vec![]
        }
    );
}

#[test]
fn test_function_header_invalid_parameters() {
    for src in ["#f(a, 1+b):", "#f(a,,b):", "#f(\"a\"):"] {
        let err = classify(src, 6).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Syntax error @ line 6: Invalid function parameters"
        );
    }
}

#[test]
fn test_parse_assignment_math() {
    assert_eq!(
        classify("total = a + b * 2", 1).unwrap(),
        Stmt::Assignment {
            var: "total".to_string(),
            value: Value::Math(vec![
                name("a"),
                MathToken::Op(Operator::Add),
                name("b"),
                MathToken::Op(Operator::Mul),
                MathToken::Num(2.0),
            ])
        }
    );
}

#[test]
fn test_parse_call_with_nested_arguments() {
    assert_eq!(
        classify(r#"f([1,2,3], "x,y")"#, 1).unwrap(),
        Stmt::Call {
            name: "f".to_string(),
            params: vec![
                Value::Array(vec![Value::Num(1.0), Value::Num(2.0), Value::Num(3.0)]),
                Value::Str("x,y".to_string()),
            ]
        }
    );
}

#[test]
fn test_parse_call_without_arguments() {
    assert_eq!(
        classify("tick()", 1).unwrap(),
        Stmt::Call {
            name: "tick".to_string(),
            params: vec![]
        }
    );
}

#[test]
fn test_parse_statement() {
    assert_eq!(
        classify(r#"print "hi", x"#, 1).unwrap(),
        Stmt::Statement {
            name: "print".to_string(),
            params: vec![Value::Str("hi".to_string()), Value::Var("x".to_string())]
        }
    );
    assert_eq!(
        classify("return", 1).unwrap(),
        Stmt::Statement {
            name: "return".to_string(),
            params: vec![]
        }
    );
}

#[test]
fn test_parse_mixin() {
    assert_eq!(
        classify("@mixin stdlib.out", 1).unwrap(),
        Stmt::Mixin {
            value: "stdlib.out".to_string()
        }
    );
}

#[test]
fn test_for_header_is_inert() {
    assert_eq!(classify("for i in items:", 1).unwrap(), Stmt::For);
    assert!(!Stmt::For.is_block());
}

#[test]
fn test_unknown_shape_is_syntax_error() {
    let err = classify("$$$", 12).unwrap_err();
    assert_eq!(err.to_string(), "Syntax error @ line 12: Invalid syntax");
}

#[test]
fn test_block_nesting() {
    let code = r#"
if a > 1:
    b(1)
    if c == 2:
        d(3)
e(4)
"#;
    let tree = parse_src(code).unwrap();
    assert_eq!(tree.len(), 2);

    let outer = &tree[0];
    assert_eq!(outer.line, 2);
    let body = outer.body.as_ref().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body[0].stmt.kind(), "call");
    assert_eq!(
        body[1].stmt,
        Stmt::If {
            condition: vec![name("c"), MathToken::Op(Operator::Ceq), MathToken::Num(2.0)]
        }
    );
    let inner = body[1].body.as_ref().unwrap();
    assert_eq!(
        inner[0].stmt,
        Stmt::Call {
            name: "d".to_string(),
            params: vec![Value::Num(3.0)]
        }
    );

    assert_eq!(tree[1].line, 6);
    assert!(tree[1].body.is_none());
}

#[test]
fn test_function_body_with_blank_lines() {
    let code = r#"
#greet(who):

    print "hello", who

    done()
greet("me")
"#;
    let tree = parse_src(code).unwrap();
    assert_eq!(tree.len(), 2);
    let body = tree[0].body.as_ref().unwrap();
    assert_eq!(body.iter().map(|n| n.line).collect::<Vec<_>>(), vec![4, 6]);
}

#[test]
fn test_for_header_alone_is_inert_node() {
    let tree = parse_src("for x in y:\na()\n").unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].stmt, Stmt::For);
    assert!(tree[0].body.is_none());
}

#[test]
fn test_for_body_rejected() {
    let err = parse_src("for x in y:\n    a()\n").unwrap_err();
    assert!(matches!(err, AspError::Indentation { line: 2, .. }));
}

#[test]
fn test_sibling_header_body_two_levels_deep_rejected() {
    let code = "if a > 1:\n    b()\nif c > 1:\n        d()\n        e()\n";
    let err = parse_src(code).unwrap_err();
    assert!(matches!(err, AspError::Indentation { line: 4, .. }));
}
