//! AST definitions

use serde::ser::{SerializeTuple, Serializer};
use serde::Serialize;

/// Operator tags produced by the math tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `<`
    Csm,
    /// `>`
    Clg,
    /// `(`
    Bro,
    /// `)`
    Brc,
    /// `!=`
    Not,
    /// `==`
    Ceq,
    /// `<=`
    Cse,
    /// `>=`
    Cle,
}

impl Operator {
    /// Two-character operators come first so they win over their prefixes
    const SYMBOLS: [(&'static str, Operator); 12] = [
        ("!=", Operator::Not),
        ("==", Operator::Ceq),
        (">=", Operator::Cle),
        ("<=", Operator::Cse),
        ("+", Operator::Add),
        ("-", Operator::Sub),
        ("*", Operator::Mul),
        ("/", Operator::Div),
        ("<", Operator::Csm),
        (">", Operator::Clg),
        ("(", Operator::Bro),
        (")", Operator::Brc),
    ];

    /// Match an operator at the start of `s`, returning it and its length
    pub fn match_prefix(s: &str) -> Option<(Operator, usize)> {
        Self::SYMBOLS
            .iter()
            .find(|(sym, _)| s.starts_with(sym))
            .map(|(sym, op)| (*op, sym.len()))
    }
}

/// One element of a flat, precedence-free expression
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MathToken {
    Num(f64),
    Op(Operator),
    /// Any operand that is not a number (variable name, literal text)
    Name(String),
}

/// Literal or reference used as an operand or argument
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Num(f64),
    /// String literal with escapes resolved
    Str(String),
    Var(String),
    /// Array element access `var[element]`
    Elm { var: String, element: usize },
    Array(Vec<Value>),
    /// `name(...)` or `module.name(...)`
    Call {
        module: Option<String>,
        name: String,
        params: Vec<Value>,
    },
    Math(Vec<MathToken>),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Num(_) => "num",
            Value::Str(_) => "str",
            Value::Var(_) => "var",
            Value::Elm { .. } => "elm",
            Value::Array(_) => "array",
            Value::Call { .. } => "call",
            Value::Math(_) => "math",
        }
    }
}

#[derive(Serialize)]
struct ElmPayload<'a> {
    var: &'a str,
    element: usize,
}

#[derive(Serialize)]
struct CallPayload<'a> {
    module: Option<&'a str>,
    name: &'a str,
    params: &'a [Value],
}

/// pax3 encodes every value as a `[kind, payload]` pair
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(self.kind())?;
        match self {
            Value::Bool(b) => pair.serialize_element(b)?,
            Value::Num(n) => pair.serialize_element(n)?,
            Value::Str(s) | Value::Var(s) => pair.serialize_element(s)?,
            Value::Elm { var, element } => pair.serialize_element(&ElmPayload {
                var,
                element: *element,
            })?,
            Value::Array(elements) => pair.serialize_element(elements)?,
            Value::Call {
                module,
                name,
                params,
            } => pair.serialize_element(&CallPayload {
                module: module.as_deref(),
                name,
                params,
            })?,
            Value::Math(tokens) => pair.serialize_element(tokens)?,
        }
        pair.end()
    }
}

/// Statement types
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Import { name: String },
    Delete { var: String },
    If { condition: Vec<MathToken> },
    Elif { condition: Vec<MathToken> },
    Else,
    While { condition: Vec<MathToken> },
    Try,
    /// `#name(a, b):`
    Function { name: String, parameters: Vec<String> },
    /// Recognized header with no loop semantics yet
    For,
    Call { name: String, params: Vec<Value> },
    /// Bare instruction: `name arg, arg`
    Statement { name: String, params: Vec<Value> },
    Assignment { var: String, value: Value },
    /// `@mixin value`
    Mixin { value: String },
}

impl Stmt {
    /// The `type` tag written to pax3 records
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::Import { .. } => "import",
            Stmt::Delete { .. } => "delete",
            Stmt::If { .. } => "if",
            Stmt::Elif { .. } => "elif",
            Stmt::Else => "else",
            Stmt::While { .. } => "while",
            Stmt::Try => "try",
            Stmt::Function { .. } => "function",
            Stmt::For => "for",
            Stmt::Call { .. } => "call",
            Stmt::Statement { .. } => "statement",
            Stmt::Assignment { .. } => "assignment",
            Stmt::Mixin { .. } => "mixin",
        }
    }

    /// Whether this statement owns a nested body
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Stmt::If { .. }
                | Stmt::Elif { .. }
                | Stmt::Else
                | Stmt::While { .. }
                | Stmt::Try
                | Stmt::Function { .. }
        )
    }
}

/// Assembled statement with its source line
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub line: usize,
    pub stmt: Stmt,
    /// `Some` exactly when `stmt.is_block()`
    pub body: Option<Vec<Node>>,
}

impl Node {
    pub fn leaf(line: usize, stmt: Stmt) -> Self {
        Self {
            line,
            stmt,
            body: None,
        }
    }

    pub fn block(line: usize, stmt: Stmt, body: Vec<Node>) -> Self {
        Self {
            line,
            stmt,
            body: Some(body),
        }
    }
}
