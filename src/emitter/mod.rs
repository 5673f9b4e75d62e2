//! Emitter module - pax3 record rendering
//!
//! Flattens the statement tree into line-tagged JSON records and prepends
//! the header record.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{json, Map, Value as Json};

use crate::config::ParserOptions;
use crate::parser::{Node, Stmt};

/// Wire format tag; bump it whenever the record shape changes
pub const FORMAT: &str = "pax3";

/// Name written into the header's `info` field
pub const GENERATOR: &str = "asp3";

/// One output statement: always holds `line` and `type`
pub type Record = Map<String, Json>;

/// Render the tree with a header stamped with the current time
pub fn emit(nodes: &[Node], options: &ParserOptions) -> Vec<Record> {
    emit_at(nodes, options, SystemTime::now())
}

/// Render the tree with a header stamped with `generated_at`
pub fn emit_at(nodes: &[Node], options: &ParserOptions, generated_at: SystemTime) -> Vec<Record> {
    let mut records = Vec::with_capacity(nodes.len() + 1);
    records.push(header(options, generated_at));
    records.extend(nodes.iter().map(|node| emit_node(node, options)));
    records
}

fn header(options: &ParserOptions, generated_at: SystemTime) -> Record {
    let mut record = Record::new();
    record.insert("line".into(), json!(0));
    record.insert("type".into(), json!(options.header_title));
    record.insert("format".into(), json!(FORMAT));
    record.insert(
        "info".into(),
        json!(format!(
            "Parsed by {GENERATOR} version {}, {}",
            env!("CARGO_PKG_VERSION"),
            format_utc(generated_at)
        )),
    );
    record
}

fn emit_node(node: &Node, options: &ParserOptions) -> Record {
    let mut record = Record::new();
    record.insert("line".into(), json!(node.line));
    record.insert("type".into(), json!(node.stmt.kind()));

    match &node.stmt {
        Stmt::Import { name } => {
            record.insert("name".into(), json!(name));
        }
        Stmt::Delete { var } => {
            record.insert("var".into(), json!(var));
        }
        Stmt::If { condition } | Stmt::Elif { condition } | Stmt::While { condition } => {
            record.insert("condition".into(), json!(condition));
        }
        Stmt::Else | Stmt::Try => {}
        Stmt::Function { name, parameters } => {
            record.insert("name".into(), json!(name));
            record.insert("parameters".into(), json!(parameters));
        }
        Stmt::For => {
            record.insert("unimplemented".into(), json!(true));
        }
        Stmt::Call { name, params } | Stmt::Statement { name, params } => {
            record.insert("name".into(), json!(name));
            record.insert("params".into(), json!(params));
        }
        Stmt::Assignment { var, value } => {
            record.insert("var".into(), json!(var));
            record.insert(options.assignment_kw.clone(), json!(value));
        }
        Stmt::Mixin { value } => {
            record.insert("value".into(), json!(value));
        }
    }

    if let Some(body) = &node.body {
        let code: Vec<Json> = body
            .iter()
            .map(|child| Json::Object(emit_node(child, options)))
            .collect();
        record.insert("code".into(), Json::Array(code));
    }
    record
}

/// `dd-mm-YYYY HH:MM:SS` in UTC
pub fn format_utc(time: SystemTime) -> String {
    let secs = time
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (year, month, day) = civil_from_days(days as i64);
    format!(
        "{day:02}-{month:02}-{year:04} {:02}:{:02}:{:02}",
        rem / 3600,
        rem % 3600 / 60,
        rem % 60
    )
}

/// Days since 1970-01-01 to a proleptic Gregorian (year, month, day)
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests;
