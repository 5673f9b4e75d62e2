//! Block assembly - folding indented lines into nested bodies
//!
//! Works one nesting level at a time. Function headers claim their regions
//! first, then the remaining block headers (if, elif, else, try, while)
//! claim the contiguous run of deeper lines that follows them. Each claimed
//! region is assembled recursively before its node is built, so nodes are
//! never patched after creation.
//!
//! A region must start exactly one level below its header. Any other line
//! deeper than the level being assembled is an indentation error.

use std::iter::Peekable;

use super::ast::{Node, Stmt};
use crate::error::{AspError, Result};

/// A classified line still carrying its indentation
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    pub line: usize,
    pub indent: usize,
    pub stmt: Stmt,
}

impl ClassifiedLine {
    pub fn new(line: usize, indent: usize, stmt: Stmt) -> Self {
        Self { line, indent, stmt }
    }
}

/// First-pass grouping of one level
#[derive(Debug)]
enum Item {
    Function {
        header: ClassifiedLine,
        region: Vec<ClassifiedLine>,
    },
    Line(ClassifiedLine),
}

impl Item {
    fn indent(&self) -> usize {
        match self {
            Item::Function { header, .. } => header.indent,
            Item::Line(line) => line.indent,
        }
    }

    fn line(&self) -> usize {
        match self {
            Item::Function { header, .. } => header.line,
            Item::Line(line) => line.line,
        }
    }

    fn flatten_into(self, out: &mut Vec<ClassifiedLine>) {
        match self {
            Item::Function { header, region } => {
                out.push(header);
                out.extend(region);
            }
            Item::Line(line) => out.push(line),
        }
    }
}

/// Assemble a whole file into its statement tree
pub fn assemble(lines: Vec<ClassifiedLine>) -> Result<Vec<Node>> {
    assemble_level(lines, 0)
}

fn assemble_level(lines: Vec<ClassifiedLine>, base: usize) -> Result<Vec<Node>> {
    if let Some(stray) = lines.iter().find(|l| l.indent < base) {
        return Err(AspError::Internal {
            line: stray.line,
            message: format!(
                "line at indent level {} ended up in a body at level {base}",
                stray.indent
            ),
        });
    }

    let items = extract_functions(lines);
    let mut nodes = Vec::with_capacity(items.len());
    let mut items = items.into_iter().peekable();

    while let Some(item) = items.next() {
        // only a block header may open a deeper level, and only by one
        if item.indent() != base {
            return Err(AspError::indentation(
                item.line(),
                format!("Unexpected indent, expected level {base}, found {}", item.indent()),
            ));
        }
        match item {
            Item::Function { header, region } => {
                let body = assemble_level(region, header.indent + 1)?;
                nodes.push(Node::block(header.line, header.stmt, body));
            }
            Item::Line(header) if header.stmt.is_block() => {
                let region = take_deeper(&mut items, header.indent);
                let body = assemble_level(region, header.indent + 1)?;
                nodes.push(Node::block(header.line, header.stmt, body));
            }
            Item::Line(line) => nodes.push(Node::leaf(line.line, line.stmt)),
        }
    }
    Ok(nodes)
}

/// Group every function header with the deeper lines that follow it
fn extract_functions(lines: Vec<ClassifiedLine>) -> Vec<Item> {
    let mut items = Vec::new();
    let mut lines = lines.into_iter().peekable();

    while let Some(line) = lines.next() {
        if matches!(line.stmt, Stmt::Function { .. }) {
            let mut region = Vec::new();
            while let Some(inner) = lines.next_if(|next| next.indent > line.indent) {
                region.push(inner);
            }
            items.push(Item::Function {
                header: line,
                region,
            });
        } else {
            items.push(Item::Line(line));
        }
    }
    items
}

/// Pull the run of items indented deeper than `indent`, flattened back to lines
fn take_deeper<I>(items: &mut Peekable<I>, indent: usize) -> Vec<ClassifiedLine>
where
    I: Iterator<Item = Item>,
{
    let mut region = Vec::new();
    while let Some(item) = items.next_if(|next| next.indent() > indent) {
        item.flatten_into(&mut region);
    }
    region
}
