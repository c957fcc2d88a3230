//! Textual forms of values inside rendered diffs.

use std::io::{self, Write};

use super::Palette;
use crate::diff::DiffKind;
use crate::value::{self, Value};

static NULL: Value = Value::Null;

/// Returns the payload, or null when the node carries none.
pub(crate) fn payload(value: &Option<Value>) -> &Value {
    value.as_ref().unwrap_or(&NULL)
}

/// Scalars in their natural form; strings quoted with JSON escaping.
fn scalar(v: &Value) -> String {
    match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::String(s) => serde_json::to_string(s).unwrap_or_else(|_| format!("{:?}", s)),
        Value::List(_) | Value::Map(_) => compact(v),
    }
}

fn compact(v: &Value) -> String {
    value::to_json(v).unwrap_or_else(|_| format!("{:?}", v))
}

/// Single-line form: compact JSON for lists and maps.
pub(crate) fn inline(v: &Value) -> String {
    if v.is_compound() {
        compact(v)
    } else {
        scalar(v)
    }
}

/// Multi-line form: indented JSON for lists and maps.
pub(crate) fn pretty_lines(v: &Value) -> Vec<String> {
    if !v.is_compound() {
        return vec![scalar(v)];
    }
    match value::to_json_pretty(v) {
        Ok(json) => json.lines().map(str::to_string).collect(),
        Err(_) => vec![format!("{:?}", v)],
    }
}

/// Writes a value whose first line continues the current line; following
/// lines start with `indent`.
pub(crate) fn write_block(
    out: &mut dyn Write,
    palette: &dyn Palette,
    kind: DiffKind,
    indent: &str,
    v: &Value,
) -> io::Result<()> {
    for (i, line) in pretty_lines(v).iter().enumerate() {
        if i > 0 {
            write!(out, "{}", indent)?;
        }
        writeln!(out, "{}", palette.paint(kind, line))?;
    }
    Ok(())
}
