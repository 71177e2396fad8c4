//! Export of computed longest paths.
//!
//! Two formats:
//!
//! ```text
//! LongestPathResult → write_json()   → {"nodes": [...], "value": ..., "weighted": ...}
//! Path              → write_cypher() → MERGE/MATCH statements recreating the path
//! ```
//!
//! The Cypher script can be pasted into any Cypher-compatible database to
//! inspect the critical chain on its own.

use std::io::Write;
use crate::algorithm::LongestPathResult;
use crate::model::*;
use crate::Result;

/// Write a result as pretty-printed JSON followed by a newline.
pub fn write_json(result: &LongestPathResult, writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, result)?;
    writeln!(writer)?;
    Ok(())
}

/// Write a path as a Cypher script.
///
/// Nodes are merged on an `_id` key carrying the source graph node id, then
/// every relationship of the path is created between them.
pub fn write_cypher(path: &Path, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "// longest path")?;
    writeln!(writer, "// Nodes: {}", path.nodes.len())?;
    writeln!(writer, "// Relationships: {}", path.relationships.len())?;
    writeln!(writer)?;

    for node in &path.nodes {
        let labels_str = if node.labels.is_empty() {
            String::new()
        } else {
            format!(":{}", node.labels.join(":"))
        };

        let props_str = format_properties(&node.properties);

        writeln!(
            writer,
            "MERGE (n{} {{_id: {}{}}});",
            labels_str,
            node.id.0,
            if props_str.is_empty() { String::new() } else { format!(", {}", props_str) }
        )?;
    }

    if !path.relationships.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "// Relationships")?;
    }

    for rel in &path.relationships {
        let props_str = format_properties(&rel.properties);
        let props_part = if props_str.is_empty() {
            String::new()
        } else {
            format!(" {{{}}}", props_str)
        };

        writeln!(
            writer,
            "MATCH (a {{_id: {}}}), (b {{_id: {}}}) CREATE (a)-[:{}{}]->(b);",
            rel.src.0,
            rel.dst.0,
            rel.rel_type,
            props_part,
        )?;
    }

    Ok(())
}

/// Format a PropertyMap as Cypher property string (key: value, ...), keys sorted.
fn format_properties(props: &PropertyMap) -> String {
    let mut keys: Vec<&String> = props.keys().filter(|k| !k.starts_with('_')).collect();
    keys.sort();
    keys.into_iter()
        .map(|key| format!("{}: {}", key, format_value(&props[key])))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Format a Value as a Cypher literal.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\'', "\\'")),
        Value::Int(i) => i.to_string(),
        Value::Float(f) => format!("{}", f),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::List(items) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Map(m) => {
            let mut keys: Vec<&String> = m.keys().collect();
            keys.sort();
            let inner: Vec<String> = keys.into_iter()
                .map(|k| format!("{}: {}", k, format_value(&m[k])))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
        Value::Duration(d) => format!(
            "duration({{months: {}, days: {}, seconds: {}, nanoseconds: {}}})",
            d.months, d.days, d.seconds, d.nanoseconds
        ),
        Value::Bytes(_) => "null".to_string(),
    }
}
