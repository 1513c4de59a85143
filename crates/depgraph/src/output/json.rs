//! JSON rendering of command reports.

use crate::engine::Report;
use serde::Serialize;
use serde_json::json;
use std::io::{self, Write};

/// Convert a report to its JSON shape.
///
/// - `Updated`: the node view
/// - `Node`: the node view plus `"found": true` and, if requested, `dependents`
/// - `NotFound`: `{"name": ..., "found": false}`
/// - `Listing`: array of `{name, type, description}`
/// - `Dependents`: `{"name": ..., "dependents": [...]}`
pub(crate) fn report_to_value(report: &Report) -> serde_json::Result<serde_json::Value> {
    let value = match report {
        Report::Updated(view) => serde_json::to_value(view)?,
        Report::Node { view, dependents } => {
            let mut value = json!({
                "name": view.name,
                "found": true,
                "type": view.node_type,
                "description": view.description,
                "depends_on": view.depends_on,
            });
            if let Some(dependents) = dependents {
                value["dependents"] = json!(dependents);
            }
            value
        }
        Report::NotFound { name } => json!({ "name": name, "found": false }),
        Report::Listing(entries) => serde_json::to_value(entries)?,
        Report::Dependents { name, dependents } => json!({
            "name": name,
            "dependents": dependents,
        }),
    };
    Ok(value)
}

pub(super) fn write_report_json<W: Write>(w: &mut W, report: &Report) -> io::Result<()> {
    let value = report_to_value(report).map_err(io::Error::other)?;
    write_json(w, &value)
}

pub(super) fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, value).map_err(io::Error::other)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{ListEntry, NodeView};

    #[test]
    fn test_node_json_includes_dependents_when_requested() {
        let report = Report::Node {
            view: NodeView {
                name: "A".to_string(),
                node_type: Some("cobol".to_string()),
                description: None,
                depends_on: vec!["B".to_string()],
            },
            dependents: Some(vec!["C".to_string()]),
        };

        let value = report_to_value(&report).unwrap();
        assert_eq!(value["found"], true);
        assert_eq!(value["type"], "cobol");
        assert_eq!(value["description"], serde_json::Value::Null);
        assert_eq!(value["dependents"][0], "C");
    }

    #[test]
    fn test_not_found_json() {
        let report = Report::NotFound {
            name: "ghost".to_string(),
        };
        let value = report_to_value(&report).unwrap();

        assert_eq!(value, json!({"name": "ghost", "found": false}));
    }

    #[test]
    fn test_listing_json_uses_type_key() {
        let report = Report::Listing(vec![ListEntry {
            name: "A".to_string(),
            node_type: Some("copybook".to_string()),
            description: None,
        }]);
        let value = report_to_value(&report).unwrap();

        assert_eq!(value[0]["type"], "copybook");
    }
}
