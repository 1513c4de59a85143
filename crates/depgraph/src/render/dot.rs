//! Graphviz DOT output.

use crate::render::palette::Palette;
use crate::render::snapshot::GraphSnapshot;
use std::io::{self, Write};

/// Write `snapshot` as a DOT digraph styled by `palette`.
///
/// Edges point from dependent to dependency. The legend is a separate
/// cluster whose node ids are prefixed with `__legend_` so they cannot
/// clash with graph nodes.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_dot<W: Write>(
    w: &mut W,
    snapshot: &GraphSnapshot,
    palette: &Palette,
    title: &str,
) -> io::Result<()> {
    writeln!(w, "digraph dependencies {{")?;
    writeln!(w, "    label=\"{}\";", escape(title))?;
    writeln!(w, "    labelloc=t;")?;
    writeln!(w, "    fontsize=20;")?;
    writeln!(w, "    rankdir=TB;")?;
    writeln!(w, "    node [style=filled, fontname=\"Helvetica\"];")?;
    writeln!(w, "    edge [color=\"#666666\", arrowsize=0.7];")?;
    writeln!(w)?;

    for (_, node) in snapshot.nodes() {
        let style = palette.style_for(node.type_label());
        writeln!(
            w,
            "    \"{}\" [fillcolor=\"{}\", shape={}, tooltip=\"{}\"];",
            escape(&node.name),
            escape(&style.color),
            style.shape,
            escape(node.description.as_deref().unwrap_or_default()),
        )?;
    }

    if snapshot.edge_count() > 0 {
        writeln!(w)?;
    }
    for (from, to) in snapshot.edges() {
        writeln!(w, "    \"{}\" -> \"{}\";", escape(&from.name), escape(&to.name))?;
    }

    writeln!(w)?;
    writeln!(w, "    subgraph cluster_legend {{")?;
    writeln!(w, "        label=\"Legend\";")?;
    writeln!(w, "        style=rounded;")?;
    writeln!(w, "        color=lightgrey;")?;
    for (name, style) in palette.legend() {
        writeln!(
            w,
            "        \"__legend_{}\" [label=\"{}\", fillcolor=\"{}\", shape={}];",
            escape(name),
            escape(style.label.as_deref().unwrap_or(name)),
            escape(&style.color),
            style.shape,
        )?;
    }
    writeln!(w, "    }}")?;
    writeln!(w, "}}")
}

/// Escape a string for use inside a double-quoted DOT id.
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
