//! Output formatting for CLI commands.
//!
//! Reports are rendered either as the fixed line-oriented text format, or as
//! JSON for programmatic use (`--json`).
//!
//! Text format for `show`:
//!
//! ```text
//! Name: LGACB01
//! Type: cobol
//! Description: -
//! Depends on:
//!   - LGCMAREA
//! Dependents:
//!   (none)
//! ```
//!
//! Missing optional values print as `-`, empty lists as `(none)`.

mod json;

use crate::engine::{ListEntry, NodeView, Report};
use colored::Colorize;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Configuration for decorated output.
///
/// Only the render summaries are decorated; command reports are always
/// plain so they can be parsed line by line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Create an `OutputConfig` by reading from environment variables.
    ///
    /// Reads:
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables colors)
    /// - `DEPGRAPH_COLOR`: Set to "0" or "false" to disable colors (default: true)
    pub fn from_env() -> Self {
        // Respect NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("DEPGRAPH_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self { use_colors }
    }

    /// Style a section header.
    pub fn header(&self, text: &str) -> String {
        if self.use_colors {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Style a node name.
    pub fn name(&self, text: &str) -> String {
        if self.use_colors {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { use_colors: true }
    }
}

/// Print a report to stdout in the specified format.
///
/// # Errors
///
/// Returns an error if stdout cannot be written or JSON encoding fails.
pub fn print_report(report: &Report, mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match mode {
        OutputMode::Text => write_report_text(&mut handle, report),
        OutputMode::Json => json::write_report_json(&mut handle, report),
    }
}

/// Print any serializable value as pretty JSON.
///
/// # Errors
///
/// Returns an error if stdout cannot be written or JSON encoding fails.
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    json::write_json(&mut handle, value)
}

/// Write the text rendering of `report`.
///
/// Reports of mutations produce no output.
///
/// # Errors
///
/// Returns an error if the writer fails.
pub fn write_report_text<W: Write>(w: &mut W, report: &Report) -> io::Result<()> {
    match report {
        Report::Updated(_) => Ok(()),
        Report::Node { view, dependents } => write_node_text(w, view, dependents.as_deref()),
        Report::NotFound { name } => writeln!(w, "{name} not found"),
        Report::Listing(entries) => write_listing_text(w, entries),
        Report::Dependents { dependents, .. } => {
            if dependents.is_empty() {
                writeln!(w, "(none)")?;
            }
            for entry in dependents {
                writeln!(w, "{entry}")?;
            }
            Ok(())
        }
    }
}

/// Render `report` as text into a `String`.
pub fn report_to_text(report: &Report) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_report_text(&mut buffer, report);
    String::from_utf8_lossy(&buffer).into_owned()
}

fn write_node_text<W: Write>(
    w: &mut W,
    view: &NodeView,
    dependents: Option<&[String]>,
) -> io::Result<()> {
    writeln!(w, "Name: {}", view.name)?;
    writeln!(w, "Type: {}", or_dash(view.node_type.as_deref()))?;
    writeln!(w, "Description: {}", or_dash(view.description.as_deref()))?;
    write_name_list(w, "Depends on:", &view.depends_on)?;
    if let Some(dependents) = dependents {
        write_name_list(w, "Dependents:", dependents)?;
    }
    Ok(())
}

fn write_name_list<W: Write>(w: &mut W, title: &str, names: &[String]) -> io::Result<()> {
    writeln!(w, "{title}")?;
    if names.is_empty() {
        writeln!(w, "  (none)")?;
    }
    for name in names {
        writeln!(w, "  - {name}")?;
    }
    Ok(())
}

fn write_listing_text<W: Write>(w: &mut W, entries: &[ListEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(w, "{}: {}", entry.name, or_dash(entry.description.as_deref()))?;
    }
    Ok(())
}

/// Missing and empty values both display as `-`.
fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
