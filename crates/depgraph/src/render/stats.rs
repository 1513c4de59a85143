//! Graph statistics and documentation priorities.
//!
//! Both reports are computed from a [`GraphSnapshot`] and written as plain
//! text. Ties in degree keep name order.

use crate::output::OutputConfig;
use crate::render::snapshot::{GraphSnapshot, NodeInfo};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

const TOP_N: usize = 5;
const ISOLATED_SHOWN: usize = 5;

/// In-degree at which a node counts as high impact.
pub const HIGH_IMPACT_MIN_DEPENDENTS: usize = 3;
/// Out-degree at which a node counts as a likely entry point.
pub const ENTRY_POINT_MIN_DEPENDENCIES: usize = 3;

/// Name and degree of one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ranked {
    /// Node name.
    pub name: String,
    /// The degree it was ranked by.
    pub degree: usize,
}

/// Summary numbers for a dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphStatistics {
    /// Total nodes.
    pub node_count: usize,
    /// Total edges between existing nodes.
    pub edge_count: usize,
    /// Node count per category, sorted by category.
    pub type_counts: BTreeMap<String, usize>,
    /// Up to five most depended-upon nodes, all with at least one dependent.
    pub most_depended_upon: Vec<Ranked>,
    /// Up to five nodes with the most dependencies, all with at least one.
    pub most_dependencies: Vec<Ranked>,
    /// Nodes with no edges at all, in name order.
    pub isolated: Vec<String>,
}

impl GraphStatistics {
    /// Compute statistics over `snapshot`.
    pub fn compute(snapshot: &GraphSnapshot) -> Self {
        let mut type_counts = BTreeMap::new();
        let mut in_degrees = Vec::with_capacity(snapshot.node_count());
        let mut out_degrees = Vec::with_capacity(snapshot.node_count());
        let mut isolated = Vec::new();

        for (idx, node) in snapshot.nodes() {
            *type_counts.entry(node.type_label().to_string()).or_insert(0) += 1;

            let incoming = snapshot.in_degree(idx);
            let outgoing = snapshot.out_degree(idx);
            if incoming == 0 && outgoing == 0 {
                isolated.push(node.name.clone());
            }
            in_degrees.push(ranked(node, incoming));
            out_degrees.push(ranked(node, outgoing));
        }

        Self {
            node_count: snapshot.node_count(),
            edge_count: snapshot.edge_count(),
            type_counts,
            most_depended_upon: top_nonzero(in_degrees),
            most_dependencies: top_nonzero(out_degrees),
            isolated,
        }
    }

    /// Write the statistics report.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_report<W: Write>(&self, w: &mut W, config: &OutputConfig) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "{}", config.header("=== Dependency Graph Statistics ==="))?;
        writeln!(w, "Total nodes: {}", self.node_count)?;
        writeln!(w, "Total edges: {}", self.edge_count)?;

        writeln!(w)?;
        writeln!(w, "Node type distribution:")?;
        for (node_type, count) in &self.type_counts {
            writeln!(w, "  {node_type}: {count}")?;
        }

        writeln!(w)?;
        writeln!(w, "Most depended upon (highest in-degree):")?;
        for entry in &self.most_depended_upon {
            writeln!(w, "  {}: {} dependents", config.name(&entry.name), entry.degree)?;
        }

        writeln!(w)?;
        writeln!(
            w,
            "Most complex components (highest out-degree - depend on many others):"
        )?;
        for entry in &self.most_dependencies {
            writeln!(
                w,
                "  {}: depends on {} others",
                config.name(&entry.name),
                entry.degree
            )?;
        }

        if !self.isolated.is_empty() {
            writeln!(w)?;
            writeln!(w, "Isolated nodes (no dependencies): {}", self.isolated.len())?;
            for name in self.isolated.iter().take(ISOLATED_SHOWN) {
                writeln!(w, "  {}", config.name(name))?;
            }
            if self.isolated.len() > ISOLATED_SHOWN {
                writeln!(w, "  ... and {} more", self.isolated.len() - ISOLATED_SHOWN)?;
            }
        }
        Ok(())
    }
}

fn ranked(node: &NodeInfo, degree: usize) -> Ranked {
    Ranked {
        name: node.name.clone(),
        degree,
    }
}

/// Highest degrees first; the sort is stable so equal degrees stay in name order.
fn top_nonzero(mut entries: Vec<Ranked>) -> Vec<Ranked> {
    entries.sort_by(|a, b| b.degree.cmp(&a.degree));
    entries.truncate(TOP_N);
    entries.retain(|entry| entry.degree > 0);
    entries
}

/// One suggested node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Node name.
    pub name: String,
    /// Category label.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Stored description, if any.
    pub description: Option<String>,
    /// Dependents for high-impact and foundation entries, dependencies for
    /// entry points.
    pub degree: usize,
}

/// Which nodes to document first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentationPriorities {
    /// Nodes with at least three dependents.
    pub high_impact: Vec<Suggestion>,
    /// Nodes with dependents but no dependencies.
    pub foundation: Vec<Suggestion>,
    /// Nodes with at least three dependencies.
    pub entry_points: Vec<Suggestion>,
}

impl DocumentationPriorities {
    /// Classify the nodes of `snapshot`.
    pub fn compute(snapshot: &GraphSnapshot) -> Self {
        let mut priorities = Self::default();

        for (idx, node) in snapshot.nodes() {
            let incoming = snapshot.in_degree(idx);
            let outgoing = snapshot.out_degree(idx);

            if incoming >= HIGH_IMPACT_MIN_DEPENDENTS {
                priorities.high_impact.push(suggestion(node, incoming));
            }
            if outgoing == 0 && incoming > 0 {
                priorities.foundation.push(suggestion(node, incoming));
            }
            if outgoing >= ENTRY_POINT_MIN_DEPENDENCIES {
                priorities.entry_points.push(suggestion(node, outgoing));
            }
        }

        for list in [
            &mut priorities.high_impact,
            &mut priorities.foundation,
            &mut priorities.entry_points,
        ] {
            list.sort_by(|a, b| b.degree.cmp(&a.degree));
        }
        priorities
    }

    /// True if no node qualified for any list.
    pub fn is_empty(&self) -> bool {
        self.high_impact.is_empty() && self.foundation.is_empty() && self.entry_points.is_empty()
    }

    /// Report lines, with a blank line between non-empty sections.
    pub fn lines(&self) -> Vec<String> {
        let sections: [(&str, &[Suggestion], fn(usize) -> String); 3] = [
            (
                "High Impact Components (many dependents):",
                &self.high_impact,
                |n| format!("{n} dependents"),
            ),
            (
                "Foundation Components (no dependencies, but others depend on them):",
                &self.foundation,
                |n| format!("{n} dependents"),
            ),
            (
                "Likely Entry Points (many dependencies, suggesting front-end role):",
                &self.entry_points,
                |n| format!("depends on {n} others"),
            ),
        ];

        let mut lines = Vec::new();
        for (title, entries, count) in sections {
            if entries.is_empty() {
                continue;
            }
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push(title.to_string());
            for entry in entries {
                lines.push(format!(
                    "  • {} ({}): {} - {}",
                    entry.name,
                    entry.node_type,
                    count(entry.degree),
                    entry
                        .description
                        .as_deref()
                        .filter(|d| !d.is_empty())
                        .unwrap_or("No description"),
                ));
            }
        }
        lines
    }

    /// Write the suggestions report.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write_report<W: Write>(&self, w: &mut W, config: &OutputConfig) -> io::Result<()> {
        writeln!(w)?;
        writeln!(
            w,
            "{}",
            config.header("=== Documentation Priority Suggestions ===")
        )?;
        for line in self.lines() {
            writeln!(w, "{line}")?;
        }
        Ok(())
    }
}

fn suggestion(node: &NodeInfo, degree: usize) -> Suggestion {
    Suggestion {
        name: node.name.clone(),
        node_type: node.type_label().to_string(),
        description: node.description.clone(),
        degree,
    }
}
