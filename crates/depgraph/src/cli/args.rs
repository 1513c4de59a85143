//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

use super::validators::{validate_node_name, validate_query_name};
use crate::engine::Request;
use crate::render::{DEFAULT_OUTPUT, DEFAULT_TITLE, RenderOptions};

/// Arguments for the `add-node` command
#[derive(Parser, Debug, Clone)]
pub struct AddNodeArgs {
    /// Node to create or update
    #[arg(value_parser = validate_node_name)]
    pub name: String,

    /// Category label (e.g. cobol, copybook, sql-include)
    ///
    /// Replaces any existing type. An empty string leaves it unchanged.
    #[arg(short = 't', long = "type")]
    pub node_type: Option<String>,

    /// Free-text description
    ///
    /// An empty string leaves any existing description unchanged.
    #[arg(short = 'D', long)]
    pub description: Option<String>,

    /// Nodes this node depends on (space-separated)
    ///
    /// Missing targets are created as empty nodes.
    #[arg(long = "depends-on", num_args = 0.., value_parser = validate_node_name)]
    pub depends_on: Vec<String>,
}

impl AddNodeArgs {
    /// Build the engine request.
    pub fn to_request(&self) -> Request {
        Request::AddNode {
            name: self.name.clone(),
            node_type: self.node_type.clone(),
            description: self.description.clone(),
            depends_on: self.depends_on.clone(),
        }
    }
}

/// Arguments for the `add-edge` command
#[derive(Parser, Debug, Clone)]
pub struct AddEdgeArgs {
    /// The dependent node
    #[arg(value_parser = validate_node_name)]
    pub source: String,

    /// The node it depends on
    #[arg(value_parser = validate_node_name)]
    pub target: String,
}

impl AddEdgeArgs {
    /// Build the engine request.
    pub fn to_request(&self) -> Request {
        Request::AddEdge {
            source: self.source.clone(),
            target: self.target.clone(),
        }
    }
}

/// Arguments for the `show` command
#[derive(Parser, Debug, Clone)]
pub struct ShowArgs {
    /// Node to display
    #[arg(value_parser = validate_query_name)]
    pub name: String,

    /// Also list the nodes that depend on this one
    #[arg(long)]
    pub include_dependents: bool,
}

impl ShowArgs {
    /// Build the engine request.
    pub fn to_request(&self) -> Request {
        Request::Show {
            name: self.name.clone(),
            include_dependents: self.include_dependents,
        }
    }
}

/// Arguments for the `list` command
#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only list nodes of exactly this type
    #[arg(short = 't', long = "type")]
    pub node_type: Option<String>,
}

impl ListArgs {
    /// Build the engine request.
    pub fn to_request(&self) -> Request {
        Request::List {
            node_type: self.node_type.clone(),
        }
    }
}

/// Arguments for the `dependents` command
#[derive(Parser, Debug, Clone)]
pub struct DependentsArgs {
    /// Node whose dependents to list
    #[arg(value_parser = validate_query_name)]
    pub name: String,
}

impl DependentsArgs {
    /// Build the engine request.
    pub fn to_request(&self) -> Request {
        Request::Dependents {
            name: self.name.clone(),
        }
    }
}

/// Arguments for the `render` command
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Graphviz DOT file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Title drawn above the graph
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Print graph statistics
    #[arg(long)]
    pub stats: bool,

    /// Print documentation priority suggestions
    #[arg(long)]
    pub suggestions: bool,

    /// YAML palette overriding node colours and shapes
    #[arg(long)]
    pub palette: Option<PathBuf>,
}

impl RenderArgs {
    /// Build the render options.
    pub fn to_options(&self) -> RenderOptions {
        RenderOptions {
            output: self.output.clone(),
            title: self.title.clone(),
            stats: self.stats,
            suggestions: self.suggestions,
            palette: self.palette.clone(),
        }
    }
}
