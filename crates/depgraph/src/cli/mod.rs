//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for depgraph using clap's
//! derive API. Each command has its own argument struct with validation.
//!
//! # Commands
//!
//! - `add-node`: Create or update a node and add dependencies
//! - `add-edge`: Record that one node depends on another
//! - `show`: Show one node
//! - `list`: List nodes, optionally of one type
//! - `dependents`: List the nodes that depend on a node
//! - `render`: Write a Graphviz view of the graph
//!
//! # Global Flags
//!
//! - `--store <path>`: Graph document to use (env `DEPGRAPH_STORE`)
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! depgraph add-node LGACB01 --type cobol --depends-on LGCMAREA LGPOLICY
//! depgraph add-edge LGACB01 LGACDB01
//! depgraph show LGCMAREA --include-dependents
//! depgraph render --stats --suggestions
//! ```

mod args;
mod execute;
mod validators;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use args::{AddEdgeArgs, AddNodeArgs, DependentsArgs, ListArgs, RenderArgs, ShowArgs};
pub use validators::{validate_node_name, validate_query_name};

use crate::app::App;
use crate::config::{Config, DEFAULT_STORE_FILE, STORE_ENV_VAR};
use crate::output::OutputMode;

/// depgraph - track dependencies between code assets
///
/// Nodes (programs, copybooks, tables, ...) and their `depends_on` edges are
/// kept in a single JSON document that is safe to commit and diff.
#[derive(Parser, Debug)]
#[command(name = "depgraph")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path of the graph document
    #[arg(long, global = true, env = STORE_ENV_VAR, default_value = DEFAULT_STORE_FILE)]
    pub store: PathBuf,

    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create or update a node
    ///
    /// Sets the type and description when given and adds an edge to each
    /// `--depends-on` target, creating targets that do not exist yet.
    AddNode(AddNodeArgs),

    /// Add a dependency edge
    ///
    /// Records that SOURCE depends on TARGET, creating either node if needed.
    AddEdge(AddEdgeArgs),

    /// Show a node
    ///
    /// Prints name, type, description, and dependencies. A missing node is
    /// reported, not treated as an error.
    Show(ShowArgs),

    /// List nodes
    ///
    /// Prints every node as `name: description`, sorted by name.
    List(ListArgs),

    /// List the nodes that depend on a node
    Dependents(DependentsArgs),

    /// Write a Graphviz DOT view of the graph
    ///
    /// Never modifies the store. Optionally prints statistics and
    /// documentation priority suggestions.
    Render(RenderArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// The configuration selected by the global flags.
    pub fn config(&self) -> Config {
        Config::new(self.store.clone())
    }

    /// Execute the CLI command
    pub fn execute(&self) -> Result<()> {
        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };
        let config = self.config();

        let request = match &self.command {
            Commands::AddNode(args) => args.to_request(),
            Commands::AddEdge(args) => args.to_request(),
            Commands::Show(args) => args.to_request(),
            Commands::List(args) => args.to_request(),
            Commands::Dependents(args) => args.to_request(),
            Commands::Render(args) => {
                return execute::execute_render(&config, args, output_mode);
            }
        };

        let mut app = App::open(&config)?;
        execute::execute_request(&mut app, &request, output_mode)
    }
}
