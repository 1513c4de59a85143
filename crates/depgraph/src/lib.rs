//! depgraph - a command-line tool for tracking dependencies between code
//! assets.
//!
//! This crate provides the CLI and the pieces behind it: the command engine
//! that maps requests onto a [`depgraph_store::Graph`], the load-run-save
//! [`app::App`] transaction, and the read-only Graphviz renderer.

#![forbid(unsafe_code)]

// Public CLI module (needed by binary)
pub mod cli;

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod render;
