//! Read-only visualization of the dependency graph.
//!
//! Rendering loads the store under a shared lock, copies it into a
//! [`GraphSnapshot`], and writes a Graphviz DOT file. The store is never
//! saved from here, so a render cannot race a writer into losing updates.
//!
//! Turn the output into an image with Graphviz:
//!
//! ```text
//! dot -Tpng tools/dependency_graph_current_state.dot -o graph.png
//! ```

mod dot;
pub mod palette;
pub mod snapshot;
pub mod stats;

pub use dot::write_dot;
pub use palette::{NodeStyle, Palette};
pub use snapshot::{GraphSnapshot, NodeInfo, UNKNOWN_TYPE};
pub use stats::{DocumentationPriorities, GraphStatistics};

use crate::config::Config;
use crate::error::{Error, Result};
use depgraph_store::{GraphStore, StoreLock};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Default DOT output path.
pub const DEFAULT_OUTPUT: &str = "tools/dependency_graph_current_state.dot";
/// Default graph title.
pub const DEFAULT_TITLE: &str = "Dependency Graph - Current State";

/// What to render and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// DOT file to write; parent directories are created.
    pub output: PathBuf,
    /// Title drawn above the graph.
    pub title: String,
    /// Compute [`GraphStatistics`].
    pub stats: bool,
    /// Compute [`DocumentationPriorities`].
    pub suggestions: bool,
    /// YAML palette merged over the built-in one.
    pub palette: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            title: DEFAULT_TITLE.to_string(),
            stats: false,
            suggestions: false,
            palette: None,
        }
    }
}

/// Result of a render.
#[derive(Debug, Clone)]
pub struct RenderSummary {
    /// Where the DOT file was written.
    pub output: PathBuf,
    /// Present when statistics were requested.
    pub statistics: Option<GraphStatistics>,
    /// Present when suggestions were requested.
    pub priorities: Option<DocumentationPriorities>,
}

/// Render the store named by `config`.
///
/// # Errors
///
/// Returns an error if:
/// - The store file does not exist
/// - The store cannot be locked, read, or parsed
/// - The palette file is unreadable or invalid
/// - The output file cannot be written
pub fn run(config: &Config, options: &RenderOptions) -> Result<RenderSummary> {
    let store_path = config.store_path();
    if !store_path.exists() {
        return Err(Error::StoreNotFound(store_path.to_path_buf()));
    }

    let palette = match &options.palette {
        Some(path) => Palette::load(path)?,
        None => Palette::default(),
    };

    let snapshot = {
        let _lock = StoreLock::acquire_shared(store_path)?;
        let store = GraphStore::open(store_path);
        let (graph, warnings) = store.load()?;
        crate::app::log_load_warnings(&store, &warnings);
        GraphSnapshot::from_graph(&graph)
    };

    if let Some(parent) = options.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(&options.output)?);
    write_dot(&mut writer, &snapshot, &palette, &options.title)?;
    writer.flush()?;

    tracing::debug!(
        output = %options.output.display(),
        nodes = snapshot.node_count(),
        edges = snapshot.edge_count(),
        "Wrote DOT file"
    );

    Ok(RenderSummary {
        output: options.output.clone(),
        statistics: options.stats.then(|| GraphStatistics::compute(&snapshot)),
        priorities: options
            .suggestions
            .then(|| DocumentationPriorities::compute(&snapshot)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const STORE: &str = r#"{
  "nodes": {
    "A": {
      "depends_on": [
        "B"
      ],
      "type": "cobol"
    },
    "B": {
      "depends_on": [],
      "type": "copybook"
    }
  }
}
"#;

    fn setup() -> (TempDir, Config) {
        let temp = TempDir::new().unwrap();
        let store = temp.path().join("graph.json");
        fs::write(&store, STORE).unwrap();
        let config = Config::new(store);
        (temp, config)
    }

    #[test]
    fn test_render_writes_dot_file() {
        let (temp, config) = setup();
        let output = temp.path().join("out/nested/graph.dot");
        let options = RenderOptions {
            output: output.clone(),
            ..RenderOptions::default()
        };

        let summary = run(&config, &options).unwrap();

        assert_eq!(summary.output, output);
        assert!(summary.statistics.is_none());
        assert!(summary.priorities.is_none());
        let dot = fs::read_to_string(&output).unwrap();
        assert!(dot.contains("\"A\" -> \"B\";"));
        assert!(dot.contains(DEFAULT_TITLE));
    }

    #[test]
    fn test_render_leaves_store_untouched() {
        let (temp, config) = setup();
        let options = RenderOptions {
            output: temp.path().join("graph.dot"),
            stats: true,
            suggestions: true,
            ..RenderOptions::default()
        };

        let summary = run(&config, &options).unwrap();

        assert_eq!(fs::read_to_string(config.store_path()).unwrap(), STORE);
        assert_eq!(summary.statistics.unwrap().edge_count, 1);
        assert_eq!(summary.priorities.unwrap().foundation[0].name, "B");
    }

    #[test]
    fn test_render_missing_store_fails() {
        let temp = TempDir::new().unwrap();
        let config = Config::new(temp.path().join("missing.json"));
        let options = RenderOptions {
            output: temp.path().join("graph.dot"),
            ..RenderOptions::default()
        };

        let err = run(&config, &options).unwrap_err();

        assert!(matches!(err, Error::StoreNotFound(_)));
        assert!(err.to_string().starts_with("Dependency graph not found: "));
        assert!(!temp.path().join("missing.json").exists());
        assert!(!temp.path().join("graph.dot").exists());
    }

    #[test]
    fn test_render_with_custom_palette() {
        let (temp, config) = setup();
        let palette = temp.path().join("palette.yaml");
        fs::write(&palette, "types:\n  cobol:\n    color: \"#000000\"\n    shape: box\n").unwrap();
        let output = temp.path().join("graph.dot");
        let options = RenderOptions {
            output: output.clone(),
            palette: Some(palette),
            ..RenderOptions::default()
        };

        run(&config, &options).unwrap();

        let dot = fs::read_to_string(&output).unwrap();
        assert!(dot.contains("\"A\" [fillcolor=\"#000000\", shape=box"));
    }
}
