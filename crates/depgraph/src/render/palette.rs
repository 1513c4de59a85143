//! Node styling per category.
//!
//! The built-in palette covers the mainframe asset categories the tool was
//! written for. A YAML file can add categories or override any of them:
//!
//! ```yaml
//! types:
//!   jcl:
//!     color: "#795548"
//!     shape: house
//!     label: JCL Jobs
//!   cobol:
//!     color: "#00C853"
//!     shape: ellipse
//! fallback:
//!   color: "#BDBDBD"
//!   shape: point
//! ```

use crate::error::{Error, Result};
use crate::render::snapshot::UNKNOWN_TYPE;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Graphviz shapes accepted in palette files.
const SUPPORTED_SHAPES: &[&str] = &[
    "box",
    "circle",
    "cylinder",
    "diamond",
    "doublecircle",
    "ellipse",
    "folder",
    "hexagon",
    "house",
    "invtriangle",
    "note",
    "octagon",
    "oval",
    "parallelogram",
    "pentagon",
    "plaintext",
    "point",
    "rect",
    "square",
    "star",
    "tab",
    "triangle",
];

/// How nodes of one category are drawn.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NodeStyle {
    /// Fill colour, any Graphviz colour (e.g. `#4CAF50`).
    pub color: String,
    /// Graphviz node shape.
    pub shape: String,
    /// Legend text; defaults to the category name.
    #[serde(default)]
    pub label: Option<String>,
}

impl NodeStyle {
    fn new(color: &str, shape: &str, label: &str) -> Self {
        Self {
            color: color.to_string(),
            shape: shape.to_string(),
            label: Some(label.to_string()),
        }
    }
}

/// Styles keyed by node category, plus the style for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    types: BTreeMap<String, NodeStyle>,
    fallback: NodeStyle,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteFile {
    #[serde(default)]
    types: BTreeMap<String, NodeStyle>,
    #[serde(default)]
    fallback: Option<NodeStyle>,
}

impl Default for Palette {
    fn default() -> Self {
        let types = [
            ("cobol", NodeStyle::new("#4CAF50", "ellipse", "COBOL Programs")),
            ("copybook", NodeStyle::new("#2196F3", "box", "Copybooks")),
            ("sql-include", NodeStyle::new("#9C27B0", "triangle", "SQL Includes")),
            ("db2-table", NodeStyle::new("#FF9800", "diamond", "DB2 Tables")),
            ("vsam-file", NodeStyle::new("#F44336", "hexagon", "VSAM Files")),
        ]
        .into_iter()
        .map(|(name, style)| (name.to_string(), style))
        .collect();

        Self {
            types,
            fallback: NodeStyle::new("#9E9E9E", "point", "Unknown"),
        }
    }
}

impl Palette {
    /// Load a YAML palette and merge it over the built-in one.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be read and `Error::Palette`
    /// if it is not a valid palette or names an unsupported shape.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let file: PaletteFile = serde_yaml::from_str(&content).map_err(|e| Error::Palette {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut palette = Self::default();
        for (name, style) in file.types {
            validate_style(path, &name, &style)?;
            palette.types.insert(name, style);
        }
        if let Some(fallback) = file.fallback {
            validate_style(path, UNKNOWN_TYPE, &fallback)?;
            palette.fallback = fallback;
        }

        tracing::debug!(palette = %path.display(), types = palette.types.len(), "Loaded palette");
        Ok(palette)
    }

    /// Style for a node whose category label is `type_label`.
    pub fn style_for(&self, type_label: &str) -> &NodeStyle {
        self.types.get(type_label).unwrap_or(&self.fallback)
    }

    /// Legend entries: every configured category in name order.
    pub fn legend(&self) -> impl Iterator<Item = (&str, &NodeStyle)> + '_ {
        self.types.iter().map(|(name, style)| (name.as_str(), style))
    }
}

fn validate_style(path: &Path, name: &str, style: &NodeStyle) -> Result<()> {
    if !SUPPORTED_SHAPES.contains(&style.shape.as_str()) {
        return Err(Error::Palette {
            path: path.to_path_buf(),
            message: format!(
                "type '{name}' uses unsupported shape '{}' (supported: {})",
                style.shape,
                SUPPORTED_SHAPES.join(", ")
            ),
        });
    }
    if style.color.trim().is_empty() {
        return Err(Error::Palette {
            path: path.to_path_buf(),
            message: format!("type '{name}' has an empty color"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_palette_styles() {
        let palette = Palette::default();

        assert_eq!(palette.style_for("cobol").color, "#4CAF50");
        assert_eq!(palette.style_for("copybook").shape, "box");
        assert_eq!(palette.style_for("no-such-type").color, "#9E9E9E");
        assert_eq!(palette.legend().count(), 5);
    }

    #[test]
    fn test_load_merges_over_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("palette.yaml");
        fs::write(
            &path,
            "types:\n  jcl:\n    color: \"#795548\"\n    shape: house\n  cobol:\n    color: \"#00C853\"\n    shape: ellipse\n",
        )
        .unwrap();

        let palette = Palette::load(&path).unwrap();

        assert_eq!(palette.style_for("jcl").shape, "house");
        assert_eq!(palette.style_for("cobol").color, "#00C853");
        assert_eq!(palette.style_for("copybook").color, "#2196F3");
        assert_eq!(palette.legend().count(), 6);
    }

    #[test]
    fn test_load_rejects_unknown_shape() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("palette.yaml");
        fs::write(&path, "types:\n  jcl:\n    color: red\n    shape: blob\n").unwrap();

        let err = Palette::load(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported shape 'blob'"));
    }

    #[test]
    fn test_load_rejects_malformed_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("palette.yaml");
        fs::write(&path, "colours: [").unwrap();

        assert!(matches!(Palette::load(&path), Err(Error::Palette { .. })));
    }
}
