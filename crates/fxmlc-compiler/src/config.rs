//! Compiler configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostic::CompilerError;

/// Configuration for the fxmlc compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Directory containing `.fxml` sources.
    pub source_dir: PathBuf,

    /// Directory the package tree of generated Java files is written under.
    pub out_dir: PathBuf,

    /// Spaces per indentation level in generated code.
    pub indent_width: usize,

    /// Class providing `resolveRelativeResourceFilePath(Class, String)` at runtime.
    /// Generated stylesheet lookups call it and import it.
    pub resource_helper: String,

    /// Root of the source tree, used to turn image paths into classpath
    /// locations. Inferred from the markup file name when unset.
    pub source_root: Option<PathBuf>,

    /// Extension of markup files picked up by batch conversion.
    pub markup_extension: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/main/resources"),
            out_dir: PathBuf::from("src/generated/java"),
            indent_width: 2,
            resource_helper: "fxmlc.runtime.Util".to_string(),
            source_root: None,
            markup_extension: "fxml".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Loads a config from a JSON file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let content = std::fs::read_to_string(path).map_err(|e| CompilerError::ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| CompilerError::ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Whether `path` names a markup file by its extension.
    pub fn is_markup(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == self.markup_extension.as_str())
    }
}
