//! Where a markup file's generated class goes.

use std::path::{Path, PathBuf};

use crate::diagnostic::CompilerError;

/// Package, class name and output location derived from a markup file name.
///
/// `com.acme.MainView.fxml` becomes class `MainView` in package `com.acme`,
/// written to `com/acme/MainView.java` under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetName {
    pub package: Option<String>,
    pub class_name: String,
}

impl TargetName {
    pub fn from_markup_path(path: &Path) -> Result<Self, CompilerError> {
        let invalid = || CompilerError::InvalidTargetName { path: path.to_path_buf() };

        let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(invalid)?;
        let mut segments: Vec<&str> = stem.split('.').collect();
        let class_name = segments.pop().filter(|s| is_identifier(s)).ok_or_else(invalid)?;

        if segments.iter().any(|s| !is_identifier(s)) {
            return Err(invalid());
        }
        let package = if segments.is_empty() {
            None
        } else {
            Some(segments.join("."))
        };

        Ok(Self {
            package,
            class_name: class_name.to_string(),
        })
    }

    /// Path of the generated file relative to the output directory.
    pub fn relative_path(&self, extension: &str) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(package) = &self.package {
            for part in package.split('.') {
                path.push(part);
            }
        }
        path.push(format!("{}.{}", self.class_name, extension));
        path
    }

    pub fn output_path(&self, out_dir: &Path, extension: &str) -> PathBuf {
        out_dir.join(self.relative_path(extension))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
