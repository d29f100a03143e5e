//! Frontends for the two inputs of a conversion.
//!
//! - `markup` reads the FXML view description.
//! - `java` reads an already generated class so regeneration can keep the
//!   hand-written parts.

pub mod java;
pub mod markup;

use std::path::Path;
use crate::diagnostic::CompilerError;
use java::ExistingFileView;

/// Trait for parsers of the generated target language.
pub trait SourceParser {
    /// Returns the language name (e.g., "java").
    fn language(&self) -> &str;

    /// Returns the extension of generated files (e.g., "java").
    fn extension(&self) -> &str;

    /// Decomposes an existing generated file.
    fn parse(&mut self, source: &str, path: &Path) -> Result<ExistingFileView, CompilerError>;
}
