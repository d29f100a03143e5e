//! Java frontend: reads previously generated classes for regeneration.

pub mod parser;
pub mod view;

use std::path::Path;

use crate::diagnostic::CompilerError;
use super::SourceParser;
use parser::JavaParser;
pub use view::ExistingFileView;

/// Java implementation of [`SourceParser`].
pub struct JavaSourceParser {
    parser: JavaParser,
}

impl JavaSourceParser {
    /// Creates a new Java source parser.
    pub fn new() -> Result<Self, CompilerError> {
        Ok(Self {
            parser: JavaParser::new()?,
        })
    }
}

impl SourceParser for JavaSourceParser {
    fn language(&self) -> &str {
        "java"
    }

    fn extension(&self) -> &str {
        "java"
    }

    fn parse(&mut self, source: &str, path: &Path) -> Result<ExistingFileView, CompilerError> {
        self.parser.parse(source, path)
    }
}
