//! Diagnostic types for error reporting.

mod error;
mod span;
mod warning;

pub use error::CompilerError;
pub use span::Span;
pub use warning::CompilerWarning;
