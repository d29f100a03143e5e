//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

use super::Span;

/// Errors that can occur while converting a unit.
///
/// Every variant is fatal for the unit that raised it. Batch conversion
/// records the error against that unit and moves on.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to access '{}': {message}", path.display())]
    #[diagnostic(code(fxmlc::io::access_failed))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to load config '{}': {message}", path.display())]
    #[diagnostic(
        code(fxmlc::io::config),
        help("The config file is JSON; every key is optional")
    )]
    ConfigError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Failed to initialize parser")]
    #[diagnostic(code(fxmlc::parse::init_failed))]
    ParserInitFailed,

    #[error("Failed to parse file: {}", path.display())]
    #[diagnostic(
        code(fxmlc::parse::parse_failed),
        help("Fix the Java syntax errors first; regenerating a broken file would lose code")
    )]
    ParseFailed {
        path: PathBuf,
    },

    #[error("Malformed markup in {}: {message}", path.display())]
    #[diagnostic(code(fxmlc::parse::markup_syntax))]
    MarkupSyntax {
        path: PathBuf,
        message: String,
    },

    #[error("Cannot derive a class name from '{}'", path.display())]
    #[diagnostic(
        code(fxmlc::parse::invalid_target_name),
        help("Markup files are named like 'com.acme.MainView.fxml'")
    )]
    InvalidTargetName {
        path: PathBuf,
    },

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("Unrecognized tag <{tag}> at {span}")]
    #[diagnostic(
        code(fxmlc::resolve::unrecognized_tag),
        help("Only registered element types can be converted")
    )]
    UnrecognizedTag {
        tag: String,
        span: Span,
    },

    #[error("Unrecognized attribute '{attribute}' on <{tag}> at {span}")]
    #[diagnostic(code(fxmlc::resolve::unrecognized_attribute))]
    UnrecognizedAttribute {
        attribute: String,
        tag: String,
        span: Span,
    },

    #[error("<{child}> is not allowed inside <{parent}> at {span}")]
    #[diagnostic(code(fxmlc::resolve::unexpected_child))]
    UnexpectedChild {
        child: String,
        parent: String,
        span: Span,
    },

    // =========================================================================
    // Regeneration Errors
    // =========================================================================
    #[error("Existing file {} does not declare class '{class_name}'", path.display())]
    #[diagnostic(
        code(fxmlc::merge::missing_class),
        help("Rename the class back or delete the file to generate it from scratch")
    )]
    MissingExistingClass {
        class_name: String,
        path: PathBuf,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}
