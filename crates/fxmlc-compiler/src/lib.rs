//! # fxmlc
//!
//! Converts FXML view descriptions into plain Java classes that build the
//! same scene graph in code, and regenerates those classes without losing
//! the code written into them by hand.
//!
//! ## Architecture
//!
//! ```text
//!   Markup (.fxml)            Existing class (.java)
//!        │                           │
//!        ▼                           ▼
//! ┌──────────────┐           ┌──────────────┐
//! │   Frontend   │ quick-xml │   Frontend   │ tree-sitter-java
//! │   (markup)   │           │    (java)    │
//! └──────┬───────┘           └──────┬───────┘
//!        │                          │
//!        ▼                          │
//! ┌──────────────┐                  │
//! │   Resolve    │ registry + codec │
//! │ (markup→IR)  │                  │
//! └──────┬───────┘                  │
//!        │                          │
//!        ├─────── first time ──┐    │
//!        ▼                     ▼    ▼
//! ┌──────────────┐        ┌──────────────┐
//! │   Codegen    │        │    Merge     │
//! │  (IR→Java)   │        │ (IR+Java→Java)│
//! └──────────────┘        └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fxmlc_compiler::{Compiler, CompilerConfig};
//!
//! let compiler = Compiler::new(CompilerConfig::default());
//! let report = compiler.convert_directory(Path::new("src/main/resources"))?;
//! println!("{} created, {} merged", report.created(), report.merged());
//! ```

pub mod codec;
pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod merge;
pub mod report;
pub mod resolve;
pub mod resource;
pub mod target;

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

pub use config::CompilerConfig;
pub use diagnostic::{CompilerError, CompilerWarning};
pub use report::{BatchReport, UnitReport, UnitStatus};

use frontend::java::JavaSourceParser;
use frontend::SourceParser;
use ir::IRDescriptor;
use resolve::TagRegistry;
use resource::ClasspathResolver;
use target::TargetName;

/// Whether a unit's target file existed before the conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// No target yet: the class is generated from scratch.
    Create,
    /// The target exists: hand-written parts are carried over.
    Merge,
}

/// Result of converting one markup source.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub target: TargetName,
    pub mode: ConversionMode,
    pub code: String,
    pub warnings: Vec<CompilerWarning>,
}

/// A conversion that was written to disk.
#[derive(Debug, Clone)]
pub struct ConvertedFile {
    pub source: PathBuf,
    pub output: PathBuf,
    pub mode: ConversionMode,
    /// False when the output already held exactly this text and was left alone.
    pub changed: bool,
    pub warnings: Vec<CompilerWarning>,
}

/// Runs the conversion pipeline.
pub struct Compiler {
    config: CompilerConfig,
    registry: TagRegistry,
}

impl Compiler {
    /// Creates a compiler that knows the standard JavaFX tags.
    pub fn new(config: CompilerConfig) -> Self {
        Self::with_registry(config, TagRegistry::standard())
    }

    /// Creates a compiler with a custom tag registry.
    pub fn with_registry(config: CompilerConfig, registry: TagRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// Resolves a markup file without generating anything.
    pub fn check(&self, markup_path: &Path) -> Result<IRDescriptor, CompilerError> {
        let source = read(markup_path)?;
        self.resolve_source(&source, markup_path)
    }

    /// Converts markup held in memory.
    ///
    /// `existing` is the current content of the target file, if there is
    /// one; it switches the conversion from create to merge.
    pub fn convert_source(
        &self,
        markup: &str,
        markup_path: &Path,
        existing: Option<(&str, &Path)>,
        parser: &mut dyn SourceParser,
    ) -> Result<Conversion, CompilerError> {
        let target = TargetName::from_markup_path(markup_path)?;
        let ir = self.resolve_source(markup, markup_path)?;

        let (mode, code) = match existing {
            None => (
                ConversionMode::Create,
                codegen::generate_class(&ir, &target, self.config.indent_width),
            ),
            Some((text, path)) => {
                let view = parser.parse(text, path)?;
                (
                    ConversionMode::Merge,
                    merge::merge(&view, &ir, &target, self.config.indent_width)?,
                )
            }
        };

        Ok(Conversion {
            target,
            mode,
            code,
            warnings: ir.warnings,
        })
    }

    /// Converts one markup file into `config.out_dir`.
    ///
    /// Nothing is written unless the whole unit succeeds.
    pub fn convert_file(
        &self,
        markup_path: &Path,
        parser: &mut dyn SourceParser,
    ) -> Result<ConvertedFile, CompilerError> {
        let markup = read(markup_path)?;
        let target = TargetName::from_markup_path(markup_path)?;
        let output = target.output_path(&self.config.out_dir, parser.extension());

        let existing = if output.exists() { Some(read(&output)?) } else { None };
        let conversion = self.convert_source(
            &markup,
            markup_path,
            existing.as_deref().map(|text| (text, output.as_path())),
            parser,
        )?;

        // Untouched files keep their timestamps, so watchers see no change.
        let changed = existing.as_deref() != Some(conversion.code.as_str());
        if changed {
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent).map_err(|e| CompilerError::io(parent, e.to_string()))?;
            }
            std::fs::write(&output, &conversion.code).map_err(|e| CompilerError::io(&output, e.to_string()))?;

            log::info!(
                "{} {} -> {}",
                match conversion.mode {
                    ConversionMode::Create => "Created",
                    ConversionMode::Merge => "Merged",
                },
                markup_path.display(),
                output.display()
            );
        } else {
            log::debug!("{} is up to date", output.display());
        }

        Ok(ConvertedFile {
            source: markup_path.to_path_buf(),
            output,
            mode: conversion.mode,
            changed,
            warnings: conversion.warnings,
        })
    }

    /// Converts every markup file below `dir`, in path order.
    ///
    /// A unit that fails is reported and skipped; the others still run.
    pub fn convert_directory(&self, dir: &Path) -> Result<BatchReport, CompilerError> {
        let mut parser = JavaSourceParser::new()?;
        let mut report = BatchReport::default();

        for path in self.markup_files(dir)? {
            let unit = match self.convert_file(&path, &mut parser) {
                Ok(converted) => UnitReport {
                    source: converted.source,
                    target: Some(converted.output),
                    status: converted.mode.into(),
                    warnings: converted.warnings,
                },
                Err(e) => {
                    log::error!("{}: {}", path.display(), e);
                    UnitReport {
                        target: TargetName::from_markup_path(&path)
                            .ok()
                            .map(|t| t.output_path(&self.config.out_dir, parser.extension())),
                        source: path,
                        status: UnitStatus::Failed(e.to_string()),
                        warnings: Vec::new(),
                    }
                }
            };
            report.units.push(unit);
        }

        log::debug!(
            "Batch finished: {} created, {} merged, {} failed",
            report.created(),
            report.merged(),
            report.failed()
        );
        Ok(report)
    }

    /// Markup files below `dir`, sorted so batch output is reproducible.
    pub fn markup_files(&self, dir: &Path) -> Result<Vec<PathBuf>, CompilerError> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| CompilerError::io(dir, e.to_string()))?;
            if entry.file_type().is_file() && self.config.is_markup(entry.path()) {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn resolve_source(&self, markup: &str, markup_path: &Path) -> Result<IRDescriptor, CompilerError> {
        log::debug!("Resolving {}", markup_path.display());

        let document = frontend::markup::parse_markup(markup, markup_path)?;
        let resources = ClasspathResolver::new(
            self.config.resource_helper.clone(),
            markup_path,
            self.config.source_root.clone(),
        );
        resolve::resolve(&document, &self.registry, &resources)
    }
}

fn read(path: &Path) -> Result<String, CompilerError> {
    std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))
}
