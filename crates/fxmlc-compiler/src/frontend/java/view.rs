//! Structured view of an existing Java source file.

use std::path::PathBuf;

/// Names of the two routines the generator owns inside a class.
pub const RESERVED_METHODS: [&str; 2] = ["setupFX", "setTextStrings"];

/// A piece of source text and the column its first line started at.
///
/// Lines after the first keep their original indentation; emitters strip
/// `column` leading whitespace from them before re-indenting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub text: String,
    pub column: usize,
}

impl Snippet {
    /// Lines with the original member indentation removed.
    pub fn dedented_lines(&self) -> Vec<&str> {
        self.text
            .lines()
            .enumerate()
            .map(|(i, line)| if i == 0 { line.trim_start() } else { strip_indent(line, self.column) })
            .collect()
    }
}

fn strip_indent(line: &str, width: usize) -> &str {
    let mut stripped = 0;
    let mut start = 0;
    for (i, c) in line.char_indices() {
        if stripped == width || !(c == ' ' || c == '\t') {
            start = i;
            break;
        }
        stripped += 1;
        start = i + c.len_utf8();
    }
    &line[start..]
}

/// A class member together with the comments directly above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub comments: Vec<Snippet>,
    pub body: Snippet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub member: MemberView,
    /// Carries the `@FXML` marker, so the generator owns it.
    pub generated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodView {
    pub name: String,
    /// Name plus simple parameter types, e.g. `save(ActionEvent)`.
    pub signature: String,
    pub reserved: bool,
    pub member: MemberView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassView {
    pub name: String,
    /// Everything from the first modifier up to the opening brace.
    pub header: String,
    pub comment: Vec<Snippet>,
    pub fields: Vec<FieldView>,
    pub initializers: Vec<MemberView>,
    pub constructors: Vec<MemberView>,
    pub methods: Vec<MethodView>,
    pub nested_types: Vec<MemberView>,
    /// Comments after the last member.
    pub trailing_comments: Vec<Snippet>,
}

impl ClassView {
    pub fn has_method(&self, signature: &str) -> bool {
        self.methods.iter().any(|m| m.signature == signature)
    }
}

/// A top-level type of any kind, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    pub name: String,
    pub member: MemberView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingFileView {
    pub path: PathBuf,
    /// Comments above the package line.
    pub header_comment: Vec<Snippet>,
    pub package: Option<String>,
    /// Import targets as written, e.g. `java.util.List` or `static a.B.c`.
    pub imports: Vec<String>,
    /// Comments between the package line and the last import.
    pub import_comments: Vec<Snippet>,
    /// Top-level classes, broken down into members.
    pub classes: Vec<ClassView>,
    /// Every top-level type declaration in source order, classes included.
    pub declarations: Vec<TypeDeclaration>,
    /// Comments after the last top-level type.
    pub trailing_comments: Vec<Snippet>,
}

impl ExistingFileView {
    pub fn class(&self, name: &str) -> Option<&ClassView> {
        self.classes.iter().find(|c| c.name == name)
    }
}
