//! Java parser using tree-sitter.

use std::path::Path;
use tree_sitter::{Node, Parser};

use crate::diagnostic::CompilerError;
use super::view::*;

/// Java parser.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    /// Creates a new Java parser.
    pub fn new() -> Result<Self, CompilerError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|_| CompilerError::ParserInitFailed)?;
        Ok(Self { parser })
    }

    /// Parses a Java source file into an [`ExistingFileView`].
    pub fn parse(&mut self, source: &str, path: &Path) -> Result<ExistingFileView, CompilerError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| CompilerError::ParseFailed { path: path.to_path_buf() })?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(CompilerError::ParseFailed { path: path.to_path_buf() });
        }

        let mut visitor = Visitor::new(source);
        visitor.visit_program(root);

        Ok(ExistingFileView {
            path: path.to_path_buf(),
            header_comment: visitor.header_comment,
            package: visitor.package,
            imports: visitor.imports,
            import_comments: visitor.import_comments,
            classes: visitor.classes,
            declarations: visitor.declarations,
            trailing_comments: visitor.trailing_comments,
        })
    }
}

const TYPE_DECLARATIONS: [&str; 5] = [
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

fn is_comment(kind: &str) -> bool {
    matches!(kind, "line_comment" | "block_comment")
}

/// Walks a tree-sitter tree and collects the parts the merger cares about.
struct Visitor<'a> {
    source: &'a str,
    header_comment: Vec<Snippet>,
    package: Option<String>,
    imports: Vec<String>,
    import_comments: Vec<Snippet>,
    classes: Vec<ClassView>,
    declarations: Vec<TypeDeclaration>,
    trailing_comments: Vec<Snippet>,
}

impl<'a> Visitor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            header_comment: Vec::new(),
            package: None,
            imports: Vec::new(),
            import_comments: Vec::new(),
            classes: Vec::new(),
            declarations: Vec::new(),
            trailing_comments: Vec::new(),
        }
    }

    fn node_text(&self, node: Node) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    fn snippet(&self, node: Node) -> Snippet {
        Snippet {
            text: self.node_text(node).to_string(),
            column: node.start_position().column,
        }
    }

    /// The member's text, extended over comments that share its last line.
    /// Their ids go to `absorbed` so the caller skips them.
    fn member_snippet(&self, node: Node, absorbed: &mut Vec<usize>) -> Snippet {
        let row = node.end_position().row;
        let mut end = node.end_byte();
        let mut next = node.next_sibling();
        while let Some(comment) = next.filter(|n| is_comment(n.kind()) && n.start_position().row == row) {
            absorbed.push(comment.id());
            end = comment.end_byte();
            next = comment.next_sibling();
        }
        Snippet {
            text: self.source[node.start_byte()..end].to_string(),
            column: node.start_position().column,
        }
    }

    fn visit_program(&mut self, node: Node) {
        let mut pending: Vec<Snippet> = Vec::new();

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            let kind = child.kind();
            match kind {
                _ if is_comment(kind) => pending.push(self.snippet(child)),
                "package_declaration" => {
                    self.header_comment.append(&mut pending);
                    self.package = self.visit_package(child);
                }
                "import_declaration" => {
                    if self.package.is_none() && self.imports.is_empty() && self.header_comment.is_empty() {
                        self.header_comment.append(&mut pending);
                    } else {
                        self.import_comments.append(&mut pending);
                    }
                    self.imports.push(self.visit_import(child));
                }
                _ if TYPE_DECLARATIONS.contains(&kind) => {
                    let comments = std::mem::take(&mut pending);
                    let Some(name) = child.child_by_field_name("name") else {
                        continue;
                    };
                    if kind == "class_declaration" {
                        if let Some(class) = self.visit_class(child, comments.clone()) {
                            self.classes.push(class);
                        }
                    }
                    self.declarations.push(TypeDeclaration {
                        name: self.node_text(name).to_string(),
                        member: MemberView {
                            comments,
                            body: self.snippet(child),
                        },
                    });
                }
                _ => {}
            }
        }
        self.trailing_comments = pending;
    }

    fn visit_package(&self, node: Node) -> Option<String> {
        let mut cursor = node.walk();
        let name = node
            .named_children(&mut cursor)
            .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
            .map(|c| self.node_text(c).to_string());
        name
    }

    fn visit_import(&self, node: Node) -> String {
        let text = self.node_text(node);
        let inner = text
            .trim()
            .trim_start_matches("import")
            .trim_end_matches(';');
        inner.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn visit_class(&self, node: Node, comment: Vec<Snippet>) -> Option<ClassView> {
        let name = self.node_text(node.child_by_field_name("name")?).to_string();
        let body = node.child_by_field_name("body")?;
        let header = self.source[node.start_byte()..body.start_byte()].trim_end().to_string();

        let mut class = ClassView {
            name,
            header,
            comment,
            fields: Vec::new(),
            initializers: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            nested_types: Vec::new(),
            trailing_comments: Vec::new(),
        };

        let mut pending: Vec<Snippet> = Vec::new();
        let mut absorbed: Vec<usize> = Vec::new();
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            let kind = child.kind();
            if is_comment(kind) {
                if !absorbed.contains(&child.id()) {
                    pending.push(self.snippet(child));
                }
                continue;
            }

            let is_member = matches!(
                kind,
                "field_declaration" | "constructor_declaration" | "method_declaration" | "static_initializer" | "block"
            ) || TYPE_DECLARATIONS.contains(&kind);
            if !is_member {
                continue;
            }

            // Comments trailing a generator-owned member must not vanish with it.
            let generated = kind == "field_declaration" && self.has_fxml_marker(child);
            let text = if generated || self.is_reserved_method(child) {
                self.snippet(child)
            } else {
                self.member_snippet(child, &mut absorbed)
            };
            let member = MemberView {
                comments: std::mem::take(&mut pending),
                body: text,
            };

            match kind {
                "field_declaration" => class.fields.push(FieldView { member, generated }),
                "constructor_declaration" => class.constructors.push(member),
                "method_declaration" => {
                    if let Some(method) = self.visit_method(child, member) {
                        class.methods.push(method);
                    }
                }
                "static_initializer" | "block" => class.initializers.push(member),
                _ => class.nested_types.push(member),
            }
        }
        class.trailing_comments = pending;

        Some(class)
    }

    fn is_reserved_method(&self, node: Node) -> bool {
        node.kind() == "method_declaration"
            && node
                .child_by_field_name("name")
                .is_some_and(|name| RESERVED_METHODS.contains(&self.node_text(name)))
    }

    fn visit_method(&self, node: Node, member: MemberView) -> Option<MethodView> {
        let name = self.node_text(node.child_by_field_name("name")?).to_string();

        let mut param_types = Vec::new();
        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            for param in params.named_children(&mut cursor) {
                match param.kind() {
                    "formal_parameter" => {
                        if let Some(ty) = param.child_by_field_name("type") {
                            let dims = param
                                .child_by_field_name("dimensions")
                                .map(|d| self.node_text(d))
                                .unwrap_or("");
                            param_types.push(simple_type_name(&format!("{}{}", self.node_text(ty), dims)));
                        }
                    }
                    "spread_parameter" => {
                        let mut inner = param.walk();
                        let ty = param
                            .named_children(&mut inner)
                            .find(|c| c.kind() != "modifiers" && c.kind() != "variable_declarator");
                        if let Some(ty) = ty {
                            param_types.push(format!("{}...", simple_type_name(self.node_text(ty))));
                        }
                    }
                    _ => {}
                }
            }
        }

        Some(MethodView {
            reserved: RESERVED_METHODS.contains(&name.as_str()),
            signature: format!("{}({})", name, param_types.join(", ")),
            name,
            member,
        })
    }

    fn has_fxml_marker(&self, node: Node) -> bool {
        let mut cursor = node.walk();
        let Some(modifiers) = node.children(&mut cursor).find(|c| c.kind() == "modifiers") else {
            return false;
        };

        let mut inner = modifiers.walk();
        let found = modifiers
            .children(&mut inner)
            .filter(|c| matches!(c.kind(), "marker_annotation" | "annotation"))
            .filter_map(|c| c.child_by_field_name("name"))
            .any(|name| {
                let text = self.node_text(name);
                text == "FXML" || text.ends_with(".FXML")
            });
        found
    }
}

/// Reduces a written type to the form used in signatures:
/// no package, no type arguments, array and varargs suffixes kept.
pub(crate) fn simple_type_name(written: &str) -> String {
    let mut base: String = written.split_whitespace().collect();
    let mut suffix = String::new();
    loop {
        if let Some(rest) = base.strip_suffix("...") {
            suffix.insert_str(0, "...");
            base = rest.to_string();
        } else if let Some(rest) = base.strip_suffix("[]") {
            suffix.insert_str(0, "[]");
            base = rest.to_string();
        } else {
            break;
        }
    }
    if let Some(open) = base.find('<') {
        base.truncate(open);
    }
    let simple = base.rsplit('.').next().unwrap_or(&base);
    format!("{}{}", simple, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXISTING: &str = r#"/*
 * Licensed to nobody.
 */
package com.acme.ui;

import java.util.ResourceBundle;
import javafx.event.ActionEvent;
import javafx.fxml.FXML;
import static java.lang.Math.max;

/**
 * Main view.
 */
public class MainView extends Object
{
  @FXML
  private VBox vboxLINST0000;
  private int clicks = 0;

  public MainView(ResourceBundle resourceBundle)
  {
    this.resourceBundle = resourceBundle;
  }

  private void setupFX()
  {
  }

  /** Counts clicks. */
  private void save(javafx.event.ActionEvent evt)
  {
    clicks++;
  }

  private static String join(java.util.List<String> parts, String... rest)
  {
    return "";
  }

  private static class Row
  {
  }
  // trailing note
}
"#;

    fn parse(source: &str) -> ExistingFileView {
        JavaParser::new()
            .unwrap()
            .parse(source, Path::new("MainView.java"))
            .unwrap()
    }

    #[test]
    fn extracts_file_level_parts() {
        let view = parse(EXISTING);

        assert_eq!(view.package.as_deref(), Some("com.acme.ui"));
        assert_eq!(view.header_comment.len(), 1);
        assert!(view.header_comment[0].text.contains("Licensed to nobody"));
        assert!(view.imports.contains(&"java.util.ResourceBundle".to_string()));
        assert!(view.imports.contains(&"static java.lang.Math.max".to_string()));
    }

    #[test]
    fn extracts_class_members() {
        let view = parse(EXISTING);
        let class = view.class("MainView").unwrap();

        assert_eq!(class.header, "public class MainView extends Object");
        assert_eq!(class.comment.len(), 1);
        assert_eq!(class.fields.len(), 2);
        assert!(class.fields[0].generated);
        assert!(!class.fields[1].generated);
        assert_eq!(class.constructors.len(), 1);
        assert_eq!(class.nested_types.len(), 1);
        assert_eq!(class.trailing_comments.len(), 1);
    }

    #[test]
    fn methods_carry_signatures_and_comments() {
        let view = parse(EXISTING);
        let class = view.class("MainView").unwrap();

        let names: Vec<&str> = class.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["setupFX", "save", "join"]);

        assert!(class.methods[0].reserved);
        assert!(!class.methods[1].reserved);
        assert!(class.has_method("save(ActionEvent)"));
        assert_eq!(class.methods[2].signature, "join(List, String...)");
        assert_eq!(class.methods[1].member.comments[0].text, "/** Counts clicks. */");
    }

    #[test]
    fn same_line_comment_belongs_to_the_member_before_it() {
        let view = parse(
            "public class A\n{\n  private int k = 1; /* one */ // k\n  @FXML\n  private Pane p; // owned\n  private int j;\n}\n",
        );
        let class = view.class("A").unwrap();

        assert_eq!(class.fields[0].member.body.text, "private int k = 1; /* one */ // k");
        assert_eq!(class.fields[1].member.body.text, "@FXML\n  private Pane p;");
        assert_eq!(class.fields[2].member.comments[0].text, "// owned");
        assert!(class.trailing_comments.is_empty());
    }

    #[test]
    fn records_every_top_level_type_and_file_comments() {
        let view = parse(
            "// head\nimport a.B;\n// between\nimport c.D;\n\npublic class A\n{\n}\n\ninterface I\n{\n}\n\nenum E { X }\n// eof\n",
        );

        assert_eq!(view.header_comment[0].text, "// head");
        assert_eq!(view.import_comments[0].text, "// between");
        assert_eq!(view.classes.len(), 1);
        let names: Vec<&str> = view.declarations.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["A", "I", "E"]);
        assert_eq!(view.declarations[2].member.body.text, "enum E { X }");
        assert_eq!(view.trailing_comments[0].text, "// eof");
    }

    #[test]
    fn syntax_errors_are_rejected() {
        let err = JavaParser::new()
            .unwrap()
            .parse("public class Broken {", Path::new("Broken.java"))
            .unwrap_err();
        assert!(matches!(err, CompilerError::ParseFailed { .. }));
    }

    #[test]
    fn simple_type_names() {
        assert_eq!(simple_type_name("javafx.event.ActionEvent"), "ActionEvent");
        assert_eq!(simple_type_name("java.util.List<String>"), "List");
        assert_eq!(simple_type_name("String[]"), "String[]");
        assert_eq!(simple_type_name("Map<String, Integer>"), "Map");
    }
}
