//! Java code generation from the IR.
//!
//! A generated class has a fixed member layout:
//! - `@FXML` fields for the root and every `fx:id` element
//! - a constructor taking the `ResourceBundle`
//! - `setupFX()`, which builds the scene graph children first
//! - `getMainContainer()`, `setTextStrings()` and `resourceUpdate()`
//! - `userConfig()` and one stub per event handler, both left for the user
//!
//! The member writers here are shared with `merge`, so a class that is
//! regenerated without user edits comes out byte for byte the same.

mod indent;

pub use indent::IndentWriter;

use std::collections::{BTreeSet, HashSet};

use crate::frontend::java::view::Snippet;
use crate::ir::{IRDescriptor, RESOURCE_BUNDLE_FIELD};
use crate::target::TargetName;

pub const SETUP_ROUTINE: &str = "setupFX";
pub const LOCALIZATION_ROUTINE: &str = "setTextStrings";

/// Renders a brand new class for `ir`.
pub fn generate_class(ir: &IRDescriptor, target: &TargetName, indent_width: usize) -> String {
    let mut w = IndentWriter::new(indent_width);

    write_prologue(&mut w, &[], target.package.as_deref(), &ir.imports);
    w.block(&format!("public class {}", target.class_name), |w| {
        write_generated_fields(w, ir);
        w.blank();
        write_constructor(w, &target.class_name);
        write_setup_routine(w, ir);
        write_main_container(w, ir);
        write_localization_routine(w, ir);
        write_resource_update(w);
        write_user_config(w);
        write_handler_stubs(w, ir, |_| false);
    });

    log::debug!("Generated class {} ({} handler stub(s))", target.class_name, ir.handlers.len());
    w.finish()
}

/// Header comments, package line and imports, up to the class declaration.
pub fn write_prologue(
    w: &mut IndentWriter,
    header_comment: &[Snippet],
    package: Option<&str>,
    imports: &BTreeSet<String>,
) {
    for comment in header_comment {
        w.snippet(comment);
    }
    if let Some(package) = package {
        w.line(&format!("package {};", package));
        w.blank();
    }
    for import in imports {
        w.line(&format!("import {};", import));
    }
    if !imports.is_empty() {
        w.blank();
    }
}

/// `@FXML` field block, no blank lines in between.
pub fn write_generated_fields(w: &mut IndentWriter, ir: &IRDescriptor) {
    for field in &ir.fields {
        w.line("@FXML");
        w.line(&format!("private {};", field.declaration()));
    }
}

pub fn write_constructor(w: &mut IndentWriter, class_name: &str) {
    w.block(&format!("public {}(ResourceBundle {})", class_name, RESOURCE_BUNDLE_FIELD), |w| {
        w.line(&format!("this.{0} = {0};", RESOURCE_BUNDLE_FIELD));
        w.line(&format!("{}();", SETUP_ROUTINE));
        w.line(&format!("{}();", LOCALIZATION_ROUTINE));
        w.line("userConfig();");
    });
    w.blank();
}

/// Every node's statements, descendants before their parent.
pub fn write_setup_routine(w: &mut IndentWriter, ir: &IRDescriptor) {
    w.block(&format!("private void {}()", SETUP_ROUTINE), |w| {
        for id in ir.arena.post_order(ir.root) {
            for statement in &ir.arena.get(id).statements {
                w.line(statement);
            }
            w.blank();
        }
    });
    w.blank();
}

pub fn write_main_container(w: &mut IndentWriter, ir: &IRDescriptor) {
    let root = ir.root_node();
    w.block(&format!("public {} getMainContainer()", root.type_with_generics()), |w| {
        w.line(&format!("return {};", root.instance_name));
    });
    w.blank();
}

pub fn write_localization_routine(w: &mut IndentWriter, ir: &IRDescriptor) {
    w.block(&format!("private void {}()", LOCALIZATION_ROUTINE), |w| {
        for statement in &ir.i18n_statements {
            w.line(statement);
        }
    });
    w.blank();
}

pub fn write_resource_update(w: &mut IndentWriter) {
    w.block(&format!("public void resourceUpdate(ResourceBundle {})", RESOURCE_BUNDLE_FIELD), |w| {
        w.line(&format!("this.{0} = {0};", RESOURCE_BUNDLE_FIELD));
        w.line(&format!("{}();", LOCALIZATION_ROUTINE));
    });
    w.blank();
}

pub fn write_user_config(w: &mut IndentWriter) {
    w.block("private void userConfig()", |_| {});
    w.blank();
}

/// Empty stubs for handler signatures not already present.
///
/// A signature referenced several times gets one stub.
pub fn write_handler_stubs(w: &mut IndentWriter, ir: &IRDescriptor, exists: impl Fn(&str) -> bool) {
    let mut emitted = HashSet::new();
    for handler in &ir.handlers {
        let signature = handler.signature();
        if exists(&signature) || !emitted.insert(signature) {
            continue;
        }
        w.block(&handler.declaration(), |_| {});
        w.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::markup::parse_markup;
    use crate::resolve::{resolve, TagRegistry};
    use crate::resource::ClasspathResolver;
    use std::path::Path;

    fn make_test_class(source: &str) -> String {
        let path = Path::new("com.acme.Dialog.fxml");
        let doc = parse_markup(source, path).unwrap();
        let resources = ClasspathResolver::new("fxmlc.runtime.Util", path, None);
        let ir = resolve(&doc, &TagRegistry::standard(), &resources).unwrap();
        let target = TargetName::from_markup_path(path).unwrap();
        generate_class(&ir, &target, 2)
    }

    #[test]
    fn renders_full_layout() {
        let code = make_test_class(
            r##"<VBox><Label fx:id="title" text="%dlg.title"/><Button onAction="#save"/></VBox>"##,
        );

        let expected = "\
package com.acme;

import java.util.ResourceBundle;
import javafx.event.ActionEvent;
import javafx.fxml.FXML;
import javafx.scene.control.Button;
import javafx.scene.control.Label;
import javafx.scene.layout.VBox;

public class Dialog
{
  @FXML
  private VBox vboxLINST0000;
  @FXML
  private Label title;
  @FXML
  private ResourceBundle resourceBundle;

  public Dialog(ResourceBundle resourceBundle)
  {
    this.resourceBundle = resourceBundle;
    setupFX();
    setTextStrings();
    userConfig();
  }

  private void setupFX()
  {
    title = new Label();

    Button buttonLINST0001 = new Button();
    buttonLINST0001.setOnAction((e) -> {save(e);});

    vboxLINST0000 = new VBox();
    vboxLINST0000.getChildren().add(title);
    vboxLINST0000.getChildren().add(buttonLINST0001);

  }

  public VBox getMainContainer()
  {
    return vboxLINST0000;
  }

  private void setTextStrings()
  {
    title.setText(resourceBundle.getString(\"dlg.title\"));
  }

  public void resourceUpdate(ResourceBundle resourceBundle)
  {
    this.resourceBundle = resourceBundle;
    setTextStrings();
  }

  private void userConfig()
  {
  }

  private void save(ActionEvent evt)
  {
  }

}
";
        assert_eq!(code, expected);
    }

    #[test]
    fn duplicate_handlers_get_one_stub() {
        let code = make_test_class(
            r##"<VBox><Button onAction="#go"/><Button onAction="#go"/><Label onMouseClicked="#go"/></VBox>"##,
        );

        assert_eq!(code.matches("private void go(ActionEvent evt)").count(), 1);
        assert_eq!(code.matches("private void go(MouseEvent evt)").count(), 1);
    }

    #[test]
    fn generic_root_type_in_accessor() {
        let code = make_test_class(r#"<ListView id="&lt;String"/>"#);

        assert!(code.contains("  private ListView<String> listviewLINST0000;\n"));
        assert!(code.contains("  public ListView<String> getMainContainer()\n"));
        assert!(code.contains("    listviewLINST0000 = new ListView<>();\n"));
    }

    #[test]
    fn no_package_line_without_package() {
        let doc = parse_markup("<Pane/>", Path::new("Plain.fxml")).unwrap();
        let resources = ClasspathResolver::new("Util", "Plain.fxml", None);
        let ir = resolve(&doc, &TagRegistry::standard(), &resources).unwrap();
        let target = TargetName::from_markup_path(Path::new("Plain.fxml")).unwrap();

        let code = generate_class(&ir, &target, 4);
        assert!(code.starts_with("import java.util.ResourceBundle;\n"));
        assert!(code.contains("\n    @FXML\n    private Pane paneLINST0000;\n"));
    }
}
