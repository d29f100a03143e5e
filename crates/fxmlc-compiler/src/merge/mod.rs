//! Regeneration of a class that already exists on disk.
//!
//! The generator owns the `@FXML` fields and the two reserved routines.
//! Everything else in the existing class survives, re-indented to the
//! configured width but otherwise untouched.

use crate::codegen::{self, IndentWriter, LOCALIZATION_ROUTINE, SETUP_ROUTINE};
use crate::diagnostic::CompilerError;
use crate::frontend::java::view::{ClassView, ExistingFileView, MemberView, MethodView, Snippet};
use crate::ir::IRDescriptor;
use crate::target::TargetName;

/// Combines a fresh IR with the hand-written parts of `existing`.
pub fn merge(
    existing: &ExistingFileView,
    ir: &IRDescriptor,
    target: &TargetName,
    indent_width: usize,
) -> Result<String, CompilerError> {
    let class = existing
        .class(&target.class_name)
        .ok_or_else(|| CompilerError::MissingExistingClass {
            class_name: target.class_name.clone(),
            path: existing.path.clone(),
        })?;

    let mut imports = ir.imports.clone();
    imports.extend(existing.imports.iter().cloned());
    let package = existing.package.as_deref().or(target.package.as_deref());

    let mut w = IndentWriter::new(indent_width);
    codegen::write_prologue(&mut w, &existing.header_comment, package, &imports);
    // Imports are re-sorted, so comments written among them move below the block.
    write_comments(&mut w, &existing.import_comments);
    write_comments(&mut w, &class.comment);
    for line in class.header.lines() {
        w.line(line.trim_end());
    }
    w.open();
    write_class_body(&mut w, class, ir, target);
    w.close();

    // Every other top-level type of the same file, then what follows them.
    for other in existing.declarations.iter().filter(|d| d.name != class.name) {
        w.blank();
        write_member(&mut w, &other.member);
    }
    if !existing.trailing_comments.is_empty() {
        w.blank();
        write_comments(&mut w, &existing.trailing_comments);
    }

    log::debug!(
        "Merged {} ({} kept field(s), {} kept method(s))",
        target.class_name,
        class.fields.iter().filter(|f| !f.generated).count(),
        class.methods.iter().filter(|m| !owns(m)).count()
    );
    Ok(w.finish())
}

fn write_class_body(w: &mut IndentWriter, class: &ClassView, ir: &IRDescriptor, target: &TargetName) {
    codegen::write_generated_fields(w, ir);

    // Comments above dropped `@FXML` fields go to the next kept member.
    let mut carried: Vec<Snippet> = Vec::new();
    for field in &class.fields {
        if field.generated {
            carried.extend(field.member.comments.iter().cloned());
            continue;
        }
        write_comments(w, &carried);
        carried.clear();
        write_member(w, &field.member);
    }
    for initializer in &class.initializers {
        write_comments(w, &carried);
        carried.clear();
        write_member(w, initializer);
    }
    w.blank();
    write_comments(w, &carried);

    if class.constructors.is_empty() {
        codegen::write_constructor(w, &target.class_name);
    }
    for constructor in &class.constructors {
        write_member(w, constructor);
        w.blank();
    }

    let has_routine = |name: &str| class.methods.iter().any(|m| owns(m) && m.name == name);
    if !has_routine(SETUP_ROUTINE) {
        codegen::write_setup_routine(w, ir);
    }
    if !has_routine(LOCALIZATION_ROUTINE) {
        codegen::write_localization_routine(w, ir);
    }

    for method in &class.methods {
        if !owns(method) {
            write_member(w, &method.member);
            w.blank();
            continue;
        }
        write_comments(w, &method.member.comments);
        if method.name == SETUP_ROUTINE {
            codegen::write_setup_routine(w, ir);
        } else {
            codegen::write_localization_routine(w, ir);
        }
    }

    codegen::write_handler_stubs(w, ir, |signature| class.has_method(signature));

    for nested in &class.nested_types {
        write_member(w, nested);
        w.blank();
    }
    write_comments(w, &class.trailing_comments);
}

/// Reserved routines are only replaced in their no-argument form.
fn owns(method: &MethodView) -> bool {
    method.reserved && method.signature == format!("{}()", method.name)
}

fn write_member(w: &mut IndentWriter, member: &MemberView) {
    write_comments(w, &member.comments);
    w.snippet(&member.body);
}

fn write_comments(w: &mut IndentWriter, comments: &[Snippet]) {
    for comment in comments {
        w.snippet(comment);
    }
}
