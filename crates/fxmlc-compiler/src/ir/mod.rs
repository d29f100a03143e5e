//! Intermediate representation of one conversion unit.
//!
//! Produced by `resolve`, consumed once by `codegen` (first generation) or
//! `merge` (regeneration).

mod element;
mod identifier;

pub use element::{ElementArena, ElementNode, NodeId};
pub use identifier::{IdentifierAttr, TypeName};

use std::collections::BTreeSet;

use crate::diagnostic::CompilerWarning;

/// Name of the generated locale field and constructor parameter.
pub const RESOURCE_BUNDLE_FIELD: &str = "resourceBundle";

/// Everything the emitter needs to render one class.
#[derive(Debug, Clone)]
pub struct IRDescriptor {
    /// Fully qualified names. Ordered so emission is deterministic.
    pub imports: BTreeSet<String>,
    pub fields: Vec<FieldDecl>,
    /// Collection order, duplicates included.
    pub handlers: Vec<Handler>,
    pub i18n_statements: Vec<String>,
    pub arena: ElementArena,
    pub root: NodeId,
    pub warnings: Vec<CompilerWarning>,
}

impl IRDescriptor {
    pub fn root_node(&self) -> &ElementNode {
        self.arena.get(self.root)
    }
}

/// A class-level field owned by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub type_name: String,
    /// Rendered type parameters, e.g. `<String>`; empty without generics.
    pub generics: String,
    pub name: String,
}

impl FieldDecl {
    /// `ChoiceBox<String> choices`
    pub fn declaration(&self) -> String {
        format!("{}{} {}", self.type_name, self.generics, self.name)
    }
}

/// Kind of event a markup callback attribute listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Action,
    Mouse,
    Key,
}

impl EventKind {
    /// Maps a callback attribute name such as `onAction` to its event kind.
    pub fn from_attribute(name: &str) -> Option<Self> {
        match name {
            "onAction" => Some(Self::Action),
            "onMouseClicked" | "onMousePressed" | "onMouseReleased" | "onMouseEntered"
            | "onMouseExited" => Some(Self::Mouse),
            "onKeyPressed" | "onKeyReleased" | "onKeyTyped" => Some(Self::Key),
            _ => None,
        }
    }

    pub fn event_class(&self) -> &'static str {
        match self {
            Self::Action => "ActionEvent",
            Self::Mouse => "MouseEvent",
            Self::Key => "KeyEvent",
        }
    }

    pub fn import(&self) -> &'static str {
        match self {
            Self::Action => "javafx.event.ActionEvent",
            Self::Mouse => "javafx.scene.input.MouseEvent",
            Self::Key => "javafx.scene.input.KeyEvent",
        }
    }
}

/// A callback referenced from markup that needs a method in the class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handler {
    pub kind: EventKind,
    pub name: String,
}

impl Handler {
    /// Name and parameter types, the form existing methods are matched by.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.kind.event_class())
    }

    /// Header line of the generated stub.
    pub fn declaration(&self) -> String {
        format!("private void {}({} evt)", self.name, self.kind.event_class())
    }
}
