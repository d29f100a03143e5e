//! Element resolution: markup tree to IR.
//!
//! Walks the markup depth first. Every element becomes one node in the
//! arena, named and constructed before its attributes and children are
//! processed, so the sequence counter advances in encounter order.

mod registry;
mod values;

pub use registry::{
    DefaultChild, ElementFamily, TagEntry, TagRegistry, BORDER, BUTTON_BAR, COLOR, COLUMN,
    CONTAINER, CONTENT, FONT, GRID, IMAGE, INSETS, LABELED, LEAF, MENU, MENU_BAR, SPLIT_PANE,
    TABLE, TAB_PANE, UNIVERSAL_SLOTS,
};
pub use values::{ConstructFn, ConstructInput, Construction};

use std::collections::BTreeSet;

use crate::codec::{self, capitalize, setter_name, CodecEnv, NodeRef, Placement};
use crate::diagnostic::{CompilerError, CompilerWarning, Span};
use crate::frontend::markup::{MarkupDocument, MarkupElement, MarkupNode};
use crate::ir::{
    ElementArena, ElementNode, FieldDecl, Handler, IRDescriptor, IdentifierAttr, NodeId,
    RESOURCE_BUNDLE_FIELD,
};
use crate::resource::ResourceResolver;

/// Imports every generated class needs.
pub const BASE_IMPORTS: [&str; 2] = ["javafx.fxml.FXML", "java.util.ResourceBundle"];

/// Resolves a parsed markup document into an [`IRDescriptor`].
pub fn resolve(
    document: &MarkupDocument,
    registry: &TagRegistry,
    resources: &dyn ResourceResolver,
) -> Result<IRDescriptor, CompilerError> {
    // Sequence 0 is reserved for an anonymous root.
    let first_sequence = if document.root.attribute("fx:id").is_some() { 1 } else { 0 };
    let mut cx = ResolveContext::new(registry, resources, first_sequence);

    cx.imports.extend(document.imports.iter().cloned());
    cx.imports.extend(BASE_IMPORTS.iter().map(|s| s.to_string()));

    let root = cx.resolve_element(&document.root, None)?;
    cx.fields.push(FieldDecl {
        type_name: "ResourceBundle".to_string(),
        generics: String::new(),
        name: RESOURCE_BUNDLE_FIELD.to_string(),
    });

    log::debug!(
        "Resolved {} element(s), {} field(s), {} handler(s)",
        cx.arena.len(),
        cx.fields.len(),
        cx.handlers.len()
    );

    Ok(cx.finish(root))
}

/// Mutable state of one resolution pass. Owned by a single unit.
pub struct ResolveContext<'a> {
    counter: u32,
    arena: ElementArena,
    imports: BTreeSet<String>,
    fields: Vec<FieldDecl>,
    handlers: Vec<Handler>,
    i18n_statements: Vec<String>,
    warnings: Vec<CompilerWarning>,
    registry: &'a TagRegistry,
    resources: &'a dyn ResourceResolver,
}

impl<'a> ResolveContext<'a> {
    pub fn new(registry: &'a TagRegistry, resources: &'a dyn ResourceResolver, first_sequence: u32) -> Self {
        Self {
            counter: first_sequence,
            arena: ElementArena::new(),
            imports: BTreeSet::new(),
            fields: Vec::new(),
            handlers: Vec::new(),
            i18n_statements: Vec::new(),
            warnings: Vec::new(),
            registry,
            resources,
        }
    }

    pub fn finish(self, root: NodeId) -> IRDescriptor {
        IRDescriptor {
            imports: self.imports,
            fields: self.fields,
            handlers: self.handlers,
            i18n_statements: self.i18n_statements,
            arena: self.arena,
            root,
            warnings: self.warnings,
        }
    }

    fn next_sequence(&mut self) -> u32 {
        let seq = self.counter;
        self.counter += 1;
        seq
    }

    /// Resolves one object element and everything below it.
    pub fn resolve_element(
        &mut self,
        element: &MarkupElement,
        parent: Option<NodeId>,
    ) -> Result<NodeId, CompilerError> {
        let entry = self.registry.lookup(&element.tag).ok_or_else(|| CompilerError::UnrecognizedTag {
            tag: element.tag.clone(),
            span: element.span.clone(),
        })?;
        let family = entry.family;
        self.imports.extend(entry.import.clone());

        // Generics first: they decide between `new T()` and `new T<>()`.
        let identifier = element
            .attribute("id")
            .map(IdentifierAttr::parse)
            .unwrap_or_default();
        self.imports.extend(identifier.imports().map(str::to_string));

        let explicit = element.attribute("fx:id").map(str::to_string);
        let (instance_name, sequence) = match explicit {
            Some(name) => (name, None),
            None => {
                let seq = self.next_sequence();
                (format!("{}LINST{:04}", element.tag.to_lowercase(), seq), Some(seq))
            }
        };
        let is_field = sequence.map_or(true, |seq| seq == 0);

        let construction = (family.construct)(&ConstructInput {
            element,
            has_generics: identifier.has_generics(),
            resources: self.resources,
        })?;
        self.imports.extend(construction.imports);

        let generics = identifier.render_generics();
        let constructor = if is_field {
            self.fields.push(FieldDecl {
                type_name: element.tag.clone(),
                generics: generics.clone(),
                name: instance_name.clone(),
            });
            format!("{} = {};", instance_name, construction.expression)
        } else {
            format!("{}{} {} = {};", element.tag, generics, instance_name, construction.expression)
        };

        log::trace!("{} -> {}", element.tag, instance_name);

        let id = self.arena.alloc(ElementNode {
            tag: element.tag.clone(),
            instance_name,
            sequence,
            identifier,
            is_field,
            statements: vec![constructor],
            children: Vec::new(),
            parent,
        });

        // Value families already consumed their attributes and children.
        if family.is_value {
            return Ok(id);
        }

        for (name, raw) in &element.attributes {
            if codec::is_reserved(name) {
                continue;
            }
            self.apply_attribute(id, name, raw, &element.span)?;
        }

        // A content holder takes one direct child, like a slot.
        if let Some(DefaultChild::Set(_)) = family.default_child {
            let mut direct = element
                .elements()
                .filter(|c| attached_property(&c.tag).is_none() && c.tag.starts_with(|ch: char| ch.is_uppercase()));
            if let Some(second) = direct.nth(1) {
                return Err(unexpected(second, element));
            }
        }

        for child in &element.children {
            self.resolve_child(id, family, element, child)?;
        }

        Ok(id)
    }

    fn apply_attribute(&mut self, id: NodeId, name: &str, raw: &str, span: &Span) -> Result<(), CompilerError> {
        let node = self.arena.get(id);
        let node_ref = NodeRef {
            instance: &node.instance_name,
            tag: &node.tag,
            is_field: node.is_field,
            span,
        };
        let env = CodecEnv {
            registry: self.registry,
            resources: self.resources,
        };

        let Some(encoded) = codec::encode(name, raw, &node_ref, &env)? else {
            return Ok(());
        };

        self.imports.extend(encoded.imports);
        self.handlers.extend(encoded.handler);
        if let Some(warning) = encoded.warning {
            log::warn!("{}", warning);
            self.warnings.push(warning);
        }

        match encoded.placement {
            Placement::Construction => self.push_statement(id, encoded.statement),
            Placement::Localization => self.i18n_statements.push(encoded.statement),
        }
        Ok(())
    }

    fn resolve_child(
        &mut self,
        id: NodeId,
        family: &ElementFamily,
        element: &MarkupElement,
        child: &MarkupNode,
    ) -> Result<(), CompilerError> {
        let child = match child {
            MarkupNode::Element(child) => child,
            MarkupNode::Text(text) if text.trim().is_empty() => return Ok(()),
            MarkupNode::Text(_) => {
                return Err(CompilerError::UnexpectedChild {
                    child: "#text".to_string(),
                    parent: element.tag.clone(),
                    span: element.span.clone(),
                })
            }
        };

        if let Some((owner, property)) = attached_property(&child.tag) {
            return self.resolve_attached(id, owner, property, child);
        }
        if child.tag.starts_with(|c: char| c.is_lowercase()) {
            return self.resolve_property_element(id, family, element, child);
        }

        if self.registry.lookup(&child.tag).is_none() {
            return Err(CompilerError::UnrecognizedTag {
                tag: child.tag.clone(),
                span: child.span.clone(),
            });
        }
        let Some(default_child) = family.default_child else {
            return Err(unexpected(child, element));
        };

        let child_id = self.resolve_element(child, Some(id))?;
        let parent_name = self.instance(id);
        let child_name = self.instance(child_id);
        let statement = match default_child {
            DefaultChild::Add(accessor) => format!("{}.{}.add({});", parent_name, accessor, child_name),
            DefaultChild::Set(setter) => format!("{}.{}({});", parent_name, setter, child_name),
        };
        self.push_statement(id, statement);
        Ok(())
    }

    /// `<Owner.property>`: every child is attached to the current node.
    fn resolve_attached(
        &mut self,
        id: NodeId,
        owner: &str,
        property: &str,
        element: &MarkupElement,
    ) -> Result<(), CompilerError> {
        let children: Vec<&MarkupElement> = element.elements().collect();
        if children.is_empty() {
            return self.apply_attribute(id, &element.tag, &element.text(), &element.span);
        }

        self.imports.extend(self.registry.import_for(owner).map(str::to_string));
        for child in children {
            let child_id = self.resolve_element(child, Some(id))?;
            let statement = format!(
                "{}.{}({}, {});",
                owner,
                setter_name(property),
                self.instance(id),
                self.instance(child_id)
            );
            self.push_statement(id, statement);
        }
        Ok(())
    }

    /// Lowercase property elements: `<children>`, collections, slots, or a
    /// plain attribute written as an element.
    fn resolve_property_element(
        &mut self,
        id: NodeId,
        family: &ElementFamily,
        parent: &MarkupElement,
        element: &MarkupElement,
    ) -> Result<(), CompilerError> {
        let property = element.tag.as_str();
        let is_children = property == "children" && family.children_property;
        let collection = family.collection(property);
        let is_slot = family.has_slot(property);
        let known = is_children || collection.is_some() || is_slot;

        let children: Vec<&MarkupElement> = element.elements().collect();
        if children.is_empty() {
            let text = element.text();
            if !text.is_empty() {
                return self.apply_attribute(id, property, &text, &element.span);
            }
            return if known { Ok(()) } else { Err(unexpected(element, parent)) };
        }
        if !known {
            return Err(unexpected(element, parent));
        }
        // A slot holds exactly one object.
        if !is_children && collection.is_none() && children.len() > 1 {
            return Err(unexpected(children[1], element));
        }

        let mut resolved = Vec::with_capacity(children.len());
        for child in children {
            if attached_property(&child.tag).is_some() || child.tag.starts_with(|c: char| c.is_lowercase()) {
                return Err(unexpected(child, element));
            }
            resolved.push(self.resolve_element(child, Some(id))?);
        }

        let parent_name = self.instance(id);
        let names: Vec<String> = resolved.iter().map(|child| self.instance(*child)).collect();

        if is_children {
            self.push_statement(id, format!("{}.getChildren().addAll({});", parent_name, names.join(", ")));
        } else if let Some(accessor) = collection {
            for name in names {
                self.push_statement(id, format!("{}.{}.add({});", parent_name, accessor, name));
            }
        } else {
            let setter = format!("set{}", capitalize(property));
            for name in names {
                self.push_statement(id, format!("{}.{}({});", parent_name, setter, name));
            }
        }
        Ok(())
    }

    fn instance(&self, id: NodeId) -> String {
        self.arena.get(id).instance_name.clone()
    }

    fn push_statement(&mut self, id: NodeId, statement: String) {
        self.arena.get_mut(id).statements.push(statement);
    }
}

/// Splits `VBox.margin` into owner and property.
fn attached_property(tag: &str) -> Option<(&str, &str)> {
    let (owner, property) = tag.rsplit_once('.')?;
    let owner_simple = owner.rsplit('.').next().unwrap_or(owner);
    let is_type = owner_simple.starts_with(|c: char| c.is_uppercase());
    let is_property = property.starts_with(|c: char| c.is_lowercase());
    (is_type && is_property).then_some((owner, property))
}

fn unexpected(child: &MarkupElement, parent: &MarkupElement) -> CompilerError {
    CompilerError::UnexpectedChild {
        child: child.tag.clone(),
        parent: parent.tag.clone(),
        span: child.span.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::markup::parse_markup;
    use crate::resource::ClasspathResolver;
    use std::path::Path;

    fn make_test_ir(source: &str) -> Result<IRDescriptor, CompilerError> {
        let doc = parse_markup(source, Path::new("Main.fxml")).unwrap();
        let registry = TagRegistry::standard();
        let resources = ClasspathResolver::new("fxmlc.runtime.Util", "Main.fxml", None);
        resolve(&doc, &registry, &resources)
    }

    fn statements(ir: &IRDescriptor, name: &str) -> Vec<String> {
        ir.arena
            .iter()
            .find(|(_, node)| node.instance_name == name)
            .map(|(_, node)| node.statements.clone())
            .unwrap_or_default()
    }

    #[test]
    fn anonymous_root_is_promoted_with_sequence_zero() {
        let ir = make_test_ir(r#"<VBox><Button text="OK"/></VBox>"#).unwrap();

        let root = ir.root_node();
        assert_eq!(root.instance_name, "vboxLINST0000");
        assert_eq!(root.sequence, Some(0));
        assert!(root.is_field);

        let field_names: Vec<&str> = ir.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(field_names, vec!["vboxLINST0000", "resourceBundle"]);
        assert_eq!(statements(&ir, "vboxLINST0000")[0], "vboxLINST0000 = new VBox();");
        assert_eq!(statements(&ir, "buttonLINST0001")[0], "Button buttonLINST0001 = new Button();");
    }

    #[test]
    fn named_root_shifts_the_counter() {
        let ir = make_test_ir(r#"<VBox fx:id="root"><Button/></VBox>"#).unwrap();

        assert_eq!(ir.root_node().instance_name, "root");
        assert!(statements(&ir, "buttonLINST0001")[0].starts_with("Button buttonLINST0001"));
        assert_eq!(ir.fields.len(), 2);
    }

    #[test]
    fn fx_id_makes_a_field_with_generics() {
        let ir = make_test_ir(
            r#"<VBox><ChoiceBox fx:id="choices" id="&lt;java.time.DayOfWeek"/></VBox>"#,
        )
        .unwrap();

        assert_eq!(statements(&ir, "choices")[0], "choices = new ChoiceBox<>();");
        assert_eq!(ir.fields[1].declaration(), "ChoiceBox<DayOfWeek> choices");
        assert!(ir.imports.contains("java.time.DayOfWeek"));
    }

    #[test]
    fn children_property_adds_all_at_once() {
        let ir = make_test_ir(
            r#"<HBox spacing="4"><children><Label/><Button fx:id="ok"/></children></HBox>"#,
        )
        .unwrap();

        let root = statements(&ir, "hboxLINST0000");
        assert_eq!(root[1], "hboxLINST0000.setSpacing(4);");
        assert_eq!(root[2], "hboxLINST0000.getChildren().addAll(labelLINST0001, ok);");
    }

    #[test]
    fn direct_children_use_default_collection() {
        let ir = make_test_ir(r#"<VBox><Label/><Label/></VBox>"#).unwrap();
        let root = statements(&ir, "vboxLINST0000");

        assert_eq!(root[1], "vboxLINST0000.getChildren().add(labelLINST0001);");
        assert_eq!(root[2], "vboxLINST0000.getChildren().add(labelLINST0002);");
    }

    #[test]
    fn attached_property_element_targets_current_node() {
        let ir = make_test_ir(
            r#"<VBox><Button fx:id="ok"><VBox.margin><Insets top="4"/></VBox.margin></Button></VBox>"#,
        )
        .unwrap();

        let ok = statements(&ir, "ok");
        assert_eq!(ok[1], "VBox.setMargin(ok, insetsLINST0001);");
        assert_eq!(
            statements(&ir, "insetsLINST0001")[0],
            "Insets insetsLINST0001 = new Insets(4, 0.0, 0.0, 0.0);"
        );
        assert!(ir.imports.contains("javafx.geometry.Insets"));
    }

    #[test]
    fn slots_and_collections() {
        let ir = make_test_ir(
            r#"<BorderPane>
  <center><TableView fx:id="table"><columns><TableColumn text="Name"/></columns></TableView></center>
  <padding><Insets topRightBottomLeft="8"/></padding>
</BorderPane>"#,
        )
        .unwrap();

        let root = statements(&ir, "borderpaneLINST0000");
        assert_eq!(root[1], "borderpaneLINST0000.setCenter(table);");
        assert_eq!(root[2], "borderpaneLINST0000.setPadding(insetsLINST0002);");
        assert_eq!(statements(&ir, "table")[1], "table.getColumns().add(tablecolumnLINST0001);");
    }

    #[test]
    fn grid_constraints_go_to_their_own_collection() {
        let ir = make_test_ir(
            r#"<GridPane><columnConstraints><ColumnConstraints percentWidth="50"/></columnConstraints></GridPane>"#,
        )
        .unwrap();

        assert_eq!(
            statements(&ir, "gridpaneLINST0000")[1],
            "gridpaneLINST0000.getColumnConstraints().add(columnconstraintsLINST0001);"
        );
    }

    #[test]
    fn tabs_are_appended() {
        let ir = make_test_ir(
            r#"<TabPane><tabs><Tab text="One"><content><Pane/></content></Tab></tabs></TabPane>"#,
        )
        .unwrap();

        assert_eq!(statements(&ir, "tabpaneLINST0000")[1], "tabpaneLINST0000.getTabs().add(tabLINST0001);");
        assert_eq!(statements(&ir, "tabLINST0001")[2], "tabLINST0001.setContent(paneLINST0002);");
    }

    #[test]
    fn localized_text_routes_by_field_status() {
        let ir = make_test_ir(
            r#"<VBox><Label fx:id="title" text="%main.title"/><Label text="%main.note"/></VBox>"#,
        )
        .unwrap();

        assert_eq!(ir.i18n_statements, vec!["title.setText(resourceBundle.getString(\"main.title\"));"]);
        assert_eq!(ir.warnings.len(), 1);
        assert_eq!(
            statements(&ir, "labelLINST0001")[1],
            "labelLINST0001.setText(resourceBundle.getString(\"main.note\"));"
        );
    }

    #[test]
    fn handlers_are_collected_with_duplicates() {
        let ir = make_test_ir(
            r##"<VBox><Button onAction="#save"/><Button onAction="#save"/></VBox>"##,
        )
        .unwrap();

        assert_eq!(ir.handlers.len(), 2);
        assert!(ir.imports.contains("javafx.event.ActionEvent"));
    }

    #[test]
    fn import_instructions_and_base_imports() {
        let ir = make_test_ir("<?import com.acme.Thing?><VBox/>").unwrap();

        assert!(ir.imports.contains("com.acme.Thing"));
        assert!(ir.imports.contains("javafx.fxml.FXML"));
        assert!(ir.imports.contains("java.util.ResourceBundle"));
        assert!(ir.imports.contains("javafx.scene.layout.VBox"));
    }

    #[test]
    fn unknown_tag_is_fatal() {
        let err = make_test_ir("<VBox><Gizmo/></VBox>").unwrap_err();
        assert!(matches!(err, CompilerError::UnrecognizedTag { ref tag, .. } if tag == "Gizmo"));
    }

    #[test]
    fn child_in_leaf_is_fatal() {
        let err = make_test_ir("<VBox><TextField><Label/></TextField></VBox>").unwrap_err();
        assert!(matches!(err, CompilerError::UnexpectedChild { ref child, .. } if child == "Label"));
    }

    #[test]
    fn unknown_property_element_is_fatal() {
        let err = make_test_ir("<VBox><gizmos><Label/></gizmos></VBox>").unwrap_err();
        assert!(matches!(err, CompilerError::UnexpectedChild { ref child, .. } if child == "gizmos"));
    }

    #[test]
    fn slot_takes_a_single_object() {
        let err = make_test_ir("<BorderPane><center><Label/><Label/></center></BorderPane>").unwrap_err();
        assert!(matches!(err, CompilerError::UnexpectedChild { ref parent, .. } if parent == "center"));
    }

    #[test]
    fn content_holder_takes_a_single_direct_child() {
        let ir = make_test_ir("<ScrollPane><Label/></ScrollPane>").unwrap();
        assert_eq!(statements(&ir, "scrollpaneLINST0000")[1], "scrollpaneLINST0000.setContent(labelLINST0001);");

        let err = make_test_ir("<ScrollPane><Label/><Button/></ScrollPane>").unwrap_err();
        assert!(matches!(
            err,
            CompilerError::UnexpectedChild { ref child, ref parent, .. } if child == "Button" && parent == "ScrollPane"
        ));
    }

    #[test]
    fn property_element_with_text_is_an_attribute() {
        let ir = make_test_ir("<Label><text>Hello</text></Label>").unwrap();
        assert_eq!(statements(&ir, "labelLINST0000")[1], "labelLINST0000.setText(\"Hello\");");
    }
}
