//! Attribute codec: maps one markup attribute to one Java statement.
//!
//! The codec is pure. It never touches the IR; the resolver decides where
//! the returned statement, imports, handler and warning go.

mod tables;

pub use tables::{property_type, PropertyType};

use crate::diagnostic::{CompilerError, CompilerWarning, Span};
use crate::ir::{EventKind, Handler, IdentifierAttr, RESOURCE_BUNDLE_FIELD};
use crate::resolve::TagRegistry;
use crate::resource::{ResourceKind, ResourceResolver};

/// Marks a text value as a resource bundle key.
pub const LOCALIZATION_MARKER: char = '%';

/// Where an encoded statement belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// The construction routine, `setupFX()`.
    Construction,
    /// The localization routine, `setTextStrings()`.
    Localization,
}

/// Result of encoding one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedAttribute {
    pub statement: String,
    pub placement: Placement,
    pub imports: Vec<String>,
    pub handler: Option<Handler>,
    pub warning: Option<CompilerWarning>,
}

impl EncodedAttribute {
    fn construction(statement: String) -> Self {
        Self {
            statement,
            placement: Placement::Construction,
            imports: Vec::new(),
            handler: None,
            warning: None,
        }
    }

    fn with_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }
}

/// The node an attribute belongs to.
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    pub instance: &'a str,
    pub tag: &'a str,
    pub is_field: bool,
    pub span: &'a Span,
}

/// Lookups the codec needs from the surrounding unit.
#[derive(Clone, Copy)]
pub struct CodecEnv<'a> {
    pub registry: &'a TagRegistry,
    pub resources: &'a dyn ResourceResolver,
}

/// Attributes that describe the document rather than the object.
pub fn is_reserved(name: &str) -> bool {
    name.starts_with("fx:") || name.starts_with("xmlns") || name.starts_with("xml:")
}

/// Encodes `name="raw"` on `node`.
///
/// Returns `Ok(None)` for attributes that legitimately produce nothing, such
/// as an `id` that only carries generics.
pub fn encode(
    name: &str,
    raw: &str,
    node: &NodeRef,
    env: &CodecEnv,
) -> Result<Option<EncodedAttribute>, CompilerError> {
    if let Some(kind) = EventKind::from_attribute(name) {
        return Ok(Some(encode_event(kind, name, raw, node)));
    }

    if let Some((owner, property)) = name.rsplit_once('.') {
        return encode_attached(name, owner, property, raw, node, env).map(Some);
    }

    let ty = property_type(name).ok_or_else(|| unrecognized(name, node))?;
    let setter = setter_name(name);
    let instance = node.instance;

    let encoded = match ty {
        PropertyType::Enum { class, import } => {
            EncodedAttribute::construction(format!("{}.{}({}.{});", instance, setter, class, raw.trim()))
                .with_import(import)
        }
        PropertyType::Boolean | PropertyType::Integer => {
            EncodedAttribute::construction(format!("{}.{}({});", instance, setter, raw.trim()))
        }
        PropertyType::Double => {
            EncodedAttribute::construction(format!("{}.{}({});", instance, setter, double_value(raw)))
        }
        PropertyType::Str if name == "id" => {
            let Some(identifier) = IdentifierAttr::parse(raw).identifier else {
                return Ok(None);
            };
            EncodedAttribute::construction(format!("{}.setId({});", instance, quote(&identifier)))
        }
        PropertyType::Str => {
            EncodedAttribute::construction(format!("{}.{}({});", instance, setter, quote(raw)))
        }
        PropertyType::Localizable => encode_localizable(&setter, raw, node),
        PropertyType::Color => {
            EncodedAttribute::construction(format!("{}.{}(Color.web({}));", instance, setter, quote(raw)))
                .with_import("javafx.scene.paint.Color")
        }
        PropertyType::Reference => {
            let target = raw.trim().trim_start_matches('$');
            EncodedAttribute::construction(format!("{}.{}({});", instance, setter, target))
        }
        PropertyType::StyleClass => {
            EncodedAttribute::construction(format!("{}.getStyleClass().add({});", instance, quote(raw)))
        }
        PropertyType::Stylesheets => {
            let resolved = env.resources.resolve(ResourceKind::Stylesheet, raw.trim());
            let mut encoded = EncodedAttribute::construction(format!(
                "{}.getStylesheets().add({});",
                instance, resolved.expression
            ));
            encoded.imports.extend(resolved.import);
            encoded
        }
    };

    Ok(Some(encoded))
}

fn encode_event(kind: EventKind, name: &str, raw: &str, node: &NodeRef) -> EncodedAttribute {
    let handler = Handler {
        kind,
        name: raw.trim().trim_start_matches('#').to_string(),
    };
    let mut encoded = EncodedAttribute::construction(format!(
        "{}.{}((e) -> {{{}(e);}});",
        node.instance,
        setter_name(name),
        handler.name
    ))
    .with_import(kind.import());
    encoded.handler = Some(handler);
    encoded
}

fn encode_attached(
    name: &str,
    owner: &str,
    property: &str,
    raw: &str,
    node: &NodeRef,
    env: &CodecEnv,
) -> Result<EncodedAttribute, CompilerError> {
    let value = match property_type(property) {
        Some(PropertyType::Enum { class, import }) => (format!("{}.{}", class, raw.trim()), Some(import)),
        Some(PropertyType::Boolean | PropertyType::Integer) => (raw.trim().to_string(), None),
        Some(PropertyType::Double) => (double_value(raw), None),
        _ => return Err(unrecognized(name, node)),
    };

    let mut encoded = EncodedAttribute::construction(format!(
        "{}.{}({}, {});",
        owner,
        setter_name(property),
        node.instance,
        value.0
    ));
    encoded.imports.extend(value.1.map(str::to_string));
    encoded.imports.extend(env.registry.import_for(owner).map(str::to_string));
    Ok(encoded)
}

fn encode_localizable(setter: &str, raw: &str, node: &NodeRef) -> EncodedAttribute {
    let Some(key) = raw.strip_prefix(LOCALIZATION_MARKER) else {
        return EncodedAttribute::construction(format!("{}.{}({});", node.instance, setter, quote(raw)));
    };

    let mut encoded = EncodedAttribute::construction(format!(
        "{}.{}({}.getString({}));",
        node.instance,
        setter,
        RESOURCE_BUNDLE_FIELD,
        quote(key)
    ));

    if node.is_field {
        encoded.placement = Placement::Localization;
    } else {
        encoded.warning = Some(CompilerWarning::InvalidLocalizationContext {
            instance: node.instance.to_string(),
            key: key.to_string(),
            span: node.span.clone(),
        });
    }
    encoded
}

fn unrecognized(name: &str, node: &NodeRef) -> CompilerError {
    CompilerError::UnrecognizedAttribute {
        attribute: name.to_string(),
        tag: node.tag.to_string(),
        span: node.span.clone(),
    }
}

/// `prefWidth` becomes `setPrefWidth`.
pub fn setter_name(property: &str) -> String {
    format!("set{}", capitalize(property))
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Numeric literal, with the two infinity spellings mapped to constants.
pub fn double_value(raw: &str) -> String {
    match raw.trim() {
        "Infinity" => "Double.POSITIVE_INFINITY".to_string(),
        "-Infinity" => "Double.NEGATIVE_INFINITY".to_string(),
        other => other.to_string(),
    }
}

/// Java string literal.
pub fn quote(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::ClasspathResolver;

    struct Fixture {
        registry: TagRegistry,
        resources: ClasspathResolver,
        span: Span,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                registry: TagRegistry::standard(),
                resources: ClasspathResolver::new("fxmlc.runtime.Util", "Main.fxml", None),
                span: Span::default(),
            }
        }

        fn encode(&self, name: &str, raw: &str, is_field: bool) -> Result<Option<EncodedAttribute>, CompilerError> {
            let node = NodeRef {
                instance: "btn",
                tag: "Button",
                is_field,
                span: &self.span,
            };
            let env = CodecEnv {
                registry: &self.registry,
                resources: &self.resources,
            };
            encode(name, raw, &node, &env)
        }

        fn statement(&self, name: &str, raw: &str) -> String {
            self.encode(name, raw, true).unwrap().unwrap().statement
        }
    }

    #[test]
    fn enum_values_are_qualified_and_imported() {
        let fx = Fixture::new();
        let encoded = fx.encode("alignment", "CENTER_LEFT", false).unwrap().unwrap();

        assert_eq!(encoded.statement, "btn.setAlignment(Pos.CENTER_LEFT);");
        assert_eq!(encoded.imports, vec!["javafx.geometry.Pos"]);
    }

    #[test]
    fn passthrough_values() {
        let fx = Fixture::new();
        assert_eq!(fx.statement("mnemonicParsing", "false"), "btn.setMnemonicParsing(false);");
        assert_eq!(fx.statement("prefWidth", "120.0"), "btn.setPrefWidth(120.0);");
        assert_eq!(fx.statement("maxWidth", "Infinity"), "btn.setMaxWidth(Double.POSITIVE_INFINITY);");
        assert_eq!(fx.statement("minHeight", "-Infinity"), "btn.setMinHeight(Double.NEGATIVE_INFINITY);");
    }

    #[test]
    fn strings_are_quoted() {
        let fx = Fixture::new();
        assert_eq!(fx.statement("style", "-fx-font: \"x\""), "btn.setStyle(\"-fx-font: \\\"x\\\"\");");
        assert_eq!(fx.statement("text", "OK"), "btn.setText(\"OK\");");
    }

    #[test]
    fn id_strips_generics_and_skips_empty() {
        let fx = Fixture::new();
        assert_eq!(fx.statement("id", "choices<String"), "btn.setId(\"choices\");");
        assert!(fx.encode("id", "<String", false).unwrap().is_none());
    }

    #[test]
    fn localized_text_on_field_goes_to_localization_routine() {
        let fx = Fixture::new();
        let encoded = fx.encode("text", "%dialog.ok", true).unwrap().unwrap();

        assert_eq!(encoded.statement, "btn.setText(resourceBundle.getString(\"dialog.ok\"));");
        assert_eq!(encoded.placement, Placement::Localization);
        assert!(encoded.warning.is_none());
    }

    #[test]
    fn localized_text_on_local_warns_and_stays_in_construction() {
        let fx = Fixture::new();
        let encoded = fx.encode("promptText", "%dialog.hint", false).unwrap().unwrap();

        assert_eq!(encoded.placement, Placement::Construction);
        assert!(matches!(
            encoded.warning,
            Some(CompilerWarning::InvalidLocalizationContext { ref key, .. }) if key == "dialog.hint"
        ));
    }

    #[test]
    fn collections_append() {
        let fx = Fixture::new();
        assert_eq!(fx.statement("styleClass", "primary"), "btn.getStyleClass().add(\"primary\");");

        let encoded = fx.encode("stylesheets", "@app.css", false).unwrap().unwrap();
        assert_eq!(
            encoded.statement,
            "btn.getStylesheets().add(Util.resolveRelativeResourceFilePath(getClass(), \"app.css\"));"
        );
        assert_eq!(encoded.imports, vec!["fxmlc.runtime.Util"]);
    }

    #[test]
    fn attached_property_targets_owner() {
        let fx = Fixture::new();
        let encoded = fx.encode("VBox.vgrow", "ALWAYS", false).unwrap().unwrap();

        assert_eq!(encoded.statement, "VBox.setVgrow(btn, Priority.ALWAYS);");
        assert!(encoded.imports.contains(&"javafx.scene.layout.Priority".to_string()));
        assert!(encoded.imports.contains(&"javafx.scene.layout.VBox".to_string()));
        assert_eq!(fx.statement("GridPane.rowIndex", "2"), "GridPane.setRowIndex(btn, 2);");
    }

    #[test]
    fn event_registers_handler() {
        let fx = Fixture::new();
        let encoded = fx.encode("onAction", "#save", false).unwrap().unwrap();

        assert_eq!(encoded.statement, "btn.setOnAction((e) -> {save(e);});");
        assert_eq!(encoded.imports, vec!["javafx.event.ActionEvent"]);
        assert_eq!(encoded.handler.unwrap().name, "save");
    }

    #[test]
    fn color_and_reference() {
        let fx = Fixture::new();
        assert_eq!(fx.statement("textFill", "#ff0000"), "btn.setTextFill(Color.web(\"#ff0000\"));");
        assert_eq!(fx.statement("toggleGroup", "$group"), "btn.setToggleGroup(group);");
    }

    #[test]
    fn unknown_attribute_is_fatal() {
        let fx = Fixture::new();
        let err = fx.encode("frobnicate", "1", false).unwrap_err();
        assert!(matches!(
            err,
            CompilerError::UnrecognizedAttribute { ref attribute, ref tag, .. } if attribute == "frobnicate" && tag == "Button"
        ));

        assert!(fx.encode("VBox.style", "x", false).is_err());
        assert!(fx.encode("onScroll", "#x", false).is_err());
    }
}
