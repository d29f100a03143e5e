//! Attribute name tables.

/// How an attribute's raw value is turned into a Java expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    Enum {
        class: &'static str,
        import: &'static str,
    },
    Boolean,
    Integer,
    Double,
    Str,
    /// Text that may name a resource bundle key with a `%` prefix.
    Localizable,
    Color,
    /// `$name` reference to another instance.
    Reference,
    StyleClass,
    Stylesheets,
}

const fn enumerated(class: &'static str, import: &'static str) -> PropertyType {
    PropertyType::Enum { class, import }
}

pub fn property_type(name: &str) -> Option<PropertyType> {
    use PropertyType::*;

    let ty = match name {
        "alignment" => enumerated("Pos", "javafx.geometry.Pos"),
        "halignment" | "columnHalignment" => enumerated("HPos", "javafx.geometry.HPos"),
        "valignment" | "rowValignment" => enumerated("VPos", "javafx.geometry.VPos"),
        "orientation" => enumerated("Orientation", "javafx.geometry.Orientation"),
        "nodeOrientation" => enumerated("NodeOrientation", "javafx.geometry.NodeOrientation"),
        "side" => enumerated("Side", "javafx.geometry.Side"),
        "strokeType" => enumerated("StrokeType", "javafx.scene.shape.StrokeType"),
        "textAlignment" => enumerated("TextAlignment", "javafx.scene.text.TextAlignment"),
        "contentDisplay" => enumerated("ContentDisplay", "javafx.scene.control.ContentDisplay"),
        "textOverrun" => enumerated("OverrunStyle", "javafx.scene.control.OverrunStyle"),
        "hgrow" | "vgrow" => enumerated("Priority", "javafx.scene.layout.Priority"),
        "tabClosingPolicy" => enumerated("TabClosingPolicy", "javafx.scene.control.TabPane.TabClosingPolicy"),

        "mnemonicParsing" | "editable" | "resizable" | "sortable" | "pickOnBounds"
        | "preserveRatio" | "disable" | "selected" | "visible" | "fillHeight" | "fillWidth"
        | "closable" | "wrapText" | "focusTraversable" | "managed" | "gridLinesVisible"
        | "expanded" | "collapsible" | "smooth" => Boolean,

        "rowIndex" | "columnIndex" | "rowSpan" | "columnSpan" | "prefColumnCount"
        | "prefRowCount" => Integer,

        "maxHeight" | "maxWidth" | "minHeight" | "minWidth" | "prefHeight" | "prefWidth"
        | "prefWrapLength" | "percentHeight" | "percentWidth" | "spacing" | "fitHeight"
        | "fitWidth" | "hgap" | "vgap" | "opacity" | "strokeWidth" | "wrappingWidth"
        | "fixedCellSize" | "layoutX" | "layoutY" | "topAnchor" | "rightAnchor"
        | "bottomAnchor" | "leftAnchor" | "rotate" | "radius" | "width" | "height" => Double,

        "style" | "name" | "accessibleText" | "id" => Str,
        "text" | "promptText" | "title" => Localizable,
        "textFill" | "fill" | "stroke" => Color,
        "toggleGroup" => Reference,
        "styleClass" => StyleClass,
        "stylesheets" => Stylesheets,
        _ => return None,
    };
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_have_types() {
        assert_eq!(property_type("prefWidth"), Some(PropertyType::Double));
        assert_eq!(property_type("selected"), Some(PropertyType::Boolean));
        assert_eq!(property_type("text"), Some(PropertyType::Localizable));
        assert!(matches!(property_type("vgrow"), Some(PropertyType::Enum { class: "Priority", .. })));
    }

    #[test]
    fn inert_names_are_unknown() {
        assert_eq!(property_type("url"), None);
        assert_eq!(property_type("onAction"), None);
    }
}
