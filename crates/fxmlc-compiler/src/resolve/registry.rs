//! Tag registry: which element family handles which markup tag.
//!
//! Adding support for a tag is one `register` call. Families describe how an
//! instance is constructed and which child rules apply inside it.

use std::collections::HashMap;

use super::values::{self, ConstructFn};

/// How an object element nested directly inside a parent is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultChild {
    /// `parent.<accessor>.add(child)`, e.g. `getChildren()`.
    Add(&'static str),
    /// `parent.<setter>(child)`, e.g. `setContent`.
    Set(&'static str),
}

/// Shared behaviour of a group of tags.
pub struct ElementFamily {
    pub name: &'static str,
    pub construct: ConstructFn,
    /// Value families turn their attributes into constructor arguments
    /// instead of setter calls.
    pub is_value: bool,
    pub default_child: Option<DefaultChild>,
    /// Accepts a `<children>` property element.
    pub children_property: bool,
    /// Property elements whose element children are each appended:
    /// (property, accessor).
    pub collections: &'static [(&'static str, &'static str)],
    /// Property elements mapped to a single setter.
    pub slots: &'static [&'static str],
}

impl ElementFamily {
    pub fn collection(&self, property: &str) -> Option<&'static str> {
        self.collections
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, accessor)| *accessor)
    }

    pub fn has_slot(&self, property: &str) -> bool {
        self.slots.contains(&property) || UNIVERSAL_SLOTS.contains(&property)
    }
}

impl std::fmt::Debug for ElementFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementFamily").field("name", &self.name).finish()
    }
}

/// Setter slots available on every object element.
pub const UNIVERSAL_SLOTS: &[&str] = &[
    "padding",
    "opaqueInsets",
    "font",
    "image",
    "toggleGroup",
    "textFill",
    "fill",
    "stroke",
    "tooltip",
    "contextMenu",
    "clip",
];

const fn family(name: &'static str) -> ElementFamily {
    ElementFamily {
        name,
        construct: values::construct_object,
        is_value: false,
        default_child: None,
        children_property: false,
        collections: &[],
        slots: &[],
    }
}

const fn value_family(name: &'static str, construct: ConstructFn) -> ElementFamily {
    ElementFamily {
        construct,
        is_value: true,
        ..family(name)
    }
}

pub static CONTAINER: ElementFamily = ElementFamily {
    default_child: Some(DefaultChild::Add("getChildren()")),
    children_property: true,
    ..family("container")
};

pub static GRID: ElementFamily = ElementFamily {
    collections: &[
        ("rowConstraints", "getRowConstraints()"),
        ("columnConstraints", "getColumnConstraints()"),
    ],
    default_child: Some(DefaultChild::Add("getChildren()")),
    children_property: true,
    ..family("grid")
};

pub static BORDER: ElementFamily = ElementFamily {
    slots: &["top", "left", "center", "right", "bottom"],
    ..family("border")
};

pub static TAB_PANE: ElementFamily = ElementFamily {
    default_child: Some(DefaultChild::Add("getTabs()")),
    collections: &[("tabs", "getTabs()")],
    ..family("tab-pane")
};

pub static CONTENT: ElementFamily = ElementFamily {
    default_child: Some(DefaultChild::Set("setContent")),
    slots: &["content", "graphic"],
    ..family("content")
};

pub static SPLIT_PANE: ElementFamily = ElementFamily {
    default_child: Some(DefaultChild::Add("getItems()")),
    collections: &[("items", "getItems()")],
    ..family("split-pane")
};

pub static TABLE: ElementFamily = ElementFamily {
    collections: &[("columns", "getColumns()")],
    slots: &["placeholder"],
    ..family("table")
};

pub static COLUMN: ElementFamily = ElementFamily {
    collections: &[("columns", "getColumns()")],
    slots: &["graphic"],
    ..family("column")
};

pub static LABELED: ElementFamily = ElementFamily {
    slots: &["graphic"],
    ..family("labeled")
};

pub static MENU: ElementFamily = ElementFamily {
    default_child: Some(DefaultChild::Add("getItems()")),
    collections: &[("items", "getItems()")],
    slots: &["graphic"],
    ..family("menu")
};

pub static MENU_BAR: ElementFamily = ElementFamily {
    default_child: Some(DefaultChild::Add("getMenus()")),
    collections: &[("menus", "getMenus()")],
    ..family("menu-bar")
};

pub static BUTTON_BAR: ElementFamily = ElementFamily {
    default_child: Some(DefaultChild::Add("getButtons()")),
    collections: &[("buttons", "getButtons()")],
    ..family("button-bar")
};

/// Leaf objects: controls, shapes and helper objects without children.
pub static LEAF: ElementFamily = family("leaf");

pub static INSETS: ElementFamily = value_family("insets", values::construct_insets);
pub static FONT: ElementFamily = value_family("font", values::construct_font);
pub static COLOR: ElementFamily = value_family("color", values::construct_color);
pub static IMAGE: ElementFamily = value_family("image", values::construct_image);

/// A registered tag.
#[derive(Debug, Clone)]
pub struct TagEntry {
    pub family: &'static ElementFamily,
    /// Fully qualified class, if it must be imported.
    pub import: Option<String>,
}

/// Tag name to family lookup.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: HashMap<String, TagEntry>,
}

impl TagRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The JavaFX tags fxmlc knows out of the box.
    pub fn standard() -> Self {
        const LAYOUT: &str = "javafx.scene.layout";
        const CONTROL: &str = "javafx.scene.control";

        let mut registry = Self::empty();
        let mut add = |package: &str, tags: &[&str], family: &'static ElementFamily| {
            for tag in tags {
                let import = format!("{}.{}", package, tag);
                registry.register(tag, Some(import.as_str()), family);
            }
        };

        add(LAYOUT, &["Pane", "VBox", "HBox", "StackPane", "FlowPane", "AnchorPane", "TilePane"], &CONTAINER);
        add("javafx.scene", &["Group"], &CONTAINER);
        add(LAYOUT, &["GridPane"], &GRID);
        add(LAYOUT, &["BorderPane"], &BORDER);
        add(LAYOUT, &["RowConstraints", "ColumnConstraints"], &LEAF);
        add(CONTROL, &["TabPane"], &TAB_PANE);
        add(CONTROL, &["Tab", "ScrollPane", "TitledPane"], &CONTENT);
        add(CONTROL, &["SplitPane"], &SPLIT_PANE);
        add(CONTROL, &["TableView", "TreeTableView"], &TABLE);
        add(CONTROL, &["TableColumn", "TreeTableColumn"], &COLUMN);
        add(
            CONTROL,
            &["Label", "Button", "CheckBox", "RadioButton", "ToggleButton", "Hyperlink"],
            &LABELED,
        );
        add(CONTROL, &["MenuButton", "Menu", "ContextMenu"], &MENU);
        add(CONTROL, &["MenuBar"], &MENU_BAR);
        add(CONTROL, &["ButtonBar"], &BUTTON_BAR);
        add(
            CONTROL,
            &[
                "TextField", "TextArea", "PasswordField", "ComboBox", "ChoiceBox", "ListView",
                "Slider", "ProgressBar", "ProgressIndicator", "Separator", "DatePicker", "Spinner",
                "Tooltip", "MenuItem", "SeparatorMenuItem", "ToggleGroup",
            ],
            &LEAF,
        );
        add("javafx.scene.text", &["Text"], &LEAF);
        add("javafx.scene.image", &["ImageView"], &LEAF);
        add("javafx.scene.shape", &["Rectangle", "Circle", "Line"], &LEAF);

        add("javafx.geometry", &["Insets"], &INSETS);
        add("javafx.scene.text", &["Font"], &FONT);
        add("javafx.scene.paint", &["Color"], &COLOR);
        add("javafx.scene.image", &["Image"], &IMAGE);

        registry
    }

    /// Registers (or replaces) a tag.
    pub fn register(&mut self, tag: &str, import: Option<&str>, family: &'static ElementFamily) {
        self.tags.insert(
            tag.to_string(),
            TagEntry {
                family,
                import: import.map(str::to_string),
            },
        );
    }

    pub fn lookup(&self, tag: &str) -> Option<&TagEntry> {
        self.tags.get(tag)
    }

    pub fn import_for(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).and_then(|entry| entry.import.as_deref())
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
