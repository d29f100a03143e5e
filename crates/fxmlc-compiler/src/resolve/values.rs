//! Constructor expressions for element families.

use std::collections::HashMap;

use crate::codec::{double_value, is_reserved, quote};
use crate::diagnostic::CompilerError;
use crate::frontend::markup::MarkupElement;
use crate::resource::{ResourceKind, ResourceResolver};

/// What a constructor function gets to work with.
pub struct ConstructInput<'a> {
    pub element: &'a MarkupElement,
    pub has_generics: bool,
    pub resources: &'a dyn ResourceResolver,
}

/// The right-hand side of an instance's declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    pub expression: String,
    pub imports: Vec<String>,
}

pub type ConstructFn = fn(&ConstructInput) -> Result<Construction, CompilerError>;

/// `new T()`, or `new T<>()` when type parameters were declared.
pub fn construct_object(input: &ConstructInput) -> Result<Construction, CompilerError> {
    let diamond = if input.has_generics { "<>" } else { "" };
    Ok(Construction {
        expression: format!("new {}{}()", input.element.tag, diamond),
        imports: Vec::new(),
    })
}

pub fn construct_insets(input: &ConstructInput) -> Result<Construction, CompilerError> {
    let args = arguments(input.element, &["top", "right", "bottom", "left", "topRightBottomLeft"])?;

    let all = args.get("topRightBottomLeft").map(|v| double_value(v));
    let side = |name: &str| {
        args.get(name)
            .map(|v| double_value(v))
            .or_else(|| all.clone())
            .unwrap_or_else(|| "0.0".to_string())
    };

    Ok(Construction {
        expression: format!(
            "new Insets({}, {}, {}, {})",
            side("top"),
            side("right"),
            side("bottom"),
            side("left")
        ),
        imports: Vec::new(),
    })
}

pub fn construct_font(input: &ConstructInput) -> Result<Construction, CompilerError> {
    let args = arguments(input.element, &["name", "size"])?;

    let expression = match (args.get("name"), args.get("size")) {
        (Some(name), Some(size)) => format!("Font.font({}, {})", quote(name), double_value(size)),
        (Some(name), None) => format!("Font.font({})", quote(name)),
        (None, Some(size)) => format!("Font.font({})", double_value(size)),
        (None, None) => "Font.getDefault()".to_string(),
    };

    Ok(Construction {
        expression,
        imports: Vec::new(),
    })
}

pub fn construct_color(input: &ConstructInput) -> Result<Construction, CompilerError> {
    let args = arguments(input.element, &["red", "green", "blue", "opacity"])?;
    let channel = |name: &str, default: &str| {
        args.get(name)
            .map(|v| double_value(v))
            .unwrap_or_else(|| default.to_string())
    };

    Ok(Construction {
        expression: format!(
            "Color.color({}, {}, {}, {})",
            channel("red", "0.0"),
            channel("green", "0.0"),
            channel("blue", "0.0"),
            channel("opacity", "1.0")
        ),
        imports: Vec::new(),
    })
}

pub fn construct_image(input: &ConstructInput) -> Result<Construction, CompilerError> {
    let args = arguments(input.element, &["url"])?;
    let url = args.get("url").ok_or_else(|| CompilerError::MarkupSyntax {
        path: input.element.span.file.clone(),
        message: format!("<Image> at {} has no url", input.element.span),
    })?;

    let resolved = input.resources.resolve(ResourceKind::Image, url);
    Ok(Construction {
        expression: format!("new Image({})", resolved.expression),
        imports: resolved.import.into_iter().collect(),
    })
}

/// Constructor arguments, from attributes or `<name>value</name>` children.
fn arguments<'e>(
    element: &'e MarkupElement,
    allowed: &[&str],
) -> Result<HashMap<&'e str, String>, CompilerError> {
    let mut args = HashMap::new();

    for (name, value) in &element.attributes {
        if is_reserved(name) {
            continue;
        }
        if !allowed.contains(&name.as_str()) {
            return Err(CompilerError::UnrecognizedAttribute {
                attribute: name.clone(),
                tag: element.tag.clone(),
                span: element.span.clone(),
            });
        }
        args.insert(name.as_str(), value.trim().to_string());
    }

    for child in element.elements() {
        if !allowed.contains(&child.tag.as_str()) {
            return Err(CompilerError::UnexpectedChild {
                child: child.tag.clone(),
                parent: element.tag.clone(),
                span: child.span.clone(),
            });
        }
        args.insert(child.tag.as_str(), child.text());
    }

    Ok(args)
}
