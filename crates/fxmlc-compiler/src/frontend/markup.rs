//! FXML reader built on quick-xml.

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::diagnostic::{CompilerError, Span};

/// A parsed markup file.
#[derive(Debug, Clone)]
pub struct MarkupDocument {
    /// Targets of `<?import ...?>` instructions, in document order.
    pub imports: Vec<String>,
    pub root: MarkupElement,
}

/// One element of the markup tree.
#[derive(Debug, Clone)]
pub struct MarkupElement {
    pub tag: String,
    /// Document order. Names are unique (the reader rejects duplicates).
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum MarkupNode {
    Element(MarkupElement),
    Text(String),
}

impl MarkupElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn elements(&self) -> impl Iterator<Item = &MarkupElement> {
        self.children.iter().filter_map(|child| match child {
            MarkupNode::Element(el) => Some(el),
            MarkupNode::Text(_) => None,
        })
    }

    /// Concatenated text children, trimmed.
    pub fn text(&self) -> String {
        let text: String = self
            .children
            .iter()
            .filter_map(|child| match child {
                MarkupNode::Text(t) => Some(t.as_str()),
                MarkupNode::Element(_) => None,
            })
            .collect();
        text.trim().to_string()
    }
}

/// Parses markup source into a [`MarkupDocument`].
pub fn parse_markup(source: &str, path: &Path) -> Result<MarkupDocument, CompilerError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut imports = Vec::new();
    let mut stack: Vec<MarkupElement> = Vec::new();
    let mut root: Option<MarkupElement> = None;

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| CompilerError::MarkupSyntax {
            path: path.to_path_buf(),
            message: format!("{} (at byte {})", e, reader.error_position()),
        })?;

        match event {
            Event::Start(start) => {
                let element = open_element(&start, source, path, offset)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start, source, path, offset)?;
                attach(element, &mut stack, &mut root, path)?;
            }
            Event::End(_) => {
                let element = stack.pop().ok_or_else(|| syntax(path, "unbalanced closing tag"))?;
                attach(element, &mut stack, &mut root, path)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| syntax(path, &e.to_string()))?;
                push_text(&mut stack, &text);
            }
            Event::CData(data) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                push_text(&mut stack, &text);
            }
            Event::PI(pi) => {
                let content = String::from_utf8_lossy(&pi).into_owned();
                let mut parts = content.split_whitespace();
                if parts.next() == Some("import") {
                    if let Some(name) = parts.next() {
                        imports.push(name.to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(syntax(path, "unclosed element at end of file"));
    }
    let root = root.ok_or_else(|| syntax(path, "document has no root element"))?;

    Ok(MarkupDocument { imports, root })
}

fn open_element(
    start: &BytesStart,
    source: &str,
    path: &Path,
    offset: usize,
) -> Result<MarkupElement, CompilerError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    // The reader position may still sit before skipped whitespace.
    let rest = source.get(offset..).unwrap_or("");
    let offset = offset + rest.len() - rest.trim_start().len();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(path, &e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| syntax(path, &e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(MarkupElement {
        tag,
        attributes,
        children: Vec::new(),
        span: Span::at_offset(path.to_path_buf(), source, offset),
    })
}

fn attach(
    element: MarkupElement,
    stack: &mut [MarkupElement],
    root: &mut Option<MarkupElement>,
    path: &Path,
) -> Result<(), CompilerError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(MarkupNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => return Err(syntax(path, "more than one root element")),
    }
    Ok(())
}

fn push_text(stack: &mut [MarkupElement], text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.children.push(MarkupNode::Text(text.to_string()));
    }
}

fn syntax(path: &Path, message: &str) -> CompilerError {
    CompilerError::MarkupSyntax {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}
