//! The `id` attribute generics convention.
//!
//! FXML has no syntax for type parameters, so `id="name<java.util.List,String"`
//! carries them: the text before `<` is the real id (possibly empty) and the
//! first `<`-delimited segment lists the parameters.

/// A type name as written in markup, possibly fully qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    pub written: String,
}

impl TypeName {
    pub fn new(written: impl Into<String>) -> Self {
        Self { written: written.into() }
    }

    /// True if the name carries a package, so it needs an import.
    pub fn is_qualified(&self) -> bool {
        self.written.contains('.')
    }

    /// The name as it appears in code once imported.
    pub fn simple(&self) -> &str {
        self.written.rsplit('.').next().unwrap_or(&self.written)
    }
}

/// Parsed value of an `id` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierAttr {
    pub identifier: Option<String>,
    pub generics: Vec<TypeName>,
}

impl IdentifierAttr {
    pub fn parse(raw: &str) -> Self {
        let mut segments = raw.split('<');
        let identifier = segments
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let generics = segments
            .next()
            .map(|segment| {
                segment
                    .trim_end_matches('>')
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(TypeName::new)
                    .collect()
            })
            .unwrap_or_default();

        Self { identifier, generics }
    }

    pub fn has_generics(&self) -> bool {
        !self.generics.is_empty()
    }

    /// `<List, String>`, or an empty string without generics.
    pub fn render_generics(&self) -> String {
        if self.generics.is_empty() {
            return String::new();
        }
        let names: Vec<&str> = self.generics.iter().map(TypeName::simple).collect();
        format!("<{}>", names.join(", "))
    }

    /// Fully qualified parameters that must be imported.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.generics
            .iter()
            .filter(|t| t.is_qualified())
            .map(|t| t.written.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generics_without_identifier() {
        let attr = IdentifierAttr::parse("<java.util.List,String");

        assert_eq!(attr.identifier, None);
        assert_eq!(attr.generics.len(), 2);
        assert_eq!(attr.render_generics(), "<List, String>");
        assert_eq!(attr.imports().collect::<Vec<_>>(), vec!["java.util.List"]);
    }

    #[test]
    fn identifier_with_generics() {
        let attr = IdentifierAttr::parse("choices<String>");

        assert_eq!(attr.identifier.as_deref(), Some("choices"));
        assert_eq!(attr.render_generics(), "<String>");
        assert_eq!(attr.imports().count(), 0);
    }

    #[test]
    fn only_first_segment_is_generic_data() {
        let attr = IdentifierAttr::parse("x<A<B");
        assert_eq!(attr.render_generics(), "<A>");
    }

    #[test]
    fn plain_identifier() {
        let attr = IdentifierAttr::parse("okButton");

        assert_eq!(attr.identifier.as_deref(), Some("okButton"));
        assert!(!attr.has_generics());
        assert_eq!(attr.render_generics(), "");
    }
}
