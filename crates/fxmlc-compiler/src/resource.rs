//! Resolution of resource paths referenced from markup.

use std::path::{Component, Path, PathBuf};

use crate::codec::quote;

/// What a resource path is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stylesheet,
    Image,
}

/// A Java expression that loads the resource at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub expression: String,
    pub import: Option<String>,
}

/// Turns a path written in markup into a runtime load expression.
pub trait ResourceResolver {
    fn resolve(&self, kind: ResourceKind, relative: &str) -> ResolvedResource;
}

/// Resolves resources relative to the classpath.
///
/// Stylesheets defer to a runtime helper so the lookup follows the class at
/// runtime. Images are resolved now, against the source tree the markup
/// file lives in.
pub struct ClasspathResolver {
    helper_class: String,
    markup_path: PathBuf,
    source_root: Option<PathBuf>,
}

impl ClasspathResolver {
    pub fn new(helper_class: impl Into<String>, markup_path: impl Into<PathBuf>, source_root: Option<PathBuf>) -> Self {
        Self {
            helper_class: helper_class.into(),
            markup_path: markup_path.into(),
            source_root,
        }
    }

    fn helper_simple_name(&self) -> &str {
        self.helper_class.rsplit('.').next().unwrap_or(&self.helper_class)
    }

    /// Source root inferred from a name like `com.acme.View.fxml` stored
    /// under `.../com/acme/`: the parent of the nearest ancestor named `com`.
    fn infer_source_root(&self) -> Option<PathBuf> {
        let file_name = self.markup_path.file_name()?.to_str()?;
        let first_segment = file_name.split('.').next()?;

        let mut dir = self.markup_path.parent();
        while let Some(current) = dir {
            let name = current.file_name().and_then(|n| n.to_str());
            if name.is_some_and(|n| n.eq_ignore_ascii_case(first_segment)) {
                return current.parent().map(Path::to_path_buf);
            }
            dir = current.parent();
        }
        None
    }

    fn classpath_location(&self, relative: &str) -> String {
        let relative = relative.replace('\\', "/");
        if relative.starts_with('/') {
            return relative;
        }

        let base = self.markup_path.parent().unwrap_or(Path::new(""));
        let resource = normalize(&base.join(&relative));

        let root = self.source_root.clone().or_else(|| self.infer_source_root());
        let located = root
            .map(|root| normalize(&root))
            .and_then(|root| pathdiff::diff_paths(&resource, root))
            .filter(|p| !p.starts_with(".."));

        match located {
            Some(path) => {
                let parts: Vec<String> = path
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                format!("/{}", parts.join("/"))
            }
            None => {
                log::debug!("No source root for {}, keeping '{}' as written", self.markup_path.display(), relative);
                relative
            }
        }
    }
}

impl ResourceResolver for ClasspathResolver {
    fn resolve(&self, kind: ResourceKind, relative: &str) -> ResolvedResource {
        let relative = relative.strip_prefix('@').unwrap_or(relative);
        match kind {
            ResourceKind::Stylesheet => ResolvedResource {
                expression: format!(
                    "{}.resolveRelativeResourceFilePath(getClass(), {})",
                    self.helper_simple_name(),
                    quote(relative)
                ),
                import: Some(self.helper_class.clone()),
            },
            ResourceKind::Image => ResolvedResource {
                expression: format!(
                    "getClass().getResourceAsStream({})",
                    quote(&self.classpath_location(relative))
                ),
                import: None,
            },
        }
    }
}

/// Lexically folds `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_goes_through_helper() {
        let resolver = ClasspathResolver::new("fxmlc.runtime.Util", "src/com/acme/com.acme.Main.fxml", None);
        let resolved = resolver.resolve(ResourceKind::Stylesheet, "@main.css");

        assert_eq!(
            resolved.expression,
            "Util.resolveRelativeResourceFilePath(getClass(), \"main.css\")"
        );
        assert_eq!(resolved.import.as_deref(), Some("fxmlc.runtime.Util"));
    }

    #[test]
    fn stylesheet_path_is_escaped() {
        let resolver = ClasspathResolver::new("Util", "Main.fxml", None);
        let resolved = resolver.resolve(ResourceKind::Stylesheet, "@..\\css\\a \"b\".css");

        assert_eq!(
            resolved.expression,
            r#"Util.resolveRelativeResourceFilePath(getClass(), "..\\css\\a \"b\".css")"#
        );
    }

    #[test]
    fn image_path_is_escaped() {
        let resolver = ClasspathResolver::new("Util", "Main.fxml", None);
        let resolved = resolver.resolve(ResourceKind::Image, "/img/\"q\".png");
        assert_eq!(resolved.expression, r#"getClass().getResourceAsStream("/img/\"q\".png")"#);
    }

    #[test]
    fn image_is_located_from_inferred_root() {
        let resolver = ClasspathResolver::new("Util", "project/src/com/acme/com.acme.Main.fxml", None);
        let resolved = resolver.resolve(ResourceKind::Image, "@../icons/logo.png");

        assert_eq!(resolved.expression, "getClass().getResourceAsStream(\"/com/icons/logo.png\")");
        assert_eq!(resolved.import, None);
    }

    #[test]
    fn image_is_located_from_configured_root() {
        let resolver = ClasspathResolver::new(
            "Util",
            "res/views/Main.fxml",
            Some(PathBuf::from("res")),
        );
        let resolved = resolver.resolve(ResourceKind::Image, "img/a.png");
        assert_eq!(resolved.expression, "getClass().getResourceAsStream(\"/views/img/a.png\")");
    }

    #[test]
    fn absolute_image_path_is_kept() {
        let resolver = ClasspathResolver::new("Util", "Main.fxml", None);
        let resolved = resolver.resolve(ResourceKind::Image, "/img/a.png");
        assert_eq!(resolved.expression, "getClass().getResourceAsStream(\"/img/a.png\")");
    }

    #[test]
    fn unknown_root_keeps_relative_path() {
        let resolver = ClasspathResolver::new("Util", "views/Main.fxml", None);
        let resolved = resolver.resolve(ResourceKind::Image, "a.png");
        assert_eq!(resolved.expression, "getClass().getResourceAsStream(\"a.png\")");
    }
}
