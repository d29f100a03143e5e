//! Recoverable diagnostics collected while resolving a unit.
#![allow(unused_assignments)]

use miette::Diagnostic;
use serde::Serialize;
use thiserror::Error;

use super::Span;

/// Non-fatal problems. The unit still converts, but the output may not
/// behave the way the markup author expects.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Serialize)]
pub enum CompilerWarning {
    #[error("Localized text '%{key}' on '{instance}' is only applied at construction time")]
    #[diagnostic(
        code(fxmlc::resolve::invalid_localization_context),
        severity(Warning),
        help("Give the element an fx:id so setTextStrings() can refresh it when the locale changes")
    )]
    InvalidLocalizationContext {
        instance: String,
        key: String,
        #[serde(skip)]
        span: Span,
    },
}
