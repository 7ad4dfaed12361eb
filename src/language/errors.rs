use crate::language::span::Span;
use miette::SourceSpan;

/// A spanned error from the declaration front end. Parsing and lowering
/// both report through this type so diagnostics render uniformly.
#[derive(Clone, Debug)]
pub struct DeclarationError {
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
}

impl DeclarationError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Two entries in one registry share a name; `span` is the second
    /// occurrence.
    pub fn duplicate_entry(entry: &str, registry: &str, span: Span) -> Self {
        Self::new(
            format!("Duplicate entry `{}` in registry `{}`", entry, registry),
            span,
        )
        .with_help("Entry names must be unique within a registry")
    }

    /// A registry name appears in more than one declaration; `span` is the
    /// second declaration's name.
    pub fn duplicate_registry(registry: &str, span: Span) -> Self {
        Self::new(
            format!("Registry `{}` is defined more than once", registry),
            span,
        )
        .with_help("Registries are immutable once defined; rename one of them")
    }

    pub fn to_source_span(&self) -> SourceSpan {
        (self.span.start, self.span.len()).into()
    }
}

#[derive(Clone, Debug)]
pub struct DeclarationErrors {
    pub errors: Vec<DeclarationError>,
}

impl DeclarationErrors {
    pub fn new(errors: Vec<DeclarationError>) -> Self {
        Self { errors }
    }
}
