pub mod language;
pub mod registry;

#[cfg(test)]
mod tests;

use crate::language::build::build_module;
use crate::language::errors::{DeclarationError, DeclarationErrors};
use crate::registry::RegistrySet;
use miette::{Diagnostic, NamedSource, Report, SourceSpan};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct DeclarationDiagnostic {
    #[source_code]
    src: NamedSource,
    #[label("{label}")]
    span: SourceSpan,
    #[help]
    help: Option<String>,
    message: String,
    label: String,
}

impl DeclarationDiagnostic {
    pub fn from_error(src: NamedSource, err: DeclarationError) -> Self {
        Self {
            src,
            span: err.to_source_span(),
            help: err.help.clone(),
            label: err.message.clone(),
            message: err.message,
        }
    }
}

pub fn emit_declaration_errors(path: &Path, source: &str, errors: &DeclarationErrors) {
    for err in &errors.errors {
        let src = NamedSource::new(path.display().to_string(), source.to_string());
        let diagnostic = DeclarationDiagnostic::from_error(src, err.clone());
        eprintln!("{:?}", Report::new(diagnostic));
    }
}

/// Everything that can go wrong between source text and a registry set.
#[derive(Debug)]
pub enum SourceErrors {
    Syntax(DeclarationErrors),
    Build(DeclarationErrors),
}

impl SourceErrors {
    pub fn emit(&self, path: &Path, source: &str) {
        match self {
            SourceErrors::Syntax(errors) | SourceErrors::Build(errors) => {
                emit_declaration_errors(path, source, errors);
            }
        }
    }
}

/// Full pipeline convenience: lex, parse, and lower a source file of
/// registry declarations.
pub fn registries_from_source(
    name: &str,
    path: PathBuf,
    source: &str,
) -> Result<RegistrySet, SourceErrors> {
    let module = language::parse_module(name, path, source).map_err(SourceErrors::Syntax)?;
    build_module(&module).map_err(SourceErrors::Build)
}
