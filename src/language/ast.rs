use crate::language::span::Span;
use std::path::PathBuf;

/// One source file of registry declarations.
#[derive(Clone, Debug)]
pub struct Module {
    pub name: String,
    pub path: PathBuf,
    pub registries: Vec<RegistryDef>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegistryDef {
    pub name: Identifier,
    pub entries: Vec<EntryDef>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntryDef {
    pub name: Identifier,
    pub value: Option<ValueExpr>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ValueExpr {
    Integer { value: i64, span: Span },
    String { value: String, span: Span },
}

impl ValueExpr {
    pub fn span(&self) -> Span {
        match self {
            ValueExpr::Integer { span, .. } | ValueExpr::String { span, .. } => *span,
        }
    }
}
