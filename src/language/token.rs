use crate::language::span::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Integer(i64),
    String(String),

    Enum,

    Eq,
    Comma,
    Semi,
    LBrace,
    RBrace,

    Eof,
}

impl TokenKind {
    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier `{}`", name),
            TokenKind::Integer(value) => format!("integer `{}`", value),
            TokenKind::String(value) => format!("string \"{}\"", value),
            TokenKind::Enum => "`enum`".to_string(),
            TokenKind::Eq => "`=`".to_string(),
            TokenKind::Comma => "`,`".to_string(),
            TokenKind::Semi => "`;`".to_string(),
            TokenKind::LBrace => "`{`".to_string(),
            TokenKind::RBrace => "`}`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}
