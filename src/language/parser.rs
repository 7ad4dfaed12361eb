use crate::language::{
    ast::{EntryDef, Identifier, Module, RegistryDef, ValueExpr},
    errors::{DeclarationError, DeclarationErrors},
    lexer::lex,
    token::{Token, TokenKind},
};
use std::path::PathBuf;

pub fn parse_module(name: &str, path: PathBuf, source: &str) -> Result<Module, DeclarationErrors> {
    let tokens = match lex(source) {
        Ok(tokens) => tokens,
        Err(errors) => {
            let errs = errors
                .into_iter()
                .map(|err| DeclarationError::new(err.message, err.span))
                .collect();
            return Err(DeclarationErrors::new(errs));
        }
    };
    Parser::new(name, path, tokens).parse()
}

struct Parser {
    module_name: String,
    path: PathBuf,
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<DeclarationError>,
}

impl Parser {
    fn new(name: &str, path: PathBuf, tokens: Vec<Token>) -> Self {
        Self {
            module_name: name.to_string(),
            path,
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Module, DeclarationErrors> {
        let mut registries = Vec::new();

        while !self.is_eof() {
            if self.matches(TokenKind::Semi) {
                continue;
            }
            match self.parse_registry() {
                Ok(def) => registries.push(def),
                Err(err) => {
                    self.report(err);
                    self.synchronize();
                }
            }
        }

        if self.errors.is_empty() {
            Ok(Module {
                name: self.module_name,
                path: self.path,
                registries,
            })
        } else {
            Err(DeclarationErrors::new(self.errors))
        }
    }

    fn parse_registry(&mut self) -> Result<RegistryDef, DeclarationError> {
        let keyword = self.expect(TokenKind::Enum)?;
        let name = self.expect_identifier("Expected registry name after `enum`")?;
        self.expect(TokenKind::LBrace)?;

        let mut entries = Vec::new();
        loop {
            if self.check(TokenKind::RBrace) || self.is_eof() {
                break;
            }
            entries.push(self.parse_entry()?);
            if self.matches(TokenKind::Comma) {
                continue;
            }
            if !self.check(TokenKind::RBrace) {
                return Err(self
                    .error_here("Expected `,` or `}` after entry")
                    .with_help("Separate entries with commas: enum Direction { Up, Down }"));
            }
        }

        let rbrace = self.expect(TokenKind::RBrace)?;
        self.consume_optional(TokenKind::Semi);
        Ok(RegistryDef {
            name,
            entries,
            span: keyword.span.merge(rbrace.span),
        })
    }

    fn parse_entry(&mut self) -> Result<EntryDef, DeclarationError> {
        let name = self.expect_identifier("Expected entry name")?;
        let value = if self.matches(TokenKind::Eq) {
            Some(self.parse_value()?)
        } else {
            None
        };
        let span = value
            .as_ref()
            .map_or(name.span, |v| name.span.merge(v.span()));
        Ok(EntryDef { name, value, span })
    }

    fn parse_value(&mut self) -> Result<ValueExpr, DeclarationError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Integer(value) => Ok(ValueExpr::Integer {
                value,
                span: token.span,
            }),
            TokenKind::String(value) => Ok(ValueExpr::String {
                value,
                span: token.span,
            }),
            kind => Err(DeclarationError::new(
                format!("Expected integer or string value, found {}", kind.describe()),
                token.span,
            )
            .with_help("Explicit values look like `Up = 1` or `Yes = \"YES\"`")),
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, DeclarationError> {
        if self.check(kind.clone()) {
            Ok(self.advance())
        } else {
            let found = self.current().kind.describe();
            Err(self.error_here(format!("Expected {}, found {}", kind.describe(), found)))
        }
    }

    fn expect_identifier(&mut self, message: &str) -> Result<Identifier, DeclarationError> {
        if let TokenKind::Identifier(name) = &self.current().kind {
            let name = name.clone();
            let span = self.current().span;
            self.advance();
            return Ok(Identifier { name, span });
        }
        let found = self.current().kind.describe();
        Err(self.error_here(format!("{}, found {}", message, found)))
    }

    fn current(&self) -> &Token {
        // The lexer always terminates the stream with an Eof token.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_optional(&mut self, kind: TokenKind) {
        if self.check(kind) {
            self.advance();
        }
    }

    fn is_eof(&self) -> bool {
        matches!(self.current().kind, TokenKind::Eof)
    }

    fn error_here(&self, message: impl Into<String>) -> DeclarationError {
        DeclarationError::new(message, self.current().span)
    }

    fn report(&mut self, err: DeclarationError) {
        self.errors.push(err);
    }

    /// Skip to the next declaration boundary after a syntax error.
    fn synchronize(&mut self) {
        while !self.is_eof() {
            if self.matches(TokenKind::Semi) {
                return;
            }
            if self.check(TokenKind::Enum) {
                return;
            }
            self.advance();
        }
    }
}
