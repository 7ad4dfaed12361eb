use crate::language::{
    span::Span,
    token::{Token, TokenKind},
};
use nom::{
    IResult, Parser as NomParser,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::digit1,
    combinator::{map_res, opt, recognize},
    sequence::pair,
};

#[derive(Clone, Debug)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

pub fn lex(source: &str) -> Result<Vec<Token>, Vec<LexError>> {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut remaining = source;
    let mut offset = 0usize;

    loop {
        // Skip whitespace and comments before every token.
        let mut progressed = true;
        while progressed {
            progressed = false;
            let trimmed = remaining.trim_start();
            if trimmed.len() != remaining.len() {
                offset += remaining.len() - trimmed.len();
                remaining = trimmed;
                progressed = true;
            }
            if remaining.starts_with("//") {
                let end = remaining.find('\n').unwrap_or(remaining.len());
                offset += end;
                remaining = &remaining[end..];
                progressed = true;
            } else if remaining.starts_with("/*") {
                match remaining[2..].find("*/") {
                    Some(close) => {
                        let end = 2 + close + 2;
                        offset += end;
                        remaining = &remaining[end..];
                        progressed = true;
                    }
                    None => {
                        errors.push(LexError::new(
                            "Unterminated block comment",
                            Span::new(offset, source.len()),
                        ));
                        offset = source.len();
                        remaining = "";
                    }
                }
            }
        }

        if remaining.is_empty() {
            break;
        }

        let original = remaining;
        let start = offset;

        // Strings are lexed out of band so an unterminated literal reports
        // its own span instead of failing the whole combinator chain.
        if let Some(rest) = original.strip_prefix('"') {
            match rest.find('"') {
                Some(close) => {
                    let consumed = close + 2;
                    tokens.push(Token {
                        kind: TokenKind::String(rest[..close].to_string()),
                        span: Span::new(start, start + consumed),
                    });
                    remaining = &original[consumed..];
                    offset += consumed;
                }
                None => {
                    errors.push(LexError::new(
                        "Unterminated string literal",
                        Span::new(start, source.len()),
                    ));
                    offset = source.len();
                    remaining = "";
                }
            }
            continue;
        }

        let result = lex_word(original)
            .or_else(|_| lex_integer(original))
            .or_else(|_| lex_eq(original))
            .or_else(|_| lex_comma(original))
            .or_else(|_| lex_semi(original))
            .or_else(|_| lex_left_brace(original))
            .or_else(|_| lex_right_brace(original));

        match result {
            Ok((rest, kind)) => {
                let consumed = original.len() - rest.len();
                tokens.push(Token {
                    kind,
                    span: Span::new(start, start + consumed),
                });
                remaining = rest;
                offset += consumed;
            }
            Err(_) => {
                let digits = int_prefix_len(original);
                if digits > 0 {
                    // Digits were present but map_res rejected them.
                    errors.push(LexError::new(
                        "Integer literal out of range",
                        Span::new(start, start + digits),
                    ));
                    remaining = &original[digits..];
                    offset += digits;
                } else if let Some(ch) = original.chars().next() {
                    let len = ch.len_utf8();
                    errors.push(LexError::new(
                        format!("Unexpected character `{}`", ch),
                        Span::new(start, start + len),
                    ));
                    remaining = &original[len..];
                    offset += len;
                }
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(source.len(), source.len()),
    });

    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

fn lex_word(input: &str) -> IResult<&str, TokenKind> {
    let (input, word) =
        recognize(pair(take_while1(is_ident_start), take_while(is_ident_continue))).parse(input)?;
    let kind = match word {
        "enum" => TokenKind::Enum,
        _ => TokenKind::Identifier(word.to_string()),
    };
    Ok((input, kind))
}

fn lex_integer(input: &str) -> IResult<&str, TokenKind> {
    let (input, value) = map_res(recognize(pair(opt(tag("-")), digit1)), |s: &str| {
        s.parse::<i64>()
    })
    .parse(input)?;
    Ok((input, TokenKind::Integer(value)))
}

fn lex_eq(input: &str) -> IResult<&str, TokenKind> {
    let (input, _) = tag("=")(input)?;
    Ok((input, TokenKind::Eq))
}

fn lex_comma(input: &str) -> IResult<&str, TokenKind> {
    let (input, _) = tag(",")(input)?;
    Ok((input, TokenKind::Comma))
}

fn lex_semi(input: &str) -> IResult<&str, TokenKind> {
    let (input, _) = tag(";")(input)?;
    Ok((input, TokenKind::Semi))
}

fn lex_left_brace(input: &str) -> IResult<&str, TokenKind> {
    let (input, _) = tag("{")(input)?;
    Ok((input, TokenKind::LBrace))
}

fn lex_right_brace(input: &str) -> IResult<&str, TokenKind> {
    let (input, _) = tag("}")(input)?;
    Ok((input, TokenKind::RBrace))
}

/// Length of a leading `[-]?digit+` run, 0 when the input starts with
/// something else.
fn int_prefix_len(input: &str) -> usize {
    let body = input.strip_prefix('-').unwrap_or(input);
    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        0
    } else {
        input.len() - body.len() + digits
    }
}
