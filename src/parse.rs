//! Parsing of grammar source text.
//!
//! The dialect: a file is `Language "<name>": rule*`, a rule is
//! `name ("!")? "=" production ";"`. Productions are string literals in
//! single or double quotes, rule references, juxtaposition for sequences,
//! `|` for choices, postfix `*` `+` `?`, parentheses for grouping, and `ℇ`
//! for the empty production. Postfix operators bind tightest, then
//! juxtaposition, then `|`.

use crate::error::ParseError;
use crate::grammar::{Grammar, Production, RepeatOp, Rule, Span};

/// Parses grammar source text into a syntax tree, stopping at the first
/// syntax error.
///
/// The result is not yet checked for structural soundness; that is
/// [`crate::validate::validate`]'s job.
pub fn parse_grammar(source: &str) -> Result<Grammar, ParseError> {
    let tokens = tokenize(source)?;
    Parser {
        tokens,
        position: 0,
        end: source.len(),
    }
    .grammar()
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum TokenKind {
    Ident(String),
    Literal(String),
    Equals,
    Semicolon,
    Colon,
    Pipe,
    Star,
    Plus,
    Question,
    Bang,
    LeftParen,
    RightParen,
    Empty,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    span: Span,
}

fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer {
        source,
        position: 0,
    };
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token()? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'a> {
    source: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    fn peek(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.bump();
        }
        let start = self.position;
        let ch = match self.bump() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        let kind = match ch {
            'a'..='z' | 'A'..='Z' | '_' => {
                while let Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_') = self.peek() {
                    self.bump();
                }
                TokenKind::Ident(self.source[start..self.position].to_string())
            }
            '"' | '\'' => TokenKind::Literal(self.string_body(start, ch)?),
            '=' => TokenKind::Equals,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '|' => TokenKind::Pipe,
            '*' => TokenKind::Star,
            '+' => TokenKind::Plus,
            '?' => TokenKind::Question,
            '!' => TokenKind::Bang,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            'ℇ' => TokenKind::Empty,
            other => {
                return Err(ParseError {
                    message: format!("unexpected character `{}`", other),
                    span: Span::new(start, self.position),
                })
            }
        };
        Ok(Some(Token {
            kind,
            span: Span::new(start, self.position),
        }))
    }

    /// Consumes a quoted string body after its opening quote, decoding the
    /// escapes `\\` `\"` `\'` `\n` `\t`.
    fn string_body(&mut self, start: usize, quote: char) -> Result<String, ParseError> {
        let mut text = String::new();
        loop {
            let ch = match self.bump() {
                Some(ch) => ch,
                None => {
                    return Err(ParseError {
                        message: "unterminated string literal".to_string(),
                        span: Span::new(start, self.position),
                    })
                }
            };
            if ch == quote {
                return Ok(text);
            }
            if ch != '\\' {
                text.push(ch);
                continue;
            }
            let escape_start = self.position - 1;
            match self.bump() {
                Some('\\') => text.push('\\'),
                Some('"') => text.push('"'),
                Some('\'') => text.push('\''),
                Some('n') => text.push('\n'),
                Some('t') => text.push('\t'),
                Some(other) => {
                    return Err(ParseError {
                        message: format!("unknown escape `\\{}`", other),
                        span: Span::new(escape_start, self.position),
                    })
                }
                None => {
                    return Err(ParseError {
                        message: "unterminated string literal".to_string(),
                        span: Span::new(start, self.position),
                    })
                }
            }
        }
    }
}

struct Parser {
    tokens: Vec<Token>,
    position: usize,
    /// Length of the source text, for end-of-input spans.
    end: usize,
}

impl Parser {
    fn grammar(mut self) -> Result<Grammar, ParseError> {
        let (keyword, span) = self.ident("expected `Language`")?;
        if keyword != "Language" {
            return Err(ParseError {
                message: "expected `Language`".to_string(),
                span,
            });
        }
        let name = match self.next() {
            Some(Token {
                kind: TokenKind::Literal(name),
                ..
            }) => name,
            other => return Err(self.expected("expected the language name as a string", other)),
        };
        self.expect(TokenKind::Colon, "expected `:`")?;
        let mut rules = Vec::new();
        while self.peek().is_some() {
            rules.push(self.rule()?);
        }
        Ok(Grammar { name, rules })
    }

    fn rule(&mut self) -> Result<Rule, ParseError> {
        let (name, span) = self.ident("expected a rule name")?;
        let labeled = self.eat(&TokenKind::Bang);
        self.expect(TokenKind::Equals, "expected `=`")?;
        let production = self.production()?;
        self.expect(TokenKind::Semicolon, "expected `;`")?;
        Ok(Rule {
            name,
            span,
            labeled,
            production,
        })
    }

    fn production(&mut self) -> Result<Production, ParseError> {
        let mut alternatives = vec![self.sequence()?];
        while self.eat(&TokenKind::Pipe) {
            alternatives.push(self.sequence()?);
        }
        if alternatives.len() == 1 {
            Ok(alternatives.remove(0))
        } else {
            Ok(Production::Choice(alternatives))
        }
    }

    fn sequence(&mut self) -> Result<Production, ParseError> {
        let mut parts = vec![self.postfix()?];
        while self.at_atom() {
            parts.push(self.postfix()?);
        }
        if parts.len() == 1 {
            Ok(parts.remove(0))
        } else {
            Ok(Production::Sequence(parts))
        }
    }

    fn at_atom(&self) -> bool {
        matches!(
            self.peek().map(|token| &token.kind),
            Some(
                TokenKind::Ident(_)
                    | TokenKind::Literal(_)
                    | TokenKind::LeftParen
                    | TokenKind::Empty
            )
        )
    }

    fn postfix(&mut self) -> Result<Production, ParseError> {
        let mut production = self.atom()?;
        loop {
            let op = match self.peek().map(|token| &token.kind) {
                Some(TokenKind::Star) => RepeatOp::ZeroOrMore,
                Some(TokenKind::Plus) => RepeatOp::OneOrMore,
                Some(TokenKind::Question) => RepeatOp::Optional,
                _ => return Ok(production),
            };
            self.position += 1;
            production = Production::Repeat {
                op,
                production: Box::new(production),
            };
        }
    }

    fn atom(&mut self) -> Result<Production, ParseError> {
        match self.next() {
            Some(Token {
                kind: TokenKind::Literal(text),
                ..
            }) => Ok(Production::Literal(text)),
            Some(Token {
                kind: TokenKind::Ident(name),
                span,
            }) => Ok(Production::RuleRef { name, span }),
            Some(Token {
                kind: TokenKind::Empty,
                ..
            }) => Ok(Production::Sequence(Vec::new())),
            Some(Token {
                kind: TokenKind::LeftParen,
                ..
            }) => {
                let production = self.production()?;
                self.expect(TokenKind::RightParen, "expected `)`")?;
                Ok(production)
            }
            other => Err(self.expected("expected a production", other)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().map_or(false, |token| &token.kind == kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, message: &str) -> Result<Span, ParseError> {
        match self.next() {
            Some(token) if token.kind == kind => Ok(token.span),
            other => Err(self.expected(message, other)),
        }
    }

    fn ident(&mut self, message: &str) -> Result<(String, Span), ParseError> {
        match self.next() {
            Some(Token {
                kind: TokenKind::Ident(name),
                span,
            }) => Ok((name, span)),
            other => Err(self.expected(message, other)),
        }
    }

    fn expected(&self, message: &str, found: Option<Token>) -> ParseError {
        match found {
            Some(token) => ParseError {
                message: message.to_string(),
                span: token.span,
            },
            None => ParseError {
                message: format!("{}, found end of input", message),
                span: Span::new(self.end, self.end),
            },
        }
    }
}
