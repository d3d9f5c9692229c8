// Copyright (c) 2016-2021 Fabian Schuiki

//! A recursive descent parser for EBNF grammar files.
//!
//! ```text
//! grammar  ::= (name define choice (';' | <end>)?)*;
//! choice   ::= sequence ('|' sequence)*;
//! sequence ::= (primary ('?' | '*' | '+')*)*;
//! primary  ::= name | literal | class | '(' choice ')';
//! ```
//!
//! The `;` may be omitted when the next definition starts on a new line.

use crate::ast::{EDef, Ebnf, Quantor};
use crate::lexer::{Lexer, Token};
use crate::normalize::normalize;
use std::collections::HashSet;
use yebnf_common::errors::*;
use yebnf_common::lexer::{parse_error, Position, Spanned};

/// Parse a sequence of EBNF definitions. The bodies are normalized.
pub fn parse_grammar(source: &str, input: &str) -> GrammarResult<Vec<EDef>> {
    let mut parser = Parser::new(source, input)?;
    let defs = parser.parse_grammar()?;
    let mut seen = HashSet::new();
    for def in &defs {
        if !seen.insert(def.name.as_str()) {
            return Err(GrammarError::Semantic {
                source: source.to_string(),
                message: format!("`{}` is defined more than once", def.name),
            });
        }
    }
    debug!("Parsed {} EBNF definitions from {}", defs.len(), source);
    defs.into_iter()
        .map(|def| Ok(EDef::new(def.name, normalize(&def.body)?)))
        .collect()
}

/// Parse a single EBNF expression as written on the right-hand side of a
/// definition. The expression is returned as written, without normalization.
pub fn parse_expr(source: &str, input: &str) -> GrammarResult<Ebnf> {
    let mut parser = Parser::new(source, input)?;
    let expr = parser.parse_choice()?;
    match parser.peek(0) {
        None => Ok(expr),
        Some(t) => Err(parser.error_at(t.pos, format!("unexpected {}", t.value))),
    }
}

/// A token stream with arbitrary lookahead.
struct Parser<'a> {
    source: &'a str,
    input: &'a str,
    tokens: Vec<Spanned<Token>>,
    index: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, input: &'a str) -> GrammarResult<Parser<'a>> {
        Ok(Parser {
            source,
            input,
            tokens: Lexer::new(source, input).collect::<GrammarResult<_>>()?,
            index: 0,
        })
    }

    fn peek(&self, n: usize) -> Option<&Spanned<Token>> {
        self.tokens.get(self.index + n)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek(0).map(|t| &t.value)
    }

    /// Return the current token and advance the parser.
    fn consume(&mut self) -> Option<Spanned<Token>> {
        let t = self.tokens.get(self.index).cloned();
        if t.is_some() {
            self.index += 1;
        }
        t
    }

    /// If the current token is equivalent to the requested one, consume the
    /// token and return true. Otherwise return false.
    fn accept(&mut self, token: Token) -> bool {
        if self.peek_token() == Some(&token) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// Discard the current token given it matches the required one.
    fn require(&mut self, token: Token) -> GrammarResult<()> {
        if self.accept(token.clone()) {
            Ok(())
        } else {
            Err(self.unexpected(&format!("{}", token)))
        }
    }

    /// The position of the current token, or the end of the input.
    fn position(&self) -> Position {
        match self.peek(0) {
            Some(t) => t.pos,
            None => self.end_position(),
        }
    }

    fn end_position(&self) -> Position {
        let line = self.input.matches('\n').count() + 1;
        let column = self.input.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
        Position {
            offset: self.input.len(),
            line,
            column,
        }
    }

    fn error_at<S: Into<String>>(&self, pos: Position, message: S) -> GrammarError {
        parse_error(self.source, self.input, pos, message)
    }

    fn unexpected(&self, expected: &str) -> GrammarError {
        let found = match self.peek_token() {
            Some(t) => format!("{}", t),
            None => "end of input".to_string(),
        };
        self.error_at(
            self.position(),
            format!("expected {}, found {}", expected, found),
        )
    }

    /// Check whether a new definition starts at the current token.
    fn at_definition(&self) -> bool {
        match (self.peek(0), self.peek(1)) {
            (Some(name), Some(define)) => {
                name.line_start
                    && matches!(name.value, Token::Ident(_))
                    && define.value == Token::Define
            }
            _ => false,
        }
    }

    /// Parses an entire grammar.
    fn parse_grammar(&mut self) -> GrammarResult<Vec<EDef>> {
        let mut defs = vec![];
        while self.peek(0).is_some() {
            defs.push(self.parse_definition()?);
        }
        Ok(defs)
    }

    /// Parses a `name ::= choice;` definition.
    fn parse_definition(&mut self) -> GrammarResult<EDef> {
        let name = match self.peek_token() {
            Some(Token::Ident(name)) => name.clone(),
            _ => return Err(self.unexpected("production name")),
        };
        self.index += 1;
        self.require(Token::Define)?;
        let body = self.parse_choice()?;
        if !self.accept(Token::Semicolon) && self.peek(0).is_some() && !self.at_definition() {
            return Err(self.unexpected("`;`"));
        }
        trace!("Parsed definition `{}`", name);
        Ok(EDef::new(name, body))
    }

    /// Parses alternatives separated by `|`.
    fn parse_choice(&mut self) -> GrammarResult<Ebnf> {
        let mut alts = vec![self.parse_sequence()?];
        while self.accept(Token::Pipe) {
            alts.push(self.parse_sequence()?);
        }
        Ok(if alts.len() == 1 {
            alts.remove(0)
        } else {
            Ebnf::Alt(alts)
        })
    }

    /// Parses a possibly empty sequence of quantified primaries.
    fn parse_sequence(&mut self) -> GrammarResult<Ebnf> {
        let mut items = vec![];
        loop {
            match self.peek_token() {
                None | Some(Token::Pipe) | Some(Token::Semicolon) | Some(Token::RParen) => break,
                Some(Token::Ident(_)) if self.at_definition() => break,
                _ => (),
            }
            let mut item = self.parse_primary()?;
            loop {
                let q = match self.peek_token() {
                    Some(Token::Question) => Quantor::Optional,
                    Some(Token::Star) => Quantor::Many,
                    Some(Token::Plus) => Quantor::Some,
                    _ => break,
                };
                self.index += 1;
                item = Ebnf::quantified(q, item);
            }
            items.push(item);
        }
        Ok(if items.len() == 1 {
            items.remove(0)
        } else {
            Ebnf::Seq(items)
        })
    }

    fn parse_primary(&mut self) -> GrammarResult<Ebnf> {
        let pos = self.position();
        match self.consume().map(|t| t.value) {
            Some(Token::Ident(name)) => Ok(Ebnf::NonTerminal(name)),
            Some(Token::Literal(lit)) | Some(Token::Class(lit)) => Ok(Ebnf::Terminal(lit)),
            Some(Token::LParen) => {
                let inner = self.parse_choice()?;
                self.require(Token::RParen)?;
                Ok(inner)
            }
            Some(t) => Err(self.error_at(pos, format!("expected expression, found {}", t))),
            None => Err(self.error_at(pos, "expected expression, found end of input")),
        }
    }
}
