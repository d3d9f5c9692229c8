// Copyright (c) 2016-2021 Fabian Schuiki

//! A recursive descent parser for the rules section of YACC grammar files.

use crate::ast::{Element, YGram, YProd, YRule};
use crate::lexer::{rules_section, Lexer, Token};
use yebnf_common::errors::*;
use yebnf_common::lexer::{parse_error, Position, Spanned};

/// Parse a YACC grammar file.
pub fn parse(source: &str, input: &str) -> GrammarResult<YGram> {
    let mut parser = Parser::new(source, input)?;
    let prods = parser.parse_grammar()?;
    debug!("Parsed {} YACC productions from {}", prods.len(), source);
    YGram::new(source, prods)
}

/// A token stream with arbitrary lookahead.
struct Parser<'a> {
    source: &'a str,
    input: &'a str,
    section: &'a str,
    /// Where the rules section starts in the input.
    base: Position,
    tokens: Vec<Spanned<Token>>,
    index: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str, input: &'a str) -> GrammarResult<Parser<'a>> {
        let (section, base) = rules_section(input);
        Ok(Parser {
            source,
            input,
            section,
            base,
            tokens: Lexer::new(source, input).collect::<GrammarResult<_>>()?,
            index: 0,
        })
    }

    fn peek(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.index + n).map(|t| &t.value)
    }

    /// If the current token is equivalent to the requested one, consume the
    /// token and return true. Otherwise return false.
    fn accept(&mut self, token: Token) -> bool {
        if self.peek(0) == Some(&token) {
            self.index += 1;
            true
        } else {
            false
        }
    }

    /// The position of the current token in the input, or the end of the
    /// rules section.
    fn position(&self) -> Position {
        match self.tokens.get(self.index) {
            Some(t) => Position {
                offset: self.base.offset + t.pos.offset,
                ..t.pos
            },
            None => {
                let last = self.section.rsplit('\n').next().unwrap_or("");
                Position {
                    offset: self.base.offset + self.section.len(),
                    line: self.base.line + self.section.matches('\n').count(),
                    column: last.chars().count() + 1,
                }
            }
        }
    }

    fn unexpected(&self, expected: &str) -> GrammarError {
        let found = match self.peek(0) {
            Some(t) => format!("{}", t),
            None => "end of input".to_string(),
        };
        parse_error(
            self.source,
            self.input,
            self.position(),
            format!("expected {}, found {}", expected, found),
        )
    }

    /// Check whether a new production starts at the current token.
    fn at_production(&self) -> bool {
        matches!(
            (self.peek(0), self.peek(1)),
            (Some(Token::Ident(_)), Some(Token::Colon))
        )
    }

    /// Parses all productions.
    fn parse_grammar(&mut self) -> GrammarResult<Vec<YProd>> {
        let mut prods = vec![];
        while self.peek(0).is_some() {
            prods.push(self.parse_production()?);
        }
        Ok(prods)
    }

    /// Parses a `name: rule | rule ... ;` production. The `;` may be left out
    /// if another production or the end of the input follows.
    fn parse_production(&mut self) -> GrammarResult<YProd> {
        let name = match self.peek(0) {
            Some(Token::Ident(name)) => name.clone(),
            _ => return Err(self.unexpected("production name")),
        };
        self.index += 1;
        if !self.accept(Token::Colon) {
            return Err(self.unexpected("`:`"));
        }
        let mut alternatives = vec![self.parse_rule()?];
        while self.accept(Token::Pipe) {
            alternatives.push(self.parse_rule()?);
        }
        if !self.accept(Token::Semicolon) && self.peek(0).is_some() && !self.at_production() {
            return Err(self.unexpected("`;`"));
        }
        trace!("Parsed production `{}`", name);
        Ok(YProd::new(name, alternatives))
    }

    /// Parses a possibly empty sequence of symbols.
    fn parse_rule(&mut self) -> GrammarResult<YRule> {
        let mut elements = vec![];
        loop {
            if self.at_production() {
                break;
            }
            let element = match self.peek(0) {
                Some(Token::Ident(name)) => Element::NonTerminal(name.clone()),
                Some(Token::Literal(lit)) => Element::Terminal(lit.clone()),
                Some(Token::Empty) => {
                    self.index += 1;
                    continue;
                }
                _ => break,
            };
            self.index += 1;
            elements.push(element);
        }
        Ok(YRule::new(elements))
    }
}
