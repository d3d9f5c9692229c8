// Copyright (c) 2016-2021 Fabian Schuiki

//! A lexer for EBNF grammar files.

use std::fmt;
use yebnf_common::errors::*;
use yebnf_common::lexer::{is_ident, Cursor, Spanned};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// A production name.
    Ident(String),
    /// A single- or double-quoted literal, including its quotes.
    Literal(String),
    /// A bracketed character class, including its brackets.
    Class(String),
    /// One of `::=`, `:`, or `=`.
    Define,
    Pipe,
    Semicolon,
    LParen,
    RParen,
    Question,
    Star,
    Plus,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Literal(s) | Token::Class(s) => write!(f, "`{}`", s),
            Token::Define => write!(f, "`::=`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Semicolon => write!(f, "`;`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::Question => write!(f, "`?`"),
            Token::Star => write!(f, "`*`"),
            Token::Plus => write!(f, "`+`"),
        }
    }
}

/// Splits EBNF source text into tokens.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, input: &'a str) -> Lexer<'a> {
        Lexer {
            cursor: Cursor::new(source, input),
            done: false,
        }
    }

    fn next_token(&mut self) -> GrammarResult<Option<Spanned<Token>>> {
        self.cursor.skip_trivia(false)?;
        let line_start = self.cursor.at_line_start();
        let pos = self.cursor.position();
        let c = match self.cursor.peek() {
            Some(c) => c,
            None => return Ok(None),
        };
        let value = match c {
            '\'' | '"' => Token::Literal(self.cursor.eat_quoted(c)?.to_string()),
            '[' => Token::Class(self.cursor.eat_quoted(']')?.to_string()),
            ':' if self.cursor.starts_with("::=") => {
                self.cursor.bump_str("::=");
                Token::Define
            }
            ':' | '=' => self.single(Token::Define),
            '|' => self.single(Token::Pipe),
            ';' => self.single(Token::Semicolon),
            '(' => self.single(Token::LParen),
            ')' => self.single(Token::RParen),
            '?' => self.single(Token::Question),
            '*' => self.single(Token::Star),
            '+' => self.single(Token::Plus),
            c if is_ident(c) => Token::Ident(self.cursor.eat_while(is_ident).to_string()),
            c => return Err(self.cursor.error(format!("unexpected character `{}`", c))),
        };
        Ok(Some(Spanned {
            value,
            pos,
            line_start,
        }))
    }

    fn single(&mut self, token: Token) -> Token {
        self.cursor.bump();
        token
    }
}

impl Iterator for Lexer<'_> {
    type Item = GrammarResult<Spanned<Token>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Ok(Some(t)) => Some(Ok(t)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
