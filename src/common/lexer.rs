// Copyright (c) 2016-2021 Fabian Schuiki

//! Lexer utilities shared by the grammar readers.

use crate::errors::GrammarError;

/// A position in an input string.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    /// Byte offset into the input of the cursor that produced the position.
    pub offset: usize,
    /// One-based line number.
    pub line: usize,
    /// One-based column number, counted in characters.
    pub column: usize,
}

/// A value annotated with the position it was found at.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Spanned<T> {
    pub value: T,
    pub pos: Position,
    /// Whether this is the first token on its line.
    pub line_start: bool,
}

/// A character cursor over an input string.
///
/// The cursor keeps track of line and column numbers and can produce
/// `GrammarError::SurfaceParse` errors that point at its current location.
pub struct Cursor<'a> {
    source: &'a str,
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    line_start: bool,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor. The `source` name is used in error messages.
    pub fn new(source: &'a str, input: &'a str) -> Cursor<'a> {
        Cursor::with_position(
            source,
            input,
            Position {
                offset: 0,
                line: 1,
                column: 1,
            },
        )
    }

    /// Create a cursor over a slice of a larger input which starts at `pos`.
    pub fn with_position(source: &'a str, input: &'a str, pos: Position) -> Cursor<'a> {
        Cursor {
            source,
            input,
            offset: 0,
            line: pos.line,
            column: pos.column,
            line_start: pos.column == 1,
        }
    }

    /// The name of the source being read.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The current position.
    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// Whether nothing but whitespace has been consumed on the current line.
    pub fn at_line_start(&self) -> bool {
        self.line_start
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    /// Look at the next character.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look at the character `n` positions ahead.
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    pub fn starts_with(&self, s: &str) -> bool {
        self.rest().starts_with(s)
    }

    /// Advance by one character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
            self.line_start = true;
        } else {
            self.column += 1;
            if !c.is_whitespace() {
                self.line_start = false;
            }
        }
        Some(c)
    }

    /// Advance over a string known to be next in the input.
    pub fn bump_str(&mut self, s: &str) {
        debug_assert!(self.starts_with(s));
        for _ in s.chars() {
            self.bump();
        }
    }

    /// Consume characters as long as `pred` holds and return them.
    pub fn eat_while<F: Fn(char) -> bool>(&mut self, pred: F) -> &'a str {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &self.input[start..self.offset]
    }

    /// Skip whitespace and `/* ... */` comments, and `// ...` line comments if
    /// `line_comments` is set.
    pub fn skip_trivia(&mut self, line_comments: bool) -> Result<(), GrammarError> {
        loop {
            match (self.peek(), self.peek_nth(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('*')) => {
                    let pos = self.position();
                    self.bump_str("/*");
                    loop {
                        if self.starts_with("*/") {
                            self.bump_str("*/");
                            break;
                        }
                        if self.bump().is_none() {
                            return Err(self.error_at(pos, "unterminated comment"));
                        }
                    }
                }
                (Some('/'), Some('/')) if line_comments => {
                    self.eat_while(|c| c != '\n');
                }
                _ => return Ok(()),
            }
        }
    }

    /// Consume a quoted literal starting at the current character and return
    /// it including its delimiters. A backslash escapes the next character.
    pub fn eat_quoted(&mut self, close: char) -> Result<&'a str, GrammarError> {
        let pos = self.position();
        let start = self.offset;
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some('\n') | None => return Err(self.error_at(pos, "unterminated literal")),
                Some(c) if c == close => break,
                Some(_) => (),
            }
        }
        Ok(&self.input[start..self.offset])
    }

    /// Consume a block delimited by `open` and `close`, allowing nested
    /// blocks, quoted strings, and comments inside, and return it including
    /// delimiters.
    pub fn eat_balanced(&mut self, open: char, close: char) -> Result<&'a str, GrammarError> {
        let pos = self.position();
        let start = self.offset;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                Some(q @ '\'') | Some(q @ '"') => {
                    self.eat_quoted(q)?;
                }
                Some('/') if matches!(self.peek_nth(1), Some('*') | Some('/')) => {
                    self.skip_trivia(true)?;
                }
                Some(c) => {
                    self.bump();
                    if c == open {
                        depth += 1;
                    } else if c == close {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                }
                None => {
                    return Err(self.error_at(pos, format!("unbalanced `{}`", open)));
                }
            }
        }
        Ok(&self.input[start..self.offset])
    }

    /// Create an error pointing at the current position.
    pub fn error<S: Into<String>>(&self, message: S) -> GrammarError {
        self.error_at(self.position(), message)
    }

    /// Create an error pointing at a previously recorded position.
    pub fn error_at<S: Into<String>>(&self, pos: Position, message: S) -> GrammarError {
        parse_error(self.source, self.input, pos, message)
    }
}

/// Create an error pointing at a position in `input`.
pub fn parse_error<S: Into<String>>(
    source: &str,
    input: &str,
    pos: Position,
    message: S,
) -> GrammarError {
    GrammarError::SurfaceParse {
        source: source.to_string(),
        line: pos.line,
        column: pos.column,
        message: message.into(),
        remainder: input.get(pos.offset..).unwrap_or("").to_string(),
    }
}

/// Check whether a character may appear in an identifier.
pub fn is_ident(c: char) -> bool {
    c == '_' || c == '.' || c.is_alphanumeric()
}
