// Copyright (c) 2016-2021 Fabian Schuiki

//! A lexer for the rules section of YACC grammar files.

use std::fmt;
use yebnf_common::errors::*;
use yebnf_common::lexer::{is_ident, Cursor, Position, Spanned};

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// A bare word naming a production or token.
    Ident(String),
    /// A single- or double-quoted literal, including its quotes.
    Literal(String),
    Colon,
    Pipe,
    Semicolon,
    /// The `%empty` marker for an explicitly empty rule.
    Empty,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Literal(s) => write!(f, "`{}`", s),
            Token::Colon => write!(f, "`:`"),
            Token::Pipe => write!(f, "`|`"),
            Token::Semicolon => write!(f, "`;`"),
            Token::Empty => write!(f, "`%empty`"),
        }
    }
}

/// Locate the rules section of a YACC file.
///
/// The section starts after the first line that consists of `%%` alone and
/// runs up to the next such line or the end of the input. Without any `%%`
/// line the whole input is taken to be the rules section. Returns the
/// section and the position at which it starts.
pub fn rules_section(input: &str) -> (&str, Position) {
    let mut start = None;
    let mut offset = 0;
    for (i, line) in input.split_inclusive('\n').enumerate() {
        let next = offset + line.len();
        if line.trim_end() == "%%" {
            match start {
                None => start = Some((next, i + 2)),
                Some((begin, line)) => {
                    return (
                        &input[begin..offset],
                        Position {
                            offset: begin,
                            line,
                            column: 1,
                        },
                    )
                }
            }
        }
        offset = next;
    }
    let (begin, line) = start.unwrap_or((0, 1));
    (
        &input[begin..],
        Position {
            offset: begin,
            line,
            column: 1,
        },
    )
}

/// Splits the rules section of a YACC file into tokens, dropping action
/// blocks, comments, and `%prec` annotations along the way.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over the rules section of `input`.
    pub fn new(source: &'a str, input: &'a str) -> Lexer<'a> {
        let (section, pos) = rules_section(input);
        Lexer {
            cursor: Cursor::with_position(source, section, pos),
            done: false,
        }
    }

    /// Skip trivia and action blocks.
    fn skip_ignored(&mut self) -> GrammarResult<()> {
        loop {
            self.cursor.skip_trivia(true)?;
            if self.cursor.peek() == Some('{') {
                let action = self.cursor.eat_balanced('{', '}')?;
                trace!("Discarding action {}", action);
            } else {
                return Ok(());
            }
        }
    }

    fn next_token(&mut self) -> GrammarResult<Option<Spanned<Token>>> {
        loop {
            self.skip_ignored()?;
            let line_start = self.cursor.at_line_start();
            let pos = self.cursor.position();
            let c = match self.cursor.peek() {
                Some(c) => c,
                None => return Ok(None),
            };
            let value = match c {
                '\'' | '"' => Token::Literal(self.cursor.eat_quoted(c)?.to_string()),
                ':' => self.single(Token::Colon),
                '|' => self.single(Token::Pipe),
                ';' => self.single(Token::Semicolon),
                '%' => {
                    self.cursor.bump();
                    match self.cursor.eat_while(is_ident) {
                        "empty" => Token::Empty,
                        "prec" => {
                            self.cursor.skip_trivia(true)?;
                            match self.cursor.peek() {
                                Some(q @ '\'') | Some(q @ '"') => {
                                    self.cursor.eat_quoted(q)?;
                                }
                                _ => {
                                    self.cursor.eat_while(is_ident);
                                }
                            }
                            continue;
                        }
                        d => {
                            return Err(self
                                .cursor
                                .error_at(pos, format!("unexpected directive `%{}`", d)))
                        }
                    }
                }
                c if is_ident(c) => Token::Ident(self.cursor.eat_while(is_ident).to_string()),
                c => return Err(self.cursor.error(format!("unexpected character `{}`", c))),
            };
            return Ok(Some(Spanned {
                value,
                pos,
                line_start,
            }));
        }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Lexer::new("test", input)
            .map(|t| t.unwrap().value)
            .collect()
    }

    fn ident(s: &str) -> Token {
        Token::Ident(s.into())
    }

    #[test]
    fn section_boundaries() {
        let (section, pos) = rules_section("%token A\n%%\na: A;\n%%\nint main() {}\n");
        assert_eq!(section, "a: A;\n");
        assert_eq!((pos.line, pos.column), (3, 1));

        let (section, pos) = rules_section("%{\n%}\n%%  \na: b;");
        assert_eq!(section, "a: b;");
        assert_eq!(pos.line, 4);

        let (section, pos) = rules_section("a: b;");
        assert_eq!(section, "a: b;");
        assert_eq!(pos.line, 1);
    }

    #[test]
    fn actions_and_annotations_are_dropped() {
        assert_eq!(
            lex("%%\nexpr: expr '+' expr { $$ = $1 + $3; /* } */ } %prec PLUS\n | %empty ;"),
            vec![
                ident("expr"),
                Token::Colon,
                ident("expr"),
                Token::Literal("'+'".into()),
                ident("expr"),
                Token::Pipe,
                Token::Empty,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            lex("a /* x */ : // y\n \"b\" ;"),
            vec![
                ident("a"),
                Token::Colon,
                Token::Literal("\"b\"".into()),
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn positions_count_from_the_file_start() {
        let tokens: Vec<_> = Lexer::new("test", "%token A\n%%\n\n  a: A;")
            .map(|t| t.unwrap())
            .collect();
        assert_eq!((tokens[0].pos.line, tokens[0].pos.column), (4, 3));
        assert!(tokens[0].line_start);
        assert!(!tokens[1].line_start);
    }

    #[test]
    fn unknown_directives_are_errors() {
        let mut lexer = Lexer::new("test", "a: %left b;");
        lexer.next();
        lexer.next();
        match lexer.next() {
            Some(Err(GrammarError::SurfaceParse { message, .. })) => {
                assert_eq!(message, "unexpected directive `%left`")
            }
            x => panic!("unexpected {:?}", x),
        }
    }
}
