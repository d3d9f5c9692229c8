// Copyright (c) 2016-2021 Fabian Schuiki

//! Utilities to implement diagnostics and error reporting facilities.

use std::fmt;

/// An error raised while reading or transforming a grammar.
///
/// All errors are fatal. They carry enough context to point the user at the
/// offending source text or grammar construct, and can be turned into a
/// [`DiagBuilder`] for presentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrammarError {
    /// The YACC or EBNF source text is malformed.
    SurfaceParse {
        source: String,
        line: usize,
        column: usize,
        message: String,
        remainder: String,
    },
    /// The grammar is well-formed text but violates a structural rule, such as
    /// a nonterminal being defined twice.
    Semantic { source: String, message: String },
    /// A quantifier was applied to something that cannot be quantified. Both
    /// the offending expression and what its body normalized to are kept.
    IllegalQuantification { expr: String, normalized: String },
    /// A bounded fixpoint iteration did not settle.
    NoFixpoint { what: &'static str, limit: usize },
}

/// A result carrying a `GrammarError` on failure.
pub type GrammarResult<T> = Result<T, GrammarError>;

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GrammarError::SurfaceParse {
                source,
                line,
                column,
                message,
                remainder,
            } => write!(
                f,
                "{}:{}:{}: {}; remaining input `{}`",
                source,
                line,
                column,
                message,
                excerpt(remainder)
            ),
            GrammarError::Semantic { source, message } => write!(f, "{}: {}", source, message),
            GrammarError::IllegalQuantification { expr, normalized } => write!(
                f,
                "illegal quantification `{}`; its body normalizes to `{}`",
                expr, normalized
            ),
            GrammarError::NoFixpoint { what, limit } => {
                write!(f, "{} did not settle within {} iterations", what, limit)
            }
        }
    }
}

impl std::error::Error for GrammarError {}

/// Cut the unparsed remainder of an input down to its first line.
fn excerpt(remainder: &str) -> &str {
    let line = remainder.lines().next().unwrap_or("");
    match line.char_indices().nth(60) {
        Some((i, _)) => &line[..i],
        None => line,
    }
}

/// Used to emit structured error messages.
#[must_use]
#[derive(Clone, Debug)]
pub struct DiagBuilder {
    pub severity: Severity,
    pub message: String,
    pub segments: Vec<DiagSegment>,
}

#[derive(Clone, Debug)]
pub enum DiagSegment {
    /// A location in a source file, with the text found there.
    Location {
        source: String,
        line: usize,
        column: usize,
        text: String,
    },
    Note(String),
}

/// A diagnostic result type. Either carries the result `T` in the Ok variant,
/// or an assembled diagnostic in the Err variant.
pub type DiagResult<T> = Result<T, DiagBuilder>;

impl DiagBuilder {
    pub fn new<S: Into<String>>(severity: Severity, message: S) -> DiagBuilder {
        DiagBuilder {
            severity,
            message: message.into(),
            segments: Vec::new(),
        }
    }

    pub fn bug<S: Into<String>>(message: S) -> DiagBuilder {
        DiagBuilder::new(Severity::Bug, message)
    }

    pub fn fatal<S: Into<String>>(message: S) -> DiagBuilder {
        DiagBuilder::new(Severity::Fatal, message)
    }

    pub fn error<S: Into<String>>(message: S) -> DiagBuilder {
        DiagBuilder::new(Severity::Error, message)
    }

    pub fn segment(self, segment: DiagSegment) -> DiagBuilder {
        let mut segments = self.segments;
        segments.push(segment);
        DiagBuilder { segments, ..self }
    }

    pub fn location<S: Into<String>, T: Into<String>>(
        self,
        source: S,
        line: usize,
        column: usize,
        text: T,
    ) -> DiagBuilder {
        self.segment(DiagSegment::Location {
            source: source.into(),
            line,
            column,
            text: text.into(),
        })
    }

    pub fn add_note<S: Into<String>>(self, message: S) -> DiagBuilder {
        self.segment(DiagSegment::Note(message.into()))
    }

    pub fn get_severity(&self) -> Severity {
        self.severity
    }

    pub fn get_message(&self) -> &String {
        &self.message
    }

    pub fn get_segments(&self) -> &[DiagSegment] {
        &self.segments
    }
}

impl From<GrammarError> for DiagBuilder {
    fn from(err: GrammarError) -> DiagBuilder {
        match err {
            GrammarError::SurfaceParse {
                source,
                line,
                column,
                message,
                remainder,
            } => DiagBuilder::error(format!("syntax error: {}", message)).location(
                source,
                line,
                column,
                excerpt(&remainder),
            ),
            GrammarError::Semantic { source, message } => {
                DiagBuilder::error(message).add_note(format!("in grammar `{}`", source))
            }
            GrammarError::IllegalQuantification { expr, normalized } => {
                DiagBuilder::fatal(format!("illegal quantification `{}`", expr))
                    .add_note(format!("the quantified body normalizes to `{}`", normalized))
                    .add_note("quantifiers cannot be stacked or applied to nothing")
            }
            err @ GrammarError::NoFixpoint { .. } => DiagBuilder::bug(format!("{}", err)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Severity {
    Error,
    Fatal,
    Bug,
}

impl Severity {
    pub fn to_str(self) -> &'static str {
        match self {
            Severity::Fatal => "fatal",
            Severity::Error => "error",
            Severity::Bug => "internal error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl fmt::Display for DiagBuilder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let colorcode = "\x1B[31;1m";
        write!(
            f,
            "{}{}:\x1B[m\x1B[1m {}\x1B[m\n",
            colorcode,
            self.get_severity(),
            self.get_message()
        )?;

        for segment in &self.segments {
            match segment {
                DiagSegment::Location {
                    source,
                    line,
                    column,
                    text,
                } => {
                    write!(f, "  --> {}:{}:{}\n", source, line, column)?;
                    write!(f, "   | \n")?;
                    write!(f, "   | {}{}\x1B[m\n", colorcode, text)?;
                    write!(f, "   | {}^\x1B[m\n", colorcode)?;
                }
                DiagSegment::Note(message) => {
                    write!(f, "   = \x1B[1mnote:\x1B[m {}\n", message)?
                }
            }
        }

        if self.get_severity() == Severity::Bug {
            write!(
                f,
                "\nThe grammar transformation failed to converge. This is a bug; please \
                 report it together with the grammar that triggered it.\n"
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_parse_display() {
        let err = GrammarError::SurfaceParse {
            source: "gram.y".into(),
            line: 3,
            column: 7,
            message: "expected `;`".into(),
            remainder: "| foo\nbar ;".into(),
        };
        assert_eq!(
            format!("{}", err),
            "gram.y:3:7: expected `;`; remaining input `| foo`"
        );
    }

    #[test]
    fn illegal_quantification_diag() {
        let err = GrammarError::IllegalQuantification {
            expr: "a??".into(),
            normalized: "a?".into(),
        };
        let diag = DiagBuilder::from(err);
        assert_eq!(diag.get_severity(), Severity::Fatal);
        assert_eq!(diag.get_segments().len(), 2);
        assert!(format!("{}", diag).contains("a?"));
    }
}
