// Copyright (c) 2016-2021 Fabian Schuiki

//! The EBNF grammar model and the algebra used to simplify it.
//!
//! Expressions are normalized by `normalize` and then rewritten by the
//! factoring, recursion elimination, and inlining passes. Each pass takes an
//! expression or definition and returns a new one, and preserves the normal
//! form.

#[macro_use]
extern crate log;

pub mod ast;
pub mod factor;
pub mod inline;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod recursion;

pub use crate::ast::{format_grammar, EDef, EMap, Ebnf, Quantor};
pub use crate::factor::{factor, factor_left, factor_right, prefix, suffix};
pub use crate::inline::{inline, is_trivial_body, recursive_names, Inliner};
pub use crate::normalize::{normalize, quantify};
pub use crate::parser::{parse_expr, parse_grammar};
pub use crate::recursion::{unrecurse_left, unrecurse_right};
