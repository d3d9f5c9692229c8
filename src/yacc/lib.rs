// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate reads YACC grammar files into the grammar model consumed by the
//! yebnf converter. Only the rules section is read; declarations, action
//! blocks, and precedence annotations are skipped.

#[macro_use]
extern crate log;

pub mod ast;
pub mod lexer;
pub mod parser;

pub use crate::ast::{Element, YGram, YProd, YRule};
pub use crate::parser::parse;
