// Copyright (c) 2016-2021 Fabian Schuiki

//! A converter from YACC grammars to simplified EBNF.

#[macro_use]
extern crate log;

// Re-export everything from the common crate.
pub extern crate yebnf_common as common;
pub use crate::common::*;

// Pull in subcrates.
pub extern crate yebnf_ebnf as ebnf;
pub extern crate yebnf_yacc as yacc;

pub mod deps;
pub mod pipeline;
