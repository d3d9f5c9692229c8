// Copyright (c) 2016-2021 Fabian Schuiki
#![allow(dead_code)]

pub use yebnf::ebnf::{self, format_grammar, EDef};
pub use yebnf::errors::*;
pub use yebnf::*;

/// Run the full conversion on a YACC grammar and auxiliary EBNF definitions
/// and return the printed result.
pub fn convert_with(sess: &Session, input: &str, aux: &str) -> GrammarResult<String> {
    pretty_env_logger::try_init().ok();
    let gram = yacc::parse("test.y", input)?;
    let aux = ebnf::parse_grammar("test.ebnf", aux)?;
    let defs = pipeline::work(sess, &gram, &aux)?;
    Ok(format_grammar(&defs))
}

pub fn convert(input: &str) -> String {
    convert_with(&Session::new(), input, "").unwrap()
}
