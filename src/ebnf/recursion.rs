// Copyright (c) 2016-2021 Fabian Schuiki

//! Elimination of direct self-recursion.
//!
//! A production that refers to itself at the very beginning or end of some of
//! its alternatives describes a repetition. These passes replace such
//! recursion with the corresponding quantifier:
//!
//! ```text
//! self ::= foo | bar | self baz | self buz;   =>  self ::= (foo|bar) (baz|buz)*;
//! self ::= foo | bar | baz self | buz self;   =>  self ::= (baz|buz)* (foo|bar);
//! ```

use crate::ast::{EDef, Ebnf, Quantor};
use crate::normalize::{normalize, quantify};
use yebnf_common::errors::*;

/// The alternatives of a normalized body, and whether the body also matches
/// the empty string.
fn alternatives(body: &Ebnf) -> (Vec<Ebnf>, bool) {
    match body {
        Ebnf::Alt(xs) => (xs.clone(), false),
        Ebnf::Qnt(Quantor::Optional, x) => match &**x {
            Ebnf::Alt(xs) => (xs.clone(), true),
            x => (vec![x.clone()], true),
        },
        x => (vec![x.clone()], false),
    }
}

/// Collect the base cases, adding the empty sequence if needed.
fn base_case(mut base: Vec<Ebnf>, nullable: bool) -> Ebnf {
    if nullable {
        base.push(Ebnf::empty());
    }
    Ebnf::Alt(base)
}

/// Replace direct left recursion by a repetition.
///
/// Without a base case the production must recurse at least once, so the
/// repetition becomes `Some` (`self ::= self baz` turns into `baz+`).
pub fn unrecurse_left(def: &EDef) -> GrammarResult<EDef> {
    if !def.is_self_referential() {
        return Ok(def.clone());
    }
    let (alts, nullable) = alternatives(&def.body);
    let mut base = vec![];
    let mut rests = vec![];
    for alt in alts {
        let rest = match alt.seq_items().split_first() {
            Some((Ebnf::NonTerminal(n), rest)) if *n == def.name => Some(rest.to_vec()),
            _ => None,
        };
        match rest {
            Some(rest) if rest.is_empty() => (),
            Some(rest) => rests.push(Ebnf::Seq(rest)),
            None => base.push(alt),
        }
    }
    if rests.is_empty() {
        return Ok(def.clone());
    }
    debug!("Eliminating left recursion in `{}`", def.name);
    let body = if base.is_empty() && !nullable {
        quantify(Quantor::Some, &Ebnf::Alt(rests))?
    } else {
        normalize(&Ebnf::Seq(vec![
            base_case(base, nullable),
            quantify(Quantor::Many, &Ebnf::Alt(rests))?,
        ]))?
    };
    Ok(EDef::new(def.name.clone(), body))
}

/// Replace direct right recursion by a repetition.
///
/// A production without a base case is left unchanged.
pub fn unrecurse_right(def: &EDef) -> GrammarResult<EDef> {
    if !def.is_self_referential() {
        return Ok(def.clone());
    }
    let (alts, nullable) = alternatives(&def.body);
    let mut base = vec![];
    let mut inits = vec![];
    for alt in alts {
        let init = match alt.seq_items().split_last() {
            Some((Ebnf::NonTerminal(n), init)) if *n == def.name => Some(init.to_vec()),
            _ => None,
        };
        match init {
            Some(init) if init.is_empty() => (),
            Some(init) => inits.push(Ebnf::Seq(init)),
            None => base.push(alt),
        }
    }
    if inits.is_empty() || (base.is_empty() && !nullable) {
        return Ok(def.clone());
    }
    debug!("Eliminating right recursion in `{}`", def.name);
    let body = normalize(&Ebnf::Seq(vec![
        quantify(Quantor::Many, &Ebnf::Alt(inits))?,
        base_case(base, nullable),
    ]))?;
    Ok(EDef::new(def.name.clone(), body))
}
