// Copyright (c) 2016-2021 Fabian Schuiki

//! The EBNF grammar model and its canonical printed form.

use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// A repetition operator.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Quantor {
    /// Zero or one, written `x?`.
    Optional,
    /// Zero or more, written `x*`.
    Many,
    /// One or more, written `x+`.
    Some,
}

impl Quantor {
    /// The suffix used to write this quantor.
    pub fn suffix(self) -> char {
        match self {
            Quantor::Optional => '?',
            Quantor::Many => '*',
            Quantor::Some => '+',
        }
    }
}

/// An EBNF expression.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Ebnf {
    /// One of the alternatives.
    Alt(Vec<Ebnf>),
    /// All of the items, in order. The empty sequence matches nothing.
    Seq(Vec<Ebnf>),
    /// A quantified expression.
    Qnt(Quantor, Box<Ebnf>),
    /// A reference to a production.
    NonTerminal(String),
    /// A literal token, character class, or quoted string, kept exactly as
    /// written in the source.
    Terminal(String),
}

impl Ebnf {
    /// The empty sequence.
    pub fn empty() -> Ebnf {
        Ebnf::Seq(vec![])
    }

    pub fn nonterm<S: Into<String>>(name: S) -> Ebnf {
        Ebnf::NonTerminal(name.into())
    }

    pub fn term<S: Into<String>>(literal: S) -> Ebnf {
        Ebnf::Terminal(literal.into())
    }

    pub fn quantified(q: Quantor, inner: Ebnf) -> Ebnf {
        Ebnf::Qnt(q, Box::new(inner))
    }

    /// Check whether this is the empty sequence.
    pub fn is_empty(&self) -> bool {
        match self {
            Ebnf::Seq(xs) => xs.is_empty(),
            _ => false,
        }
    }

    /// Check whether this is a terminal or nonterminal.
    pub fn is_atom(&self) -> bool {
        match self {
            Ebnf::NonTerminal(_) | Ebnf::Terminal(_) => true,
            _ => false,
        }
    }

    /// View this expression as a list of sequence items. A sequence yields its
    /// elements, anything else yields itself.
    pub fn seq_items(&self) -> &[Ebnf] {
        match self {
            Ebnf::Seq(xs) => xs,
            x => std::slice::from_ref(x),
        }
    }

    /// The binding strength of this expression's outermost constructor.
    pub fn precedence(&self) -> u8 {
        match self {
            Ebnf::Alt(_) => 0,
            Ebnf::Seq(_) => 1,
            Ebnf::Qnt(..) => 2,
            Ebnf::NonTerminal(_) | Ebnf::Terminal(_) => 3,
        }
    }

    /// Collect the names of all nonterminals referenced in this expression,
    /// in order of first appearance.
    pub fn references(&self) -> Vec<&str> {
        let mut out = vec![];
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, into: &mut Vec<&'a str>) {
        match self {
            Ebnf::Alt(xs) | Ebnf::Seq(xs) => {
                for x in xs {
                    x.collect_references(into);
                }
            }
            Ebnf::Qnt(_, x) => x.collect_references(into),
            Ebnf::NonTerminal(name) => {
                if !into.contains(&name.as_str()) {
                    into.push(name);
                }
            }
            Ebnf::Terminal(_) => (),
        }
    }

    /// Check whether this expression refers to a nonterminal.
    pub fn refers_to(&self, name: &str) -> bool {
        match self {
            Ebnf::Alt(xs) | Ebnf::Seq(xs) => xs.iter().any(|x| x.refers_to(name)),
            Ebnf::Qnt(_, x) => x.refers_to(name),
            Ebnf::NonTerminal(n) => n == name,
            Ebnf::Terminal(_) => false,
        }
    }

    /// Write this expression in a context that requires at least precedence
    /// `ctx`, adding parentheses if it binds weaker.
    fn fmt_prec(&self, f: &mut fmt::Formatter, ctx: u8) -> fmt::Result {
        if self.precedence() < ctx {
            write!(f, "(")?;
            self.fmt_inner(f, true)?;
            write!(f, ")")
        } else {
            self.fmt_inner(f, false)
        }
    }

    fn fmt_inner(&self, f: &mut fmt::Formatter, nested: bool) -> fmt::Result {
        match self {
            Ebnf::Alt(xs) => {
                let sep = if nested { "|" } else { " | " };
                write!(f, "{}", xs.iter().map(|x| Prec(x, 1)).format(sep))
            }
            Ebnf::Seq(xs) => write!(f, "{}", xs.iter().map(|x| Prec(x, 2)).format(" ")),
            Ebnf::Qnt(q, x) => {
                x.fmt_prec(f, 3)?;
                write!(f, "{}", q.suffix())
            }
            Ebnf::NonTerminal(s) | Ebnf::Terminal(s) => write!(f, "{}", s),
        }
    }
}

/// An expression printed in a context of a given precedence.
struct Prec<'a>(&'a Ebnf, u8);

impl fmt::Display for Prec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt_prec(f, self.1)
    }
}

impl fmt::Display for Ebnf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

/// A named production.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct EDef {
    pub name: String,
    pub body: Ebnf,
}

impl EDef {
    pub fn new<S: Into<String>>(name: S, body: Ebnf) -> EDef {
        EDef {
            name: name.into(),
            body,
        }
    }

    /// Check whether the production refers to itself directly.
    pub fn is_self_referential(&self) -> bool {
        self.body.refers_to(&self.name)
    }
}

impl fmt::Display for EDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ::= {};", self.name, self.body)
    }
}

/// A table of productions, keyed by name.
///
/// The table is a plain value: updating it consumes the old table and
/// returns a new one.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct EMap {
    defs: BTreeMap<String, EDef>,
}

impl EMap {
    pub fn new() -> EMap {
        Default::default()
    }

    /// Return a table with `def` added, replacing any previous definition of
    /// the same name.
    pub fn with(mut self, def: EDef) -> EMap {
        self.defs.insert(def.name.clone(), def);
        self
    }

    pub fn get(&self, name: &str) -> Option<&EDef> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Iterate over the productions, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = &EDef> + '_ {
        self.defs.values()
    }
}

impl std::iter::FromIterator<EDef> for EMap {
    fn from_iter<I: IntoIterator<Item = EDef>>(iter: I) -> EMap {
        iter.into_iter().fold(EMap::new(), EMap::with)
    }
}

/// Print a list of productions, one per line.
pub fn format_grammar(defs: &[EDef]) -> String {
    defs.iter().map(|d| format!("{}\n", d)).collect()
}
