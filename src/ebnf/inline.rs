// Copyright (c) 2016-2021 Fabian Schuiki

//! Inlining of trivial productions.

use crate::ast::{EMap, Ebnf};
use crate::normalize::{normalize, quantify};
use std::collections::HashSet;
use yebnf_common::{
    errors::*, graph::Graph, util::fixpoint, DEFAULT_MAX_ITERATIONS, DEFAULT_TRIVIAL_ALT_LIMIT,
};

/// Find the productions in a table that are directly or transitively
/// recursive.
pub fn recursive_names(table: &EMap) -> HashSet<String> {
    let mut graph = Graph::new();
    for def in table.iter() {
        graph.add_node(def.name.as_str());
    }
    for def in table.iter() {
        for name in def.body.references() {
            if table.contains(name) {
                graph.add_edge(def.name.as_str(), name);
            }
        }
    }
    graph
        .cyclic_nodes()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Check whether a body is small enough to be inlined.
///
/// Atoms, choices among fewer than `alt_limit` atoms, sequences of atoms, and
/// quantified atoms qualify.
pub fn is_trivial_body(body: &Ebnf, alt_limit: usize) -> bool {
    match body {
        Ebnf::NonTerminal(_) | Ebnf::Terminal(_) => true,
        Ebnf::Alt(xs) => xs.len() < alt_limit && xs.iter().all(Ebnf::is_atom),
        Ebnf::Seq(xs) => xs.iter().all(Ebnf::is_atom),
        Ebnf::Qnt(_, x) => x.is_atom(),
    }
}

/// Substitutes trivial productions of a table at their use sites.
pub struct Inliner<'a> {
    table: &'a EMap,
    recursive: HashSet<String>,
    alt_limit: usize,
}

impl<'a> Inliner<'a> {
    pub fn new(table: &'a EMap) -> Inliner<'a> {
        Inliner::with_alt_limit(table, DEFAULT_TRIVIAL_ALT_LIMIT)
    }

    pub fn with_alt_limit(table: &'a EMap, alt_limit: usize) -> Inliner<'a> {
        Inliner {
            table,
            recursive: recursive_names(table),
            alt_limit,
        }
    }

    /// Check whether the production `name` may be inlined. Unknown names and
    /// recursive productions never are.
    pub fn is_trivial(&self, name: &str) -> bool {
        if self.recursive.contains(name) {
            return false;
        }
        match self.table.get(name) {
            Some(def) => is_trivial_body(&def.body, self.alt_limit),
            None => false,
        }
    }

    /// Inline trivial references in an expression until none are left.
    pub fn inline(&self, e: &Ebnf) -> GrammarResult<Ebnf> {
        let fp = fixpoint("inlining", DEFAULT_MAX_ITERATIONS, normalize(e)?, |e| {
            self.step(e)
        })?;
        Ok(fp.value)
    }

    fn step(&self, e: &Ebnf) -> GrammarResult<Ebnf> {
        match e {
            Ebnf::Alt(xs) => normalize(&Ebnf::Alt(self.step_all(xs)?)),
            Ebnf::Seq(xs) => normalize(&Ebnf::Seq(self.step_all(xs)?)),
            Ebnf::Qnt(q, x) => quantify(*q, &self.step(x)?),
            Ebnf::NonTerminal(name) if self.is_trivial(name) => match self.table.get(name) {
                Some(def) => {
                    trace!("Inlining `{}` as {}", name, def.body);
                    Ok(def.body.clone())
                }
                None => Ok(e.clone()),
            },
            Ebnf::NonTerminal(_) | Ebnf::Terminal(_) => Ok(e.clone()),
        }
    }

    fn step_all(&self, xs: &[Ebnf]) -> GrammarResult<Vec<Ebnf>> {
        xs.iter().map(|x| self.step(x)).collect()
    }
}

/// Inline the trivial productions of `table` into `e`.
pub fn inline(table: &EMap, e: &Ebnf) -> GrammarResult<Ebnf> {
    Inliner::new(table).inline(e)
}
