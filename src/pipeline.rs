// Copyright (c) 2016-2021 Fabian Schuiki

//! The conversion of YACC grammars into simplified EBNF.
//!
//! Productions are converted one dependency group at a time, callees before
//! callers. Each group is optimized against a table that already holds the
//! final form of everything the group refers to, so inlining only ever
//! substitutes finished bodies.

use crate::common::{errors::*, util::fixpoint, Passes, Session, SessionOptions};
use crate::deps::dependency_groups;
use crate::ebnf::{factor, normalize, unrecurse_left, unrecurse_right, EDef, EMap, Ebnf, Inliner};
use crate::yacc::{Element, YGram, YProd};
use itertools::Itertools;

fn convert_element(element: &Element) -> Ebnf {
    match element {
        Element::Terminal(lit) => Ebnf::Terminal(lit.clone()),
        Element::NonTerminal(name) => Ebnf::NonTerminal(name.clone()),
    }
}

/// Convert a YACC production into a normalized EBNF definition.
pub fn convert(prod: &YProd) -> GrammarResult<EDef> {
    let alts = prod
        .alternatives
        .iter()
        .map(|rule| Ebnf::Seq(rule.elements.iter().map(convert_element).collect()))
        .collect();
    Ok(EDef::new(prod.name.clone(), normalize(&Ebnf::Alt(alts))?))
}

/// Convert every production of a grammar, in source order, without any
/// further optimization.
pub fn convert_grammar(gram: &YGram) -> GrammarResult<Vec<EDef>> {
    gram.prods().map(convert).collect()
}

/// Apply one round of the enabled optimization passes to a definition.
///
/// Trivial productions in `table` are inlined into the definition.
pub fn optimize_def(table: &EMap, def: &EDef, opts: &SessionOptions) -> GrammarResult<EDef> {
    let mut def = def.clone();
    if opts.passes.contains(Passes::UNRECURSE) {
        def = unrecurse_left(&def)?;
        def = unrecurse_right(&def)?;
    }
    let factoring = opts.passes.contains(Passes::FACTOR);
    let mut body = def.body;
    if factoring {
        body = factor(&body)?;
    }
    if opts.passes.contains(Passes::INLINE) {
        body = Inliner::with_alt_limit(table, opts.trivial_alt_limit).inline(&body)?;
        if factoring {
            body = factor(&body)?;
        }
    }
    Ok(EDef::new(def.name, body))
}

/// Optimize the definitions of a group of productions until they no longer
/// change, and return the updated table.
pub fn optimize_group(table: EMap, group: &[String], opts: &SessionOptions) -> GrammarResult<EMap> {
    let fp = fixpoint("group optimization", opts.max_iterations, table, |table| {
        let mut table = table.clone();
        for name in group {
            let def = match table.get(name) {
                Some(def) => optimize_def(&table, def, opts)?,
                None => continue,
            };
            trace!("Optimized {}", def);
            table = table.with(def);
        }
        Ok(table)
    })?;
    debug!(
        "Group {{{}}} settled after {} iterations",
        group.iter().format(", "),
        fp.iterations
    );
    Ok(fp.value)
}

/// Convert a YACC grammar into simplified EBNF definitions.
///
/// The definitions are returned callees first, in the order their groups
/// were processed, with the auxiliary
/// definitions in `aux` appended in their given order. An auxiliary
/// definition may not reuse the name of a YACC production.
pub fn work(sess: &Session, gram: &YGram, aux: &[EDef]) -> GrammarResult<Vec<EDef>> {
    if let Some(def) = aux.iter().find(|def| gram.contains(&def.name)) {
        return Err(GrammarError::Semantic {
            source: gram.source().to_string(),
            message: format!(
                "`{}` is defined in both the grammar and the auxiliary definitions",
                def.name
            ),
        });
    }

    let groups = dependency_groups(gram);
    let mut table = EMap::new();
    for group in &groups {
        debug!("Converting {}", group.iter().format(", "));
        for name in group {
            if let Some(prod) = gram.get(name) {
                table = table.with(convert(prod)?);
            }
        }
        table = optimize_group(table, group, &sess.opts)?;
    }
    info!(
        "Converted {} productions in {} groups",
        table.len(),
        groups.len()
    );

    let mut defs: Vec<EDef> = groups
        .iter()
        .flat_map(|group| group.iter())
        .filter_map(|name| table.get(name).cloned())
        .collect();
    defs.extend(aux.iter().cloned());
    Ok(defs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ebnf::format_grammar;

    fn run(opts: SessionOptions, input: &str) -> String {
        let sess = Session { opts };
        let gram = crate::yacc::parse("test", input).unwrap();
        format_grammar(&work(&sess, &gram, &[]).unwrap())
    }

    #[test]
    fn conversion() {
        let gram = crate::yacc::parse("test", "A: | 'a' | 'b'; B: A A | 'c' A;").unwrap();
        let defs = convert_grammar(&gram).unwrap();
        assert_eq!(format_grammar(&defs), "A ::= ('a'|'b')?;\nB ::= A A | 'c' A;\n");
    }

    #[test]
    fn callees_come_first() {
        let mut opts = SessionOptions::default();
        opts.passes = Passes::empty();
        assert_eq!(
            run(opts, "A: B 'a'; B: C 'b'; C: 'c' 'd';"),
            "C ::= 'c' 'd';\nB ::= C 'b';\nA ::= B 'a';\n"
        );
    }

    #[test]
    fn passes_can_be_disabled() {
        let input = "list: item | list ',' item; item: NUM | STR;";
        let mut opts = SessionOptions::default();
        opts.passes = Passes::empty();
        assert_eq!(
            run(opts.clone(), input),
            "item ::= NUM | STR;\nlist ::= item | list ',' item;\n"
        );
        opts.passes = Passes::UNRECURSE;
        assert_eq!(
            run(opts.clone(), input),
            "item ::= NUM | STR;\nlist ::= item (',' item)*;\n"
        );
        opts.passes = Passes::all();
        assert_eq!(
            run(opts, input),
            "item ::= NUM | STR;\nlist ::= (NUM|STR) (',' (NUM|STR))*;\n"
        );
    }

    #[test]
    fn alt_limit_bounds_inlining() {
        let input = "a: b b; b: 'w' | 'x' | 'y' | 'z';";
        let mut opts = SessionOptions::default();
        assert_eq!(
            run(opts.clone(), input),
            "b ::= 'w' | 'x' | 'y' | 'z';\na ::= ('w'|'x'|'y'|'z') ('w'|'x'|'y'|'z');\n"
        );
        opts.trivial_alt_limit = 4;
        assert_eq!(
            run(opts, input),
            "b ::= 'w' | 'x' | 'y' | 'z';\na ::= b b;\n"
        );
    }

    #[test]
    fn group_iterations_are_bounded() {
        let mut opts = SessionOptions::default();
        opts.max_iterations = 1;
        let table: EMap = vec![EDef::new(
            "list",
            normalize(&Ebnf::Alt(vec![
                Ebnf::nonterm("item"),
                Ebnf::Seq(vec![Ebnf::nonterm("list"), Ebnf::nonterm("item")]),
            ]))
            .unwrap(),
        )]
        .into_iter()
        .collect();
        let group = vec!["list".to_string()];
        assert_eq!(
            optimize_group(table.clone(), &group, &opts),
            Err(GrammarError::NoFixpoint {
                what: "group optimization",
                limit: 1
            })
        );
        opts.max_iterations = 2;
        let table = optimize_group(table, &group, &opts).unwrap();
        assert_eq!(
            table.get("list").map(|d| format!("{}", d)),
            Some("list ::= item+;".to_string())
        );
    }

    #[test]
    fn auxiliary_names_must_be_fresh() {
        let gram = crate::yacc::parse("test", "a: b;").unwrap();
        let aux = vec![EDef::new("a", Ebnf::term("'a'"))];
        assert!(matches!(
            work(&Session::new(), &gram, &aux),
            Err(GrammarError::Semantic { .. })
        ));
    }
}
