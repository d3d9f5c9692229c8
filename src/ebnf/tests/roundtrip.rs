// Copyright (c) 2016-2021 Fabian Schuiki

mod common;
use crate::common::*;

fn reparse(e: &Ebnf) -> Ebnf {
    let printed = format!("{}", e);
    let parsed = parse_expr("test", &printed).unwrap();
    normalize(&parsed).unwrap()
}

#[test]
fn every_constructor() {
    let exprs = vec![
        nt("a"),
        t("'a'"),
        t("\"a b\""),
        t("[a-z]"),
        seq(vec![]),
        seq(vec![nt("a"), t("'b'")]),
        alt(vec![nt("a"), seq(vec![nt("b"), nt("c")])]),
        qnt(Quantor::Optional, nt("a")),
        qnt(Quantor::Many, alt(vec![nt("a"), nt("b")])),
        qnt(Quantor::Some, seq(vec![t("','"), nt("x")])),
        seq(vec![
            alt(vec![nt("a"), nt("b")]),
            qnt(Quantor::Many, seq(vec![nt("c"), alt(vec![nt("d"), nt("e")])])),
        ]),
    ];
    for e in exprs {
        let e = normalize(&e).unwrap();
        assert_eq!(reparse(&e), e, "round trip of `{}`", e);
    }
}

#[test]
fn generated_trees() {
    let mut gen = TreeGen::new(7);
    for _ in 0..300 {
        let e = gen.normalized_tree(4);
        assert_eq!(reparse(&e), e, "round trip of `{}`", e);
    }
}

#[test]
fn definitions() {
    let input = "a ::= b (c|d)* | 'e';\nb ::= ;\nc ::= [0-9]+ d?;\n";
    let defs = parse_grammar("test", input).unwrap();
    assert_eq!(format_grammar(&defs), input);
}
