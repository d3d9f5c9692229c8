// Copyright (c) 2016-2021 Fabian Schuiki

mod common;
use crate::common::*;

#[test]
fn separated_list() {
    assert_eq!(
        convert(
            "%token NAME NUM\n%%\n\
             args: /* empty */ | arglist ;\n\
             arglist: arg | arglist ',' arg { $$ = append($1, $3); } ;\n\
             arg: NAME | NUM ;\n\
             %%\n"
        ),
        "arg ::= NAME | NUM;\n\
         arglist ::= (NAME|NUM) (',' (NAME|NUM))*;\n\
         args ::= arglist?;\n"
    );
}

#[test]
fn mutually_recursive_group() {
    assert_eq!(
        convert(
            "%%\n\
             expr: term | expr '+' term ;\n\
             term: factor | term '*' factor ;\n\
             factor: NUM | '(' expr ')' ;\n"
        ),
        "expr ::= term ('+' term)*;\n\
         term ::= factor ('*' factor)*;\n\
         factor ::= NUM | '(' expr ')';\n"
    );
}

#[test]
fn right_recursive_list_with_inlining() {
    assert_eq!(
        convert(
            "%%\n\
             stmts: | stmt stmts ;\n\
             stmt: ID '=' ID ';' ;\n"
        ),
        "stmt ::= ID '=' ID ';';\n\
         stmts ::= (ID '=' ID ';')*;\n"
    );
}

#[test]
fn common_prefixes_are_factored() {
    assert_eq!(
        convert("%%\nX: a b | a c | d ;\n"),
        "X ::= a (b|c) | d;\n"
    );
}

#[test]
fn auxiliary_definitions_come_last() {
    let out = convert_with(
        &Session::new(),
        "%%\nsum: NUM | sum '+' NUM;\n",
        "NUM ::= [0-9]+\nWS = [ \\t]*\n",
    )
    .unwrap();
    assert_eq!(
        out,
        "sum ::= NUM ('+' NUM)*;\n\
         NUM ::= [0-9]+;\n\
         WS ::= [ \\t]*;\n"
    );
}

#[test]
fn dump_raw_matches_conversion() {
    let gram = yacc::parse("test.y", "%%\nA: | 'a' | 'b';\nB: A A B | ;\n").unwrap();
    let raw = pipeline::convert_grammar(&gram).unwrap();
    assert_eq!(
        format_grammar(&raw),
        "A ::= ('a'|'b')?;\nB ::= (A A B)?;\n"
    );
}

#[test]
fn errors_are_reported() {
    let sess = Session::new();
    match convert_with(&sess, "%%\na: b\n  | { unterminated ;\n", "") {
        Err(GrammarError::SurfaceParse { source, line, .. }) => {
            assert_eq!(source, "test.y");
            assert_eq!(line, 3);
        }
        x => panic!("unexpected {:?}", x),
    }
    assert!(matches!(
        convert_with(&sess, "%%\na: b; a: c;\n", ""),
        Err(GrammarError::Semantic { .. })
    ));
    assert!(matches!(
        convert_with(&sess, "%%\na: b;\n", "x ::= (y?)+;"),
        Err(GrammarError::IllegalQuantification { .. })
    ));
}

#[test]
fn diagnostics_carry_locations() {
    let err = convert_with(&Session::new(), "%%\na: 'b'\n  : c;\n", "").unwrap_err();
    let diag = DiagBuilder::from(err);
    assert_eq!(diag.get_severity(), Severity::Error);
    match diag.get_segments() {
        [DiagSegment::Location {
            source,
            line,
            column,
            text,
        }] => {
            assert_eq!(source, "test.y");
            assert_eq!((*line, *column), (3, 3));
            assert_eq!(text, ": c;");
        }
        x => panic!("unexpected segments {:?}", x),
    }
}
