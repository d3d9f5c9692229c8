// Copyright (c) 2016-2021 Fabian Schuiki

//! Factoring of common heads and tails out of alternatives.

use crate::ast::Ebnf;
use crate::normalize::{normalize, quantify};
use std::collections::VecDeque;
use yebnf_common::{errors::*, util::fixpoint, DEFAULT_MAX_ITERATIONS};

/// Split a normalized expression into its first item and the rest.
///
/// A sequence yields its first element and its tail; anything else is its own
/// head with an empty rest. Returns `None` for the empty sequence.
pub fn prefix(e: &Ebnf) -> Option<(Ebnf, Vec<Ebnf>)> {
    match e {
        Ebnf::Seq(xs) => {
            let (head, rest) = xs.split_first()?;
            Some((head.clone(), rest.to_vec()))
        }
        e => Some((e.clone(), vec![])),
    }
}

/// Split a normalized expression into everything but its last item and the
/// last item. The mirror image of `prefix`.
pub fn suffix(e: &Ebnf) -> Option<(Vec<Ebnf>, Ebnf)> {
    match e {
        Ebnf::Seq(xs) => {
            let (last, init) = xs.split_last()?;
            Some((init.to_vec(), last.clone()))
        }
        e => Some((vec![], e.clone())),
    }
}

/// The end of the alternatives that factoring looks at.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Side {
    Left,
    Right,
}

/// Factor common leading items out of alternatives.
///
/// `a b | a c | d` becomes `a (b|c) | d`. The rewrite is applied throughout
/// the expression and repeated until nothing changes.
pub fn factor_left(e: &Ebnf) -> GrammarResult<Ebnf> {
    factor_side(e, Side::Left)
}

/// Factor common trailing items out of alternatives.
///
/// `a z | b z | c` becomes `(a|b) z | c`.
pub fn factor_right(e: &Ebnf) -> GrammarResult<Ebnf> {
    factor_side(e, Side::Right)
}

/// Factor on both ends, first left then right.
pub fn factor(e: &Ebnf) -> GrammarResult<Ebnf> {
    factor_right(&factor_left(e)?)
}

fn factor_side(e: &Ebnf, side: Side) -> GrammarResult<Ebnf> {
    let what = match side {
        Side::Left => "left factoring",
        Side::Right => "right factoring",
    };
    let fp = fixpoint(what, DEFAULT_MAX_ITERATIONS, normalize(e)?, |e| {
        factor_step(e, side)
    })?;
    Ok(fp.value)
}

fn factor_step(e: &Ebnf, side: Side) -> GrammarResult<Ebnf> {
    match e {
        Ebnf::Alt(xs) => {
            let xs = xs
                .iter()
                .map(|x| factor_step(x, side))
                .collect::<GrammarResult<Vec<_>>>()?;
            normalize(&Ebnf::Alt(group(xs, side)))
        }
        Ebnf::Seq(xs) => {
            let xs = xs
                .iter()
                .map(|x| factor_step(x, side))
                .collect::<GrammarResult<Vec<_>>>()?;
            normalize(&Ebnf::Seq(xs))
        }
        Ebnf::Qnt(q, x) => quantify(*q, &factor_step(x, side)?),
        Ebnf::NonTerminal(_) | Ebnf::Terminal(_) => Ok(e.clone()),
    }
}

/// Group alternatives sharing the same head (or tail), keeping the order in
/// which each head first appears.
fn group(alts: Vec<Ebnf>, side: Side) -> Vec<Ebnf> {
    let mut out = vec![];
    let mut todo = VecDeque::new();
    for alt in alts {
        let split = match side {
            Side::Left => prefix(&alt),
            Side::Right => suffix(&alt).map(|(init, last)| (last, init)),
        };
        match split {
            Some(split) => todo.push_back(split),
            None => out.push(alt),
        }
    }

    while let Some((key, rest)) = todo.pop_front() {
        let (partners, others): (VecDeque<_>, VecDeque<_>) =
            todo.into_iter().partition(|(k, _)| *k == key);
        todo = others;

        if partners.is_empty() {
            out.push(join(key, rest, side));
            continue;
        }
        trace!(
            "Factoring {} out of {} alternatives",
            key,
            partners.len() + 1
        );
        let rests = std::iter::once(rest)
            .chain(partners.into_iter().map(|(_, r)| r))
            .map(Ebnf::Seq)
            .collect();
        let shared = Ebnf::Alt(rests);
        out.push(match side {
            Side::Left => Ebnf::Seq(vec![key, shared]),
            Side::Right => Ebnf::Seq(vec![shared, key]),
        });
    }
    out
}

fn join(key: Ebnf, mut rest: Vec<Ebnf>, side: Side) -> Ebnf {
    match side {
        Side::Left => {
            rest.insert(0, key);
            Ebnf::Seq(rest)
        }
        Side::Right => {
            rest.push(key);
            Ebnf::Seq(rest)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Quantor;

    fn nt(s: &str) -> Ebnf {
        Ebnf::nonterm(s)
    }

    fn seq(xs: &[&str]) -> Ebnf {
        Ebnf::Seq(xs.iter().map(|&x| nt(x)).collect())
    }

    #[test]
    fn prefix_and_suffix() {
        assert_eq!(
            prefix(&seq(&["a", "b", "c"])),
            Some((nt("a"), vec![nt("b"), nt("c")]))
        );
        assert_eq!(prefix(&nt("a")), Some((nt("a"), vec![])));
        assert_eq!(prefix(&Ebnf::empty()), None);
        assert_eq!(
            suffix(&seq(&["a", "b", "c"])),
            Some((vec![nt("a"), nt("b")], nt("c")))
        );
        let q = Ebnf::quantified(Quantor::Many, nt("a"));
        assert_eq!(suffix(&q), Some((vec![], q.clone())));
        assert_eq!(suffix(&Ebnf::empty()), None);
    }

    #[test]
    fn left_factoring() {
        let e = Ebnf::Alt(vec![seq(&["a", "b"]), seq(&["a", "c"]), nt("d")]);
        let f = factor_left(&e).unwrap();
        assert_eq!(format!("{}", f), "a (b|c) | d");
        assert_eq!(factor_left(&f).unwrap(), f);
    }

    #[test]
    fn right_factoring() {
        let e = Ebnf::Alt(vec![seq(&["a", "z"]), seq(&["b", "z"]), nt("c")]);
        let f = factor_right(&e).unwrap();
        assert_eq!(format!("{}", f), "(a|b) z | c");
        assert_eq!(factor_right(&f).unwrap(), f);
    }

    #[test]
    fn factoring_out_everything_leaves_optional_rest() {
        let e = Ebnf::Alt(vec![nt("a"), seq(&["a", "b"])]);
        assert_eq!(format!("{}", factor_left(&e).unwrap()), "a b?");
        let e = Ebnf::Alt(vec![seq(&["b", "a"]), nt("a")]);
        assert_eq!(format!("{}", factor_right(&e).unwrap()), "b? a");
    }

    #[test]
    fn nested_groups_are_factored_again() {
        // a b c | a b d | a e  ==>  a (b (c|d)|e)
        let e = Ebnf::Alt(vec![
            seq(&["a", "b", "c"]),
            seq(&["a", "b", "d"]),
            seq(&["a", "e"]),
        ]);
        let f = factor_left(&e).unwrap();
        assert_eq!(format!("{}", f), "a (b (c|d)|e)");
    }

    #[test]
    fn first_occurrence_order_is_kept() {
        let e = Ebnf::Alt(vec![
            seq(&["x", "1"]),
            seq(&["y", "2"]),
            seq(&["x", "3"]),
            nt("z"),
            seq(&["y", "4"]),
        ]);
        let f = factor_left(&e).unwrap();
        assert_eq!(format!("{}", f), "x (1|3) | y (2|4) | z");
    }

    #[test]
    fn factoring_reaches_inside_repetitions() {
        let e = Ebnf::Seq(vec![
            nt("p"),
            Ebnf::quantified(
                Quantor::Many,
                Ebnf::Alt(vec![seq(&["a", "b"]), seq(&["a", "c"])]),
            ),
        ]);
        let f = factor_left(&e).unwrap();
        assert_eq!(format!("{}", f), "p (a (b|c))*");
    }

    #[test]
    fn factor_both_sides() {
        let e = Ebnf::Alt(vec![seq(&["a", "b", "z"]), seq(&["a", "c", "z"])]);
        let f = factor(&e).unwrap();
        assert_eq!(format!("{}", f), "a (b|c) z");
    }
}
