// Copyright (c) 2016-2021 Fabian Schuiki

//! Normalization of EBNF expressions.
//!
//! Every other pass assumes its input is in normal form:
//!
//! 1. no alternative is the empty sequence; an empty choice turns the rest of
//!    the alternatives optional instead,
//! 2. alternatives are never directly nested,
//! 3. the empty sequence is never quantified,
//! 4. sequences are never directly nested,
//! 5. quantifiers are never directly nested.
//!
//! On top of that, sequences have adjacent repetitions merged (`a a*` becomes
//! `a+`) and repeated blocks re-anchored against the items that follow them
//! (`(a b)* a` becomes `a (b a)*`).

use crate::ast::{Ebnf, Quantor};
use yebnf_common::{errors::*, util::fixpoint, DEFAULT_MAX_ITERATIONS};

/// Bring an expression into normal form.
///
/// Fails if a quantifier is applied to the empty sequence, or to something
/// that is itself quantified, except for `(x+)?` which becomes `x*`.
pub fn normalize(e: &Ebnf) -> GrammarResult<Ebnf> {
    match e {
        Ebnf::Alt(xs) => normalize_alt(xs),
        Ebnf::Seq(xs) => normalize_seq(xs),
        Ebnf::Qnt(q, x) => match normalize(x)? {
            Ebnf::Qnt(Quantor::Some, inner) if *q == Quantor::Optional => {
                Ok(Ebnf::Qnt(Quantor::Many, inner))
            }
            n @ Ebnf::Qnt(..) => Err(illegal(e, &n)),
            n if n.is_empty() => Err(illegal(e, &n)),
            n => Ok(Ebnf::Qnt(*q, Box::new(n))),
        },
        Ebnf::NonTerminal(_) | Ebnf::Terminal(_) => Ok(e.clone()),
    }
}

fn illegal(expr: &Ebnf, normalized: &Ebnf) -> GrammarError {
    GrammarError::IllegalQuantification {
        expr: format!("{}", expr),
        normalized: format!("{}", normalized),
    }
}

/// Quantify an expression, collapsing nested quantifiers.
///
/// This is the constructor the grammar algebra uses when it builds new
/// repetitions. Unlike `normalize`, it never fails on stacked quantifiers but
/// folds them into the single quantifier describing the same language, and a
/// repetition of the empty sequence is the empty sequence.
pub fn quantify(q: Quantor, e: &Ebnf) -> GrammarResult<Ebnf> {
    Ok(match normalize(e)? {
        n if n.is_empty() => n,
        Ebnf::Qnt(p, inner) => Ebnf::Qnt(combine(q, p), inner),
        n => Ebnf::Qnt(q, Box::new(n)),
    })
}

/// The quantor equivalent to applying `outer` to something quantified with
/// `inner`.
fn combine(outer: Quantor, inner: Quantor) -> Quantor {
    if outer == inner {
        outer
    } else {
        Quantor::Many
    }
}

/// Make an already normalized expression optional.
fn optional(e: Ebnf) -> Ebnf {
    match e {
        Ebnf::Qnt(Quantor::Optional, _) | Ebnf::Qnt(Quantor::Many, _) => e,
        Ebnf::Qnt(Quantor::Some, inner) => Ebnf::Qnt(Quantor::Many, inner),
        e if e.is_empty() => e,
        e => Ebnf::Qnt(Quantor::Optional, Box::new(e)),
    }
}

fn normalize_alt(xs: &[Ebnf]) -> GrammarResult<Ebnf> {
    let mut items: Vec<Ebnf> = vec![];
    let mut nullable = false;
    for x in xs {
        let flat = match normalize(x)? {
            Ebnf::Alt(ys) => ys,
            n if n.is_empty() => {
                nullable = true;
                continue;
            }
            n => vec![n],
        };
        for y in flat {
            if !items.contains(&y) {
                items.push(y);
            }
        }
    }
    let body = match items.len() {
        0 => Ebnf::empty(),
        1 => items.remove(0),
        _ => Ebnf::Alt(items),
    };
    Ok(if nullable { optional(body) } else { body })
}

fn normalize_seq(xs: &[Ebnf]) -> GrammarResult<Ebnf> {
    let mut items = vec![];
    for x in xs {
        match normalize(x)? {
            Ebnf::Seq(ys) => items.extend(ys),
            n => items.push(n),
        }
    }
    let mut items = merge_repetitions(items)?;
    Ok(match items.len() {
        1 => items.remove(0),
        _ => Ebnf::Seq(items),
    })
}

/// Merge repetitions in a list of normalized sequence items until no more
/// merges apply.
fn merge_repetitions(items: Vec<Ebnf>) -> GrammarResult<Vec<Ebnf>> {
    let fp = fixpoint("sequence normalization", DEFAULT_MAX_ITERATIONS, items, |items| {
        Ok(merge_once(items))
    })?;
    Ok(fp.value)
}

/// Perform one left-to-right pass of repetition merging.
fn merge_once(items: &[Ebnf]) -> Vec<Ebnf> {
    let mut out: Vec<Ebnf> = Vec::with_capacity(items.len());
    let mut i = 0;
    while i < items.len() {
        let item = &items[i];

        if let Ebnf::Qnt(q, inner) = item {
            let body = inner.seq_items();

            // `a b (a b)*` is `(a b)+`.
            if *q == Quantor::Many && out.ends_with(body) {
                out.truncate(out.len() - body.len());
                out.push(Ebnf::Qnt(Quantor::Some, inner.clone()));
                i += 1;
                continue;
            }

            // Adjacent repetitions of the same thing, such as `a* a+`.
            if let Some(Ebnf::Qnt(p, prev)) = out.last() {
                if prev == inner {
                    if let Some(r) = merge_quantors(*p, *q) {
                        let last = out.len() - 1;
                        out[last] = Ebnf::Qnt(r, inner.clone());
                        i += 1;
                        continue;
                    }
                }
            }

            if *q == Quantor::Many {
                let following = &items[i + 1..];

                // `(a b)* a b` is `(a b)+`.
                if following.starts_with(body) {
                    out.push(Ebnf::Qnt(Quantor::Some, inner.clone()));
                    i += 1 + body.len();
                    continue;
                }

                // `(a b)* a` is `a (b a)*`.
                if let Some((j, rotated)) = reanchor(body, following) {
                    out.extend(body[..j].iter().cloned());
                    out.push(Ebnf::Qnt(Quantor::Many, Box::new(rotated)));
                    i += 1 + j;
                    continue;
                }
            }
        }

        out.push(item.clone());
        i += 1;
    }
    out
}

/// The quantor matching two adjacent repetitions of the same expression, if
/// they can be expressed as one.
fn merge_quantors(first: Quantor, second: Quantor) -> Option<Quantor> {
    match (first, second) {
        (Quantor::Many, Quantor::Many)
        | (Quantor::Optional, Quantor::Many)
        | (Quantor::Many, Quantor::Optional) => Some(Quantor::Many),
        (Quantor::Some, Quantor::Many) | (Quantor::Many, Quantor::Some) => Some(Quantor::Some),
        _ => None,
    }
}

/// Find the longest proper prefix of a repeated `body` that the `following`
/// items start with, and return its length together with the body rotated
/// past that prefix.
fn reanchor(body: &[Ebnf], following: &[Ebnf]) -> Option<(usize, Ebnf)> {
    let j = (1..body.len())
        .rev()
        .find(|&j| following.starts_with(&body[..j]))?;
    let rotated: Vec<Ebnf> = body[j..].iter().chain(&body[..j]).cloned().collect();
    let rotated = merge_repetitions(rotated).ok()?;
    if rotated.len() < 2 {
        return None;
    }
    trace!(
        "Re-anchoring ({})* over {}",
        Ebnf::Seq(body.to_vec()),
        Ebnf::Seq(body[..j].to_vec())
    );
    Some((j, Ebnf::Seq(rotated)))
}
