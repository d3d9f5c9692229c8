// Copyright (c) 2016-2021 Fabian Schuiki
#![allow(dead_code)]

pub use yebnf_ebnf::*;

pub fn init_logging() {
    pretty_env_logger::try_init().ok();
}

pub fn nt(s: &str) -> Ebnf {
    Ebnf::nonterm(s)
}

pub fn t(s: &str) -> Ebnf {
    Ebnf::term(s)
}

pub fn seq(xs: Vec<Ebnf>) -> Ebnf {
    Ebnf::Seq(xs)
}

pub fn alt(xs: Vec<Ebnf>) -> Ebnf {
    Ebnf::Alt(xs)
}

pub fn qnt(q: Quantor, x: Ebnf) -> Ebnf {
    Ebnf::quantified(q, x)
}

/// Check that an expression is in normal form, returning the offending
/// subexpression otherwise.
pub fn check_normal_form(e: &Ebnf) -> Result<(), String> {
    let fail = |what: &str| Err(format!("{} in `{}`", what, e));
    match e {
        Ebnf::Alt(xs) => {
            for x in xs {
                match x {
                    Ebnf::Alt(_) => return fail("nested alternatives"),
                    x if x.is_empty() => return fail("empty alternative"),
                    x => check_normal_form(x)?,
                }
            }
        }
        Ebnf::Seq(xs) => {
            for x in xs {
                match x {
                    Ebnf::Seq(_) => return fail("nested sequence"),
                    x => check_normal_form(x)?,
                }
            }
        }
        Ebnf::Qnt(_, x) => match &**x {
            Ebnf::Qnt(..) => return fail("nested quantifiers"),
            x if x.is_empty() => return fail("quantified empty sequence"),
            x => check_normal_form(x)?,
        },
        Ebnf::NonTerminal(_) | Ebnf::Terminal(_) => (),
    }
    Ok(())
}

/// A small deterministic generator of expression trees.
pub struct TreeGen {
    state: u64,
}

impl TreeGen {
    pub fn new(seed: u64) -> TreeGen {
        TreeGen {
            state: seed.wrapping_mul(6364136223846793005).wrapping_add(1),
        }
    }

    fn below(&mut self, n: u64) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.state >> 33) % n
    }

    fn atom(&mut self) -> Ebnf {
        match self.below(5) {
            0 => nt("a"),
            1 => nt("b"),
            2 => nt("c"),
            3 => t("'x'"),
            _ => t("'y'"),
        }
    }

    fn quantor(&mut self) -> Quantor {
        match self.below(3) {
            0 => Quantor::Optional,
            1 => Quantor::Many,
            _ => Quantor::Some,
        }
    }

    /// Generate a tree of at most `depth` levels.
    pub fn tree(&mut self, depth: usize) -> Ebnf {
        if depth == 0 {
            return self.atom();
        }
        match self.below(6) {
            0 | 1 => self.atom(),
            2 => {
                let n = self.below(4);
                Ebnf::Alt((0..n).map(|_| self.tree(depth - 1)).collect())
            }
            3 | 4 => {
                let n = self.below(4);
                Ebnf::Seq((0..n).map(|_| self.tree(depth - 1)).collect())
            }
            _ => {
                let q = self.quantor();
                qnt(q, self.tree(depth - 1))
            }
        }
    }

    /// Generate trees until one normalizes successfully, and return the
    /// normalized tree.
    pub fn normalized_tree(&mut self, depth: usize) -> Ebnf {
        loop {
            if let Ok(e) = normalize(&self.tree(depth)) {
                return e;
            }
        }
    }
}
