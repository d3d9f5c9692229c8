// Copyright (c) 2016-2021 Fabian Schuiki

//! The YACC grammar model.

use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;
use yebnf_common::errors::*;

/// A symbol in a grammar rule.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Element {
    /// A quoted literal, including its quotes.
    Terminal(String),
    /// A reference to a production or token by name.
    NonTerminal(String),
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Element::Terminal(s) | Element::NonTerminal(s) => write!(f, "{}", s),
        }
    }
}

/// One alternative of a production. May be empty.
#[derive(Clone, PartialEq, Eq, Default, Debug)]
pub struct YRule {
    pub elements: Vec<Element>,
}

impl YRule {
    pub fn new(elements: Vec<Element>) -> YRule {
        YRule { elements }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl fmt::Display for YRule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.elements.iter().format(" "))
    }
}

/// A named production with its alternatives.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct YProd {
    pub name: String,
    pub alternatives: Vec<YRule>,
}

impl YProd {
    pub fn new<S: Into<String>>(name: S, alternatives: Vec<YRule>) -> YProd {
        YProd {
            name: name.into(),
            alternatives,
        }
    }

    /// Iterate over the names referenced by this production, in order of
    /// first appearance.
    pub fn references(&self) -> impl Iterator<Item = &str> + '_ {
        self.alternatives
            .iter()
            .flat_map(|r| r.elements.iter())
            .filter_map(|e| match e {
                Element::NonTerminal(name) => Some(name.as_str()),
                Element::Terminal(_) => None,
            })
            .unique()
    }
}

impl fmt::Display for YProd {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {};",
            self.name,
            self.alternatives.iter().format(" | ")
        )
    }
}

/// A YACC grammar: productions in source order, each name defined once.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct YGram {
    source: String,
    prods: Vec<YProd>,
    index: HashMap<String, usize>,
}

impl YGram {
    /// Assemble a grammar from a list of productions, checking that no name
    /// is defined twice and that no production has more than one empty
    /// alternative. `source` names the input in error messages.
    pub fn new(source: &str, prods: Vec<YProd>) -> GrammarResult<YGram> {
        let semantic = |message: String| GrammarError::Semantic {
            source: source.to_string(),
            message,
        };
        let mut index = HashMap::new();
        for (i, prod) in prods.iter().enumerate() {
            if index.insert(prod.name.clone(), i).is_some() {
                return Err(semantic(format!(
                    "`{}` is defined more than once",
                    prod.name
                )));
            }
            if prod.alternatives.iter().filter(|r| r.is_empty()).count() > 1 {
                return Err(semantic(format!(
                    "`{}` has more than one empty alternative",
                    prod.name
                )));
            }
        }
        Ok(YGram {
            source: source.to_string(),
            prods,
            index,
        })
    }

    /// The name of the input the grammar was read from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn get(&self, name: &str) -> Option<&YProd> {
        self.index.get(name).map(|&i| &self.prods[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate over the productions in source order.
    pub fn prods(&self) -> impl Iterator<Item = &YProd> + '_ {
        self.prods.iter()
    }

    pub fn len(&self) -> usize {
        self.prods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prods.is_empty()
    }
}
