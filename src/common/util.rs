// Copyright (c) 2016-2021 Fabian Schuiki

//! A collection of utility functions.

use crate::errors::{GrammarError, GrammarResult};

/// The outcome of a fixpoint iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixpoint<T> {
    /// The value that `step` maps onto itself.
    pub value: T,
    /// How many times `step` was applied, including the final application
    /// that confirmed the fixpoint.
    pub iterations: usize,
}

/// Apply `step` until the value stops changing.
///
/// At most `limit` applications are made; if the value is still changing
/// after that, `GrammarError::NoFixpoint` naming `what` is returned.
pub fn fixpoint<T, F>(
    what: &'static str,
    limit: usize,
    init: T,
    mut step: F,
) -> GrammarResult<Fixpoint<T>>
where
    T: PartialEq,
    F: FnMut(&T) -> GrammarResult<T>,
{
    let mut value = init;
    for i in 1..=limit {
        let next = step(&value)?;
        if next == value {
            trace!("{} settled after {} iterations", what, i);
            return Ok(Fixpoint {
                value,
                iterations: i,
            });
        }
        value = next;
    }
    Err(GrammarError::NoFixpoint { what, limit })
}
