// Copyright (c) 2016-2021 Fabian Schuiki

//! This crate contains the fundamental utilities used by the rest of the
//! yebnf grammar converter.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

pub mod errors;
pub mod graph;
pub mod lexer;
pub mod util;

pub use self::errors::{GrammarError, GrammarResult};

/// The default number of times a fixpoint iteration may run before it is
/// considered divergent.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// The default bound on the number of atomic alternatives a production may
/// have and still be inlined.
pub const DEFAULT_TRIVIAL_ALT_LIMIT: usize = 5;

pub struct Session {
    pub opts: SessionOptions,
}

impl Session {
    pub fn new() -> Session {
        Session {
            opts: Default::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new()
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// The optimization passes applied to each production group.
    pub passes: Passes,
    /// Productions with this many atomic alternatives or more are never
    /// inlined.
    pub trivial_alt_limit: usize,
    /// Upper bound on every fixpoint iteration.
    pub max_iterations: usize,
    /// Emit the converted grammar before any optimization is applied.
    pub dump_raw: bool,
}

impl Default for SessionOptions {
    fn default() -> SessionOptions {
        SessionOptions {
            passes: Passes::all(),
            trivial_alt_limit: DEFAULT_TRIVIAL_ALT_LIMIT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            dump_raw: false,
        }
    }
}

bitflags! {
    /// A set of grammar optimization passes.
    pub struct Passes: u8 {
        /// Replace direct left and right self-recursion with repetition.
        const UNRECURSE = 1 << 0;
        /// Factor common heads and tails out of alternatives.
        const FACTOR = 1 << 1;
        /// Substitute trivial productions at their use sites.
        const INLINE = 1 << 2;
    }
}
