// Copyright (c) 2016-2021 Fabian Schuiki

//! Converts a YACC grammar into simplified EBNF.

extern crate clap;
extern crate yebnf;
#[macro_use]
extern crate log;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use yebnf::ebnf::{self, format_grammar, EDef};
use yebnf::errors::*;
use yebnf::*;

fn main() {
    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Converts YACC grammars into simplified EBNF.")
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Silence all log output"),
        )
        .arg(
            Arg::with_name("no_unrecurse")
                .long("no-unrecurse")
                .help("Keep direct self-recursion instead of turning it into repetition"),
        )
        .arg(
            Arg::with_name("no_factor")
                .long("no-factor")
                .help("Do not factor common heads and tails out of alternatives"),
        )
        .arg(
            Arg::with_name("no_inline")
                .long("no-inline")
                .help("Do not inline trivial productions"),
        )
        .arg(
            Arg::with_name("max_iterations")
                .long("max-iterations")
                .value_name("N")
                .help("Give up on a production group after N rounds of optimization")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("trivial_alts")
                .long("trivial-alts")
                .value_name("N")
                .help("Never inline productions with N or more alternatives")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("dump_raw")
                .long("dump-raw")
                .help("Print the converted grammar before any optimization"),
        )
        .arg(
            Arg::with_name("YACC")
                .help("The YACC grammar to convert")
                .required(true),
        )
        .arg(
            Arg::with_name("EBNF")
                .help("Additional EBNF definitions to append to the output"),
        )
        .get_matches();

    // Configure the logger.
    let level = if matches.is_present("quiet") {
        LevelFilter::Off
    } else {
        match matches.occurrences_of("verbosity") {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    let mut logger = pretty_env_logger::formatted_builder();
    logger.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        logger.parse_filters(&filters);
    }
    logger.init();

    // Configure the session.
    let mut session = Session::new();
    if matches.is_present("no_unrecurse") {
        session.opts.passes.remove(Passes::UNRECURSE);
    }
    if matches.is_present("no_factor") {
        session.opts.passes.remove(Passes::FACTOR);
    }
    if matches.is_present("no_inline") {
        session.opts.passes.remove(Passes::INLINE);
    }
    if let Some(n) = count_arg(&matches, "max_iterations") {
        session.opts.max_iterations = n;
    }
    if let Some(n) = count_arg(&matches, "trivial_alts") {
        session.opts.trivial_alt_limit = n;
    }
    session.opts.dump_raw = matches.is_present("dump_raw");
    debug!("Session options: {:?}", session.opts);

    // Invoke the converter.
    match convert(&session, &matches) {
        Ok(output) => print!("{}", output),
        Err(diag) => {
            eprint!("{}", diag);
            std::process::exit(1);
        }
    }
}

/// Parse an optional numeric argument, exiting with a usage error if it is
/// not a number.
fn count_arg(matches: &ArgMatches, name: &str) -> Option<usize> {
    matches.value_of(name).map(|v| {
        v.parse().unwrap_or_else(|_| {
            clap::Error {
                message: format!("invalid value for '{}': `{}` is not a number", name, v),
                kind: clap::ErrorKind::InvalidValue,
                info: None,
            }
            .exit()
        })
    })
}

fn read(path: &str) -> DiagResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DiagBuilder::fatal(format!("unable to read `{}`: {}", path, e)))
}

fn convert(sess: &Session, matches: &ArgMatches) -> DiagResult<String> {
    let yacc_path = match matches.value_of("YACC") {
        Some(path) => path,
        None => return Err(DiagBuilder::fatal("no YACC grammar given")),
    };
    let gram = yacc::parse(yacc_path, &read(yacc_path)?)?;
    info!("Read {} productions from {}", gram.len(), yacc_path);

    let aux: Vec<EDef> = match matches.value_of("EBNF") {
        Some(path) => ebnf::parse_grammar(path, &read(path)?)?,
        None => vec![],
    };

    let defs = if sess.opts.dump_raw {
        pipeline::convert_grammar(&gram)?
            .into_iter()
            .chain(aux)
            .collect()
    } else {
        pipeline::work(sess, &gram, &aux)?
    };
    Ok(format_grammar(&defs))
}
