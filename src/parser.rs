//! This module provides the parser for Turing machine programs, utilizing the `pest` crate.
//! Sources are normalized first (comments, tabs, repeated spaces and blank lines removed),
//! then parsed with the grammar in `grammar.pest`, and finally linked into a [`Program`].

use crate::{
    program::{Program, State, Transition},
    types::{Pattern, Symbol, TuringMachineError},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the Turing machine grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// Parses the given source into a linked `Program`.
///
/// This is the main entry point for loading a program. The input is normalized with
/// [`normalize`], parsed, and every successor name is resolved before returning, so a
/// program with a dangling reference never reaches execution.
///
/// # Returns
///
/// * `Ok(Program)` if the input is parsed and linked successfully.
/// * `Err(TuringMachineError::ParseError)` for malformed transitions or state headers.
/// * `Err(TuringMachineError::ValidationError)` if the program declares no states.
/// * `Err(TuringMachineError::UndefinedState)` if a transition names an unknown state.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let mut program = parse_unlinked(input)?;
    program.link()?;

    Ok(program)
}

/// Parses the given source into a `Program` without resolving successor names.
pub fn parse_unlinked(input: &str) -> Result<Program, TuringMachineError> {
    let source = normalize(input);
    let root = TuringMachineParser::parse(Rule::program, &source)
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty program".to_string()))?;

    parse_program(root)
}

/// Strips `#` comments, turns tabs into spaces, collapses runs of spaces, trims every
/// line and drops the ones left empty.
pub fn normalize(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            let code = line.split_once('#').map_or(line, |(code, _)| code);
            code.split([' ', '\t'])
                .filter(|word| !word.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collects the initial tape and the states from a `Pair<Rule::program>`.
fn parse_program(pair: Pair<Rule>) -> Result<Program, TuringMachineError> {
    let mut tape = Vec::new();
    let mut states = Vec::new();
    let mut seen = HashSet::new();

    for p in pair.into_inner() {
        match p.as_rule() {
            Rule::tape => tape = parse_tape(p),
            Rule::state => {
                let span = p.as_span();
                let state = parse_state(p)?;

                if !seen.insert(state.name().to_string()) {
                    return Err(parse_error(
                        &format!("Duplicate state: {}", state.name()),
                        span,
                    ));
                }

                states.push(state);
            }
            Rule::stray => {
                return Err(parse_error(
                    &format!("Expected a state header: {}", p.as_str().trim_end()),
                    p.as_span(),
                ))
            }
            _ => {} // Skip EOI
        }
    }

    Program::new(tape, states)
}

/// Parses the tape line. Cells that are not non-negative integers are discarded.
fn parse_tape(pair: Pair<Rule>) -> Vec<Symbol> {
    pair.into_inner()
        .filter_map(|cell| cell.as_str().parse::<Symbol>().ok())
        .collect()
}

/// Parses a state block: its `NAME:` header followed by `HALT` and transition lines.
fn parse_state(pair: Pair<Rule>) -> Result<State, TuringMachineError> {
    let mut pairs = pair.into_inner();
    let header = next_pair(&mut pairs, Rule::header)?;
    let name = parse_state_name(&header)?;
    let mut state = State::new(name);

    for p in pairs {
        match p.as_rule() {
            Rule::halt => state.halt(),
            Rule::transition => state.push(parse_transition(p)?),
            Rule::malformed => {
                return Err(parse_error(
                    &format!("Malformed transition: {}", p.as_str()),
                    p.as_span(),
                ))
            }
            _ => {}
        }
    }

    Ok(state)
}

/// Extracts the state name from a header: the text before the first `:`.
fn parse_state_name(header: &Pair<Rule>) -> Result<String, TuringMachineError> {
    let text = header.as_str();
    let name = text.split_once(':').map_or(text, |(name, _)| name).trim();

    if name.is_empty() {
        return Err(parse_error("Missing state name", header.as_span()));
    }

    Ok(name.to_string())
}

/// Parses a single transition from a `Pair<Rule::transition>`.
fn parse_transition(pair: Pair<Rule>) -> Result<Transition, TuringMachineError> {
    let mut pairs = pair.into_inner();

    let read = match pairs.next() {
        Some(p) if p.as_rule() == Rule::wildcard => Pattern::Any,
        Some(p) => Pattern::Symbol(parse_number(&p)?),
        None => return Err(missing(Rule::symbol)),
    };
    let write = parse_number(&next_pair(&mut pairs, Rule::symbol)?)?;

    let mut shift = next_pair(&mut pairs, Rule::shift)?.into_inner();
    let distance = parse_number(&next_pair(&mut shift, Rule::distance)?)?;
    let heading = next_pair(&mut shift, Rule::heading)?
        .as_str()
        .chars()
        .next()
        .ok_or_else(|| missing(Rule::heading))?;

    let next_state = next_pair(&mut pairs, Rule::name)?.as_str();

    Ok(Transition::new(read, write, distance, heading, next_state))
}

/// Parses a digit run, reporting overflow against its span.
fn parse_number<T: std::str::FromStr>(pair: &Pair<Rule>) -> Result<T, TuringMachineError> {
    pair.as_str().parse::<T>().map_err(|_| {
        parse_error(
            &format!("Number out of range: {}", pair.as_str()),
            pair.as_span(),
        )
    })
}

/// Takes the next pair, which the grammar guarantees to be a `rule`.
fn next_pair<'i>(pairs: &mut Pairs<'i, Rule>, rule: Rule) -> Result<Pair<'i, Rule>, TuringMachineError> {
    pairs
        .next()
        .filter(|p| p.as_rule() == rule)
        .ok_or_else(|| missing(rule))
}

fn missing(rule: Rule) -> TuringMachineError {
    TuringMachineError::ValidationError(format!("Missing {rule:?} in parse tree"))
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}
