//! This module defines the core data structures and types used throughout the interpreter:
//! tape symbols, head directions, transition patterns, and the error type shared by the
//! parser, the linker and the execution engine.

use thiserror::Error;

use crate::Rule;

/// A tape symbol. The alphabet is whatever integers appear in the program text.
pub type Symbol = u64;

/// The symbol written to cells the head reaches when the tape grows to the right.
pub const DEFAULT_SYMBOL: Symbol = 0;
/// The token that marks a state as halting, and names the built-in halt target.
pub const HALT: &str = "HALT";

/// Represents the possible directions the tape head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Move the head towards position 0.
    Left,
    /// Move the head away from position 0, growing the tape if needed.
    Right,
}

impl TryFrom<char> for Direction {
    type Error = TuringMachineError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'l' => Ok(Direction::Left),
            'r' => Ok(Direction::Right),
            other => Err(TuringMachineError::InvalidMove(other)),
        }
    }
}

/// The read side of a transition: a concrete symbol or the wildcard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// Matches any symbol under the head.
    Any,
    /// Matches only this symbol.
    Symbol(Symbol),
}

impl Pattern {
    pub fn matches(&self, symbol: Symbol) -> bool {
        match self {
            Pattern::Any => true,
            Pattern::Symbol(expected) => *expected == symbol,
        }
    }
}

/// Represents the outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A state was executed and the machine may continue.
    Continue,
    /// The machine had already reached the halt target; nothing was executed.
    Halt,
}

/// Represents various errors that can occur while loading or running a program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuringMachineError {
    /// Transitions name successor states that were never declared.
    #[error("{}", describe_undefined(.0))]
    UndefinedState(Vec<String>),
    /// A non-halting state has no transition matching the symbol under the head.
    #[error("Instruction not defined for symbol {symbol} in state \"{state}\"")]
    UndefinedTransition { state: String, symbol: Symbol },
    /// The head attempted to move left of position 0.
    #[error("Out of tape: head cannot move left of position 0")]
    TapeUnderflow,
    /// The head attempted to move right past the last addressable position.
    #[error("Out of tape: head cannot move right past the addressable end")]
    TapeOverflow,
    /// A transition fired with a direction letter other than `l` or `r`.
    #[error("Invalid move \"{0}\"")]
    InvalidMove(char),
    /// Indicates an error during the parsing of a program definition.
    #[error("Program parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a structural problem with an otherwise well-formed program.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to reading program files.
    #[error("File error: {0}")]
    FileError(String),
}

fn describe_undefined(names: &[String]) -> String {
    match names {
        [name] => format!("State \"{name}\" does not exist"),
        names => format!(
            "States {} do not exist",
            names
                .iter()
                .map(|name| format!("\"{name}\""))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
