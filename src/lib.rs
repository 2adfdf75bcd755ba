//! This crate provides the core logic for a single-tape Turing machine interpreter.
//! It includes modules for parsing program sources, linking states into an executable
//! program, and running that program over a right-unbounded tape.

pub mod loader;
pub mod machine;
pub mod parser;
pub mod program;
pub mod tape;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct from the machine module.
pub use machine::TuringMachine;
/// Re-exports the parsing entry points from the parser module.
pub use parser::{normalize, parse, parse_unlinked};
/// Re-exports the executable program model from the program module.
pub use program::{Program, State, StateId, Target, Transition};
/// Re-exports the `Tape` struct from the tape module.
pub use tape::Tape;
/// Re-exports the shared types from the types module.
pub use types::{Direction, Pattern, Step, Symbol, TuringMachineError};
