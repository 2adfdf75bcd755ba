//! This module defines the `TuringMachine` struct, which drives a linked [`Program`] over a
//! single [`Tape`]. It handles the current state, step execution, and trace reporting.

use crate::program::{Program, State, StateId, Target};
use crate::tape::Tape;
use crate::types::{Step, TuringMachineError};

/// Represents a running single-tape Turing Machine.
///
/// The machine borrows its program, owns the tape, and tracks the state it will execute
/// next. `None` means the run has reached the halt target.
pub struct TuringMachine<'p> {
    program: &'p Program,
    tape: Tape,
    current: Option<StateId>,
    step_count: usize,
}

impl<'p> TuringMachine<'p> {
    /// Creates a machine positioned at the program's start state, with the head on the
    /// first cell of the initial tape.
    pub fn new(program: &'p Program) -> Self {
        Self {
            program,
            tape: Tape::new(program.initial_tape().to_vec()),
            current: Some(program.start()),
            step_count: 0,
        }
    }

    /// Executes the current state once.
    ///
    /// # Returns
    ///
    /// * `Ok(Step::Continue)` if a state was executed.
    /// * `Ok(Step::Halt)` if the machine had already reached the halt target.
    /// * `Err(_)` if the step failed; the machine should not be stepped again.
    pub fn step(&mut self) -> Result<Step, TuringMachineError> {
        let Some(id) = self.current else {
            return Ok(Step::Halt);
        };

        let symbol = self.tape.read();
        let target = self.program.state(id).execute(symbol, &mut self.tape)?;

        self.current = match target {
            Target::State(next) => Some(next),
            Target::Halt => None,
        };
        self.step_count += 1;

        Ok(Step::Continue)
    }

    /// Runs until the halt target is reached. There is no step limit.
    pub fn run(&mut self) -> Result<(), TuringMachineError> {
        self.run_with(|_, _| {})
    }

    /// Runs until the halt target is reached, calling `on_step` with the executed state
    /// and the tape after every step.
    pub fn run_with<F>(&mut self, mut on_step: F) -> Result<(), TuringMachineError>
    where
        F: FnMut(&State, &Tape),
    {
        while let Some(id) = self.current {
            self.step()?;
            on_step(self.program.state(id), &self.tape);
        }

        Ok(())
    }

    /// Returns the state that will execute next, or `None` once halted.
    pub fn state(&self) -> Option<&'p State> {
        self.current.map(|id| self.program.state(id))
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_halted(&self) -> bool {
        self.current.is_none()
    }

    /// Resets the machine to the start state and the initial tape.
    pub fn reset(&mut self) {
        self.tape = Tape::new(self.program.initial_tape().to_vec());
        self.current = Some(self.program.start());
        self.step_count = 0;
    }
}
