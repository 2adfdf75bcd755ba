//! This module provides the `ProgramLoader` struct, responsible for loading Turing machine
//! programs from files and strings.

use crate::parser::parse;
use crate::program::Program;
use crate::types::TuringMachineError;
use std::fs;
use std::path::Path;

/// `ProgramLoader` is a utility struct for loading linked Turing machine programs.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a single program from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the program file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Program)` if the file is successfully read, parsed and linked.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * Any error from [`parse`] if the content is not a valid program.
    pub fn load_program(path: &Path) -> Result<Program, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single program from the provided string content.
    pub fn load_program_from_string(content: &str) -> Result<Program, TuringMachineError> {
        parse(content)
    }
}
