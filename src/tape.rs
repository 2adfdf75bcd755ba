//! The machine's memory: a right-unbounded sequence of symbols with a single head.

use std::fmt;

use crate::types::{Direction, Symbol, TuringMachineError, DEFAULT_SYMBOL};

/// A one-dimensional tape that only grows to the right.
///
/// The head always points at a valid cell. Moving right past the last cell appends
/// [`DEFAULT_SYMBOL`]; moving left of position 0 fails with
/// [`TuringMachineError::TapeUnderflow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<Symbol>,
    head: usize,
}

impl Tape {
    /// Creates a tape holding `cells` with the head on the first one.
    /// An empty sequence becomes a single default cell.
    pub fn new(cells: Vec<Symbol>) -> Self {
        let cells = if cells.is_empty() {
            vec![DEFAULT_SYMBOL]
        } else {
            cells
        };

        Self { cells, head: 0 }
    }

    pub fn read(&self) -> Symbol {
        self.cells[self.head]
    }

    pub fn write(&mut self, symbol: Symbol) {
        self.cells[self.head] = symbol;
    }

    /// Moves the head `distance` cells in `direction`.
    ///
    /// A move that would pass position 0, or run past the addressable end of the tape,
    /// fails without moving the head.
    pub fn shift(
        &mut self,
        distance: usize,
        direction: Direction,
    ) -> Result<(), TuringMachineError> {
        match direction {
            Direction::Left => {
                self.head = self
                    .head
                    .checked_sub(distance)
                    .ok_or(TuringMachineError::TapeUnderflow)?;
            }
            Direction::Right => {
                let head = self
                    .head
                    .checked_add(distance)
                    .filter(|head| *head < usize::MAX)
                    .ok_or(TuringMachineError::TapeOverflow)?;
                if head >= self.cells.len() {
                    self.cells.resize(head + 1, DEFAULT_SYMBOL);
                }
                self.head = head;
            }
        }

        Ok(())
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn cells(&self) -> &[Symbol] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a tape holds at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, symbol) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{symbol}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tape_defaults_to_single_blank() {
        let tape = Tape::new(vec![]);
        assert_eq!(tape.cells(), &[0]);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape, Tape::default());
    }

    #[test]
    fn test_read_write() {
        let mut tape = Tape::new(vec![1, 2, 3]);
        assert_eq!(tape.read(), 1);

        tape.write(9);
        assert_eq!(tape.read(), 9);
        assert_eq!(tape.cells(), &[9, 2, 3]);
    }

    #[test]
    fn test_shift_right_extends_tape() {
        let mut tape = Tape::new(vec![1]);

        tape.shift(3, Direction::Right).unwrap();

        assert_eq!(tape.head(), 3);
        assert_eq!(tape.cells(), &[1, 0, 0, 0]);
        assert_eq!(tape.read(), 0);
    }

    #[test]
    fn test_shift_right_within_tape_keeps_length() {
        let mut tape = Tape::new(vec![1, 1, 1]);

        tape.shift(2, Direction::Right).unwrap();

        assert_eq!(tape.head(), 2);
        assert_eq!(tape.len(), 3);
    }

    #[test]
    fn test_shift_zero_is_noop() {
        let mut tape = Tape::new(vec![5, 6]);
        tape.shift(1, Direction::Right).unwrap();

        tape.shift(0, Direction::Right).unwrap();
        tape.shift(0, Direction::Left).unwrap();

        assert_eq!(tape.head(), 1);
        assert_eq!(tape.cells(), &[5, 6]);
    }

    #[test]
    fn test_shift_left() {
        let mut tape = Tape::new(vec![1, 2, 3]);
        tape.shift(2, Direction::Right).unwrap();

        tape.shift(1, Direction::Left).unwrap();
        assert_eq!(tape.read(), 2);

        tape.shift(1, Direction::Left).unwrap();
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn test_shift_left_past_start_fails() {
        let mut tape = Tape::new(vec![1, 2]);
        tape.shift(1, Direction::Right).unwrap();

        let result = tape.shift(2, Direction::Left);

        assert_eq!(result, Err(TuringMachineError::TapeUnderflow));
        assert_eq!(tape.cells(), &[1, 2]);
    }

    #[test]
    fn test_shift_right_past_addressable_end_fails() {
        let mut tape = Tape::new(vec![1, 3]);
        tape.shift(1, Direction::Right).unwrap();

        let result = tape.shift(usize::MAX, Direction::Right);

        assert_eq!(result, Err(TuringMachineError::TapeOverflow));
        assert_eq!(tape.head(), 1);
        assert_eq!(tape.cells(), &[1, 3]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tape::new(vec![1, 1, 0]).to_string(), "[1, 1, 0]");
        assert_eq!(Tape::new(vec![7]).to_string(), "[7]");
    }
}
