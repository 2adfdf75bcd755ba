//! The executable model of a Turing machine program: transitions grouped into named states,
//! owned by a [`Program`] arena, and the linking pass that turns successor names into handles.

use std::collections::HashMap;

use crate::tape::Tape;
use crate::types::{Direction, Pattern, Symbol, TuringMachineError, HALT};

/// Index of a state inside its [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub usize);

/// Where a transition leads once linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Continue in the given state.
    State(StateId),
    /// Stop the run without executing another state.
    Halt,
}

/// Successor names visible to the linker.
pub type Registry = HashMap<String, Target>;

/// Represents a single transition rule: `MATCH -> WRITE MOVEdir NEXT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The symbol (or wildcard) this transition reacts to.
    pub read: Pattern,
    /// The symbol written under the head before moving.
    pub write: Symbol,
    /// How many cells the head moves.
    pub distance: usize,
    /// The direction letter, validated when the transition fires.
    pub heading: char,
    /// The name of the state the machine transitions to.
    pub next_state: String,
    target: Option<Target>,
}

impl Transition {
    pub fn new(
        read: Pattern,
        write: Symbol,
        distance: usize,
        heading: char,
        next_state: impl Into<String>,
    ) -> Self {
        Self {
            read,
            write,
            distance,
            heading,
            next_state: next_state.into(),
            target: None,
        }
    }

    pub fn matches(&self, symbol: Symbol) -> bool {
        self.read.matches(symbol)
    }

    /// The resolved successor, or `None` before linking.
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    /// Writes, moves and returns the successor.
    ///
    /// An unlinked transition reports its successor name as undefined.
    pub fn apply(&self, tape: &mut Tape) -> Result<Target, TuringMachineError> {
        let target = self
            .target
            .ok_or_else(|| TuringMachineError::UndefinedState(vec![self.next_state.clone()]))?;

        tape.write(self.write);
        tape.shift(self.distance, Direction::try_from(self.heading)?)?;

        Ok(target)
    }

    pub fn link(&mut self, registry: &Registry) -> Result<(), TuringMachineError> {
        match registry.get(&self.next_state) {
            Some(target) => {
                self.target = Some(*target);
                Ok(())
            }
            None => Err(TuringMachineError::UndefinedState(vec![
                self.next_state.clone()
            ])),
        }
    }
}

/// A named execution mode: either halting, or a list of transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    name: String,
    halting: bool,
    transitions: Vec<Transition>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            halting: false,
            transitions: Vec::new(),
        }
    }

    /// A state that ends the run as soon as it is reached.
    pub fn halting(name: impl Into<String>) -> Self {
        Self {
            halting: true,
            ..Self::new(name)
        }
    }

    /// Builder-style variant of [`State::push`].
    pub fn with(mut self, transition: Transition) -> Self {
        self.push(transition);
        self
    }

    /// Appends a transition. Halting states keep no transitions.
    pub fn push(&mut self, transition: Transition) {
        if !self.halting {
            self.transitions.push(transition);
        }
    }

    /// Marks the state as halting, dropping any transitions collected so far.
    pub fn halt(&mut self) {
        self.halting = true;
        self.transitions.clear();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_halting(&self) -> bool {
        self.halting
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Picks the transition for `symbol`.
    ///
    /// When several transitions match, the one declared last wins, so a trailing
    /// wildcard shadows every earlier rule.
    pub fn select(&self, symbol: Symbol) -> Option<&Transition> {
        self.transitions.iter().rev().find(|t| t.matches(symbol))
    }

    /// Executes one step of this state against `tape`, which must currently read `symbol`.
    pub fn execute(&self, symbol: Symbol, tape: &mut Tape) -> Result<Target, TuringMachineError> {
        if self.halting {
            return Ok(Target::Halt);
        }

        self.select(symbol)
            .ok_or_else(|| TuringMachineError::UndefinedTransition {
                state: self.name.clone(),
                symbol,
            })?
            .apply(tape)
    }

    /// Links every transition, collecting the names that could not be resolved.
    pub fn link(&mut self, registry: &Registry) -> Result<(), TuringMachineError> {
        let mut missing = Vec::new();

        for transition in &mut self.transitions {
            if let Err(TuringMachineError::UndefinedState(names)) = transition.link(registry) {
                missing.extend(names);
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TuringMachineError::UndefinedState(missing))
        }
    }
}

/// A complete program: the initial tape and every state, in source order.
///
/// The first state is the start state. States refer to each other through
/// [`StateId`]s into this arena, resolved by [`Program::link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    tape: Vec<Symbol>,
    states: Vec<State>,
    index: HashMap<String, StateId>,
}

impl Program {
    /// Builds an unlinked program. State names must be unique and at least one state
    /// is required.
    pub fn new(tape: Vec<Symbol>, states: Vec<State>) -> Result<Self, TuringMachineError> {
        if states.is_empty() {
            return Err(TuringMachineError::ValidationError(
                "Program defines no states".to_string(),
            ));
        }

        let mut index = HashMap::new();
        for (i, state) in states.iter().enumerate() {
            if index.insert(state.name.clone(), StateId(i)).is_some() {
                return Err(TuringMachineError::ValidationError(format!(
                    "Duplicate state: {}",
                    state.name
                )));
            }
        }

        Ok(Self {
            tape,
            states,
            index,
        })
    }

    /// Resolves every transition's successor name.
    ///
    /// The registry holds the built-in `HALT` target, shadowed by a declared state of
    /// the same name. Every undefined name is reported once, in order of first use.
    pub fn link(&mut self) -> Result<(), TuringMachineError> {
        let mut registry = Registry::new();
        registry.insert(HALT.to_string(), Target::Halt);
        for (name, id) in &self.index {
            registry.insert(name.clone(), Target::State(*id));
        }

        let mut missing: Vec<String> = Vec::new();
        for state in &mut self.states {
            if let Err(TuringMachineError::UndefinedState(names)) = state.link(&registry) {
                for name in names {
                    if !missing.contains(&name) {
                        missing.push(name);
                    }
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(TuringMachineError::UndefinedState(missing))
        }
    }

    pub fn initial_tape(&self) -> &[Symbol] {
        &self.tape
    }

    pub fn start(&self) -> StateId {
        StateId(0)
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.0]
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn lookup(&self, name: &str) -> Option<StateId> {
        self.index.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(read: Pattern, write: Symbol, next: &str) -> Transition {
        Transition::new(read, write, 1, 'r', next)
    }

    fn linked(state: State) -> State {
        let mut program = Program::new(vec![0], vec![state]).unwrap();
        program.link().unwrap();
        program.states()[0].clone()
    }

    #[test]
    fn test_last_matching_transition_wins() {
        let state = State::new("A")
            .with(rule(Pattern::Symbol(0), 5, "HALT"))
            .with(rule(Pattern::Any, 6, "HALT"));

        assert_eq!(state.select(0).unwrap().write, 6);
        assert_eq!(state.select(1).unwrap().write, 6);
    }

    #[test]
    fn test_specific_rule_after_wildcard_wins_for_its_symbol() {
        let state = State::new("A")
            .with(rule(Pattern::Any, 6, "HALT"))
            .with(rule(Pattern::Symbol(0), 5, "HALT"));

        assert_eq!(state.select(0).unwrap().write, 5);
        assert_eq!(state.select(3).unwrap().write, 6);
    }

    #[test]
    fn test_execute_applies_selected_transition() {
        let state = linked(State::new("A").with(rule(Pattern::Symbol(0), 1, "A")));
        let mut tape = Tape::new(vec![0]);

        let target = state.execute(tape.read(), &mut tape).unwrap();

        assert_eq!(target, Target::State(StateId(0)));
        assert_eq!(tape.cells(), &[1, 0]);
        assert_eq!(tape.head(), 1);
    }

    #[test]
    fn test_execute_without_matching_rule_fails() {
        let state = linked(State::new("A").with(rule(Pattern::Symbol(1), 1, "HALT")));
        let mut tape = Tape::new(vec![0]);

        let result = state.execute(tape.read(), &mut tape);

        assert_eq!(
            result,
            Err(TuringMachineError::UndefinedTransition {
                state: "A".to_string(),
                symbol: 0
            })
        );
        assert_eq!(tape.cells(), &[0]);
    }

    #[test]
    fn test_halting_state_leaves_tape_untouched() {
        let state = State::halting("Stop");
        let mut tape = Tape::new(vec![4, 2]);

        let target = state.execute(tape.read(), &mut tape).unwrap();

        assert_eq!(target, Target::Halt);
        assert_eq!(tape, Tape::new(vec![4, 2]));
    }

    #[test]
    fn test_halt_drops_transitions() {
        let mut state = State::new("A").with(rule(Pattern::Any, 1, "A"));
        state.halt();
        state.push(rule(Pattern::Any, 2, "A"));

        assert!(state.is_halting());
        assert!(state.transitions().is_empty());
    }

    #[test]
    fn test_invalid_heading_fails_when_fired() {
        let state = linked(State::new("A").with(Transition::new(Pattern::Any, 1, 1, 'x', "HALT")));
        let mut tape = Tape::new(vec![0]);

        let result = state.execute(tape.read(), &mut tape);

        assert_eq!(result, Err(TuringMachineError::InvalidMove('x')));
    }

    #[test]
    fn test_unlinked_transition_cannot_apply() {
        let transition = rule(Pattern::Any, 1, "B");
        let mut tape = Tape::default();

        assert_eq!(transition.target(), None);
        assert_eq!(
            transition.apply(&mut tape),
            Err(TuringMachineError::UndefinedState(vec!["B".to_string()]))
        );
    }

    #[test]
    fn test_link_resolves_forward_and_cyclic_references() {
        let mut program = Program::new(
            vec![0],
            vec![
                State::new("A").with(rule(Pattern::Any, 0, "B")),
                State::new("B").with(rule(Pattern::Any, 0, "A")),
            ],
        )
        .unwrap();

        program.link().unwrap();

        let a = program.lookup("A").unwrap();
        let b = program.lookup("B").unwrap();
        assert_eq!(program.start(), a);
        assert_eq!(
            program.state(a).transitions()[0].target(),
            Some(Target::State(b))
        );
        assert_eq!(
            program.state(b).transitions()[0].target(),
            Some(Target::State(a))
        );
    }

    #[test]
    fn test_link_uses_halt_sentinel() {
        let mut program =
            Program::new(vec![0], vec![State::new("A").with(rule(Pattern::Any, 0, "HALT"))])
                .unwrap();

        program.link().unwrap();

        assert_eq!(
            program.states()[0].transitions()[0].target(),
            Some(Target::Halt)
        );
    }

    #[test]
    fn test_declared_halt_state_shadows_sentinel() {
        let mut program = Program::new(
            vec![0],
            vec![
                State::new("A").with(rule(Pattern::Any, 0, "HALT")),
                State::halting("HALT"),
            ],
        )
        .unwrap();

        program.link().unwrap();

        assert_eq!(
            program.states()[0].transitions()[0].target(),
            Some(Target::State(StateId(1)))
        );
    }

    #[test]
    fn test_link_reports_every_undefined_state() {
        let mut program = Program::new(
            vec![0],
            vec![
                State::new("A")
                    .with(rule(Pattern::Symbol(0), 0, "Missing"))
                    .with(rule(Pattern::Symbol(1), 0, "Other")),
                State::new("B").with(rule(Pattern::Any, 0, "Missing")),
            ],
        )
        .unwrap();

        let result = program.link();

        assert_eq!(
            result,
            Err(TuringMachineError::UndefinedState(vec![
                "Missing".to_string(),
                "Other".to_string()
            ]))
        );
    }

    #[test]
    fn test_program_requires_states() {
        let result = Program::new(vec![0], vec![]);
        assert!(matches!(
            result,
            Err(TuringMachineError::ValidationError(_))
        ));
    }

    #[test]
    fn test_program_rejects_duplicate_states() {
        let result = Program::new(vec![0], vec![State::new("A"), State::new("A")]);
        assert_eq!(
            result,
            Err(TuringMachineError::ValidationError(
                "Duplicate state: A".to_string()
            ))
        );
    }
}
