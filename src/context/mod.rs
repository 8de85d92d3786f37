/*!
The grounding context: the atoms, actions, and goal of a problem, together with configuration.

A context is built once per problem, by the grounding which supplies the relaxed actions:
1. Atoms are registered by name.
2. Relaxed actions and a goal over these atoms are added.
3. The context is shared (as an [Rc]) with each heuristic built over the problem.

Once a state has been created through the context the width of a state is fixed, and no further atoms may be registered.

A context also holds a slot for a [deadline](crate::generic::deadline), installed and removed by the planner, and checked by long running heuristics.

# Example
```rust
# use std::rc::Rc;
# use ssp_relax::config::Config;
# use ssp_relax::context::GroundingContext;
# use ssp_relax::structures::{action::RelaxedAction, atom_list::AtomList};
let mut the_context = GroundingContext::from_config(Config::default());

let p = the_context.fresh_atom("p").unwrap();
let q = the_context.fresh_atom("q").unwrap();

the_context.add_action(RelaxedAction::new("p-to-q", AtomList::from_iter([p]), AtomList::from_iter([q]), 1.0, 0));
the_context.set_goal(AtomList::from_iter([q]).into());

let the_context = Rc::new(the_context);
let state = the_context.state_from_str("p").unwrap();
assert!(state.holds(p));
assert_eq!(the_context.state_to_string(&state), "{p}");
```
*/

use std::{cell::Cell, rc::Rc};

use crate::{
    config::Config,
    db::atom::AtomDB,
    generic::deadline::{Deadline, DeadlineSlot},
    misc::log::targets::{self},
    structures::{
        action::RelaxedAction,
        atom::Atom,
        atom_list::Dnf,
        state::State,
    },
    types::err::{self, ErrorKind},
};

/// The atoms, actions, goal, and configuration of a problem.
pub struct GroundingContext {
    /// The configuration of the context.
    pub config: Config,

    /// The names of atoms.
    pub atom_db: AtomDB,

    actions: Vec<RelaxedAction>,

    goal: Dnf,

    deadline: DeadlineSlot,

    /// Whether some state has been created, fixing the width of a state.
    states_created: Cell<bool>,
}

impl GroundingContext {
    /// Creates a context from some given configuration.
    pub fn from_config(config: Config) -> Self {
        GroundingContext {
            config,
            atom_db: AtomDB::default(),
            actions: Vec::default(),
            goal: Dnf::default(),
            deadline: DeadlineSlot::default(),
            states_created: Cell::new(false),
        }
    }

    /// Registers a fresh fact, returning the (positive) atom of the fact.
    ///
    /// Fails once a state has been created.
    pub fn fresh_atom(&mut self, name: &str) -> Result<Atom, ErrorKind> {
        if self.states_created.get() {
            log::error!(target: targets::GROUNDING, "Atom '{name}' registered after the width of a state was fixed");
            return Err(err::AtomDBError::LayoutFixed.into());
        }
        Ok(self.atom_db.fresh_atom(name)?)
    }

    /// The atom with the given name, if any.
    pub fn atom(&self, name: &str) -> Option<Atom> {
        self.atom_db.atom(name)
    }

    /// The name of an atom, if any.
    pub fn atom_name(&self, atom: Atom) -> Option<&str> {
        self.atom_db.name(atom)
    }

    /// A count of atom codes.
    pub fn atom_count(&self) -> usize {
        self.atom_db.count()
    }

    /// A count of the words of a state.
    pub fn state_words(&self) -> usize {
        self.atom_count().div_ceil(crate::structures::bitset::WORD_BITS)
    }

    /// Adds a relaxed action, returning the index of the action.
    pub fn add_action(&mut self, action: RelaxedAction) -> usize {
        log::trace!(target: targets::GROUNDING, "Action {}: {action}", self.actions.len());
        self.actions.push(action);
        self.actions.len() - 1
    }

    pub fn actions(&self) -> &[RelaxedAction] {
        &self.actions
    }

    pub fn set_goal(&mut self, goal: Dnf) {
        log::trace!(target: targets::GROUNDING, "Goal: {goal}");
        self.goal = goal;
    }

    pub fn goal(&self) -> &Dnf {
        &self.goal
    }
}

/// Methods for states.
impl GroundingContext {
    /// A state in which no atom holds.
    ///
    /// Fixes the width of a state.
    pub fn empty_state(&self) -> State {
        self.states_created.set(true);
        State::empty(self.atom_count())
    }

    /// A state in which exactly the given atoms hold.
    pub fn state_from_atoms(&self, atoms: impl IntoIterator<Item = Atom>) -> State {
        let mut state = self.empty_state();
        for atom in atoms {
            state.add(atom);
        }
        state
    }

    /// A state from a comma separated list of atoms, optionally within braces.
    ///
    /// Each atom is given either by name or by code.
    pub fn state_from_str(&self, string: &str) -> Result<State, ErrorKind> {
        let trimmed = string.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(trimmed)
            .trim();

        let mut state = self.empty_state();
        if inner.is_empty() {
            return Ok(state);
        }

        for part in inner.split(',') {
            let part = part.trim();
            if part.is_empty() {
                return Err(err::ParseError::Empty.into());
            }
            let atom = match self.atom(part) {
                Some(atom) => atom,
                None => match part.parse::<Atom>() {
                    Ok(code) if (code as usize) < self.atom_count() => code,
                    _ => return Err(err::ParseError::UnknownAtom(part.to_owned()).into()),
                },
            };
            state.add(atom);
        }
        Ok(state)
    }

    /// The atoms of a state, by name where a name is known, e.g. `{p, not q}`.
    pub fn state_to_string(&self, state: &State) -> String {
        let names = state
            .atoms()
            .map(|atom| match self.atom_name(atom) {
                Some(name) => name.to_owned(),
                None => atom.to_string(),
            })
            .collect::<Vec<_>>();
        format!("{{{}}}", names.join(", "))
    }
}

/// Methods for the deadline of a context.
impl GroundingContext {
    /// Installs a deadline, unless a deadline is already installed.
    ///
    /// Returns true on installation, false otherwise.
    pub fn install_deadline(&self, deadline: Rc<dyn Deadline>) -> bool {
        let installed = self.deadline.install(deadline);
        if !installed {
            log::warn!(target: targets::DEADLINE, "A deadline is already installed");
        }
        installed
    }

    pub fn remove_deadline(&self) {
        self.deadline.remove()
    }

    pub fn check_deadline(&self) -> Result<(), err::DeadlineError> {
        self.deadline.check()
    }

    /// Checks the deadline once every `period` calls, counted by `counter`.
    pub fn check_deadline_every(
        &self,
        counter: &mut usize,
        period: usize,
    ) -> Result<(), err::DeadlineError> {
        self.deadline.check_every(counter, period)
    }
}
