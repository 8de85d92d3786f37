/*!
Relaxed actions.

A relaxed action is a deterministic, delete-free action derived from some (possibly probabilistic) action of a problem by determinization.
Each relaxed action keeps the identity of the action it was derived from, so landmarks may be reported in terms of the actions a planner knows.

The heuristics over a relaxation require:
- The precondition to be a single conjunction.
- The delete list to be empty.

These are checked when a heuristic is built, not when an action is made, as the grounding which supplies actions may build these in parts.
*/

use crate::structures::atom_list::{AtomList, Dnf};

/// The identity of an action of the (unrelaxed) problem.
pub type ActionId = u32;

/// A deterministic, delete-free action.
#[derive(Clone, Debug)]
pub struct RelaxedAction {
    pub name: String,

    pub precondition: Dnf,

    pub add_list: AtomList,

    pub delete_list: AtomList,

    /// The (non-negative) cost of the action.
    pub cost: f64,

    /// The action this action was derived from.
    pub original: ActionId,
}

impl RelaxedAction {
    /// An action with a conjunctive precondition and no deletes.
    pub fn new(
        name: impl Into<String>,
        precondition: AtomList,
        add_list: AtomList,
        cost: f64,
        original: ActionId,
    ) -> Self {
        RelaxedAction {
            name: name.into(),
            precondition: Dnf::conjunction(precondition),
            add_list,
            delete_list: AtomList::default(),
            cost,
            original,
        }
    }

    /// The precondition, if the precondition is a single conjunction.
    pub fn conjunctive_precondition(&self) -> Option<&AtomList> {
        self.precondition.as_conjunction()
    }
}

impl std::fmt::Display for RelaxedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (pre: {}, add: {}, cost: {})",
            self.name, self.precondition, self.add_list, self.cost
        )
    }
}
