/*!
A fixed point propagation of costs over the relaxed actions of a problem.

Given a state, a cost for each action, and (optionally) a set of allowed actions, the propagation computes:
- For each atom, the cost to first achieve the atom from the state.
- For each action, the cost of the precondition of the action, as an aggregate of the costs of the atoms of the precondition.

How the costs of a set of atoms are aggregated is set by an [Aggregation]:
- [Sum](Aggregation::Sum) gives the additive heuristic (h-add).
- [Max](Aggregation::Max) gives the max heuristic (h-max), and is the aggregation required by [LM-cut](crate::heuristics::lm_cut).

# The fixed point

Every atom which holds in the state is seeded with cost zero, and each action with an empty precondition is active.
An action is *active* when the cost of some atom of the precondition of the action may have decreased.

Sweeps are made over the actions (in order of increasing cost) until a sweep makes no revision.
On a sweep, each active and allowed action whose precondition atoms all have a finite cost is examined:
- If the aggregate cost of the precondition is less than the recorded cost of the action, the recorded cost is lowered.
- The cost of each atom added by the action is lowered to the cost of the precondition plus the cost of the action, if this is less than the current cost of the atom, and each action with the atom in its precondition is then active.

All comparisons are made with [e_less], and so each revision lowers some cost by more than epsilon.
As costs are bounded below by zero, the fixed point is reached after finitely many sweeps.
A bound on the number of sweeps is kept all the same, and exceeding the bound is treated as a violation of the invariants of the relaxation.

Unreachable atoms and actions keep the cost [UNREACHABLE].
No cap is applied to costs here, as the dead end value applies only to reported heuristic values.
*/

use std::rc::Rc;

use crate::{
    context::GroundingContext,
    generic::numeric::{e_less, saturating_add, UNREACHABLE},
    misc::log::targets::{self},
    structures::{atom::Atom, atom_list::AtomList, bitset::Bitset, state::State},
};

/// How the costs of a set of atoms are aggregated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Aggregation {
    /// The sum of the costs, saturating at [UNREACHABLE].
    Sum,

    /// The greatest cost.
    Max,
}

impl Aggregation {
    /// The aggregate cost of `atoms`, with the cost of each atom read from `costs`.
    ///
    /// The aggregate of no atoms is zero.
    pub fn aggregate<'a>(&self, atoms: impl IntoIterator<Item = &'a Atom>, costs: &[f64]) -> f64 {
        let costs = atoms.into_iter().map(|atom| costs[*atom as usize]);
        match self {
            Self::Sum => costs.fold(0.0, saturating_add),
            Self::Max => costs.fold(0.0, f64::max),
        }
    }
}

/// The propagation of costs over the relaxed actions of a [GroundingContext].
///
/// Buffers for costs are kept between calls, and so a propagator is not reentrant.
pub struct RelaxedCostPropagator {
    aggregation: Aggregation,

    epsilon: f64,

    nprec: bool,

    /// Two when only positive atoms are seeded, and one otherwise.
    atom_step: usize,

    atom_count: usize,

    /// Indicies of actions, in order of increasing (original) cost.
    order: Vec<usize>,

    /// The (conjunctive) precondition of each action.
    preconditions: Vec<AtomList>,

    add_lists: Vec<AtomList>,

    /// For each atom, the actions with the atom in their precondition.
    has_precondition: Vec<Vec<usize>>,

    atom_cost: Vec<f64>,

    action_cost: Vec<f64>,

    /// For each atom, the action which last lowered the cost of the atom.
    supporters: Vec<Option<usize>>,

    active: Vec<bool>,
}

impl RelaxedCostPropagator {
    /// A propagator over the actions of `context`.
    ///
    /// # Panics
    /// If some action has a disjunctive precondition, a non-empty delete list, a negative cost, or mentions an atom outside of the context.
    pub fn new(context: &Rc<GroundingContext>, aggregation: Aggregation) -> Self {
        let actions = context.actions();
        let atom_count = context.atom_count();

        let mut preconditions = Vec::with_capacity(actions.len());
        let mut add_lists = Vec::with_capacity(actions.len());
        let mut has_precondition = vec![Vec::default(); atom_count];

        for (index, action) in actions.iter().enumerate() {
            let Some(precondition) = action.conjunctive_precondition() else {
                log::error!(target: targets::PROPAGATION, "Action {index} ({}) has a disjunctive precondition: {}", action.name, action.precondition);
                panic!("! Relaxation requires conjunctive preconditions");
            };

            if !action.delete_list.is_empty() {
                log::error!(target: targets::PROPAGATION, "Action {index} ({}) has deletes: {}", action.name, action.delete_list);
                panic!("! Relaxation requires empty delete lists");
            }

            if action.cost.is_nan() || action.cost < 0.0 {
                log::error!(target: targets::PROPAGATION, "Action {index} ({}) has cost {}", action.name, action.cost);
                panic!("! Relaxation requires non-negative costs");
            }

            let outside = |atom: &&Atom| (**atom as usize) >= atom_count;
            if let Some(atom) = precondition.iter().chain(action.add_list.iter()).find(outside) {
                log::error!(target: targets::PROPAGATION, "Action {index} ({}) mentions atom {atom} of {atom_count}", action.name);
                panic!("! Atom outside of the context");
            }

            for atom in precondition {
                has_precondition[*atom as usize].push(index);
            }
            preconditions.push(precondition.clone());
            add_lists.push(action.add_list.clone());
        }

        let mut order = (0..actions.len()).collect::<Vec<_>>();
        order.sort_by(|a, b| actions[*a].cost.total_cmp(&actions[*b].cost));

        RelaxedCostPropagator {
            aggregation,
            epsilon: context.config.epsilon.value,
            nprec: context.config.nprec.value,
            atom_step: context.config.atom_step(),
            atom_count,
            order,
            preconditions,
            add_lists,
            has_precondition,
            atom_cost: vec![UNREACHABLE; atom_count],
            action_cost: vec![UNREACHABLE; actions.len()],
            supporters: vec![None; atom_count],
            active: vec![false; actions.len()],
        }
    }

    pub fn aggregation(&self) -> Aggregation {
        self.aggregation
    }

    pub fn action_count(&self) -> usize {
        self.preconditions.len()
    }

    pub fn atom_count(&self) -> usize {
        self.atom_count
    }

    /// The cost of each atom, as of the most recent propagation.
    pub fn atom_costs(&self) -> &[f64] {
        &self.atom_cost
    }

    /// The cost of the precondition of each action, as of the most recent propagation.
    pub fn action_costs(&self) -> &[f64] {
        &self.action_cost
    }

    pub fn precondition(&self, action: usize) -> &AtomList {
        &self.preconditions[action]
    }

    pub fn add_list(&self, action: usize) -> &AtomList {
        &self.add_lists[action]
    }

    /// The action which last lowered the cost of `atom`, if any.
    pub fn supporter(&self, atom: Atom) -> Option<usize> {
        self.supporters[atom as usize]
    }

    /// The aggregate cost of `atoms`, as of the most recent propagation.
    pub fn aggregate(&self, atoms: &AtomList) -> f64 {
        self.aggregation.aggregate(atoms, &self.atom_cost)
    }

    /// Propagates costs from `state`, with the cost of each action read from `costs`.
    ///
    /// If `allowed` is given, only the actions in `allowed` are used.
    pub fn compute(&mut self, state: &State, costs: &[f64], allowed: Option<&Bitset>) {
        self.atom_cost.fill(UNREACHABLE);
        self.action_cost.fill(UNREACHABLE);
        self.supporters.fill(None);
        self.active.fill(false);

        for atom in (0..self.atom_count).step_by(self.atom_step) {
            if state.holds_literal(atom as Atom, self.nprec) {
                self.atom_cost[atom] = 0.0;
                for action in &self.has_precondition[atom] {
                    self.active[*action] = true;
                }
            }
        }

        for (action, precondition) in self.preconditions.iter().enumerate() {
            if precondition.is_empty() {
                self.active[action] = true;
            }
        }

        let sweep_limit = (self.atom_count + 1) * (self.action_count() + 1) + 1;
        let mut sweeps = 0;
        let mut revised = true;

        while revised {
            revised = false;
            sweeps += 1;
            if sweeps > sweep_limit {
                log::error!(target: targets::PROPAGATION, "Propagation failed to reach a fixed point after {sweep_limit} sweeps (epsilon {})", self.epsilon);
                panic!("! Propagation failed to reach a fixed point");
            }

            for &action in &self.order {
                if !self.active[action] {
                    continue;
                }
                self.active[action] = false;

                if allowed.is_some_and(|allowed| !allowed.contains(action)) {
                    continue;
                }

                let precondition = &self.preconditions[action];
                if precondition
                    .iter()
                    .any(|atom| self.atom_cost[*atom as usize] == UNREACHABLE)
                {
                    continue;
                }

                let precondition_cost = self.aggregation.aggregate(precondition, &self.atom_cost);
                if !e_less(precondition_cost, self.action_cost[action], self.epsilon) {
                    continue;
                }
                self.action_cost[action] = precondition_cost;

                let achieved_cost = saturating_add(precondition_cost, costs[action]);
                for atom in &self.add_lists[action] {
                    let atom = *atom as usize;
                    if e_less(achieved_cost, self.atom_cost[atom], self.epsilon) {
                        self.atom_cost[atom] = achieved_cost;
                        self.supporters[atom] = Some(action);
                        for dependent in &self.has_precondition[atom] {
                            self.active[*dependent] = true;
                        }
                        revised = true;
                    }
                }
            }
        }

        log::trace!(target: targets::PROPAGATION, "Fixed point after {sweeps} sweeps");
    }
}

/// The goal of `context`, as a single conjunction over the atoms of the context.
///
/// # Panics
/// If the goal is not a single conjunction, or mentions an atom outside of the context.
pub fn conjunctive_goal(context: &GroundingContext) -> AtomList {
    let Some(goal) = context.goal().as_conjunction() else {
        log::error!(target: targets::PROPAGATION, "Goal is not a single conjunction: {}", context.goal());
        panic!("! Relaxation requires a conjunctive goal");
    };

    let atom_count = context.atom_count();
    if let Some(atom) = goal.iter().find(|atom| (**atom as usize) >= atom_count) {
        log::error!(target: targets::PROPAGATION, "Goal {goal} mentions atom {atom} of {atom_count}");
        panic!("! Atom outside of the context");
    }

    goal.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, structures::action::RelaxedAction};

    fn chain_context(nprec: bool) -> Rc<GroundingContext> {
        let mut config = Config::default();
        config.nprec.set(nprec).unwrap();
        let mut the_context = GroundingContext::from_config(config);
        let p = the_context.fresh_atom("p").unwrap();
        let q = the_context.fresh_atom("q").unwrap();
        let r = the_context.fresh_atom("r").unwrap();

        let list = |atoms: &[Atom]| AtomList::from_iter(atoms.iter().copied());
        the_context.add_action(RelaxedAction::new("a", list(&[]), list(&[p]), 1.0, 0));
        the_context.add_action(RelaxedAction::new("b", list(&[]), list(&[q]), 2.0, 1));
        the_context.add_action(RelaxedAction::new("c", list(&[p, q]), list(&[r]), 3.0, 2));
        Rc::new(the_context)
    }

    #[test]
    fn sum_and_max() {
        let the_context = chain_context(true);
        let state = the_context.empty_state();
        let costs = the_context.actions().iter().map(|a| a.cost).collect::<Vec<_>>();

        let mut sum = RelaxedCostPropagator::new(&the_context, Aggregation::Sum);
        sum.compute(&state, &costs, None);
        assert_eq!(sum.atom_costs()[4], 6.0);
        assert_eq!(sum.action_costs()[2], 3.0);

        let mut max = RelaxedCostPropagator::new(&the_context, Aggregation::Max);
        max.compute(&state, &costs, None);
        assert_eq!(max.atom_costs()[4], 5.0);
        assert_eq!(max.supporter(4), Some(2));
    }

    #[test]
    fn held_atoms_are_free() {
        let the_context = chain_context(true);
        let state = the_context.state_from_atoms([2]);
        let costs = the_context.actions().iter().map(|a| a.cost).collect::<Vec<_>>();

        let mut sum = RelaxedCostPropagator::new(&the_context, Aggregation::Sum);
        sum.compute(&state, &costs, None);
        assert_eq!(sum.atom_costs()[2], 0.0);
        assert_eq!(sum.atom_costs()[4], 4.0);
        assert_eq!(sum.supporter(2), None);
    }

    #[test]
    fn disallowed_actions_never_fire() {
        let the_context = chain_context(true);
        let state = the_context.empty_state();
        let costs = the_context.actions().iter().map(|a| a.cost).collect::<Vec<_>>();

        let mut allowed = Bitset::new(3);
        allowed.set_all();
        allowed.remove(1);

        let mut max = RelaxedCostPropagator::new(&the_context, Aggregation::Max);
        max.compute(&state, &costs, Some(&allowed));
        assert_eq!(max.atom_costs()[0], 1.0);
        assert_eq!(max.atom_costs()[2], UNREACHABLE);
        assert_eq!(max.atom_costs()[4], UNREACHABLE);
        assert_eq!(max.action_costs()[2], UNREACHABLE);
    }

    #[test]
    fn negations_are_seeded_without_negation_as_failure() {
        let mut the_context = GroundingContext::from_config({
            let mut config = Config::default();
            config.nprec.set(false).unwrap();
            config
        });
        let p = the_context.fresh_atom("p").unwrap();
        let q = the_context.fresh_atom("q").unwrap();
        let not_p = the_context.atom("not p").unwrap();
        the_context.add_action(RelaxedAction::new(
            "needs-not-p",
            AtomList::from_iter([not_p]),
            AtomList::from_iter([q]),
            1.0,
            0,
        ));
        let the_context = Rc::new(the_context);
        let costs = [1.0];

        let mut max = RelaxedCostPropagator::new(&the_context, Aggregation::Max);
        max.compute(&the_context.empty_state(), &costs, None);
        assert_eq!(max.atom_costs()[q as usize], 1.0);

        max.compute(&the_context.state_from_atoms([p]), &costs, None);
        assert_eq!(max.atom_costs()[q as usize], UNREACHABLE);
    }

    #[test]
    #[should_panic(expected = "Atom outside of the context")]
    fn goals_outside_of_the_context_are_rejected() {
        let mut the_context = GroundingContext::from_config(Config::default());
        the_context.fresh_atom("p").unwrap();
        the_context.set_goal(AtomList::from_iter([40]).into());
        let _ = conjunctive_goal(&the_context);
    }

    #[test]
    #[should_panic]
    fn deletes_are_rejected() {
        let mut the_context = GroundingContext::from_config(Config::default());
        let p = the_context.fresh_atom("p").unwrap();
        let mut action = RelaxedAction::new("a", AtomList::new(), AtomList::from_iter([p]), 1.0, 0);
        action.delete_list.insert(p);
        the_context.add_action(action);
        let _ = RelaxedCostPropagator::new(&Rc::new(the_context), Aggregation::Max);
    }
}
