/*!
The LM-cut heuristic.

LM-cut repeatedly finds a disjunctive action landmark (a *cut*) separating a state from the goal in the max relaxation of a problem, adds the least cost of an action in the cut to a running total, and lowers the cost of each action in the cut by that amount.
Once the goal costs nothing in the relaxation, the total is a lower bound on the cost to reach the goal, and so the heuristic is admissible.

Costs are found by a [propagation](crate::heuristics::propagation) with [Max](crate::heuristics::propagation::Aggregation::Max) aggregation.

# A round

Each round of the procedure, from the current (lowered) costs:
1. The *extended goal set* is built from the goal atoms.
   An atom of maximal cost among the goal atoms is added (unless some atom of maximal cost is already in the set), and the same is done for the precondition of each action of zero cost which adds the atom.
2. Any action whose precondition meets the extended goal set is forbidden, and costs are propagated through the allowed actions only.
3. The cut is every allowed action with a positive cost, which adds some atom of the extended goal set, and whose precondition has a finite cost.
4. The least cost of an action in the cut is added to the total, and subtracted from the cost of each action in the cut.
5. Costs are propagated through every action.

Each round lowers the cost of some action to zero, and actions of cost zero are never part of a cut, so the rounds end.
An empty cut, or a cut of cost zero, is a violation of the invariants of the procedure and causes a panic.

# Example

```rust
# use std::rc::Rc;
# use ssp_relax::config::Config;
# use ssp_relax::context::GroundingContext;
# use ssp_relax::heuristics::{lm_cut::LmCut, Heuristic};
# use ssp_relax::structures::{action::RelaxedAction, atom_list::AtomList};
let mut the_context = GroundingContext::from_config(Config::default());
let p = the_context.fresh_atom("p").unwrap();
let goal = the_context.fresh_atom("goal").unwrap();

the_context.add_action(RelaxedAction::new("A", AtomList::new(), AtomList::from_iter([p]), 1.0, 0));
the_context.add_action(RelaxedAction::new("B", AtomList::from_iter([p]), AtomList::from_iter([goal]), 2.0, 1));
the_context.set_goal(AtomList::from_iter([goal]).into());

let the_context = Rc::new(the_context);
let mut lm_cut = LmCut::new(the_context.clone());

let result = lm_cut.value_and_landmarks(&the_context.empty_state()).unwrap();
assert_eq!(result.value, 3.0);
assert_eq!(result.cuts.len(), 2);
```
*/

use std::{collections::BTreeSet, rc::Rc};

use crate::{
    context::GroundingContext,
    generic::numeric::UNREACHABLE,
    heuristics::{
        propagation::{conjunctive_goal, Aggregation, RelaxedCostPropagator},
        Heuristic,
    },
    misc::log::targets::{self},
    structures::{action::ActionId, atom_list::AtomList, bitset::Bitset, state::State},
    types::err::ErrorKind,
};

/// A heuristic value, together with the landmarks found when computing the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CutResult {
    pub value: f64,

    /// Each cut, as the set of (original) actions of the cut, in the order the cuts were found.
    pub cuts: Vec<BTreeSet<ActionId>>,
}

/// The LM-cut heuristic over the relaxed actions of a context.
pub struct LmCut {
    context: Rc<GroundingContext>,

    propagator: RelaxedCostPropagator,

    goal: AtomList,

    /// The cost of each action.
    costs: Vec<f64>,

    /// The original action of each relaxed action.
    originals: Vec<ActionId>,

    /// For each atom, the actions which add the atom.
    achievers: Vec<Vec<usize>>,

    /// The precondition of each action, as bits.
    precondition_bits: Vec<Bitset>,

    /// The add list of each action, as bits.
    add_bits: Vec<Bitset>,

    dead_end_value: f64,

    deadline_check_period: usize,
}

impl LmCut {
    /// LM-cut over `context`.
    ///
    /// # Panics
    /// If the goal of the context is not a single conjunction over the atoms of the context, or (see [RelaxedCostPropagator::new]) some action is not suited to relaxation.
    pub fn new(context: Rc<GroundingContext>) -> Self {
        let goal = conjunctive_goal(&context);

        let propagator = RelaxedCostPropagator::new(&context, Aggregation::Max);
        let atom_count = context.atom_count();

        let mut achievers = vec![Vec::default(); atom_count];
        let mut precondition_bits = Vec::with_capacity(propagator.action_count());
        let mut add_bits = Vec::with_capacity(propagator.action_count());

        for action in 0..propagator.action_count() {
            let mut precondition = Bitset::new(atom_count);
            for atom in propagator.precondition(action) {
                precondition.insert(*atom as usize);
            }
            precondition_bits.push(precondition);

            let mut adds = Bitset::new(atom_count);
            for atom in propagator.add_list(action) {
                adds.insert(*atom as usize);
                achievers[*atom as usize].push(action);
            }
            add_bits.push(adds);
        }

        LmCut {
            costs: context.actions().iter().map(|action| action.cost).collect(),
            originals: context.actions().iter().map(|action| action.original).collect(),
            dead_end_value: context.config.dead_end_value.value,
            deadline_check_period: context.config.deadline_check_period.value,
            achievers,
            precondition_bits,
            add_bits,
            propagator,
            goal,
            context,
        }
    }

    /// The value of `state`, together with the landmarks found.
    pub fn value_and_landmarks(&mut self, state: &State) -> Result<CutResult, ErrorKind> {
        if self.context.goal().holds(state, self.context.config.nprec.value) {
            return Ok(CutResult::default());
        }
        let goal = self.goal.clone();
        self.compute_cuts(state, &goal, true)
    }

    /// LM-cut from `state` to `target` atoms, keeping the landmarks found if `save_cuts` is true.
    pub fn compute_cuts(
        &mut self,
        state: &State,
        target: &AtomList,
        save_cuts: bool,
    ) -> Result<CutResult, ErrorKind> {
        let mut result = CutResult::default();
        let action_count = self.propagator.action_count();
        let atom_count = self.propagator.atom_count();

        let mut working = self.costs.clone();
        self.propagator.compute(state, &working, None);

        if self.propagator.aggregate(target) >= self.dead_end_value {
            log::trace!(target: targets::LANDMARKS, "Target unreachable in the relaxation");
            result.value = self.dead_end_value;
            return Ok(result);
        }

        let mut extended_goals = Bitset::new(atom_count);
        let mut allowed = Bitset::new(action_count);
        let mut cut = Bitset::new(action_count);
        let mut rounds = 0;

        while self.propagator.aggregate(target) > 0.0 {
            self.context
                .check_deadline_every(&mut rounds, self.deadline_check_period)?;

            extended_goals.clear_all();
            self.extend_goals(target, &working, &mut extended_goals);

            allowed.set_all();
            for (action, precondition) in self.precondition_bits.iter().enumerate() {
                if precondition.intersects(&extended_goals) {
                    allowed.remove(action);
                }
            }

            self.propagator.compute(state, &working, Some(&allowed));

            self.find_cut(&working, &extended_goals, &mut cut);
            if cut.is_empty() {
                log::error!(target: targets::LANDMARKS, "No cut found, extended goals: {extended_goals:?}");
                panic!("! Empty cut");
            }
            cut.and_assign(&allowed);
            if cut.is_empty() {
                log::error!(target: targets::LANDMARKS, "Cut disjoint from the allowed actions, extended goals: {extended_goals:?}");
                panic!("! Empty intersection of cut and allowed actions");
            }

            let cut_cost = cut
                .ones()
                .map(|action| working[action])
                .fold(UNREACHABLE, f64::min);
            if cut_cost <= 0.0 {
                log::error!(target: targets::LANDMARKS, "Cut {cut:?} has cost {cut_cost}");
                panic!("! Cut cost is not positive");
            }

            result.value += cut_cost;
            for action in cut.ones() {
                working[action] -= cut_cost;
            }
            log::trace!(target: targets::LANDMARKS, "Cut of {} actions with cost {cut_cost}", cut.count());

            if save_cuts {
                result
                    .cuts
                    .push(cut.ones().map(|action| self.originals[action]).collect());
            }

            self.propagator.compute(state, &working, None);
        }

        result.value = result.value.min(self.dead_end_value);
        Ok(result)
    }

    /// Extends `extended_goals` from `atoms`, by a maximal cost atom and the preconditions of free actions which add the atom.
    fn extend_goals(&self, atoms: &AtomList, working: &[f64], extended_goals: &mut Bitset) {
        let atom_cost = self.propagator.atom_costs();

        let mut max_cost = 0.0;
        let mut argmax = None;
        let mut max_in_extension = false;
        for atom in atoms {
            let cost = atom_cost[*atom as usize];
            let extended = extended_goals.contains(*atom as usize);
            if cost > max_cost {
                max_cost = cost;
                argmax = Some(*atom);
                max_in_extension = extended;
            } else if cost == max_cost {
                max_in_extension |= extended;
            }
        }

        // With no argmax every atom has cost zero.
        let Some(argmax) = argmax else {
            return;
        };
        if max_in_extension {
            return;
        }

        extended_goals.insert(argmax as usize);
        for &action in &self.achievers[argmax as usize] {
            if working[action] == 0.0 {
                self.extend_goals(self.propagator.precondition(action), working, extended_goals);
            }
        }
    }

    /// Writes to `cut` each action with a positive cost which adds some extended goal and has a reachable precondition.
    fn find_cut(&self, working: &[f64], extended_goals: &Bitset, cut: &mut Bitset) {
        cut.clear_all();
        for action in 0..self.propagator.action_count() {
            if working[action] > 0.0
                && self.add_bits[action].intersects(extended_goals)
                && self.propagator.aggregate(self.propagator.precondition(action)) < UNREACHABLE
            {
                cut.insert(action);
            }
        }
    }
}

impl Heuristic for LmCut {
    fn name(&self) -> &str {
        "lm-cut"
    }

    fn compute_value(&mut self, state: &State) -> Result<f64, ErrorKind> {
        if self.context.goal().holds(state, self.context.config.nprec.value) {
            return Ok(0.0);
        }
        let goal = self.goal.clone();
        Ok(self.compute_cuts(state, &goal, false)?.value)
    }
}
