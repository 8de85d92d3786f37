//! Heuristics valued by the aggregate cost of the goal atoms: h-add and h-max.
//!
//! The value of a state is zero if the goal holds in the state.
//! Otherwise, costs are [propagated](crate::heuristics::propagation) from the state with the cost of each action, and the value is the aggregate cost of the goal atoms, capped by the dead end value of the context.

use std::rc::Rc;

use crate::{
    context::GroundingContext,
    heuristics::{
        propagation::{conjunctive_goal, Aggregation, RelaxedCostPropagator},
        Heuristic,
    },
    structures::{atom_list::AtomList, state::State},
    types::err::ErrorKind,
};

/// A heuristic from the aggregate cost of the goal atoms.
pub struct AtomHeuristic {
    context: Rc<GroundingContext>,

    propagator: RelaxedCostPropagator,

    goal: AtomList,

    costs: Vec<f64>,

    dead_end_value: f64,
}

impl AtomHeuristic {
    /// A heuristic over `context` with the given aggregation.
    ///
    /// # Panics
    /// If the goal of the context is not a single conjunction over the atoms of the context, or (see [RelaxedCostPropagator::new]) some action is not suited to relaxation.
    pub fn new(context: Rc<GroundingContext>, aggregation: Aggregation) -> Self {
        let goal = conjunctive_goal(&context);

        AtomHeuristic {
            propagator: RelaxedCostPropagator::new(&context, aggregation),
            costs: context.actions().iter().map(|action| action.cost).collect(),
            dead_end_value: context.config.dead_end_value.value,
            goal,
            context,
        }
    }

    /// The additive heuristic.
    pub fn h_add(context: Rc<GroundingContext>) -> Self {
        AtomHeuristic::new(context, Aggregation::Sum)
    }

    /// The max heuristic.
    pub fn h_max(context: Rc<GroundingContext>) -> Self {
        AtomHeuristic::new(context, Aggregation::Max)
    }

    /// The propagator, with costs from the most recent evaluation.
    pub fn propagator(&self) -> &RelaxedCostPropagator {
        &self.propagator
    }
}

impl Heuristic for AtomHeuristic {
    fn name(&self) -> &str {
        match self.propagator.aggregation() {
            Aggregation::Sum => "h-add",
            Aggregation::Max => "h-max",
        }
    }

    fn compute_value(&mut self, state: &State) -> Result<f64, ErrorKind> {
        if self.context.goal().holds(state, self.context.config.nprec.value) {
            return Ok(0.0);
        }
        self.propagator.compute(state, &self.costs, None);
        Ok(self.propagator.aggregate(&self.goal).min(self.dead_end_value))
    }
}
