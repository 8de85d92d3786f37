/*!
Heuristics over the relaxation of a problem.

Each heuristic implements [Heuristic], and so may be used interchangeably by a planner, wrapped by [Instrumented](stats::Instrumented) for statistics, or memoized by a [HeuristicValueCache](cache::HeuristicValueCache).

- [ConstantValue], which values every state the same (the zero heuristic, in particular).
- [h-add and h-max](atom_based), from the aggregate cost of the goal atoms after [propagation](propagation).
- [LM-cut](lm_cut), from landmarks found over the max relaxation.

Heuristics may also be built by name, with [from_name].

```rust
# use std::rc::Rc;
# use ssp_relax::config::Config;
# use ssp_relax::context::GroundingContext;
# use ssp_relax::heuristics::{self, Heuristic};
# use ssp_relax::structures::atom_list::AtomList;
let mut the_context = GroundingContext::from_config(Config::default());
let goal = the_context.fresh_atom("goal").unwrap();
the_context.set_goal(AtomList::from_iter([goal]).into());
let the_context = Rc::new(the_context);

let mut h = heuristics::from_name(&the_context, "H-MAX").unwrap();
assert_eq!(h.name(), "h-max");

// No action adds the goal.
assert_eq!(h.compute_value(&the_context.empty_state()), Ok(500.0));

assert!(heuristics::from_name(&the_context, "h-ff").is_err());
```
*/

pub mod atom_based;
pub mod cache;
pub mod lm_cut;
pub mod propagation;
pub mod stats;

use std::rc::Rc;

use crate::{
    context::GroundingContext,
    structures::state::State,
    types::err::{self, ErrorKind},
};

/// A heuristic: an estimate of the cost to reach the goal of a problem from a state.
pub trait Heuristic {
    /// The name of the heuristic.
    fn name(&self) -> &str;

    /// The value of `state`.
    ///
    /// An error is returned only if the computation was abandoned, e.g. due to an installed deadline.
    fn compute_value(&mut self, state: &State) -> Result<f64, ErrorKind>;
}

impl<H: Heuristic + ?Sized> Heuristic for Box<H> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compute_value(&mut self, state: &State) -> Result<f64, ErrorKind> {
        (**self).compute_value(state)
    }
}

/// A heuristic which gives every state the same value.
pub struct ConstantValue {
    name: String,
    value: f64,
}

impl ConstantValue {
    pub fn new(value: f64) -> Self {
        ConstantValue {
            name: format!("constant {value}"),
            value,
        }
    }

    /// The zero heuristic.
    pub fn zero() -> Self {
        ConstantValue {
            name: "zero".to_owned(),
            value: 0.0,
        }
    }
}

impl Heuristic for ConstantValue {
    fn name(&self) -> &str {
        &self.name
    }

    fn compute_value(&mut self, _state: &State) -> Result<f64, ErrorKind> {
        Ok(self.value)
    }
}

/// A heuristic over `context`, by (case-insensitive) name.
///
/// Names are `zero`, `h-add`, `h-max`, and `lm-cut`.
pub fn from_name(
    context: &Rc<GroundingContext>,
    name: &str,
) -> Result<Box<dyn Heuristic>, ErrorKind> {
    match name.to_ascii_lowercase().as_str() {
        "zero" => Ok(Box::new(ConstantValue::zero())),
        "h-add" => Ok(Box::new(atom_based::AtomHeuristic::h_add(context.clone()))),
        "h-max" => Ok(Box::new(atom_based::AtomHeuristic::h_max(context.clone()))),
        "lm-cut" => Ok(Box::new(lm_cut::LmCut::new(context.clone()))),
        _ => {
            log::warn!("Unknown heuristic: {name}");
            Err(err::HeuristicError::UnknownName(name.to_owned()).into())
        }
    }
}
