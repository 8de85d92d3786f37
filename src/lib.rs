//! Delete-relaxation heuristics for planners solving stochastic shortest path problems.
//!
//! ssp_relax is a library of heuristics for planning over a grounded, STRIPS-like state space: the additive heuristic (h-add), the max heuristic (h-max), and the LM-cut heuristic, together with a cache of heuristic values by state.
//!
//! The heuristics are computed over a *relaxation* of a problem, in which each probabilistic action is replaced by one deterministic action per outcome and negative (delete) effects are ignored.
//! In the relaxation the cost to achieve an atom can only fall as more actions are taken, and so costs may be found by a fixed point computation.
//!
//! Parsing, grounding, and planning are left to other libraries.
//! The library consumes only a numbered collection of atoms, the relaxed actions over those atoms, and a goal.
//!
//! # Orientation
//!
//! The library is designed around the structure of a [grounding context](context).
//!
//! A context is built with a [configuration](config), and the grounding of a problem registers atoms and adds relaxed actions and a goal to the context.
//! The context is then shared with each heuristic built over the problem.
//!
//! Useful starting points, then, may be:
//! - The [propagation](crate::heuristics::propagation) of costs, on which every heuristic is built.
//! - [LM-cut](crate::heuristics::lm_cut), for the procedure for finding landmarks.
//! - The [structures] to familiarise yourself with the representation of atoms and states.
//! - The [value cache](crate::heuristics::cache), for use of heuristics in a planner.
//!
//! # Examples
//!
//! + Find the value of a state, and the landmarks of the state, with LM-cut.
//!
//! ```rust
//! # use std::collections::BTreeSet;
//! # use std::rc::Rc;
//! # use ssp_relax::config::Config;
//! # use ssp_relax::context::GroundingContext;
//! # use ssp_relax::heuristics::lm_cut::LmCut;
//! use ssp_relax::structures::{action::RelaxedAction, atom_list::AtomList};
//!
//! let mut the_context = GroundingContext::from_config(Config::default());
//! let p = the_context.fresh_atom("p").unwrap();
//! let goal = the_context.fresh_atom("goal").unwrap();
//!
//! the_context.add_action(RelaxedAction::new("A", AtomList::new(), AtomList::from_iter([p]), 1.0, 0));
//! the_context.add_action(RelaxedAction::new("B", AtomList::from_iter([p]), AtomList::from_iter([goal]), 2.0, 1));
//! the_context.set_goal(AtomList::from_iter([goal]).into());
//!
//! let the_context = Rc::new(the_context);
//! let mut lm_cut = LmCut::new(the_context.clone());
//!
//! let result = lm_cut.value_and_landmarks(&the_context.empty_state()).unwrap();
//! assert_eq!(result.value, 3.0);
//! assert_eq!(result.cuts, vec![BTreeSet::from([1]), BTreeSet::from([0])]);
//! ```
//!
//! + Cache values of h-add for a planner.
//!
//! ```rust
//! # use std::rc::Rc;
//! # use ssp_relax::config::Config;
//! # use ssp_relax::context::GroundingContext;
//! # use ssp_relax::heuristics::{self, cache::HeuristicValueCache};
//! # use ssp_relax::structures::{action::RelaxedAction, atom_list::AtomList};
//! let mut the_context = GroundingContext::from_config(Config::default());
//! let p = the_context.fresh_atom("p").unwrap();
//! the_context.add_action(RelaxedAction::new("get-p", AtomList::new(), AtomList::from_iter([p]), 4.0, 0));
//! the_context.set_goal(AtomList::from_iter([p]).into());
//! let the_context = Rc::new(the_context);
//!
//! let h_add = heuristics::from_name(&the_context, "h-add").unwrap();
//! let mut cache = HeuristicValueCache::new(the_context.clone(), h_add);
//!
//! let state = the_context.empty_state();
//! assert_eq!(cache.value(&state), Ok(4.0));
//! assert_eq!(cache.value(&state), Ok(4.0));
//! assert_eq!(cache.size(), 1);
//! ```
//!
//! # Errors
//!
//! Errors which may be recovered from, such as an installed [deadline](crate::generic::deadline) passing or a failure to write a dump, are returned as an [ErrorKind](types::err::ErrorKind).
//!
//! Violations of the invariants of the relaxation (such as a disjunctive precondition, or an empty cut) indicate a defect in the grounding which supplied the relaxation.
//! These are logged with the values involved, and then cause a panic.
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout, and a variety of targets are defined in order to help narrow output to relevant parts of the library.
//!
//! The targets are listed in [misc::log].
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//! - Logs of each cut found by LM-cut can be found with `RUST_LOG=landmarks=trace …`
//! - Logs of rehashes of a hash table can be found with `RUST_LOG=hash=debug …`

pub mod config;
pub mod context;
pub mod structures;
pub mod types;

pub mod generic;

pub mod db;

pub mod heuristics;

pub mod misc;
