#![allow(dead_code)]

use std::rc::Rc;

use ssp_relax::{
    config::Config,
    context::GroundingContext,
    structures::{action::RelaxedAction, atom::Atom, atom_list::AtomList},
};

/// Installs a logger for the test, if no logger is installed.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn list(atoms: &[Atom]) -> AtomList {
    AtomList::from_iter(atoms.iter().copied())
}

/// The problem with atoms p, q, and goal, and actions A: {} → {p} (cost 1) and B: {p} → {goal} (cost 2).
///
/// A is original action 0, and B is original action 1.
pub fn toy_problem() -> Rc<GroundingContext> {
    let mut the_context = GroundingContext::from_config(Config::default());
    let p = the_context.fresh_atom("p").unwrap();
    let _q = the_context.fresh_atom("q").unwrap();
    let goal = the_context.fresh_atom("goal").unwrap();

    the_context.add_action(RelaxedAction::new("A", list(&[]), list(&[p]), 1.0, 0));
    the_context.add_action(RelaxedAction::new("B", list(&[p]), list(&[goal]), 2.0, 1));
    the_context.set_goal(list(&[goal]).into());
    Rc::new(the_context)
}

/// A chain of `length` facts f0 → f1 → … with the last fact as the goal, each step costing one.
/// Also, a shortcut from f0 to the goal costing `shortcut`.
pub fn chain_problem(config: Config, length: u16, shortcut: f64) -> Rc<GroundingContext> {
    let mut the_context = GroundingContext::from_config(config);
    let facts = (0..length)
        .map(|index| the_context.fresh_atom(&format!("f{index}")).unwrap())
        .collect::<Vec<_>>();

    the_context.add_action(RelaxedAction::new("start", list(&[]), list(&[facts[0]]), 1.0, 0));
    for (index, pair) in facts.windows(2).enumerate() {
        the_context.add_action(RelaxedAction::new(
            format!("step-{index}"),
            list(&[pair[0]]),
            list(&[pair[1]]),
            1.0,
            index as u32 + 1,
        ));
    }
    let last = facts[facts.len() - 1];
    the_context.add_action(RelaxedAction::new("shortcut", list(&[facts[0]]), list(&[last]), shortcut, length as u32));
    the_context.set_goal(list(&[last]).into());
    Rc::new(the_context)
}
