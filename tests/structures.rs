mod common;

use std::{collections::BTreeSet, rc::Rc};

use rand::{rngs::StdRng, Rng, SeedableRng};
use ssp_relax::{
    config::Config,
    context::GroundingContext,
    generic::numeric::UNREACHABLE,
    heuristics::propagation::{Aggregation, RelaxedCostPropagator},
    structures::{
        action::RelaxedAction,
        atom::{self, Atom},
        atom_list::AtomList,
        bitset::Bitset,
        state::State,
    },
};

mod bits {
    use super::*;

    #[test]
    fn iteration_is_complete_and_ordered() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..200 {
            let width = rng.gen_range(0..300);
            let density = rng.gen_range(0.0..1.0);

            let mut state = State::empty(width);
            let mut expected = BTreeSet::new();
            for atom in 0..width {
                if rng.gen_bool(density) {
                    state.add(atom as Atom);
                    expected.insert(atom as Atom);
                }
            }

            let mut atoms = state.atoms();
            let mut seen = Vec::new();
            while !atoms.is_end() {
                let atom = atoms.position() as Atom;
                assert!(state.holds(atom));
                seen.push(atom);
                atoms.advance();
            }
            assert_eq!(atoms.position(), state.word_count() * 32);

            assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
            assert_eq!(seen, expected.into_iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn sparse_and_dense_words() {
        let mut bits = Bitset::new(320);
        bits.insert(0);
        bits.insert(319);
        assert_eq!(bits.ones().collect::<Vec<_>>(), vec![0, 319]);

        bits.set_all();
        assert_eq!(bits.ones().count(), 320);
        assert!(bits.ones().enumerate().all(|(index, bit)| index == bit));
    }
}

mod negation {
    use super::*;

    #[test]
    fn odd_atoms_hold_exactly_when_even_atoms_do_not() {
        let mut rng = StdRng::seed_from_u64(5);
        let facts = 50;
        let mut state = State::empty(2 * facts);
        for fact in 0..facts {
            if rng.gen_bool(0.5) {
                state.add(atom::positive(fact as u16));
            }
        }

        for fact in 0..facts as u16 {
            let positive = atom::positive(fact);
            let negative = atom::negative(fact);
            assert_eq!(
                state.holds_literal(negative, false),
                !state.holds_literal(positive, false)
            );
        }
    }

    #[test]
    fn goals_with_negations() {
        let mut config = Config::default();
        config.nprec.set(false).unwrap();
        let mut the_context = GroundingContext::from_config(config);
        let p = the_context.fresh_atom("p").unwrap();
        let q = the_context.fresh_atom("q").unwrap();
        let not_p = the_context.atom("not p").unwrap();
        the_context.set_goal(AtomList::from_iter([not_p, q]).into());

        let nprec = the_context.config.nprec.value;
        assert!(the_context.goal().holds(&the_context.state_from_atoms([q]), nprec));
        assert!(!the_context.goal().holds(&the_context.state_from_atoms([p, q]), nprec));
    }
}

mod lists {
    use super::*;

    #[test]
    fn sorted_and_unique_under_random_churn() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut list = AtomList::new();
        let mut model = BTreeSet::new();

        for _ in 0..2000 {
            let atom: Atom = rng.gen_range(0..64);
            match rng.gen_bool(0.6) {
                true => assert_eq!(list.insert(atom), model.insert(atom)),
                false => assert_eq!(list.remove(atom), model.remove(&atom)),
            }
        }
        assert_eq!(list.atoms(), model.into_iter().collect::<Vec<_>>().as_slice());
    }
}

mod propagation {
    use super::*;

    #[test]
    fn lower_costs_never_raise_atom_costs() {
        let the_context = common::chain_problem(Config::default(), 6, 4.0);
        let mut propagator = RelaxedCostPropagator::new(&the_context, Aggregation::Sum);
        let state = the_context.empty_state();
        let epsilon = the_context.config.epsilon.value;

        let mut costs = the_context
            .actions()
            .iter()
            .map(|action| action.cost)
            .collect::<Vec<_>>();
        propagator.compute(&state, &costs, None);
        let mut previous = propagator.atom_costs().to_vec();

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let action = rng.gen_range(0..costs.len());
            costs[action] /= 2.0;
            propagator.compute(&state, &costs, None);

            // Within the tolerance of comparisons.
            for (atom, (before, after)) in previous.iter().zip(propagator.atom_costs()).enumerate() {
                assert!(*after <= before + epsilon, "atom {atom} rose from {before} to {after}");
            }
            previous = propagator.atom_costs().to_vec();
        }
    }

    #[test]
    fn halving_the_shortcut() {
        let the_context = common::chain_problem(Config::default(), 6, 8.0);
        let mut propagator = RelaxedCostPropagator::new(&the_context, Aggregation::Max);
        let state = the_context.empty_state();
        let goal = the_context.goal().as_conjunction().unwrap().clone();

        let mut costs = the_context
            .actions()
            .iter()
            .map(|action| action.cost)
            .collect::<Vec<_>>();
        propagator.compute(&state, &costs, None);
        assert_eq!(propagator.aggregate(&goal), 6.0);

        let shortcut = costs.len() - 1;
        costs[shortcut] /= 2.0;
        propagator.compute(&state, &costs, None);
        assert_eq!(propagator.aggregate(&goal), 5.0);
        assert_eq!(propagator.supporter(10), Some(shortcut));
    }

    #[test]
    fn negative_atoms_unused_with_negation_as_failure() {
        let mut the_context = GroundingContext::from_config(Config::default());
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

        let mut propagator = RelaxedCostPropagator::new(&the_context, Aggregation::Max);
        propagator.compute(&the_context.empty_state(), &[1.0], None);
        assert_eq!(propagator.atom_costs()[not_p as usize], UNREACHABLE);
        assert_eq!(propagator.atom_costs()[q as usize], UNREACHABLE);
        assert_eq!(propagator.atom_costs()[p as usize], UNREACHABLE);
    }
}
