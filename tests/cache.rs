mod common;

use std::{cell::Cell, rc::Rc};

use ssp_relax::{
    config::Config,
    context::GroundingContext,
    db::hash::ChainedHashTable,
    generic::deadline::CheckLimit,
    heuristics::{cache::HeuristicValueCache, lm_cut::LmCut, Heuristic},
    structures::state::State,
    types::err::{self, ErrorKind},
};

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A heuristic which counts the calls made to the heuristic.
struct Counting {
    calls: Rc<Cell<usize>>,
}

impl Heuristic for Counting {
    fn name(&self) -> &str {
        "counting"
    }

    fn compute_value(&mut self, state: &State) -> Result<f64, ErrorKind> {
        self.calls.set(self.calls.get() + 1);
        Ok(state.atoms().count() as f64 + 0.1)
    }
}

fn wide_context(facts: usize, initial_hash_size: usize) -> Rc<GroundingContext> {
    let mut config = Config::default();
    config.initial_hash_size.set(initial_hash_size).unwrap();
    let mut the_context = GroundingContext::from_config(config);
    for index in 0..facts {
        the_context.fresh_atom(&format!("f{index}")).unwrap();
    }
    Rc::new(the_context)
}

fn random_state(context: &GroundingContext, rng: &mut StdRng) -> State {
    let mut state = context.empty_state();
    for atom in (0..context.atom_count()).step_by(2) {
        if rng.gen_bool(0.3) {
            state.add(atom as u16);
        }
    }
    state
}

mod caching {
    use super::*;

    #[test]
    fn second_value_is_a_lookup() {
        common::init_logger();
        let the_context = wide_context(8, 16);
        let calls = Rc::new(Cell::new(0));
        let mut cache = HeuristicValueCache::new(
            the_context.clone(),
            Counting {
                calls: calls.clone(),
            },
        );

        let state = the_context.state_from_atoms([0, 6, 10]);
        let first = cache.value(&state).unwrap();
        let second = cache.value(&state).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
        assert_eq!(calls.get(), 1);

        let other = the_context.state_from_atoms([2]);
        cache.value(&other).unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.size(), 2);
    }

    #[test]
    fn many_states_through_rehashes() {
        let the_context = wide_context(40, 1);
        let calls = Rc::new(Cell::new(0));
        let mut cache = HeuristicValueCache::new(
            the_context.clone(),
            Counting {
                calls: calls.clone(),
            },
        );
        let mut rng = StdRng::seed_from_u64(7);

        let states = (0..500)
            .map(|_| random_state(&the_context, &mut rng))
            .collect::<Vec<_>>();
        for state in &states {
            cache.value(state).unwrap();
        }
        let computed = calls.get();
        assert_eq!(computed, cache.size());
        assert!(cache.dimension() >= cache.size());

        for state in &states {
            assert_eq!(
                cache.find_value(state),
                Some(state.atoms().count() as f64 + 0.1)
            );
            cache.value(state).unwrap();
        }
        assert_eq!(calls.get(), computed);
    }

    #[test]
    fn abandoned_values_are_not_cached() {
        let mut config = Config::default();
        config.deadline_check_period.set(1).unwrap();
        let the_context = common::chain_problem(config, 5, 20.0);
        let mut cache = HeuristicValueCache::new(the_context.clone(), LmCut::new(the_context.clone()));
        let state = the_context.empty_state();

        assert!(the_context.install_deadline(Rc::new(CheckLimit::new(0))));
        assert!(matches!(cache.value(&state), Err(ErrorKind::Deadline(_))));
        assert_eq!(cache.size(), 0);

        the_context.remove_deadline();
        assert_eq!(cache.value(&state), Ok(5.0));
        assert_eq!(cache.size(), 1);
    }
}

mod table {
    use super::*;

    #[test]
    fn distinct_states_under_forced_rehash() {
        let the_context = wide_context(12, 1);
        let mut table = ChainedHashTable::new(1);
        let mut rng = StdRng::seed_from_u64(2024);

        let mut distinct = Vec::new();
        for _ in 0..400 {
            let state = random_state(&the_context, &mut rng);
            let (key, fresh) = table.insert_with(state.clone(), || distinct.len());
            if fresh {
                distinct.push((state, key));
            }
        }

        assert_eq!(table.len(), distinct.len());
        for (index, (state, key)) in distinct.iter().enumerate() {
            assert_eq!(table.find(state), Some(*key));
            assert_eq!(table.value(*key), Some(&index));
            assert_eq!(table.key(*key), Some(state));
        }
        assert_eq!(table.iter().count(), distinct.len());
    }
}

mod dump {
    use super::*;

    #[test]
    fn one_line_per_state() {
        let the_context = wide_context(3, 16);
        let mut cache = HeuristicValueCache::new(
            the_context.clone(),
            Counting {
                calls: Rc::new(Cell::new(0)),
            },
        );
        cache.value(&the_context.state_from_atoms([0, 4])).unwrap();
        cache.value(&the_context.empty_state()).unwrap();
        cache.update(&the_context.state_from_atoms([2]), 7.0);

        let path = std::env::temp_dir().join(format!("ssp_relax_dump_{}.txt", std::process::id()));
        assert!(cache.dump(&path).is_ok());
        let contents = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut lines = contents.lines().collect::<Vec<_>>();
        lines.sort();
        assert_eq!(lines, vec!["V({f0, f2}) = 2.1", "V({f1}) = 7", "V({}) = 0.1"]);
    }

    #[test]
    fn unopenable_destination() {
        let the_context = wide_context(1, 16);
        let cache = HeuristicValueCache::new(
            the_context.clone(),
            Counting {
                calls: Rc::new(Cell::new(0)),
            },
        );

        let path = std::env::temp_dir()
            .join("ssp_relax_missing_directory")
            .join("dump.txt");
        match cache.dump(&path) {
            Err(ErrorKind::Dump(err::DumpError::Open { .. })) => {}
            other => panic!("Expected a failure to open, found {other:?}"),
        }
    }
}
