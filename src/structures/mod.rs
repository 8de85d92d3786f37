//! Key structures, such as atoms, states, and relaxed actions.
//!
//! # Atoms and their negations
//!
//! Each fact of a problem is given a pair of [atom] codes, the first for the fact and the second for the negation of the fact.
//! Whether the second code of a pair is meaningful depends on whether negation is read as failure, see [nprec](crate::config::Config::nprec).
//!
//! # States
//!
//! A [state] is the set of atoms which hold, stored as a [bitset] fixed in width by the [context](crate::context) of a problem.
//!
//! # Conditions
//!
//! Preconditions, add lists, and goals are built from [atom lists](atom_list), which are sorted and free of duplicates. \
//! A goal (or precondition) may be a disjunction of atom lists, though the relaxation heuristics require a single conjunction.

pub mod action;
pub mod atom;
pub mod atom_list;
pub mod bitset;
pub mod state;
