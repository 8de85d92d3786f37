//! Databases for holding information relevant to a problem.
//!
//! - [The atom database](crate::db::atom)
//!   + The names of atoms, and the atom code of each name.
//! - [The chained hash table](crate::db::hash)
//!   + A generic table, used to cache heuristic values by state.

pub mod atom;
pub mod hash;
