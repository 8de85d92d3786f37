//! Generic structures and functions, used by but independent of the relaxation heuristics.

pub mod deadline;
pub mod numeric;
pub mod prime;
