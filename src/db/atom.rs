/*!
A database of atom names.

Each fact is registered once, by name, and is given a pair of [atom](crate::structures::atom) codes.
The name of the first code is the name of the fact, and the name of the second is the name prefixed by `not `.

```rust
# use ssp_relax::db::atom::AtomDB;
let mut atom_db = AtomDB::default();
let p = atom_db.fresh_atom("p").unwrap();
let q = atom_db.fresh_atom("q").unwrap();

assert_eq!((p, q), (0, 2));
assert_eq!(atom_db.atom("not q"), Some(3));
assert_eq!(atom_db.name(1), Some("not p"));
assert_eq!(atom_db.count(), 4);
assert!(atom_db.fresh_atom("p").is_err());
```
*/

use metrohash::MetroHashMap;

use crate::{
    misc::log::targets::{self},
    structures::atom::{self, Atom, ATOM_MAX},
    types::err::{self},
};

/// The prefix of the name of a negated atom.
pub const NEGATION_PREFIX: &str = "not ";

/// Names of atoms, both ways.
#[derive(Default)]
pub struct AtomDB {
    /// The name of each atom, indexed by atom code.
    names: Vec<String>,

    codes: MetroHashMap<String, Atom>,
}

impl AtomDB {
    /// Registers a fresh fact with the given name and returns the (positive) atom for the fact.
    pub fn fresh_atom(&mut self, name: &str) -> Result<Atom, err::AtomDBError> {
        if self.codes.contains_key(name) {
            log::warn!(target: targets::GROUNDING, "Duplicate atom name: {name}");
            return Err(err::AtomDBError::Duplicate(name.to_owned()));
        }

        // The pair of codes must both be representable.
        let fact = match u16::try_from(self.names.len() / 2) {
            Ok(fact) if (self.names.len() + 1) <= ATOM_MAX as usize => fact,
            _ => return Err(err::AtomDBError::AtomsExhausted),
        };

        let positive = atom::positive(fact);
        let negative = atom::negative(fact);
        let negated_name = format!("{NEGATION_PREFIX}{name}");

        self.names.push(name.to_owned());
        self.names.push(negated_name.clone());
        self.codes.insert(name.to_owned(), positive);
        self.codes.insert(negated_name, negative);

        log::trace!(target: targets::GROUNDING, "Atom {positive}: {name}");
        Ok(positive)
    }

    /// The atom with the given name, if any.
    pub fn atom(&self, name: &str) -> Option<Atom> {
        self.codes.get(name).copied()
    }

    /// The name of the given atom, if any.
    pub fn name(&self, atom: Atom) -> Option<&str> {
        self.names.get(atom as usize).map(String::as_str)
    }

    /// A count of atom codes, which is always twice the count of facts.
    pub fn count(&self) -> usize {
        self.names.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exhaustion() {
        let mut atom_db = AtomDB::default();
        let facts = (ATOM_MAX as usize + 1) / 2;
        for index in 0..facts {
            assert!(atom_db.fresh_atom(&format!("f{index}")).is_ok());
        }
        assert_eq!(atom_db.count(), ATOM_MAX as usize + 1);
        assert_eq!(
            atom_db.fresh_atom("one-too-many"),
            Err(err::AtomDBError::AtomsExhausted)
        );
    }
}
