/*!
Sorted, duplicate-free lists of atoms, and disjunctions of these.

An [AtomList] is read as a conjunction, e.g. the precondition or add list of a [relaxed action](crate::structures::action).
A [Dnf] is read as a disjunction of conjunctions, e.g. a goal.

Each list is kept sorted and free of duplicates by the methods which extend the list, and so there is no way to build a list which breaks the invariant.

```rust
# use ssp_relax::structures::atom_list::AtomList;
let mut list = AtomList::from_iter([6, 2, 4, 2]);
assert_eq!(list.atoms(), &[2, 4, 6]);

assert!(!list.insert(4));
assert!(list.remove(2));

let other = AtomList::from_iter([4, 8]);
assert_eq!(list.intersection_size(&other), 1);
assert!(!list.empty_intersection(&other));

list.union(&other);
assert_eq!(list.atoms(), &[4, 6, 8]);
```
*/

use crate::structures::{
    atom::{self, Atom},
    state::State,
};

/// A sorted, duplicate-free list of atoms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AtomList {
    atoms: Vec<Atom>,
}

impl AtomList {
    pub fn new() -> Self {
        AtomList::default()
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Atom> {
        self.atoms.iter()
    }

    pub fn find(&self, atom: Atom) -> bool {
        self.atoms.binary_search(&atom).is_ok()
    }

    /// Inserts `atom` at its place in the order, returning true if the atom was not already present.
    pub fn insert(&mut self, atom: Atom) -> bool {
        match self.atoms.binary_search(&atom) {
            Ok(_) => false,
            Err(index) => {
                self.atoms.insert(index, atom);
                true
            }
        }
    }

    /// Removes `atom`, returning true if the atom was present.
    pub fn remove(&mut self, atom: Atom) -> bool {
        match self.atoms.binary_search(&atom) {
            Ok(index) => {
                self.atoms.remove(index);
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear(&mut self) {
        self.atoms.clear()
    }

    /// Keeps only those atoms also in `other`.
    pub fn intersect(&mut self, other: &AtomList) {
        let mut theirs = other.atoms.iter().peekable();
        self.atoms.retain(|atom| {
            while theirs.next_if(|other| *other < atom).is_some() {}
            theirs.peek().is_some_and(|other| *other == atom)
        });
    }

    /// Extends the list with every atom of `other`.
    pub fn union(&mut self, other: &AtomList) {
        let mut merged = Vec::with_capacity(self.atoms.len() + other.atoms.len());
        let (mut mine, mut theirs) = (self.atoms.iter().peekable(), other.atoms.iter().peekable());
        loop {
            let next = match (mine.peek().copied(), theirs.peek().copied()) {
                (Some(a), Some(b)) if a < b => mine.next(),
                (Some(a), Some(b)) if b < a => theirs.next(),
                (Some(_), Some(_)) => {
                    theirs.next();
                    mine.next()
                }
                (Some(_), None) => mine.next(),
                (None, Some(_)) => theirs.next(),
                (None, None) => break,
            };
            if let Some(atom) = next {
                merged.push(*atom);
            }
        }
        self.atoms = merged;
    }

    /// Removes every atom of `other`.
    pub fn difference(&mut self, other: &AtomList) {
        self.atoms.retain(|atom| !other.find(*atom));
    }

    /// The count of atoms in both lists, found by a merge of the lists.
    pub fn intersection_size(&self, other: &AtomList) -> usize {
        let mut count = 0;
        let (mut i, mut j) = (0, 0);
        while i < self.atoms.len() && j < other.atoms.len() {
            match self.atoms[i].cmp(&other.atoms[j]) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    count += 1;
                    i += 1;
                    j += 1;
                }
            }
        }
        count
    }

    pub fn empty_intersection(&self, other: &AtomList) -> bool {
        self.intersection_size(other) == 0
    }

    /// Whether `atom` holds when the list is read as the set of atoms which hold.
    ///
    /// Without negation as failure, an odd atom holds exactly when its complement is absent.
    pub fn holds(&self, atom: Atom, nprec: bool) -> bool {
        match !nprec && atom::is_negation(atom) {
            true => !self.find(atom::complement(atom)),
            false => self.find(atom),
        }
    }

    /// Whether every atom of the list holds in `other`, with `other` read as the set of atoms which hold.
    pub fn holds_in(&self, other: &AtomList, nprec: bool) -> bool {
        self.atoms.iter().all(|atom| other.holds(*atom, nprec))
    }

    /// Whether every atom of the list holds in `state`.
    pub fn holds_in_state(&self, state: &State, nprec: bool) -> bool {
        self.atoms
            .iter()
            .all(|atom| state.holds_literal(*atom, nprec))
    }

    /// Whether the list contains some atom together with its complement.
    pub fn contradiction(&self) -> bool {
        self.atoms
            .windows(2)
            .any(|pair| !atom::is_negation(pair[0]) && pair[1] == atom::complement(pair[0]))
    }
}

impl FromIterator<Atom> for AtomList {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        let mut atoms: Vec<Atom> = iter.into_iter().collect();
        atoms.sort_unstable();
        atoms.dedup();
        AtomList { atoms }
    }
}

impl<'a> IntoIterator for &'a AtomList {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

impl std::fmt::Display for AtomList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, atom) in self.atoms.iter().enumerate() {
            match index {
                0 => write!(f, "{atom}")?,
                _ => write!(f, " {atom}")?,
            }
        }
        write!(f, "]")
    }
}

/// A disjunction of conjunctions of atoms.
///
/// The empty disjunction never holds, while a disjunction containing the empty conjunction always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dnf {
    clauses: Vec<AtomList>,
}

impl Dnf {
    pub fn new() -> Self {
        Dnf::default()
    }

    /// The disjunction of exactly one conjunction.
    pub fn conjunction(list: AtomList) -> Self {
        Dnf {
            clauses: vec![list],
        }
    }

    pub fn push(&mut self, clause: AtomList) {
        self.clauses.push(clause)
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn clauses(&self) -> &[AtomList] {
        &self.clauses
    }

    /// The single conjunction of the disjunction, if the disjunction is a single conjunction.
    pub fn as_conjunction(&self) -> Option<&AtomList> {
        match self.clauses.as_slice() {
            [clause] => Some(clause),
            _ => None,
        }
    }

    /// Whether some conjunction holds in `state`.
    pub fn holds(&self, state: &State, nprec: bool) -> bool {
        self.clauses
            .iter()
            .any(|clause| clause.holds_in_state(state, nprec))
    }
}

impl From<AtomList> for Dnf {
    fn from(list: AtomList) -> Self {
        Dnf::conjunction(list)
    }
}

impl std::fmt::Display for Dnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, clause) in self.clauses.iter().enumerate() {
            match index {
                0 => write!(f, "{clause}")?,
                _ => write!(f, " | {clause}")?,
            }
        }
        Ok(())
    }
}
