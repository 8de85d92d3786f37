/*!
A state, as the set of atoms which hold.

A state is a [Bitset] over the atom universe of some [grounding context](crate::context::GroundingContext), one bit per atom code.
The width of a state is fixed by the context when the first state is created, and every state of a context has the same width.

States are cheap values: a clone is a copy of the words.

# Hashing

The digest of a state is a MetroHash128 of the words, with the two 64-bit halves XOR-folded to a single word.
Equal states have equal digests, and so [State] implements [Hash] through the digest.
The digest is deterministic across runs, which keeps the order of entries in a [hash table](crate::db::hash) reproducible.

# Negation

Only the atoms which hold are stored.
Whether an odd (negated) atom holds depends on the interpretation of negation, see [holds_literal](State::holds_literal).
*/

use std::hash::Hasher;

use metrohash::MetroHash128;

use crate::structures::{
    atom::{self, Atom},
    bitset::{Bitset, Ones},
};

/// The set of atoms which hold.
#[derive(Clone, PartialEq, Eq)]
pub struct State {
    bits: Bitset,
}

impl State {
    /// A state over `atom_count` atom codes, in which no atom holds.
    ///
    /// Outside of tests, states should be created through a [grounding context](crate::context::GroundingContext::empty_state), which fixes the width of states.
    pub fn empty(atom_count: usize) -> Self {
        State {
            bits: Bitset::new(atom_count),
        }
    }

    /// The count of atom codes the state is over.
    pub fn atom_count(&self) -> usize {
        self.bits.len()
    }

    pub fn word_count(&self) -> usize {
        self.bits.word_count()
    }

    pub fn words(&self) -> &[u32] {
        self.bits.words()
    }

    pub fn bits(&self) -> &Bitset {
        &self.bits
    }

    /// Whether `atom` is in the state.
    #[inline]
    pub fn holds(&self, atom: Atom) -> bool {
        self.bits.contains(atom as usize)
    }

    /// Whether `atom` holds, with odd atoms interpreted by `nprec`.
    ///
    /// - With negation as failure (`nprec` true) the state is read directly.
    /// - Otherwise, an odd atom holds exactly when its (even) complement does not.
    #[inline]
    pub fn holds_literal(&self, atom: Atom, nprec: bool) -> bool {
        match !nprec && atom::is_negation(atom) {
            true => !self.holds(atom::complement(atom)),
            false => self.holds(atom),
        }
    }

    /// Adds `atom` to the state, returning true if the atom did not already hold.
    #[inline]
    pub fn add(&mut self, atom: Atom) -> bool {
        self.bits.insert(atom as usize)
    }

    /// Removes `atom` from the state, returning true if the atom held.
    #[inline]
    pub fn clear(&mut self, atom: Atom) -> bool {
        self.bits.remove(atom as usize)
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// The atoms of the state, in increasing order.
    pub fn atoms(&self) -> StateAtoms<'_> {
        StateAtoms {
            ones: self.bits.ones(),
        }
    }

    /// A word digest of the state.
    pub fn digest(&self) -> u64 {
        let mut hasher = MetroHash128::default();
        for word in self.bits.words() {
            hasher.write_u32(*word);
        }
        let (high, low) = hasher.finish128();
        high ^ low
    }
}

impl std::hash::Hash for State {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.digest())
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.atoms()).finish()
    }
}

/// The atoms of a state, in increasing order.
///
/// A thin wrapper around [Ones], which also exposes the [first](StateAtoms::position) and [advance](StateAtoms::advance) interface.
#[derive(Clone)]
pub struct StateAtoms<'a> {
    ones: Ones<'a>,
}

impl StateAtoms<'_> {
    /// The current atom, or the end sentinel.
    pub fn position(&self) -> usize {
        self.ones.position()
    }

    pub fn is_end(&self) -> bool {
        self.ones.is_end()
    }

    pub fn end(&self) -> usize {
        self.ones.end()
    }

    pub fn advance(&mut self) {
        self.ones.advance()
    }
}

impl Iterator for StateAtoms<'_> {
    type Item = Atom;

    fn next(&mut self) -> Option<Self::Item> {
        self.ones.next().map(|bit| bit as Atom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state() {
        let state = State::empty(70);
        assert_eq!(state.word_count(), 3);
        let atoms = state.atoms();
        assert!(atoms.is_end());
        assert_eq!(atoms.position(), 96);
    }

    #[test]
    fn add_and_clear() {
        let mut state = State::empty(64);
        assert!(state.add(10));
        assert!(!state.add(10));
        assert!(state.holds(10));
        assert!(state.clear(10));
        assert!(!state.clear(10));
        assert!(state.is_empty());
    }

    #[test]
    fn digest_follows_equality() {
        let mut a = State::empty(100);
        let mut b = State::empty(100);
        for atom in [2, 40, 98] {
            a.add(atom);
        }
        for atom in [98, 2, 40] {
            b.add(atom);
        }
        assert_eq!(a, b);
        assert_eq!(a.digest(), b.digest());

        b.add(0);
        assert_ne!(a, b);
        assert_ne!(a.digest(), b.digest());
    }

    #[test]
    fn negation_convention() {
        let mut state = State::empty(8);
        state.add(2);
        for fact in 0..4 {
            let positive = atom::positive(fact);
            let negative = atom::negative(fact);
            assert_eq!(state.holds_literal(negative, false), !state.holds(positive));
            assert_eq!(state.holds_literal(negative, true), state.holds(negative));
        }
    }
}
