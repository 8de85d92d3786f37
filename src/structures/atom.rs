/*!
(The internal representation of) an atom.

Atoms are the grounded propositions of a problem, numbered densely from zero.
Each proposition (or 'fact') *k* is given two adjacent codes:
- The even code *2k*, which holds when fact *k* holds.
- The odd code *2k + 1*, which holds when fact *k* does not hold.

Whether the odd codes are meaningful depends on the `nprec` [configuration](crate::config::Config::nprec) of a problem:
- With negation as failure (`nprec` true) only even codes are used and iteration over the atom universe steps by two.
- Otherwise, an odd code is the (explicit) negation of the even code before it.

```rust
# use ssp_relax::structures::atom::{self, Atom};
let p: Atom = atom::positive(3);
let not_p = atom::negative(3);

assert_eq!(p, 6);
assert_eq!(not_p, 7);
assert_eq!(atom::complement(p), not_p);
assert_eq!(atom::complement(not_p), p);
assert!(atom::is_negation(not_p));
assert_eq!(atom::fact(not_p), 3);
```

Atoms are 16-bit, and so may be used as indicies of a structure (`atom as usize`) without taking too much space.
*/

/// An atom code.
pub type Atom = u16;

/// The maximum instance of an atom.
pub const ATOM_MAX: Atom = Atom::MAX;

/// The code of the positive atom for `fact`.
#[inline]
pub fn positive(fact: u16) -> Atom {
    fact << 1
}

/// The code of the negation of the atom for `fact`.
#[inline]
pub fn negative(fact: u16) -> Atom {
    (fact << 1) | 1
}

/// Whether the code denotes the negation of some fact.
#[inline]
pub fn is_negation(atom: Atom) -> bool {
    atom % 2 == 1
}

/// The code of the atom with the opposite polarity, for the same fact.
#[inline]
pub fn complement(atom: Atom) -> Atom {
    atom ^ 1
}

/// The fact an atom code is for.
#[inline]
pub fn fact(atom: Atom) -> u16 {
    atom >> 1
}
