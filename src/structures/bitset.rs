/*!
A fixed width set of bits, stored as an array of 32-bit words.

Bit *i* is stored in word *i / 32* at position *i % 32*, so word 0 contains bits 0 to 31 as |31|30|...|1|0|.

The set is used to represent [states](crate::structures::state) over the atom universe, and by [LM-cut](crate::heuristics::lm_cut) for sets of actions and atoms.

# Iteration

Iteration over the set bits is through [Ones], which moves from one set bit to the next without re-scanning from the start:
- Words which are entirely zero are skipped.
- Within a non-zero word the next bit is found by shifting away the bits already seen and counting trailing zeros.

So, each advance is amortized constant time.
An iterator over a set with no bits is immediately at the end sentinel, which is the bit width of the set (the count of words, times 32).

```rust
# use ssp_relax::structures::bitset::Bitset;
let mut bits = Bitset::new(70);
assert!(bits.insert(3));
assert!(bits.insert(64));
assert!(!bits.insert(3));

let mut ones = bits.ones();
assert_eq!(ones.position(), 3);
ones.advance();
assert_eq!(ones.position(), 64);
ones.advance();
assert!(ones.is_end());
assert_eq!(ones.position(), 96);

assert_eq!(bits.ones().collect::<Vec<_>>(), vec![3, 64]);
```
*/

/// The number of bits in a word.
pub const WORD_BITS: usize = 32;

/// A fixed width set of bits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bitset {
    /// The count of meaningful bits, which may be less than the capacity of the words.
    len: usize,

    words: Box<[u32]>,
}

impl Bitset {
    /// A set of `len` bits, all unset.
    pub fn new(len: usize) -> Self {
        Bitset {
            len,
            words: vec![0; len.div_ceil(WORD_BITS)].into_boxed_slice(),
        }
    }

    /// The count of meaningful bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The count of words used to store the bits.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// The capacity of the words, which is also the end sentinel of iteration.
    pub fn bit_width(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    #[inline]
    pub fn contains(&self, bit: usize) -> bool {
        self.words[bit / WORD_BITS] & (1 << (bit % WORD_BITS)) != 0
    }

    /// Sets `bit`, returning true if the bit was not already set.
    #[inline]
    pub fn insert(&mut self, bit: usize) -> bool {
        let word = &mut self.words[bit / WORD_BITS];
        let mask = 1 << (bit % WORD_BITS);
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    /// Unsets `bit`, returning true if the bit was set.
    #[inline]
    pub fn remove(&mut self, bit: usize) -> bool {
        let word = &mut self.words[bit / WORD_BITS];
        let mask = 1 << (bit % WORD_BITS);
        let present = *word & mask != 0;
        *word &= !mask;
        present
    }

    /// Sets each of the meaningful bits.
    pub fn set_all(&mut self) {
        self.words.iter_mut().for_each(|word| *word = u32::MAX);
        let tail = self.len % WORD_BITS;
        if tail != 0 {
            if let Some(last) = self.words.last_mut() {
                *last = (1 << tail) - 1;
            }
        }
    }

    /// Unsets every bit.
    pub fn clear_all(&mut self) {
        self.words.iter_mut().for_each(|word| *word = 0);
    }

    /// Whether some bit is set in both sets.
    pub fn intersects(&self, other: &Bitset) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    /// Keeps only those bits which are also set in `other`.
    pub fn and_assign(&mut self, other: &Bitset) {
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a &= b;
        }
    }

    /// A count of set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    /// An iterator over the set bits, in increasing order.
    pub fn ones(&self) -> Ones<'_> {
        Ones::first(&self.words)
    }
}

impl std::fmt::Debug for Bitset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.ones()).finish()
    }
}

/// An iterator over the set bits of some words.
///
/// The iterator is always positioned on a set bit, or at the end sentinel.
#[derive(Clone)]
pub struct Ones<'a> {
    words: &'a [u32],
    position: usize,
}

impl<'a> Ones<'a> {
    /// An iterator positioned at the lowest set bit of `words`.
    pub fn first(words: &'a [u32]) -> Self {
        let mut ones = Ones { words, position: 0 };
        ones.position = ones.seek_from_word(0);
        ones
    }

    /// The current position, which is the end sentinel once every set bit has been visited.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The end sentinel.
    pub fn end(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.end()
    }

    /// Moves to the next set bit strictly after the current position, or the end sentinel.
    pub fn advance(&mut self) {
        if self.is_end() {
            return;
        }
        let index = self.position / WORD_BITS;
        let offset = self.position % WORD_BITS;

        if offset + 1 < WORD_BITS {
            let rest = self.words[index] >> (offset + 1);
            if rest != 0 {
                self.position += 1 + rest.trailing_zeros() as usize;
                return;
            }
        }
        self.position = self.seek_from_word(index + 1);
    }

    /// The lowest set bit in a word at or after `index`, or the end sentinel.
    fn seek_from_word(&self, index: usize) -> usize {
        match self.words[index.min(self.words.len())..]
            .iter()
            .position(|word| *word != 0)
        {
            Some(skip) => {
                let index = index + skip;
                index * WORD_BITS + self.words[index].trailing_zeros() as usize
            }
            None => self.end(),
        }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        match self.is_end() {
            true => None,
            false => {
                let here = self.position;
                self.advance();
                Some(here)
            }
        }
    }
}
