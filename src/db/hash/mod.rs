/*!
A hash table with chained buckets.

The table maps keys (typically [states](crate::structures::state)) to some mutable payload, and is designed for the churn of a search: many lookups, many inserts, and no removals.

# Storage

Entries are stored in a [SlotMap], and each bucket is the head of an intrusive chain of [EntryKey]s through the entries.
So:
- An entry is allocated once, when the key is inserted, and is never moved or copied by the table after.
- An [EntryKey] remains valid across any number of rehashes, and until the table is [cleared](ChainedHashTable::clear) or dropped.
- The table owns every entry, and dropping the table drops each entry.

# Buckets

The number of buckets (the dimension of the table) is always prime, and the bucket of a key is the [digest](HashKey::digest) of the key modulo the dimension.
New entries are appended to the tail of the chain of their bucket.

Whenever the count of entries exceeds the dimension the table is rehashed to the least prime at least twice the dimension.
A rehash relinks each entry into the new buckets, visiting the old buckets in order, and so the relative order of entries within a chain is kept.

```rust
# use ssp_relax::db::hash::{ChainedHashTable, HashKey};
# #[derive(PartialEq, Eq)]
# struct Key(u64);
# impl HashKey for Key {
#     fn digest(&self) -> u64 { self.0 }
# }
let mut table = ChainedHashTable::new(2);
assert_eq!(table.dimension(), 2);

let (first, fresh) = table.insert_with(Key(7), || "seven");
assert!(fresh);
table.insert_with(Key(8), || "eight");
table.insert_with(Key(9), || "nine");
assert_eq!(table.dimension(), 5);

let (again, fresh) = table.insert_with(Key(7), || "not seven");
assert!(!fresh);
assert_eq!(first, again);
assert_eq!(table.value(first), Some(&"seven"));
assert_eq!(table.len(), 3);
```
*/

use slotmap::{new_key_type, SlotMap};

use crate::{
    generic::prime::next_prime,
    misc::log::targets::{self},
    structures::state::State,
};

new_key_type! {
    /// A key to an entry of a [ChainedHashTable], stable across rehashes.
    pub struct EntryKey;
}

/// Keys of a [ChainedHashTable].
///
/// Equal keys must have equal digests.
pub trait HashKey: Eq {
    /// A digest of the key.
    fn digest(&self) -> u64;
}

impl HashKey for State {
    fn digest(&self) -> u64 {
        State::digest(self)
    }
}

struct Entry<K, V> {
    key: K,
    value: V,

    /// The next entry in the chain of the bucket of the entry.
    next: Option<EntryKey>,
}

/// A hash table with chained buckets, a prime number of buckets, and stable entries.
pub struct ChainedHashTable<K: HashKey, V> {
    entries: SlotMap<EntryKey, Entry<K, V>>,

    /// The head of the chain of each bucket.
    buckets: Vec<Option<EntryKey>>,
}

impl<K: HashKey, V> ChainedHashTable<K, V> {
    /// A table with at least `dimension` buckets.
    pub fn new(dimension: usize) -> Self {
        ChainedHashTable {
            entries: SlotMap::with_key(),
            buckets: vec![None; next_prime(dimension)],
        }
    }

    /// A count of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A count of buckets.
    pub fn dimension(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_of(&self, key: &K) -> usize {
        (key.digest() % self.buckets.len() as u64) as usize
    }

    /// The entry of `key`, if present.
    pub fn find(&self, key: &K) -> Option<EntryKey> {
        let mut link = self.buckets[self.bucket_of(key)];
        while let Some(entry_key) = link {
            let entry = &self.entries[entry_key];
            if entry.key == *key {
                return Some(entry_key);
            }
            link = entry.next;
        }
        None
    }

    /// The entry of `key`, inserting `key` with the value of `value` if not present.
    ///
    /// Returns the entry, together with true if the entry is fresh.
    /// The value function is called only if the key is fresh.
    pub fn insert_with(&mut self, key: K, value: impl FnOnce() -> V) -> (EntryKey, bool) {
        let bucket = self.bucket_of(&key);

        let mut tail = None;
        let mut link = self.buckets[bucket];
        while let Some(entry_key) = link {
            let entry = &self.entries[entry_key];
            if entry.key == key {
                return (entry_key, false);
            }
            tail = Some(entry_key);
            link = entry.next;
        }

        let fresh_key = self.entries.insert(Entry {
            key,
            value: value(),
            next: None,
        });

        match tail {
            Some(tail_key) => self.entries[tail_key].next = Some(fresh_key),
            None => self.buckets[bucket] = Some(fresh_key),
        }

        if self.entries.len() > self.buckets.len() {
            self.rehash(next_prime(2 * self.buckets.len()));
        }

        (fresh_key, true)
    }

    /// The entry of `key`, inserting `key` with the default value if not present.
    pub fn insert(&mut self, key: K) -> (EntryKey, bool)
    where
        V: Default,
    {
        self.insert_with(key, V::default)
    }

    /// Relinks every entry into `dimension` buckets.
    fn rehash(&mut self, dimension: usize) {
        log::debug!(target: targets::HASH, "Rehash from {} to {dimension} buckets with {} entries", self.buckets.len(), self.entries.len());

        let old_buckets = std::mem::replace(&mut self.buckets, vec![None; dimension]);
        let mut tails: Vec<Option<EntryKey>> = vec![None; dimension];

        for head in old_buckets {
            let mut link = head;
            while let Some(entry_key) = link {
                let entry = &mut self.entries[entry_key];
                link = entry.next.take();

                let bucket = (entry.key.digest() % dimension as u64) as usize;
                match tails[bucket] {
                    Some(tail_key) => self.entries[tail_key].next = Some(entry_key),
                    None => self.buckets[bucket] = Some(entry_key),
                }
                tails[bucket] = Some(entry_key);
            }
        }
    }

    pub fn key(&self, entry: EntryKey) -> Option<&K> {
        self.entries.get(entry).map(|entry| &entry.key)
    }

    pub fn value(&self, entry: EntryKey) -> Option<&V> {
        self.entries.get(entry).map(|entry| &entry.value)
    }

    pub fn value_mut(&mut self, entry: EntryKey) -> Option<&mut V> {
        self.entries.get_mut(entry).map(|entry| &mut entry.value)
    }

    /// The length of the longest chain.
    pub fn diameter(&self) -> usize {
        self.buckets
            .iter()
            .map(|head| {
                let mut length = 0;
                let mut link = *head;
                while let Some(entry_key) = link {
                    length += 1;
                    link = self.entries[entry_key].next;
                }
                length
            })
            .max()
            .unwrap_or(0)
    }

    /// Removes every entry, keeping the dimension of the table.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets.iter_mut().for_each(|head| *head = None);
    }

    /// The entries of the table in bucket order, and chain order within a bucket.
    pub fn iter(&self) -> Entries<'_, K, V> {
        Entries {
            table: self,
            bucket: 0,
            link: None,
        }
    }
}

/// An iterator over the entries of a [ChainedHashTable].
pub struct Entries<'a, K: HashKey, V> {
    table: &'a ChainedHashTable<K, V>,
    bucket: usize,
    link: Option<EntryKey>,
}

impl<'a, K: HashKey, V> Iterator for Entries<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.link.is_none() {
            let head = self.table.buckets.get(self.bucket)?;
            self.link = *head;
            self.bucket += 1;
        }
        let entry_key = self.link?;
        let entry = &self.table.entries[entry_key];
        self.link = entry.next;
        Some((&entry.key, &entry.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    struct Collide(u64, u64);

    // Every key lands in the same bucket.
    impl HashKey for Collide {
        fn digest(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn chains_append_at_tail() {
        let mut table = ChainedHashTable::new(100);
        for index in 0..5 {
            table.insert_with(Collide(3, index), || index);
        }
        assert_eq!(table.diameter(), 5);
        let order = table.iter().map(|(_, v)| *v).collect::<Vec<_>>();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn entries_survive_rehash() {
        let mut table = ChainedHashTable::new(1);
        let mut keys = Vec::new();
        for index in 0..50_u64 {
            let (key, fresh) = table.insert_with(Collide(index * 7, index), || index);
            assert!(fresh);
            keys.push(key);
        }
        assert!(table.dimension() >= table.len());

        for (index, key) in keys.iter().enumerate() {
            assert_eq!(table.value(*key), Some(&(index as u64)));
            assert_eq!(table.find(&Collide(index as u64 * 7, index as u64)), Some(*key));
        }
    }

    #[test]
    fn duplicate_inserts() {
        let mut table: ChainedHashTable<Collide, u32> = ChainedHashTable::new(7);
        let (first, fresh) = table.insert(Collide(4, 4));
        assert!(fresh);
        if let Some(value) = table.value_mut(first) {
            *value = 10;
        }
        let (again, fresh) = table.insert(Collide(4, 4));
        assert!(!fresh);
        assert_eq!(first, again);
        assert_eq!(table.value(again), Some(&10));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn clear() {
        let mut table = ChainedHashTable::new(3);
        let (key, _) = table.insert_with(Collide(1, 1), || ());
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.find(&Collide(1, 1)), None);
        assert_eq!(table.value(key), None);
        assert_eq!(table.iter().count(), 0);
    }
}
