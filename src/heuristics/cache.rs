/*!
A cache of heuristic values, by state.

Planners which revisit states (e.g. trial based planners) ask the cache for the [value](HeuristicValueCache::value) of a state.
On the first request for a state the value is computed by the underlying heuristic, capped by the dead end value, and stored in a [ChainedHashTable].
Every later request for the state is a lookup.

Planners which revise the values of states (e.g. through Bellman backups) may also [update](HeuristicValueCache::update) the value of a state, again capped by the dead end value.

For inspection, the contents of a cache may be [dumped](HeuristicValueCache::dump) with one line per state, e.g.:

```text
V({p, q}) = 3
V({}) = 5
```

The dump is intended for a human reader, and is not a stable format.
*/

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    rc::Rc,
};

use crate::{
    context::GroundingContext,
    db::hash::ChainedHashTable,
    heuristics::Heuristic,
    misc::log::targets::{self},
    structures::state::State,
    types::err::{self, ErrorKind},
};

/// A cache of values from some heuristic.
pub struct HeuristicValueCache<H: Heuristic = Box<dyn Heuristic>> {
    context: Rc<GroundingContext>,

    heuristic: H,

    table: ChainedHashTable<State, f64>,

    dead_end_value: f64,

    /// A count of calls to [update](HeuristicValueCache::update).
    updates: usize,
}

impl<H: Heuristic> HeuristicValueCache<H> {
    /// A cache of values from `heuristic`, with a table sized by the configuration of `context`.
    pub fn new(context: Rc<GroundingContext>, heuristic: H) -> Self {
        HeuristicValueCache {
            table: ChainedHashTable::new(context.config.initial_hash_size.value),
            dead_end_value: context.config.dead_end_value.value,
            updates: 0,
            heuristic,
            context,
        }
    }

    /// The value of `state`, computed by the heuristic on the first request for the state.
    ///
    /// If the heuristic fails the state is not cached, and the error is returned.
    pub fn value(&mut self, state: &State) -> Result<f64, ErrorKind> {
        if let Some(value) = self.find_value(state) {
            return Ok(value);
        }

        let value = self.heuristic.compute_value(state)?.min(self.dead_end_value);
        log::trace!(target: targets::CACHE, "{}: {value}", self.heuristic.name());
        self.table.insert_with(state.clone(), || value);
        Ok(value)
    }

    /// The cached value of `state`, if any.
    pub fn find_value(&self, state: &State) -> Option<f64> {
        self.table
            .find(state)
            .and_then(|entry| self.table.value(entry))
            .copied()
    }

    /// Sets the value of `state`, capped by the dead end value.
    pub fn update(&mut self, state: &State, value: f64) {
        let value = value.min(self.dead_end_value);
        let (entry, fresh) = self.table.insert_with(state.clone(), || value);
        if !fresh {
            if let Some(stored) = self.table.value_mut(entry) {
                *stored = value;
            }
        }
        self.updates += 1;
    }

    /// A count of calls to [update](HeuristicValueCache::update).
    pub fn update_count(&self) -> usize {
        self.updates
    }

    /// Replaces the heuristic of the cache, returning the previous heuristic.
    ///
    /// Cached values are kept.
    pub fn replace_heuristic(&mut self, heuristic: H) -> H {
        log::info!(target: targets::CACHE, "Heuristic {} replaced by {}", self.heuristic.name(), heuristic.name());
        std::mem::replace(&mut self.heuristic, heuristic)
    }

    pub fn heuristic(&self) -> &H {
        &self.heuristic
    }

    /// A count of cached states.
    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn dimension(&self) -> usize {
        self.table.dimension()
    }

    pub fn diameter(&self) -> usize {
        self.table.diameter()
    }

    /// Writes each cached state and value to the file at `path`.
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<(), ErrorKind> {
        let path = path.as_ref();
        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!(target: targets::CACHE, "Unable to open {path:?} for the dump");
                return Err(err::DumpError::Open {
                    path: path.display().to_string(),
                    kind: e.kind(),
                }
                .into());
            }
        };

        let mut writer = BufWriter::new(file);
        self.dump_to(&mut writer)?;
        writer
            .flush()
            .map_err(|e| ErrorKind::from(err::DumpError::Write(e.kind())))
    }

    /// Writes each cached state and value to `writer`.
    pub fn dump_to<W: Write>(&self, writer: &mut W) -> Result<(), ErrorKind> {
        for (state, value) in self.table.iter() {
            let line = format!("V({}) = {value}", self.context.state_to_string(state));
            if let Err(e) = writeln!(writer, "{line}") {
                return Err(err::DumpError::Write(e.kind()).into());
            }
        }
        Ok(())
    }
}
