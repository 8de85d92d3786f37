/*!
Configuration of a grounding context, and of the heuristics built over a context.

All configuration for a problem is contained within the [Config] of a [GroundingContext](crate::context::GroundingContext).
Heuristics, caches, etc. copy the values they require when constructed, and so revisions to the configuration should happen before any of these are built.

Each value is a [ConfigOption], which pairs the value with a name and bounds on the value.
*/

mod config_option;
pub use config_option::ConfigOption;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The finite stand-in for an infinite cost, returned when the goal is unreachable.
    /// Any heuristic value reported, or stored in a cache, is capped by this value.
    pub dead_end_value: ConfigOption<f64>,

    /// The tolerance used when comparing costs.
    /// A cost *x* is (strictly) less than *y* only if *y - x* exceeds epsilon.
    pub epsilon: ConfigOption<f64>,

    /// The number of buckets requested when creating a hash table for a value cache.
    /// The actual number of buckets is the least prime at least as large as the request.
    pub initial_hash_size: ConfigOption<usize>,

    /// Whether negation is interpreted as failure (a closed world).
    ///
    /// - If true, only the even (positive) atom codes are meaningful.
    /// - If false, an odd atom code 2k+1 holds exactly when the atom code 2k does not.
    pub nprec: ConfigOption<bool>,

    /// The number of outer iterations of a landmark computation between checks of an installed deadline.
    pub deadline_check_period: ConfigOption<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            dead_end_value: ConfigOption {
                name: "dead_end_value",
                min: f64::MIN_POSITIVE,
                max: f64::MAX / 2.0,
                value: 500.0,
            },

            epsilon: ConfigOption {
                name: "epsilon",
                min: 0.0,
                max: 1.0,
                value: 0.0001,
            },

            initial_hash_size: ConfigOption {
                name: "initial_hash_size",
                min: 1,
                max: usize::MAX >> 2,
                value: 204_800,
            },

            nprec: ConfigOption {
                name: "nprec",
                min: false,
                max: true,
                value: true,
            },

            deadline_check_period: ConfigOption {
                name: "deadline_check_period",
                min: 1,
                max: usize::MAX,
                value: 64,
            },
        }
    }
}

impl Config {
    /// The step taken when iterating over the atom universe.
    /// Two when only positive atoms are meaningful, and one otherwise.
    pub fn atom_step(&self) -> usize {
        match self.nprec.value {
            true => 2,
            false => 1,
        }
    }
}
