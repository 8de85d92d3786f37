/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information when debugging a heuristic or a grounding which feeds one.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [grounding context](crate::context)
    pub const GROUNDING: &str = "grounding";

    /// Logs related to the [fixed point propagation](crate::heuristics::propagation)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [landmark extraction](crate::heuristics::lm_cut)
    pub const LANDMARKS: &str = "landmarks";

    /// Logs related to the [hash table](crate::db::hash)
    pub const HASH: &str = "hash";

    /// Logs related to the [value cache](crate::heuristics::cache)
    pub const CACHE: &str = "cache";

    /// Logs related to [deadlines](crate::generic::deadline)
    pub const DEADLINE: &str = "deadline";

    /// Logs related to heuristic [statistics](crate::heuristics::stats)
    pub const STATS: &str = "stats";

    /// Logs related to [configuration](crate::config)
    pub const CONFIG: &str = "config";
}
