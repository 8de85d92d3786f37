//! Statistics on calls to a heuristic.
//!
//! [Instrumented] wraps a heuristic, counts calls to the heuristic, and keeps the mean and variance of the time taken by a call.
//! The mean and variance are kept online (by Welford's method), so nothing is stored per call.
//! When dropped, a summary is logged to the [STATS](crate::misc::log::targets::STATS) target.

use std::time::{Duration, Instant};

use crate::{
    heuristics::Heuristic,
    misc::log::targets::{self},
    structures::state::State,
    types::err::ErrorKind,
};

/// A heuristic, together with statistics on calls to the heuristic.
pub struct Instrumented<H: Heuristic> {
    heuristic: H,

    calls: usize,

    /// The mean time of a call, in seconds.
    mean: f64,

    /// The sum of squared differences from the mean time.
    m2: f64,

    total: Duration,
}

impl<H: Heuristic> Instrumented<H> {
    pub fn new(heuristic: H) -> Self {
        Instrumented {
            heuristic,
            calls: 0,
            mean: 0.0,
            m2: 0.0,
            total: Duration::ZERO,
        }
    }

    pub fn inner(&self) -> &H {
        &self.heuristic
    }

    /// A count of calls.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// The mean time of a call, in seconds.
    pub fn mean_time(&self) -> f64 {
        self.mean
    }

    /// The (sample) variance of the time of a call.
    pub fn variance(&self) -> f64 {
        match self.calls {
            0 | 1 => 0.0,
            calls => self.m2 / (calls - 1) as f64,
        }
    }

    pub fn total_time(&self) -> Duration {
        self.total
    }

    fn record(&mut self, elapsed: Duration) {
        self.calls += 1;
        self.total += elapsed;

        let seconds = elapsed.as_secs_f64();
        let delta = seconds - self.mean;
        self.mean += delta / self.calls as f64;
        self.m2 += delta * (seconds - self.mean);
    }
}

impl<H: Heuristic> Heuristic for Instrumented<H> {
    fn name(&self) -> &str {
        self.heuristic.name()
    }

    fn compute_value(&mut self, state: &State) -> Result<f64, ErrorKind> {
        let start = Instant::now();
        let value = self.heuristic.compute_value(state);
        self.record(start.elapsed());
        value
    }
}

impl<H: Heuristic> Drop for Instrumented<H> {
    fn drop(&mut self) {
        log::info!(target: targets::STATS,
            "{}: {} calls, {:.6}s total, {:.6}s mean, {:.6} variance",
            self.heuristic.name(),
            self.calls,
            self.total.as_secs_f64(),
            self.mean,
            self.variance()
        );
    }
}
