/*!
Cooperative cancellation.

A [Deadline] is some resource bound, e.g. wall time.
At most one deadline is installed in a [DeadlineSlot] at any time, and long running loops periodically [check](DeadlineSlot::check) the slot.
If the installed deadline is over, the check returns a [DeadlineError] which is propagated up to the caller.

Each [grounding context](crate::context::GroundingContext) has a slot, in place of a process-wide deadline.

```rust
# use std::rc::Rc;
# use std::time::Duration;
# use ssp_relax::generic::deadline::{DeadlineSlot, TimeDeadline};
let slot = DeadlineSlot::default();
assert!(slot.check().is_ok());

assert!(slot.install(Rc::new(TimeDeadline::new(Duration::ZERO))));
assert!(!slot.install(Rc::new(TimeDeadline::new(Duration::ZERO))));
assert!(slot.check().is_err());

slot.remove();
assert!(slot.check().is_ok());
```
*/

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::{Duration, Instant},
};

use crate::{misc::log::targets, types::err::DeadlineError};

/// Some bound on resources.
pub trait Deadline {
    /// True if the deadline is over and everything else should stop.
    fn is_over(&self) -> bool;

    /// Why the deadline is over.
    fn explanation(&self) -> String;

    /// The resource spent since the deadline was created.
    fn elapsed(&self) -> Duration;

    /// The time remaining, if the deadline is a bound on time.
    fn remaining(&self) -> Option<Duration> {
        None
    }
}

/// A bound on wall time, from the moment of creation.
pub struct TimeDeadline {
    start: Instant,
    limit: Duration,
}

impl TimeDeadline {
    pub fn new(limit: Duration) -> Self {
        TimeDeadline {
            start: Instant::now(),
            limit,
        }
    }
}

impl Deadline for TimeDeadline {
    fn is_over(&self) -> bool {
        self.start.elapsed() > self.limit
    }

    fn explanation(&self) -> String {
        format!("Time limit of {:.3}s exceeded.", self.limit.as_secs_f64())
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn remaining(&self) -> Option<Duration> {
        Some(self.limit.saturating_sub(self.start.elapsed()))
    }
}

/// A bound on the number of times the deadline is consulted.
///
/// The deadline is over on the check after `limit` checks have been made.
/// Useful for deterministic bounds, as the work between checks is fixed by the checking loop.
pub struct CheckLimit {
    start: Instant,
    limit: usize,
    checks: Cell<usize>,
}

impl CheckLimit {
    pub fn new(limit: usize) -> Self {
        CheckLimit {
            start: Instant::now(),
            limit,
            checks: Cell::new(0),
        }
    }

    /// A count of checks made so far.
    pub fn checks(&self) -> usize {
        self.checks.get()
    }
}

impl Deadline for CheckLimit {
    fn is_over(&self) -> bool {
        let checks = self.checks.get();
        self.checks.set(checks + 1);
        checks >= self.limit
    }

    fn explanation(&self) -> String {
        format!("Limit of {} checks exceeded.", self.limit)
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A slot for (at most) one installed deadline.
#[derive(Default)]
pub struct DeadlineSlot {
    deadline: RefCell<Option<Rc<dyn Deadline>>>,
}

impl DeadlineSlot {
    /// Installs `deadline`, unless some deadline is already installed.
    /// Returns true on installation, false otherwise.
    pub fn install(&self, deadline: Rc<dyn Deadline>) -> bool {
        let mut slot = self.deadline.borrow_mut();
        match slot.as_ref() {
            Some(_) => false,
            None => {
                *slot = Some(deadline);
                true
            }
        }
    }

    /// Removes any installed deadline.
    pub fn remove(&self) {
        *self.deadline.borrow_mut() = None;
    }

    pub fn is_installed(&self) -> bool {
        self.deadline.borrow().is_some()
    }

    /// An error if some installed deadline is over, and Ok otherwise.
    pub fn check(&self) -> Result<(), DeadlineError> {
        match self.deadline.borrow().as_ref() {
            Some(deadline) if deadline.is_over() => {
                let error = DeadlineError {
                    explanation: deadline.explanation(),
                    elapsed: deadline.elapsed(),
                };
                log::info!(target: targets::DEADLINE, "{error}");
                Err(error)
            }
            _ => Ok(()),
        }
    }

    /// Increments `counter` and checks the deadline each time the counter reaches a multiple of `period`.
    pub fn check_every(&self, counter: &mut usize, period: usize) -> Result<(), DeadlineError> {
        *counter += 1;
        match period != 0 && *counter % period == 0 {
            true => self.check(),
            false => Ok(()),
        }
    }
}
