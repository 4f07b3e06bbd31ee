use embassy_time::{Duration, Instant};

use crate::Code;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebouncePolicy {
    /// Reject everything until the window after the last accepted code has passed. Used for
    /// interrupt driven hardware where contact bounce raises a burst of interrupts.
    FixedWindow,
    /// Reject a repeat of the last accepted code until the window has passed; a different code is
    /// accepted straight away. Used for sampled hardware where a held button is read many times.
    ValueAware,
}

/// Debounce memory for one device instance.
#[derive(Debug, Clone)]
pub struct Debouncer {
    policy: DebouncePolicy,
    gap: Duration,
    /// Last accepted code. `None` never equals a decoded code so the first sample after a reset
    /// is never suppressed.
    last: Option<Code>,
    deadline: Instant,
}

impl Debouncer {
    pub fn new(policy: DebouncePolicy, gap: Duration) -> Self {
        Self {
            policy,
            gap,
            last: None,
            deadline: Instant::MIN,
        }
    }

    pub fn policy(&self) -> DebouncePolicy {
        self.policy
    }

    pub fn gap(&self) -> Duration {
        self.gap
    }

    pub fn last(&self) -> Option<Code> {
        self.last
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Decide whether `code` sampled at `now` is reported. State only changes when it is.
    pub fn accept(&mut self, code: Code, now: Instant) -> bool {
        let suppress = match self.policy {
            DebouncePolicy::FixedWindow => now < self.deadline,
            DebouncePolicy::ValueAware => self.last == Some(code) && now < self.deadline,
        };
        if suppress {
            return false;
        }

        self.last = Some(code);
        self.deadline = now.checked_add(self.gap).unwrap_or(Instant::MAX);
        true
    }

    /// The register was caught mid transition. Forget the last code so whatever is read once it
    /// settles is reported, even if it matches.
    pub fn unsettled(&mut self) {
        if self.policy == DebouncePolicy::ValueAware {
            self.last = None;
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.deadline = Instant::MIN;
    }
}

#[cfg(test)]
#[path = "debounce_test.rs"]
mod test;
