//! Timing samples produced by the runner.
//!
//! [`Sample`] captures the final round of one benchmark: how many times
//! the body ran, how long that took, and what it allocated. The ramp-up
//! rounds that led there are kept in [`Sample::rounds`] for logging and
//! tests.

use std::time::Duration;

use smallvec::SmallVec;

use crate::alloc::AllocSnapshot;

/// One timed round of `iterations` body invocations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Round {
    /// Invocations in this round.
    pub iterations: u64,
    /// Wall-clock time for the whole round.
    pub elapsed: Duration,
}

/// Ramp-up history. Geometric growth rarely needs more than a dozen rounds.
pub type Rounds = SmallVec<[Round; 16]>;

/// Measurement result for one benchmark.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Iterations in the final round.
    pub iterations: u64,
    /// Elapsed time of the final round.
    pub elapsed: Duration,
    /// Allocations during the final round, when accounting is available.
    pub allocs: Option<AllocSnapshot>,
    /// Every round run, final round last.
    pub rounds: Rounds,
}

impl Sample {
    /// Mean nanoseconds per invocation.
    pub fn ns_per_iter(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.iterations as f64
    }

    /// Allocations per invocation, truncated toward zero.
    pub fn allocs_per_iter(&self) -> Option<u64> {
        self.allocs
            .map(|a| a.count.checked_div(self.iterations).unwrap_or(0))
    }

    /// Bytes allocated per invocation, truncated toward zero.
    pub fn bytes_per_iter(&self) -> Option<u64> {
        self.allocs
            .map(|a| a.bytes.checked_div(self.iterations).unwrap_or(0))
    }
}
