//! The timed-loop runner.
//!
//! [`Runner::run()`] measures one benchmark: it invokes the body in rounds
//! of growing size until a round lasts at least the configured budget, then
//! reports the final round. Growth follows the rule used by Go's `testing`
//! package: predict the count that would fill the budget, overshoot it by
//! 20%, never grow more than 100x per round, and always grow by at least one.
//!
//! # Isolation
//!
//! Each benchmark gets a fresh [`Sink`]. A panic escaping a body is caught
//! around the whole measurement, turned into [`BenchOutcome::Failed`], and
//! does not affect the benchmarks that follow.

use std::any::Any;
use std::hint::black_box;
use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::{Duration, Instant};

use flowcost_core::{BenchDescriptor, BenchFn, Fixtures, Registry, Sink};
use tracing::{debug, info, warn};

use crate::alloc::{self, AllocSnapshot};
use crate::config::{BenchTime, ConfigError, RunConfig};
use crate::metrics::{Round, Rounds, Sample};
use crate::report::Reporter;

// ── BenchOutcome ───────────────────────────────────────────────────

/// Result of running one benchmark.
#[derive(Clone, Debug)]
pub enum BenchOutcome {
    /// The measurement finished.
    Completed(Sample),
    /// The body panicked; no timing is available.
    Failed {
        /// The panic message.
        reason: String,
    },
}

impl BenchOutcome {
    /// The sample, if the benchmark completed.
    pub fn sample(&self) -> Option<&Sample> {
        match self {
            Self::Completed(s) => Some(s),
            Self::Failed { .. } => None,
        }
    }

    /// Whether the benchmark failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Tally of a [`Runner::run_all()`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Benchmark runs that produced a sample.
    pub completed: usize,
    /// Benchmark runs whose body panicked.
    pub failed: usize,
    /// Report lines that could not be written.
    pub report_errors: usize,
}

impl RunSummary {
    /// No benchmark failed. Lost report lines do not count as failures.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

// ── Runner ─────────────────────────────────────────────────────────

/// Drives benchmark bodies through timed rounds, one benchmark at a time.
#[derive(Debug)]
pub struct Runner {
    config: RunConfig,
    count_allocs: bool,
}

impl Runner {
    /// Validate `config` and probe for allocation accounting.
    pub fn new(config: RunConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let count_allocs = config.report_allocs && alloc::is_counting();
        debug!(count_allocs, "allocation accounting probed");
        Ok(Self {
            config,
            count_allocs,
        })
    }

    /// Whether samples carry allocation counts.
    pub fn counts_allocations(&self) -> bool {
        self.count_allocs
    }

    /// Measure one benchmark.
    pub fn run(&self, bench: &BenchDescriptor, fixtures: &Fixtures) -> BenchOutcome {
        info!(bench = bench.name, budget = %self.config.bench_time, "benchmark started");

        let mut sink = Sink::new();
        let result = catch_unwind(AssertUnwindSafe(|| {
            self.measure(bench.body, &mut sink, fixtures)
        }));

        match result {
            Ok(sample) => {
                info!(
                    bench = bench.name,
                    iterations = sample.iterations,
                    ns_per_iter = sample.ns_per_iter(),
                    rounds = sample.rounds.len(),
                    "benchmark finished"
                );
                debug!(bench = bench.name, sink = black_box(sink.get()), "sink after run");
                BenchOutcome::Completed(sample)
            }
            Err(payload) => {
                let reason = panic_message(payload.as_ref());
                warn!(bench = bench.name, %reason, "benchmark failed");
                BenchOutcome::Failed { reason }
            }
        }
    }

    /// Run every benchmark the configured pattern selects, `count` times
    /// each, writing one report line per run.
    ///
    /// Report write failures are logged and counted but do not stop the
    /// run.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoMatch`] if the pattern selects nothing.
    pub fn run_all<W: Write>(
        &self,
        registry: &Registry,
        fixtures: &Fixtures,
        reporter: &mut Reporter<W>,
    ) -> Result<RunSummary, ConfigError> {
        let selected = registry.select(self.config.pattern());
        if selected.is_empty() {
            return Err(ConfigError::NoMatch {
                pattern: self.config.pattern().unwrap_or_default().to_string(),
            });
        }

        let mut summary = RunSummary::default();
        if let Err(e) = reporter.write_header() {
            warn!(error = %e, "report header lost");
            summary.report_errors += 1;
        }

        for bench in selected {
            for _ in 0..self.config.count {
                let outcome = self.run(bench, fixtures);
                if outcome.is_failed() {
                    summary.failed += 1;
                } else {
                    summary.completed += 1;
                }
                if let Err(e) = reporter.write_outcome(bench.name, &outcome) {
                    warn!(bench = bench.name, error = %e, "report line lost");
                    summary.report_errors += 1;
                }
            }
        }

        info!(
            completed = summary.completed,
            failed = summary.failed,
            report_errors = summary.report_errors,
            "run finished"
        );
        Ok(summary)
    }

    fn measure(&self, body: BenchFn, sink: &mut Sink, fixtures: &Fixtures) -> Sample {
        let mut rounds = Rounds::new();

        let goal = match self.config.bench_time {
            BenchTime::Iterations(n) => {
                let (elapsed, allocs) = run_round(body, sink, fixtures, n, self.count_allocs);
                rounds.push(Round {
                    iterations: n,
                    elapsed,
                });
                return Sample {
                    iterations: n,
                    elapsed,
                    allocs,
                    rounds,
                };
            }
            BenchTime::Duration(goal) => goal,
        };

        let max = self.config.max_iterations;
        let mut n = 1;
        loop {
            let (elapsed, allocs) = run_round(body, sink, fixtures, n, self.count_allocs);
            rounds.push(Round {
                iterations: n,
                elapsed,
            });
            debug!(
                round = rounds.len(),
                iterations = n,
                elapsed_ns = elapsed.as_nanos() as u64,
                "round complete"
            );

            if elapsed >= goal || n >= max {
                return Sample {
                    iterations: n,
                    elapsed,
                    allocs,
                    rounds,
                };
            }
            n = predict_iterations(goal, n, elapsed, max);
        }
    }
}

/// Invoke `body` `n` times and time the whole round.
///
/// The body pointer, sink, and fixtures all pass through [`black_box`] so
/// the call cannot be inlined or hoisted out of the loop.
#[inline(never)]
fn run_round(
    body: BenchFn,
    sink: &mut Sink,
    fixtures: &Fixtures,
    n: u64,
    count_allocs: bool,
) -> (Duration, Option<AllocSnapshot>) {
    let body = black_box(body);
    let before = count_allocs.then(alloc::snapshot);

    let start = Instant::now();
    for _ in 0..n {
        body(black_box(&mut *sink), black_box(fixtures));
    }
    let elapsed = start.elapsed();

    let allocs = before.map(|b| alloc::snapshot().since(b));
    (elapsed, allocs)
}

/// Iteration count for the next round.
///
/// Scales `prev_iters` to fill `goal`, adds 20%, caps growth at 100x, and
/// always returns at least `prev_iters + 1`, never more than `max`.
pub fn predict_iterations(goal: Duration, prev_iters: u64, prev_elapsed: Duration, max: u64) -> u64 {
    let prev = u128::from(prev_iters);
    let prev_ns = prev_elapsed.as_nanos().max(1);

    let mut n = goal.as_nanos().saturating_mul(prev) / prev_ns;
    n += n / 5;
    n = n.min(prev.saturating_mul(100));
    n = n.max(prev + 1);
    n.min(u128::from(max)) as u64
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
