//! Run configuration, validation, and error types.
//!
//! [`RunConfig`] is the input to [`Runner::new()`](crate::Runner::new).
//! [`validate()`](RunConfig::validate) rejects configurations that would
//! make the runner loop forever or measure nothing.

use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// ── BenchTime ──────────────────────────────────────────────────────

/// How long each benchmark is measured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BenchTime {
    /// Grow the iteration count until one round takes at least this long.
    Duration(Duration),
    /// Run exactly this many iterations in a single round.
    Iterations(u64),
}

impl Default for BenchTime {
    fn default() -> Self {
        Self::Duration(Duration::from_secs(1))
    }
}

impl fmt::Display for BenchTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duration(d) => write!(f, "{d:?}"),
            Self::Iterations(n) => write!(f, "{n}x"),
        }
    }
}

impl FromStr for BenchTime {
    type Err = ConfigError;

    /// Accepts `<n>x` for a fixed iteration count, or a number with one of
    /// the suffixes `ns`, `us`, `ms`, `s`, `m` for a duration. Fractions
    /// are allowed on durations (`2.5s`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidBenchTime {
            input: s.to_string(),
        };
        let trimmed = s.trim();

        if let Some(count) = trimmed.strip_suffix('x') {
            let n: u64 = count.parse().map_err(|_| invalid())?;
            return Ok(Self::Iterations(n));
        }

        // Longest suffixes first so "ms" is not read as "s".
        let (number, nanos_per_unit) = [
            ("ns", 1.0),
            ("us", 1e3),
            ("µs", 1e3),
            ("ms", 1e6),
            ("s", 1e9),
            ("m", 60e9),
        ]
        .iter()
        .find_map(|&(suffix, scale)| trimmed.strip_suffix(suffix).map(|n| (n, scale)))
        .ok_or_else(invalid)?;

        let value: f64 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() || value < 0.0 {
            return Err(invalid());
        }
        let nanos = value * nanos_per_unit;
        if nanos > u64::MAX as f64 {
            return Err(invalid());
        }
        Ok(Self::Duration(Duration::from_nanos(nanos.round() as u64)))
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while building or validating a [`RunConfig`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The bench time string could not be parsed.
    InvalidBenchTime {
        /// The rejected input.
        input: String,
    },
    /// A duration bench time of zero.
    ZeroDuration,
    /// An iteration bench time, or `max_iterations`, of zero.
    ZeroIterations,
    /// `count` is zero.
    ZeroCount,
    /// The selection pattern matched no registered benchmark.
    NoMatch {
        /// The pattern that matched nothing.
        pattern: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBenchTime { input } => write!(
                f,
                "invalid bench time '{input}': expected <n>x or a duration such as 500ms, 1s"
            ),
            Self::ZeroDuration => write!(f, "bench time duration must be positive"),
            Self::ZeroIterations => write!(f, "iteration count must be at least 1"),
            Self::ZeroCount => write!(f, "count must be at least 1"),
            Self::NoMatch { pattern } => write!(f, "no benchmark matches '{pattern}'"),
        }
    }
}

impl Error for ConfigError {}

// ── RunConfig ──────────────────────────────────────────────────────

/// Upper bound on iterations in one round.
pub const DEFAULT_MAX_ITERATIONS: u64 = 1_000_000_000;

/// Configuration for a benchmark run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Measurement budget per benchmark. Default: 1 second.
    pub bench_time: BenchTime,
    /// Cap on the iteration count the ramp-up may reach. Default: 1e9.
    pub max_iterations: u64,
    /// Repetitions of each benchmark. Default: 1.
    pub count: u32,
    /// Substring filter on benchmark names. `None` runs everything.
    pub pattern: Option<String>,
    /// Report allocation columns when the counting allocator is installed.
    /// Default: true.
    pub report_allocs: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bench_time: BenchTime::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            count: 1,
            pattern: None,
            report_allocs: true,
        }
    }
}

impl RunConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.bench_time {
            BenchTime::Duration(d) if d.is_zero() => return Err(ConfigError::ZeroDuration),
            BenchTime::Iterations(0) => return Err(ConfigError::ZeroIterations),
            _ => {}
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        Ok(())
    }

    /// The selection pattern, with an empty string treated as no filter.
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref().filter(|p| !p.is_empty())
    }
}
