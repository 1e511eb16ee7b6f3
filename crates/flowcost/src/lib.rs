//! flowcost: micro-benchmarks for the relative cost of Rust control-flow
//! constructs.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the flowcost sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use flowcost::prelude::*;
//!
//! let fixtures = Fixtures::build().unwrap();
//! let registry = flowcost::suite().unwrap();
//! let runner = Runner::new(RunConfig {
//!     bench_time: BenchTime::Iterations(1_000),
//!     ..RunConfig::default()
//! })
//! .unwrap();
//!
//! let outcome = runner.run(registry.get("switch").unwrap(), &fixtures);
//! let sample = outcome.sample().unwrap();
//! assert_eq!(sample.iterations, 1_000);
//! assert!(sample.ns_per_iter().is_finite());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flowcost-core` | Sink, fixtures, descriptors, registry, errors |
//! | [`harness`] | `flowcost-harness` | Runner, allocation accounting, reports |
//! | [`bench`] | `flowcost-bench` | Construct bodies and the suite table |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Sink, fixtures, descriptors, and registry (`flowcost-core`).
pub use flowcost_core as types;

/// Timed-loop runner, allocation accounting, and reports
/// (`flowcost-harness`).
pub use flowcost_harness as harness;

/// Benchmark bodies and the [`bench::SUITE`] table (`flowcost-bench`).
pub use flowcost_bench as bench;

pub use flowcost_bench::suite;

/// Common imports for running the suite.
///
/// ```rust
/// use flowcost::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use flowcost_core::{BenchDescriptor, BenchFn, Fixtures, Registry, Sink};

    // Errors
    pub use flowcost_core::{FixtureError, RegistryError};
    pub use flowcost_harness::{ConfigError, ReportError};

    // Harness
    pub use flowcost_harness::{
        BenchOutcome, BenchTime, CountingAllocator, Reporter, RunConfig, RunSummary, Runner,
        Sample,
    };
}
