//! Measurement harness for flowcost.
//!
//! Provides the [`Runner`] that drives benchmark bodies through timed
//! rounds, the [`CountingAllocator`] for per-iteration allocation
//! accounting, and the [`Reporter`] that prints one line per benchmark.
//!
//! Benchmarks run strictly one after another on the calling thread.
//! Running them concurrently would mix their timings and allocation
//! counts.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod alloc;
pub mod config;
pub mod metrics;
pub mod report;
pub mod runner;

pub use alloc::{AllocSnapshot, CountingAllocator};
pub use config::{BenchTime, ConfigError, RunConfig};
pub use metrics::{Round, Sample};
pub use report::{parse_line, ParsedLine, ReportError, Reporter};
pub use runner::{predict_iterations, BenchOutcome, RunSummary, Runner};
