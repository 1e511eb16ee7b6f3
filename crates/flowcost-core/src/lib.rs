//! Core types for the flowcost control-flow cost suite.
//!
//! This is the leaf crate of the workspace. It defines the pieces every
//! benchmark body touches:
//!
//! - [`Sink`]: the write-only black hole that keeps bodies observable
//! - [`Fixtures`]: channels, sequences, and opaque integers built once
//! - [`BenchDescriptor`] and [`Registry`]: named bodies, in registration order
//! - [`error`]: fixture and registry error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bench;
pub mod error;
pub mod fixtures;
pub mod sink;

pub use bench::{BenchDescriptor, BenchFn, Registry};
pub use error::{FixtureError, RegistryError};
pub use fixtures::Fixtures;
pub use sink::Sink;
