//! Benchmark bodies for the flowcost suite.
//!
//! Provides one body per measured construct and the [`SUITE`] table that
//! names them:
//!
//! - [`bodies`]: branches, `match`, loops, iteration, channel selects,
//!   unwind and catch
//! - [`calls`]: out-of-line calls with one to three arguments
//! - [`suite()`]: a [`Registry`] of every body, in report order

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bodies;
pub mod calls;

use flowcost_core::{BenchDescriptor, Registry, RegistryError};

/// Every benchmark, in the order reports list them.
pub const SUITE: &[BenchDescriptor] = &[
    BenchDescriptor::new("baseline", "sink write only", bodies::baseline),
    BenchDescriptor::new("switch", "three-arm match on an opaque value", bodies::switch),
    BenchDescriptor::new("if_equals", "if with a true equality test", bodies::if_equals),
    BenchDescriptor::new("if_not_equals", "if with a true inequality test", bodies::if_not_equals),
    BenchDescriptor::new("for_cond", "while loop whose condition is false on entry", bodies::for_cond),
    BenchDescriptor::new("for_counted", "counted for loop running once", bodies::for_counted),
    BenchDescriptor::new("for_range", "iteration over a one-element slice", bodies::for_range),
    BenchDescriptor::new(
        "for_range_closed_chan",
        "iteration over a disconnected channel",
        bodies::for_range_closed_chan,
    ),
    BenchDescriptor::new(
        "select_blocked_default",
        "select on a never-ready receiver with default",
        bodies::select_blocked_default,
    ),
    BenchDescriptor::new(
        "select_blocked_closed",
        "select where only a disconnected receiver is ready",
        bodies::select_blocked_closed,
    ),
    BenchDescriptor::new(
        "select_try_send",
        "try-send with no receiver, default taken",
        bodies::select_try_send,
    ),
    BenchDescriptor::new(
        "select_try_send_buf",
        "try-send into a full buffer, default taken",
        bodies::select_try_send_buf,
    ),
    BenchDescriptor::new(
        "select_try_send_spare",
        "try-send into one free slot, then drain",
        bodies::select_try_send_spare,
    ),
    BenchDescriptor::new("panic_recover", "unwind a constant payload and catch it", bodies::panic_recover),
    BenchDescriptor::new("func1", "out-of-line call, one argument", calls::func1),
    BenchDescriptor::new("func2", "out-of-line call, two arguments", calls::func2),
    BenchDescriptor::new("func3", "out-of-line call, three arguments", calls::func3),
];

/// Build a registry holding [`SUITE`].
pub fn suite() -> Result<Registry, RegistryError> {
    Registry::from_descriptors(SUITE)
}
