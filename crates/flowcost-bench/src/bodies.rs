//! Control-flow construct bodies.
//!
//! Each function performs one instance of the construct it is named after
//! and writes the sink on the path it is expected to take. Dispatch values
//! come from [`Fixtures::val()`], which the compiler cannot see as a
//! constant, so no branch or loop bound folds away.
//!
//! Channel bodies never block: either a `default` arm exists, or the
//! channel waited on was validated ready before timing started.

use std::panic::{catch_unwind, resume_unwind};

use crossbeam_channel::{select, TryRecvError};
use flowcost_core::{Fixtures, Sink};

/// Payload raised by [`panic_recover`].
pub const PANIC_PAYLOAD: &str = "zomg!";

/// Nothing but the sink write every body pays for.
pub fn baseline(sink: &mut Sink, _: &Fixtures) {
    sink.inc();
}

/// Three-arm `match` on the opaque value; the `1` arm is taken.
pub fn switch(sink: &mut Sink, fx: &Fixtures) {
    match fx.val() {
        0 => sink.inc(),
        1 => sink.dec(),
        _ => sink.add(2),
    }
}

/// `if` whose equality test holds.
pub fn if_equals(sink: &mut Sink, fx: &Fixtures) {
    if fx.val() == 1 {
        sink.inc();
    }
}

/// `if` whose inequality test holds.
pub fn if_not_equals(sink: &mut Sink, fx: &Fixtures) {
    if fx.val() != 5 {
        sink.inc();
    }
}

/// `while` whose condition is false on entry: measures the check alone.
pub fn for_cond(sink: &mut Sink, fx: &Fixtures) {
    while fx.val() < 0 {
        sink.inc();
    }
}

/// Counted `for` that runs exactly once.
pub fn for_counted(sink: &mut Sink, fx: &Fixtures) {
    for _ in 0..fx.val() {
        sink.inc();
    }
}

/// Iteration over the one-element sequence.
pub fn for_range(sink: &mut Sink, fx: &Fixtures) {
    for _ in fx.seq() {
        sink.inc();
    }
}

/// Blocking iteration over a disconnected channel: yields nothing.
pub fn for_range_closed_chan(sink: &mut Sink, fx: &Fixtures) {
    for _ in fx.closed_rx().iter() {
        sink.inc();
    }
}

/// Select over a never-ready receiver with a `default` arm.
pub fn select_blocked_default(sink: &mut Sink, fx: &Fixtures) {
    let blocked = fx.blocked_rx();
    select! {
        recv(blocked) -> _ => sink.dec(),
        default => sink.inc(),
    }
}

/// Blocking select where only the disconnected receiver is ready.
pub fn select_blocked_closed(sink: &mut Sink, fx: &Fixtures) {
    let blocked = fx.blocked_rx();
    let closed = fx.closed_rx();
    select! {
        recv(blocked) -> _ => sink.dec(),
        recv(closed) -> _ => sink.inc(),
    }
}

/// Try-send to a rendezvous channel nobody is receiving on.
pub fn select_try_send(sink: &mut Sink, fx: &Fixtures) {
    let blocked = fx.blocked_tx();
    select! {
        send(blocked, false) -> _ => {},
        default => sink.inc(),
    }
}

/// Try-send into a buffer that is already at capacity.
pub fn select_try_send_buf(sink: &mut Sink, fx: &Fixtures) {
    let full = fx.full_tx();
    select! {
        send(full, false) -> _ => {},
        default => sink.inc(),
    }
}

/// Try-send into a buffer with one free slot, then drain it again.
///
/// The drain is part of the measured cost; without it every invocation
/// after the first would see a full buffer and take `default`. An empty
/// buffer at drain time is fine. A disconnected one means the fixture was
/// torn down and is recorded on the sink.
pub fn select_try_send_spare(sink: &mut Sink, fx: &Fixtures) {
    let spare = fx.spare_tx();
    select! {
        send(spare, false) -> _ => sink.inc(),
        default => sink.dec(),
    }
    match fx.spare_rx().try_recv() {
        Ok(_) | Err(TryRecvError::Empty) => {}
        Err(TryRecvError::Disconnected) => sink.add(2),
    }
}

/// Raise a constant payload and catch it.
///
/// Uses [`resume_unwind`], which unwinds without running the panic hook,
/// so the cost is the unwind and catch rather than hook output.
pub fn panic_recover(sink: &mut Sink, _: &Fixtures) {
    if catch_unwind(raise).is_err() {
        sink.inc();
    }
}

#[inline(never)]
fn raise() {
    resume_unwind(Box::new(PANIC_PAYLOAD))
}
