//! Integration test: behavioural contracts of every benchmark body.
//!
//! Each body is driven many times against one shared fixture set, the way
//! the runner drives it, and checked for the sink effect and channel state
//! it promises. A body that blocked would hang this test rather than fail
//! it, so the channel bodies are also run under a watchdog thread.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use flowcost_bench::{bodies, calls, SUITE};
use flowcost_core::{Fixtures, Sink};
use proptest::prelude::*;

const REPS: usize = 1_000;

fn fixtures() -> Fixtures {
    Fixtures::build().expect("fixtures must build")
}

/// Run `body` `n` times on a fresh sink and return the sink's final value.
fn drive(body: fn(&mut Sink, &Fixtures), fx: &Fixtures, n: usize) -> i64 {
    let mut sink = Sink::new();
    for _ in 0..n {
        body(&mut sink, fx);
    }
    sink.get()
}

// ── No escaping panics ─────────────────────────────────────────────

#[test]
fn no_body_lets_a_panic_escape() {
    let fx = fixtures();
    for bench in SUITE {
        let result = catch_unwind(AssertUnwindSafe(|| drive(bench.body, &fx, REPS)));
        assert!(result.is_ok(), "{} let a panic escape", bench.name);
    }
    fx.validate().expect("bodies must leave fixtures valid");
}

#[test]
fn panic_recover_always_recovers() {
    let fx = fixtures();
    assert_eq!(drive(bodies::panic_recover, &fx, REPS), REPS as i64);
}

// ── Sink effects ───────────────────────────────────────────────────

#[test]
fn for_cond_never_enters_its_loop() {
    let fx = fixtures();
    assert_eq!(drive(bodies::for_cond, &fx, REPS), 0);
}

#[test]
fn for_range_writes_once_per_invocation() {
    let fx = fixtures();
    let mut sink = Sink::new();
    for i in 1..=REPS as i64 {
        bodies::for_range(&mut sink, &fx);
        assert_eq!(sink.get(), i);
    }
}

#[test]
fn for_range_closed_chan_visits_nothing() {
    let fx = fixtures();
    assert_eq!(drive(bodies::for_range_closed_chan, &fx, REPS), 0);
}

#[test]
fn select_try_send_always_falls_back() {
    let fx = fixtures();
    assert_eq!(drive(bodies::select_try_send, &fx, REPS), REPS as i64);
    assert!(fx.blocked_rx().is_empty());
}

#[test]
fn select_try_send_spare_always_succeeds_and_rearms() {
    let fx = fixtures();
    let mut sink = Sink::new();
    for i in 1..=REPS as i64 {
        bodies::select_try_send_spare(&mut sink, &fx);
        assert_eq!(sink.get(), i, "fallback taken on invocation {i}");
        assert!(fx.spare_rx().is_empty(), "slot not re-armed on invocation {i}");
    }
}

#[test]
fn select_try_send_buf_always_falls_back() {
    let fx = fixtures();
    assert_eq!(drive(bodies::select_try_send_buf, &fx, REPS), REPS as i64);
    assert!(fx.full_tx().is_full());
}

#[test]
fn select_blocked_default_takes_default() {
    let fx = fixtures();
    assert_eq!(drive(bodies::select_blocked_default, &fx, REPS), REPS as i64);
}

#[test]
fn select_blocked_closed_takes_closed_arm() {
    let fx = fixtures();
    assert_eq!(drive(bodies::select_blocked_closed, &fx, REPS), REPS as i64);
}

#[test]
fn switch_and_branches_follow_opaque_value() {
    let fx = fixtures();
    assert_eq!(drive(bodies::switch, &fx, 10), -10);
    assert_eq!(drive(bodies::if_equals, &fx, 10), 10);
    assert_eq!(drive(bodies::if_not_equals, &fx, 10), 10);
    assert_eq!(drive(bodies::for_counted, &fx, 10), 10);
    assert_eq!(drive(bodies::baseline, &fx, 10), 10);
}

#[test]
fn call_bodies_store_the_callee_result() {
    let fx = fixtures();
    assert_eq!(drive(calls::func1, &fx, 3), 1);
    assert_eq!(drive(calls::func2, &fx, 3), 3);
    assert_eq!(drive(calls::func3, &fx, 3), 6);
}

// ── Non-blocking ───────────────────────────────────────────────────

#[test]
fn channel_bodies_never_block() {
    let channel_bodies: Vec<_> = SUITE
        .iter()
        .filter(|d| d.name.contains("chan") || d.name.starts_with("select"))
        .map(|d| (d.name, d.body))
        .collect();
    assert_eq!(channel_bodies.len(), 6);

    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let fx = fixtures();
        for (name, body) in channel_bodies {
            drive(body, &fx, REPS);
            done_tx.send(name).unwrap();
        }
    });

    for _ in 0..6 {
        let name = done_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("a channel body blocked");
        assert!(!name.is_empty());
    }
}

proptest! {
    #[test]
    fn sink_effect_is_linear_in_invocations(n in 0usize..256) {
        let fx = fixtures();
        prop_assert_eq!(drive(bodies::for_range, &fx, n), n as i64);
        prop_assert_eq!(drive(bodies::for_cond, &fx, n), 0);
        prop_assert_eq!(drive(bodies::select_try_send_spare, &fx, n), n as i64);
        prop_assert_eq!(drive(bodies::panic_recover, &fx, n), n as i64);
    }
}
