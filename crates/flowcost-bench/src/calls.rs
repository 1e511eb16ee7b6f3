//! Function-call bodies with one, two, and three arguments.
//!
//! The callees are `#[inline(never)]` and keep a library call on their
//! argument in a cold branch, so the call itself is what gets measured.
//! The cold branch is unreachable with valid fixtures, whose arguments
//! are all positive.

use std::hint::black_box;

use flowcost_core::{Fixtures, Sink};

/// Identity on positive input.
#[inline(never)]
pub fn sum1(n: i64) -> i64 {
    if n > 0 {
        return n;
    }
    black_box((n as f64).powf(1.0));
    unreachable!("sum1 called with {n}")
}

/// Sum of two arguments, first positive.
#[inline(never)]
pub fn sum2(n1: i64, n2: i64) -> i64 {
    if n1 > 0 {
        return n1 + n2;
    }
    black_box((n1 as f64).powf(1.0));
    unreachable!("sum2 called with {n1}")
}

/// Sum of three arguments, first positive.
#[inline(never)]
pub fn sum3(n1: i64, n2: i64, n3: i64) -> i64 {
    if n1 > 0 {
        return n1 + n2 + n3;
    }
    black_box((n1 as f64).powf(1.0));
    unreachable!("sum3 called with {n1}")
}

/// One-argument call.
pub fn func1(sink: &mut Sink, fx: &Fixtures) {
    let [a, _, _] = *fx.args();
    sink.set(sum1(a));
}

/// Two-argument call.
pub fn func2(sink: &mut Sink, fx: &Fixtures) {
    let [a, b, _] = *fx.args();
    sink.set(sum2(a, b));
}

/// Three-argument call.
pub fn func3(sink: &mut Sink, fx: &Fixtures) {
    let [a, b, c] = *fx.args();
    sink.set(sum3(a, b, c));
}
