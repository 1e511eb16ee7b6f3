//! The black-hole [`Sink`] written by every benchmark body.

/// Harness-owned mutable cell that benchmark bodies write into.
///
/// The stored value carries no meaning. What matters is that every body
/// mutates it through a `&mut Sink` the optimizer cannot see through, so
/// the work that produced the write cannot be proven dead and elided.
///
/// All arithmetic wraps; a sink driven for billions of iterations must
/// never abort the measurement with an overflow panic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sink {
    value: i64,
}

impl Sink {
    /// Create a sink holding zero.
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Add one.
    #[inline]
    pub fn inc(&mut self) {
        self.value = self.value.wrapping_add(1);
    }

    /// Subtract one.
    #[inline]
    pub fn dec(&mut self) {
        self.value = self.value.wrapping_sub(1);
    }

    /// Add `n`.
    #[inline]
    pub fn add(&mut self, n: i64) {
        self.value = self.value.wrapping_add(n);
    }

    /// Overwrite the stored value.
    #[inline]
    pub fn set(&mut self, n: i64) {
        self.value = n;
    }

    /// Current value. Only tests and end-of-run logging read this.
    #[inline]
    pub fn get(&self) -> i64 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_sink_is_zero() {
        assert_eq!(Sink::new().get(), 0);
        assert_eq!(Sink::default(), Sink::new());
    }

    #[test]
    fn inc_dec_add_set() {
        let mut s = Sink::new();
        s.inc();
        s.inc();
        s.dec();
        assert_eq!(s.get(), 1);
        s.add(2);
        assert_eq!(s.get(), 3);
        s.set(-7);
        assert_eq!(s.get(), -7);
    }

    #[test]
    fn arithmetic_wraps_at_bounds() {
        let mut s = Sink::new();
        s.set(i64::MAX);
        s.inc();
        assert_eq!(s.get(), i64::MIN);
        s.dec();
        assert_eq!(s.get(), i64::MAX);
    }

    proptest! {
        #[test]
        fn inc_then_dec_is_identity(start in any::<i64>(), n in 0usize..64) {
            let mut s = Sink::new();
            s.set(start);
            for _ in 0..n {
                s.inc();
            }
            for _ in 0..n {
                s.dec();
            }
            prop_assert_eq!(s.get(), start);
        }

        #[test]
        fn add_matches_wrapping_add(start in any::<i64>(), n in any::<i64>()) {
            let mut s = Sink::new();
            s.set(start);
            s.add(n);
            prop_assert_eq!(s.get(), start.wrapping_add(n));
        }
    }
}
