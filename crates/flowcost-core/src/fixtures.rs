//! Shared benchmark inputs, built once before any timing loop starts.
//!
//! [`Fixtures`] owns every channel and value a benchmark body consumes.
//! Building them per iteration would fold allocation and channel setup
//! into the measured cost, so the harness builds one set, validates it,
//! and hands `&Fixtures` to every body for the rest of the run.
//!
//! # Channel states
//!
//! | Fixture   | Capacity | State                                    |
//! |-----------|----------|------------------------------------------|
//! | `blocked` | 0        | both ends alive, never used: never ready |
//! | `closed`  | 0        | sender dropped: receive is terminal      |
//! | `full`    | 1        | one message buffered: send never ready   |
//! | `spare`   | 1        | empty: exactly one free slot             |

use std::hint::black_box;

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

use crate::error::FixtureError;

/// Read-only inputs shared by all benchmark bodies.
///
/// Every field is private; bodies reach them through accessors so that no
/// body can rebind a fixture. Crossbeam endpoints are `Sync`, so a single
/// `&Fixtures` serves any body regardless of which channel it touches.
#[derive(Debug)]
pub struct Fixtures {
    val: i64,
    args: [i64; 3],
    seq: Vec<i64>,
    blocked_tx: Sender<bool>,
    blocked_rx: Receiver<bool>,
    closed_rx: Receiver<bool>,
    full_tx: Sender<bool>,
    full_rx: Receiver<bool>,
    spare_tx: Sender<bool>,
    spare_rx: Receiver<bool>,
}

impl Fixtures {
    /// Build and validate the fixture set.
    ///
    /// The dispatch value and call arguments pass through
    /// [`black_box`] so the compiler cannot treat them as constants in
    /// any body that reads them.
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError`] if any fixture fails
    /// [`validate()`](Self::validate). This is fatal for the run.
    pub fn build() -> Result<Self, FixtureError> {
        let (blocked_tx, blocked_rx) = bounded(0);

        let (closed_tx, closed_rx) = bounded::<bool>(0);
        drop(closed_tx);

        let (full_tx, full_rx) = bounded(1);
        if full_tx.try_send(true).is_err() {
            return Err(FixtureError::FullNotFull { len: full_rx.len() });
        }

        let (spare_tx, spare_rx) = bounded(1);

        let fixtures = Self {
            val: black_box(1),
            args: black_box([1, 2, 3]),
            seq: vec![1],
            blocked_tx,
            blocked_rx,
            closed_rx,
            full_tx,
            full_rx,
            spare_tx,
            spare_rx,
        };
        fixtures.validate()?;
        Ok(fixtures)
    }

    /// Check that every fixture is in the state its bodies depend on.
    ///
    /// Runs before timing so that a body which would otherwise block or
    /// take the wrong path fails here instead of mid-measurement. None of
    /// the probes change the state of a valid fixture.
    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.val != 1 {
            return Err(FixtureError::UnexpectedValue { val: self.val });
        }
        if let Some((index, &value)) = self.args.iter().enumerate().find(|&(_, &a)| a <= 0) {
            return Err(FixtureError::NonPositiveArgument { index, value });
        }
        if self.seq.len() != 1 {
            return Err(FixtureError::SequenceLength {
                len: self.seq.len(),
            });
        }

        // Zero capacity with no waiting receiver: a send can only be Full.
        match self.blocked_tx.try_send(false) {
            Err(TrySendError::Full(_)) => {}
            _ => return Err(FixtureError::BlockedReady),
        }
        match self.blocked_rx.try_recv() {
            Err(TryRecvError::Empty) => {}
            _ => return Err(FixtureError::BlockedReady),
        }

        match self.closed_rx.try_recv() {
            Err(TryRecvError::Disconnected) => {}
            _ => return Err(FixtureError::ClosedNotTerminal),
        }

        if !self.full_tx.is_full() {
            return Err(FixtureError::FullNotFull {
                len: self.full_rx.len(),
            });
        }

        if self.spare_tx.capacity() != Some(1) || !self.spare_rx.is_empty() {
            return Err(FixtureError::SpareNotEmpty {
                len: self.spare_rx.len(),
            });
        }

        Ok(())
    }

    /// Opaque dispatch value (always `1` in a valid set).
    #[inline]
    pub fn val(&self) -> i64 {
        self.val
    }

    /// Call arguments `[1, 2, 3]`.
    #[inline]
    pub fn args(&self) -> &[i64; 3] {
        &self.args
    }

    /// One-element sequence for per-element iteration cost.
    #[inline]
    pub fn seq(&self) -> &[i64] {
        &self.seq
    }

    /// Sending half of the never-ready channel.
    #[inline]
    pub fn blocked_tx(&self) -> &Sender<bool> {
        &self.blocked_tx
    }

    /// Receiving half of the never-ready channel.
    #[inline]
    pub fn blocked_rx(&self) -> &Receiver<bool> {
        &self.blocked_rx
    }

    /// Receiver of a channel with no senders left.
    #[inline]
    pub fn closed_rx(&self) -> &Receiver<bool> {
        &self.closed_rx
    }

    /// Sending half of the channel whose buffer is at capacity.
    #[inline]
    pub fn full_tx(&self) -> &Sender<bool> {
        &self.full_tx
    }

    /// Receiving half of the full channel. Bodies never drain it.
    #[inline]
    pub fn full_rx(&self) -> &Receiver<bool> {
        &self.full_rx
    }

    /// Sending half of the channel with one free slot.
    #[inline]
    pub fn spare_tx(&self) -> &Sender<bool> {
        &self.spare_tx
    }

    /// Receiving half of the spare channel, used to re-arm the free slot.
    #[inline]
    pub fn spare_rx(&self) -> &Receiver<bool> {
        &self.spare_rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Fixtures {
        Fixtures::build().unwrap()
    }

    #[test]
    fn build_produces_valid_set() {
        let f = fresh();
        assert_eq!(f.val(), 1);
        assert_eq!(f.args(), &[1, 2, 3]);
        assert_eq!(f.seq(), &[1]);
        f.validate().unwrap();
    }

    #[test]
    fn validate_is_idempotent() {
        let f = fresh();
        for _ in 0..10 {
            f.validate().unwrap();
        }
        assert_eq!(f.full_rx().len(), 1);
        assert!(f.spare_rx().is_empty());
    }

    #[test]
    fn channel_states() {
        let f = fresh();
        assert_eq!(f.blocked_tx().capacity(), Some(0));
        assert!(matches!(
            f.closed_rx().try_recv(),
            Err(TryRecvError::Disconnected)
        ));
        assert!(f.full_tx().is_full());
        assert_eq!(f.spare_tx().capacity(), Some(1));
        assert!(f.spare_tx().is_empty());
    }

    #[test]
    fn rejects_wrong_value() {
        let mut f = fresh();
        f.val = 0;
        assert_eq!(f.validate(), Err(FixtureError::UnexpectedValue { val: 0 }));
    }

    #[test]
    fn rejects_non_positive_argument() {
        let mut f = fresh();
        f.args = [1, -4, 3];
        assert_eq!(
            f.validate(),
            Err(FixtureError::NonPositiveArgument { index: 1, value: -4 })
        );
    }

    #[test]
    fn rejects_wrong_sequence_length() {
        let mut f = fresh();
        f.seq = vec![1, 2];
        assert_eq!(f.validate(), Err(FixtureError::SequenceLength { len: 2 }));
        f.seq.clear();
        assert_eq!(f.validate(), Err(FixtureError::SequenceLength { len: 0 }));
    }

    #[test]
    fn rejects_ready_blocked_channel() {
        let mut f = fresh();
        let (tx, rx) = bounded(1);
        f.blocked_tx = tx;
        f.blocked_rx = rx;
        assert_eq!(f.validate(), Err(FixtureError::BlockedReady));
    }

    #[test]
    fn rejects_open_closed_channel() {
        let mut f = fresh();
        let (tx, rx) = bounded(0);
        f.closed_rx = rx;
        assert_eq!(f.validate(), Err(FixtureError::ClosedNotTerminal));
        drop(tx);
        f.validate().unwrap();
    }

    #[test]
    fn rejects_drained_full_channel() {
        let f = fresh();
        f.full_rx().try_recv().unwrap();
        assert_eq!(f.validate(), Err(FixtureError::FullNotFull { len: 0 }));
    }

    #[test]
    fn rejects_occupied_spare_channel() {
        let f = fresh();
        f.spare_tx().try_send(true).unwrap();
        assert_eq!(f.validate(), Err(FixtureError::SpareNotEmpty { len: 1 }));
        f.spare_rx().try_recv().unwrap();
        f.validate().unwrap();
    }
}
