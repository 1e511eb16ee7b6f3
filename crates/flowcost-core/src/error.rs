//! Error types for fixture construction and benchmark registration.
//!
//! Fixture errors are fatal to a whole run: no body can be measured
//! without its fixtures. Registry errors are programming mistakes caught
//! when the suite is assembled.

use std::error::Error;
use std::fmt;

/// A fixture is not in the state its benchmarks rely on.
///
/// Returned by [`Fixtures::build()`](crate::Fixtures::build) and
/// [`Fixtures::validate()`](crate::Fixtures::validate). Every variant
/// names a fixture that would make some body block or take the wrong
/// path inside a timed loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixtureError {
    /// The always-blocked channel is ready for send or receive.
    BlockedReady,
    /// The closed channel still has a live sender or a buffered message.
    ClosedNotTerminal,
    /// The full-buffer channel has spare capacity.
    FullNotFull {
        /// Messages found in the buffer.
        len: usize,
    },
    /// The spare-slot channel does not have exactly one free slot.
    SpareNotEmpty {
        /// Messages found in the buffer.
        len: usize,
    },
    /// The iteration sequence does not hold exactly one element.
    SequenceLength {
        /// Observed length.
        len: usize,
    },
    /// The opaque dispatch value is not `1`.
    UnexpectedValue {
        /// Observed value.
        val: i64,
    },
    /// A call argument is not strictly positive.
    NonPositiveArgument {
        /// Position of the argument (0-based).
        index: usize,
        /// Observed value.
        value: i64,
    },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockedReady => write!(f, "blocked channel is ready"),
            Self::ClosedNotTerminal => write!(f, "closed channel is not disconnected and drained"),
            Self::FullNotFull { len } => {
                write!(f, "full channel holds {len} message(s), expected it at capacity")
            }
            Self::SpareNotEmpty { len } => {
                write!(f, "spare channel holds {len} message(s), expected one free slot")
            }
            Self::SequenceLength { len } => {
                write!(f, "sequence has {len} element(s), expected 1")
            }
            Self::UnexpectedValue { val } => write!(f, "dispatch value is {val}, expected 1"),
            Self::NonPositiveArgument { index, value } => {
                write!(f, "call argument {index} is {value}, expected > 0")
            }
        }
    }
}

impl Error for FixtureError {}

/// Errors from assembling a [`Registry`](crate::Registry).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// Two descriptors share a name.
    DuplicateName {
        /// The name registered twice.
        name: &'static str,
    },
    /// A descriptor has an empty name.
    EmptyName,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName { name } => write!(f, "benchmark '{name}' registered twice"),
            Self::EmptyName => write!(f, "benchmark name must not be empty"),
        }
    }
}

impl Error for RegistryError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_error_messages() {
        assert_eq!(FixtureError::BlockedReady.to_string(), "blocked channel is ready");
        assert_eq!(
            FixtureError::SequenceLength { len: 3 }.to_string(),
            "sequence has 3 element(s), expected 1"
        );
        assert_eq!(
            FixtureError::NonPositiveArgument { index: 2, value: 0 }.to_string(),
            "call argument 2 is 0, expected > 0"
        );
    }

    #[test]
    fn registry_error_messages() {
        assert_eq!(
            RegistryError::DuplicateName { name: "switch" }.to_string(),
            "benchmark 'switch' registered twice"
        );
        assert_eq!(
            RegistryError::EmptyName.to_string(),
            "benchmark name must not be empty"
        );
    }
}
