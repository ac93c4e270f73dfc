//! Error taxonomy for the multiplication and digit-ingestion pipelines.
//!
//! The core never logs, retries, or returns a partial result — every failure
//! is reported to the caller as a [`BigIntError`].

use std::fmt::{self, Display, Formatter};

/// Error type for big-integer parsing and multiplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BigIntError {
    /// A byte outside `'0'..='9'` appeared where a digit was required.
    InvalidDigit {
        /// Offset of the offending byte within the input window.
        index: usize,
        /// The offending byte value.
        byte: u8,
    },
    /// The input was longer than [`crate::config::digits::MAX_DIGIT_LEN`].
    LengthExceeded {
        /// The length that was requested.
        len: usize,
        /// The maximum supported length.
        max: usize,
    },
    /// An internal computation would exceed the limb-array index space.
    NumericOverflow {
        /// Human-readable detail of what overflowed.
        detail: String,
    },
    /// The host allocator refused a requested allocation.
    AllocationFailure {
        /// Number of `u32` limbs that were requested.
        requested_limbs: usize,
    },
}

impl Display for BigIntError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            BigIntError::InvalidDigit { index, byte } => write!(
                f,
                "invalid digit byte 0x{byte:02x} at offset {index} (expected '0'..='9')"
            ),
            BigIntError::LengthExceeded { len, max } => write!(
                f,
                "input length {len} exceeds the maximum supported length of {max} digits"
            ),
            BigIntError::NumericOverflow { detail } => {
                write!(f, "numeric overflow: {detail}")
            }
            BigIntError::AllocationFailure { requested_limbs } => write!(
                f,
                "allocation of {requested_limbs} limbs failed"
            ),
        }
    }
}

impl std::error::Error for BigIntError {}
