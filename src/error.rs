use thiserror::Error;

use crate::encoder::segment::SegmentMode;

/// Errors returned by the encoder entry points
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The data does not fit in any allowed version at the requested level
    #[error("data too long: {used_bits} bits needed, {capacity_bits} bits available")]
    DataTooLong {
        /// Bits needed by the segments at the largest allowed version
        used_bits: usize,
        /// Data capacity of the largest allowed version at the requested level
        capacity_bits: usize,
    },

    /// A segment's character count exceeds its count field at every allowed version
    #[error("segment too long for its character count field")]
    SegmentTooLong,

    /// Explicit segment data incompatible with the declared mode
    #[error("cannot encode as {mode:?}: {reason}")]
    Encoding {
        /// Mode the caller asked for
        mode: SegmentMode,
        /// What was wrong with the input
        reason: String,
    },

    /// `min_version` was greater than `max_version`
    #[error("invalid version range {min}..={max}")]
    InvalidVersionRange {
        /// Requested minimum version
        min: u8,
        /// Requested maximum version
        max: u8,
    },
}

impl EncodeError {
    pub(crate) fn encoding(mode: SegmentMode, reason: impl Into<String>) -> Self {
        EncodeError::Encoding {
            mode,
            reason: reason.into(),
        }
    }

    /// True for the two "does not fit" variants
    pub fn is_too_long(&self) -> bool {
        matches!(
            self,
            EncodeError::DataTooLong { .. } | EncodeError::SegmentTooLong
        )
    }
}
