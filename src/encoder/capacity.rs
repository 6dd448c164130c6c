use tracing::debug;

use crate::encoder::segment::Segment;
use crate::encoder::tables::num_data_codewords;
use crate::error::EncodeError;
use crate::models::{ECLevel, Version};

/// Outcome of version selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionChoice {
    pub version: Version,
    pub ec_level: ECLevel,
    /// Bits taken by segment headers and payloads, before terminator and padding
    pub used_bits: usize,
}

/// Data capacity in bits for a version/level pair
pub fn capacity_bits(version: Version, ec_level: ECLevel) -> usize {
    num_data_codewords(version, ec_level) * 8
}

/// Find the smallest version in `min..=max` that holds `segs` at `ec_level`.
///
/// With `boost_ecl`, the level is then raised to the strongest one that still
/// fits in the chosen version.
pub fn select_version(
    segs: &[Segment],
    ec_level: ECLevel,
    min: Version,
    max: Version,
    boost_ecl: bool,
) -> Result<VersionChoice, EncodeError> {
    if min > max {
        return Err(EncodeError::InvalidVersionRange {
            min: min.number(),
            max: max.number(),
        });
    }

    let mut version = min;
    let used_bits = loop {
        let capacity = capacity_bits(version, ec_level);
        let used = Segment::total_bits(segs, version);
        match used {
            Some(n) if n <= capacity => break n,
            _ if version >= max => {
                return Err(match used {
                    None => EncodeError::SegmentTooLong,
                    Some(n) => EncodeError::DataTooLong {
                        used_bits: n,
                        capacity_bits: capacity,
                    },
                });
            }
            _ => {}
        }
        version = match version.next() {
            Some(next) => next,
            None => unreachable!("version below max has a successor"),
        };
    };

    let mut chosen = ec_level;
    if boost_ecl {
        for candidate in [ECLevel::M, ECLevel::Q, ECLevel::H] {
            if candidate > chosen && used_bits <= capacity_bits(version, candidate) {
                chosen = candidate;
            }
        }
        if chosen != ec_level {
            debug!(from = %ec_level, to = %chosen, %version, "boosted error correction level");
        }
    }

    debug!(
        %version,
        ec_level = %chosen,
        used_bits,
        capacity_bits = capacity_bits(version, chosen),
        "selected version"
    );

    Ok(VersionChoice {
        version,
        ec_level: chosen,
        used_bits,
    })
}
