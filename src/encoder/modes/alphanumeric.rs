/// Alphanumeric mode encoder (Mode 0010)
/// Alphanumeric character set: 0-9, A-Z, space, $%*+-./:
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::segment::SegmentMode;
use crate::error::EncodeError;

pub const ALPHANUMERIC_CHARSET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Pairs = 11 bits, single = 6 bits
pub struct AlphanumericEncoder;

impl AlphanumericEncoder {
    pub fn encode(text: &str) -> Result<BitBuffer, EncodeError> {
        let values = text
            .chars()
            .map(|c| {
                Self::char_value(c).ok_or_else(|| {
                    EncodeError::encoding(
                        SegmentMode::Alphanumeric,
                        format!("character {c:?} is outside the alphanumeric set"),
                    )
                })
            })
            .collect::<Result<Vec<u32>, _>>()?;

        let mut bb = BitBuffer::with_capacity(Self::bit_len(values.len()));
        for pair in values.chunks(2) {
            match *pair {
                [a, b] => bb.append_bits(a * 45 + b, 11),
                [a] => bb.append_bits(a, 6),
                _ => unreachable!(),
            }
        }
        Ok(bb)
    }

    /// Index of `c` in the 45-character set
    pub fn char_value(c: char) -> Option<u32> {
        ALPHANUMERIC_CHARSET.find(c).map(|i| i as u32)
    }

    pub fn bit_len(count: usize) -> usize {
        count / 2 * 11 + count % 2 * 6
    }
}
