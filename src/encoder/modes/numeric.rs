/// Numeric mode encoder (Mode 0001)
/// Groups of 3 digits = 10 bits, trailing 2 digits = 7 bits, trailing digit = 4 bits
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::segment::SegmentMode;
use crate::error::EncodeError;

pub struct NumericEncoder;

impl NumericEncoder {
    pub fn encode(text: &str) -> Result<BitBuffer, EncodeError> {
        let digits = text.as_bytes();
        if let Some(pos) = digits.iter().position(|b| !b.is_ascii_digit()) {
            return Err(EncodeError::encoding(
                SegmentMode::Numeric,
                format!("non-digit at byte {pos}"),
            ));
        }

        let mut bb = BitBuffer::with_capacity(Self::bit_len(digits.len()));
        for group in digits.chunks(3) {
            let value = group
                .iter()
                .fold(0u32, |acc, &d| acc * 10 + u32::from(d - b'0'));
            bb.append_bits(value, group.len() as u8 * 3 + 1);
        }
        Ok(bb)
    }

    /// Payload length in bits for `count` digits
    pub fn bit_len(count: usize) -> usize {
        count / 3 * 10 + [0, 4, 7][count % 3]
    }
}
