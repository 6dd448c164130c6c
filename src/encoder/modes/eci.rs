/// ECI designator encoder (Mode 0111)
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::segment::SegmentMode;
use crate::error::EncodeError;

pub struct EciEncoder;

impl EciEncoder {
    /// Encode an assignment number as 1, 2 or 3 bytes
    pub fn encode(assign_value: u32) -> Result<BitBuffer, EncodeError> {
        let mut bb = BitBuffer::new();
        if assign_value < 1 << 7 {
            bb.append_bits(assign_value, 8);
        } else if assign_value < 1 << 14 {
            bb.append_bits(0b10, 2);
            bb.append_bits(assign_value, 14);
        } else if assign_value < 1_000_000 {
            bb.append_bits(0b110, 3);
            bb.append_bits(assign_value, 21);
        } else {
            return Err(EncodeError::encoding(
                SegmentMode::Eci,
                format!("assignment value {assign_value} is out of range"),
            ));
        }
        Ok(bb)
    }
}
