/// Byte mode encoder (Mode 0100)
/// 8 bits per byte; text is taken as its UTF-8 bytes
use crate::encoder::bitstream::BitBuffer;

pub struct ByteEncoder;

impl ByteEncoder {
    pub fn encode(data: &[u8]) -> BitBuffer {
        let mut bb = BitBuffer::with_capacity(Self::bit_len(data.len()));
        for &b in data {
            bb.append_bits(u32::from(b), 8);
        }
        bb
    }

    pub fn bit_len(count: usize) -> usize {
        count * 8
    }
}
