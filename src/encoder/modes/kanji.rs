/// Kanji mode encoder (Mode 1000)
/// Input is Shift JIS; each double-byte character packs into 13 bits
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::segment::SegmentMode;
use crate::error::EncodeError;

pub struct KanjiEncoder;

impl KanjiEncoder {
    pub fn encode(sjis: &[u8]) -> Result<BitBuffer, EncodeError> {
        if sjis.len() % 2 != 0 {
            return Err(EncodeError::encoding(
                SegmentMode::Kanji,
                "Shift JIS data must be an even number of bytes",
            ));
        }

        let mut bb = BitBuffer::with_capacity(Self::bit_len(sjis.len() / 2));
        for (i, pair) in sjis.chunks_exact(2).enumerate() {
            let code = u32::from(pair[0]) << 8 | u32::from(pair[1]);
            let offset = match code {
                0x8140..=0x9FFC => code - 0x8140,
                0xE040..=0xEBBF => code - 0xC140,
                _ => {
                    return Err(EncodeError::encoding(
                        SegmentMode::Kanji,
                        format!("character {i} (0x{code:04X}) is outside the Kanji ranges"),
                    ));
                }
            };
            bb.append_bits((offset >> 8) * 0xC0 + (offset & 0xFF), 13);
        }
        Ok(bb)
    }

    pub fn bit_len(count: usize) -> usize {
        count * 13
    }
}
