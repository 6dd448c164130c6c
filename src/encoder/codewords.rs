/// Codeword assembly: segment headers, padding, ECC blocks and interleaving
use crate::encoder::bitstream::BitBuffer;
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::segment::Segment;
use crate::encoder::tables::{ec_block_info, num_data_codewords, num_raw_data_modules};
use crate::models::{ECLevel, Version};

const PAD_BYTES: [u32; 2] = [0xEC, 0x11];

/// Concatenate segments into exactly `num_data_codewords(version, ec_level)` bytes.
///
/// Panics if the segments do not fit; capacity is checked during version selection.
pub fn build_data_codewords(segs: &[Segment], version: Version, ec_level: ECLevel) -> Vec<u8> {
    let capacity = num_data_codewords(version, ec_level) * 8;
    let mut bb = BitBuffer::with_capacity(capacity);
    for seg in segs {
        seg.write_to(&mut bb, version);
    }
    assert!(
        bb.len() <= capacity,
        "segments need {} bits but version {version} holds {capacity}",
        bb.len()
    );

    // Terminator, then zero bits up to a byte boundary
    let terminator = (capacity - bb.len()).min(4);
    bb.append_bits(0, terminator as u8);
    let alignment = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, alignment as u8);

    for &pad in PAD_BYTES.iter().cycle() {
        if bb.len() >= capacity {
            break;
        }
        bb.append_bits(pad, 8);
    }
    debug_assert_eq!(bb.len(), capacity);
    bb.to_codewords()
}

/// Split data into blocks, append RS ECC to each, and interleave.
pub fn add_ecc_and_interleave(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<u8> {
    assert_eq!(
        data.len(),
        num_data_codewords(version, ec_level),
        "wrong data codeword count for version {version} level {ec_level:?}"
    );

    let info = ec_block_info(version, ec_level);
    let raw_codewords = num_raw_data_modules(version) / 8;
    let num_short_blocks = info.num_blocks - raw_codewords % info.num_blocks;
    let short_block_len = raw_codewords / info.num_blocks;
    let short_data_len = short_block_len - info.ecc_per_block;

    let rs = ReedSolomonEncoder::new(info.ecc_per_block);
    let mut data_blocks: Vec<&[u8]> = Vec::with_capacity(info.num_blocks);
    let mut ecc_blocks: Vec<Vec<u8>> = Vec::with_capacity(info.num_blocks);
    let mut offset = 0;
    for i in 0..info.num_blocks {
        let len = short_data_len + usize::from(i >= num_short_blocks);
        let block = &data[offset..offset + len];
        offset += len;
        ecc_blocks.push(rs.remainder(block));
        data_blocks.push(block);
    }
    debug_assert_eq!(offset, data.len());

    let mut result = Vec::with_capacity(raw_codewords);
    for i in 0..=short_data_len {
        // Short blocks have no byte at index short_data_len
        result.extend(data_blocks.iter().filter_map(|block| block.get(i)));
    }
    for i in 0..info.ecc_per_block {
        result.extend(ecc_blocks.iter().map(|block| block[i]));
    }
    debug_assert_eq!(result.len(), raw_codewords);
    result
}
