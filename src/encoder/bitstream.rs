/// Append-only bit sequence, most significant bit first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitBuffer {
    bits: Vec<bool>,
}

impl BitBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bits: Vec::with_capacity(bits),
        }
    }

    /// Append the low `len` bits of `value`, high bit first.
    pub fn append_bits(&mut self, value: u32, len: u8) {
        debug_assert!(len <= 31 && value >> len == 0, "value does not fit in {len} bits");
        self.bits
            .extend((0..len).rev().map(|i| (value >> i) & 1 != 0));
    }

    pub fn extend_from_bits(&mut self, bits: &[bool]) {
        self.bits.extend_from_slice(bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }

    /// Pack into bytes, MSB first. The final byte is zero-filled on the right.
    pub fn to_codewords(&self) -> Vec<u8> {
        self.bits
            .chunks(8)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (i, &bit)| acc | ((bit as u8) << (7 - i)))
            })
            .collect()
    }
}
