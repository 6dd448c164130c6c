/// BCH codes protecting the format info (15,5) and version info (18,6)
pub struct Bch;

/// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
pub const FORMAT_GENERATOR: u32 = 0x537;
/// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
pub const VERSION_GENERATOR: u32 = 0x1F25;

impl Bch {
    /// Remainder of data * x^degree modulo `generator` (degree `degree`)
    pub fn remainder(data: u32, generator: u32, degree: u32) -> u32 {
        let mut rem = data;
        for _ in 0..degree {
            rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
        }
        rem
    }

    /// 15-bit format codeword (before the fixed XOR mask)
    pub fn format_codeword(data: u8) -> u16 {
        let data = u32::from(data & 0x1F);
        (data << 10 | Self::remainder(data, FORMAT_GENERATOR, 10)) as u16
    }

    /// 18-bit version codeword
    pub fn version_codeword(version: u8) -> u32 {
        let data = u32::from(version);
        data << 12 | Self::remainder(data, VERSION_GENERATOR, 12)
    }
}
