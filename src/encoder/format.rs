/// Format information placement (error correction level + mask pattern)
use crate::encoder::bch::Bch;
use crate::encoder::function_mask::SymbolCanvas;
use crate::models::{ECLevel, MaskPattern};

/// Fixed XOR mask applied to every format codeword
const FORMAT_MASK: u16 = 0x5412;

/// Format info is 15 bits (5 data + 10 ECC), stored twice
/// around the finder patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    pub ec_level: ECLevel,
    pub mask_pattern: MaskPattern,
}

impl FormatInfo {
    pub fn new(ec_level: ECLevel, mask_pattern: MaskPattern) -> Self {
        Self {
            ec_level,
            mask_pattern,
        }
    }

    /// The masked 15-bit word; bit 14 is the first bit of the data part
    pub fn bits(&self) -> u16 {
        let data = self.ec_level.format_bits() << 3 | self.mask_pattern.bits();
        Bch::format_codeword(data) ^ FORMAT_MASK
    }

    /// Write both copies of the format bits.
    pub fn draw(&self, canvas: &mut SymbolCanvas) {
        Self::draw_bits(canvas, self.bits());
    }

    /// Mark the format areas as function modules before the mask is known.
    pub fn reserve(canvas: &mut SymbolCanvas) {
        Self::draw_bits(canvas, 0);
    }

    fn draw_bits(canvas: &mut SymbolCanvas, bits: u16) {
        let bit = |i: usize| (bits >> i) & 1 != 0;
        let size = canvas.size();

        // First copy: around the top-left finder, skipping the timing row/column
        for i in 0..6 {
            canvas.set_function(8, i, bit(i));
        }
        canvas.set_function(8, 7, bit(6));
        canvas.set_function(8, 8, bit(7));
        canvas.set_function(7, 8, bit(8));
        for i in 9..15 {
            canvas.set_function(14 - i, 8, bit(i));
        }

        // Second copy: split between the top-right and bottom-left finders
        for i in 0..8 {
            canvas.set_function(size - 1 - i, 8, bit(i));
        }
        for i in 8..15 {
            canvas.set_function(8, size - 15 + i, bit(i));
        }

        // Always-dark module
        canvas.set_function(8, size - 8, true);
    }
}
