/// Data placement into the symbol following the zigzag pattern
use crate::encoder::function_mask::SymbolCanvas;

/// Place `codewords` MSB first into every non-function module.
///
/// Column pairs are walked right to left (column 6 is skipped), alternating
/// upward and downward. Modules left over once the codewords run out are
/// remainder bits and stay light.
pub fn place_codewords(canvas: &mut SymbolCanvas, codewords: &[u8]) {
    let size = canvas.size();
    let total_bits = codewords.len() * 8;
    let mut i = 0usize;

    let mut right = size - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = (right + 1) & 2 == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for x in [right, right - 1] {
                if !canvas.is_function(x, y) && i < total_bits {
                    let dark = (codewords[i >> 3] >> (7 - (i & 7))) & 1 != 0;
                    canvas.set_data(x, y, dark);
                    i += 1;
                }
            }
        }
        if right < 2 {
            break;
        }
        right -= 2;
    }
    debug_assert_eq!(i, total_bits, "codewords did not fit the data area");
}
