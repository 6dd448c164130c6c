/// Mask application and selection
use rayon::prelude::*;
use tracing::trace;

use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::SymbolCanvas;
use crate::encoder::penalty;
use crate::models::{ECLevel, MaskPattern};

/// XOR `mask` onto every non-function module. Applying it twice restores the grid.
pub fn apply_mask(canvas: &mut SymbolCanvas, mask: MaskPattern) {
    let size = canvas.size();
    for y in 0..size {
        for x in 0..size {
            if !canvas.is_function(x, y) && mask.is_masked(y, x) {
                canvas.toggle(x, y);
            }
        }
    }
}

/// Penalty of `canvas` with `mask` applied and its format bits drawn.
///
/// The canvas is left masked; callers undo it with a second [`apply_mask`].
fn trial(canvas: &mut SymbolCanvas, ec_level: ECLevel, mask: MaskPattern) -> u32 {
    apply_mask(canvas, mask);
    FormatInfo::new(ec_level, mask).draw(canvas);
    let score = penalty::score(canvas.modules());
    trace!(mask = mask.bits(), penalty = score, "mask trial");
    score
}

/// Try all eight masks and return the one with the lowest penalty
/// (ties go to the lowest index) together with its score.
///
/// The canvas comes back unmasked, with the format bits of the last trial
/// drawn; the caller applies the winner and redraws the format bits.
pub fn select_mask(
    canvas: &mut SymbolCanvas,
    ec_level: ECLevel,
    parallel: bool,
) -> (MaskPattern, u32) {
    if parallel {
        let shared: &SymbolCanvas = canvas;
        let (score, mask) = MaskPattern::ALL
            .into_par_iter()
            .map(|mask| {
                let mut scratch = shared.clone();
                (trial(&mut scratch, ec_level, mask), mask)
            })
            .min()
            .unwrap_or((u32::MAX, MaskPattern::Pattern0));
        return (mask, score);
    }

    let mut best = (u32::MAX, MaskPattern::Pattern0);
    for mask in MaskPattern::ALL {
        let score = trial(canvas, ec_level, mask);
        apply_mask(canvas, mask);
        if score < best.0 {
            best = (score, mask);
        }
    }
    (best.1, best.0)
}
