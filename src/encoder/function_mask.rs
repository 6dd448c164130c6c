use crate::encoder::format::FormatInfo;
use crate::encoder::tables::alignment_pattern_positions;
use crate::encoder::version::VersionInfo;
use crate::models::{BitMatrix, Version};

/// Working grid for one symbol: module colours plus a parallel function flag.
/// true = function module (never touched by data placement or masking).
#[derive(Debug, Clone)]
pub struct SymbolCanvas {
    version: Version,
    modules: BitMatrix,
    function: BitMatrix,
}

impl SymbolCanvas {
    /// Allocate the grid for `version` and draw every function pattern.
    ///
    /// Format information is reserved (light) until the mask is known.
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut canvas = Self {
            version,
            modules: BitMatrix::square(size),
            function: BitMatrix::square(size),
        };

        canvas.draw_timing_patterns();

        // Finder patterns + separators (9x9 areas, clipped to bounds)
        canvas.draw_finder_pattern(3, 3);
        canvas.draw_finder_pattern(size - 4, 3);
        canvas.draw_finder_pattern(3, size - 4);

        canvas.draw_alignment_patterns();
        FormatInfo::reserve(&mut canvas);
        VersionInfo::new(version).draw(&mut canvas);
        canvas
    }

    pub fn size(&self) -> usize {
        self.modules.width()
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.function.get(x, y)
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules.get(x, y)
    }

    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    pub fn into_modules(self) -> BitMatrix {
        self.modules
    }

    /// Colour a module and mark it as function
    pub(crate) fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.function.set(x, y, true);
    }

    /// Colour a data module
    pub(crate) fn set_data(&mut self, x: usize, y: usize, dark: bool) {
        debug_assert!(!self.is_function(x, y), "data write to function module ({x}, {y})");
        self.modules.set(x, y, dark);
    }

    pub(crate) fn toggle(&mut self, x: usize, y: usize) {
        self.modules.toggle(x, y);
    }

    fn draw_timing_patterns(&mut self) {
        for i in 0..self.size() {
            self.set_function(6, i, i % 2 == 0);
            self.set_function(i, 6, i % 2 == 0);
        }
    }

    /// 7x7 finder ring centred on (cx, cy) with its light separator
    fn draw_finder_pattern(&mut self, cx: usize, cy: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    let dist = dx.abs().max(dy.abs());
                    self.set_function(x as usize, y as usize, dist != 2 && dist != 4);
                }
            }
        }
    }

    fn draw_alignment_patterns(&mut self) {
        let positions = alignment_pattern_positions(self.version);
        let last = positions.len().saturating_sub(1);
        for (i, &cx) in positions.iter().enumerate() {
            for (j, &cy) in positions.iter().enumerate() {
                // Skip the three finder corners
                let corner = (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0);
                if !corner {
                    self.draw_alignment_pattern(cx as usize, cy as usize);
                }
            }
        }
    }

    /// 5x5 alignment pattern centred on (cx, cy)
    fn draw_alignment_pattern(&mut self, cx: usize, cy: usize) {
        for dy in 0..5usize {
            for dx in 0..5usize {
                let dist = dx.abs_diff(2).max(dy.abs_diff(2));
                self.set_function(cx + dx - 2, cy + dy - 2, dist != 1);
            }
        }
    }

    /// Modules left for data and ECC bits
    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        size * size - self.function.count_ones()
    }
}
