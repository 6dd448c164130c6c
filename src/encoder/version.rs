/// Version information placement (versions 7-40)
use crate::encoder::bch::Bch;
use crate::encoder::function_mask::SymbolCanvas;
use crate::models::Version;

/// Version info is 18 bits (6 data + 12 ECC), stored in two 3x6 blocks
/// next to the top-right and bottom-left finders.
pub struct VersionInfo {
    version: Version,
}

impl VersionInfo {
    pub fn new(version: Version) -> Self {
        Self { version }
    }

    /// The 18-bit word, or `None` below version 7 where no block exists
    pub fn bits(&self) -> Option<u32> {
        (self.version.number() >= 7).then(|| Bch::version_codeword(self.version.number()))
    }

    pub fn draw(&self, canvas: &mut SymbolCanvas) {
        let Some(bits) = self.bits() else {
            return;
        };
        let size = canvas.size();
        for i in 0..18 {
            let dark = (bits >> i) & 1 != 0;
            let a = size - 11 + i % 3;
            let b = i / 3;
            canvas.set_function(a, b, dark);
            canvas.set_function(b, a, dark);
        }
    }
}
