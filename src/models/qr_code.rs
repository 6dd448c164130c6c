use std::fmt;
use std::str::FromStr;

use super::BitMatrix;
use crate::encoder::penalty;

/// QR Code symbol version (1-40, Model 2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Version {
    /// Smallest Model 2 version (21x21 modules)
    pub const MIN: Version = Version(1);
    /// Largest Model 2 version (177x177 modules)
    pub const MAX: Version = Version(40);

    /// Create a version, returning `None` outside 1-40
    pub fn new(number: u8) -> Option<Self> {
        (1..=40).contains(&number).then_some(Self(number))
    }

    /// Get the version number (1-40)
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Get the size in modules (width = height)
    pub fn size(&self) -> usize {
        4 * self.0 as usize + 17
    }

    /// Index of the character-count width band: 0 for 1-9, 1 for 10-26, 2 for 27-40
    pub(crate) fn band(&self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }

    /// The following version, or `None` after 40
    pub(crate) fn next(&self) -> Option<Self> {
        Self::new(self.0 + 1)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error correction level, ordered from weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// All levels in ascending strength
    pub const ALL: [ECLevel; 4] = [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H];

    /// Two-bit pattern stored in the format information (L=01, M=00, Q=11, H=10)
    pub fn format_bits(&self) -> u8 {
        match self {
            ECLevel::L => 0b01,
            ECLevel::M => 0b00,
            ECLevel::Q => 0b11,
            ECLevel::H => 0b10,
        }
    }

    /// Inverse of [`ECLevel::format_bits`]
    pub fn from_format_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b01 => ECLevel::L,
            0b00 => ECLevel::M,
            0b11 => ECLevel::Q,
            _ => ECLevel::H,
        }
    }

    /// Row index into the per-level codeword tables
    pub(crate) fn ordinal(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ECLevel::L => "low",
            ECLevel::M => "medium",
            ECLevel::Q => "quartile",
            ECLevel::H => "high",
        };
        f.write_str(name)
    }
}

impl FromStr for ECLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(ECLevel::L),
            "m" | "medium" => Ok(ECLevel::M),
            "q" | "quartile" => Ok(ECLevel::Q),
            "h" | "high" => Ok(ECLevel::H),
            other => Err(format!("unknown error correction level '{other}'")),
        }
    }
}

/// Mask pattern (0-7)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaskPattern {
    /// (i + j) % 2 == 0
    Pattern0 = 0,
    /// i % 2 == 0
    Pattern1 = 1,
    /// j % 3 == 0
    Pattern2 = 2,
    /// (i + j) % 3 == 0
    Pattern3 = 3,
    /// (i/2 + j/3) % 2 == 0
    Pattern4 = 4,
    /// (i*j)%2 + (i*j)%3 == 0
    Pattern5 = 5,
    /// ((i*j)%2 + (i*j)%3) % 2 == 0
    Pattern6 = 6,
    /// ((i+j)%2 + (i*j)%3) % 2 == 0
    Pattern7 = 7,
}

impl MaskPattern {
    /// All eight patterns in ascending order
    pub const ALL: [MaskPattern; 8] = [
        MaskPattern::Pattern0,
        MaskPattern::Pattern1,
        MaskPattern::Pattern2,
        MaskPattern::Pattern3,
        MaskPattern::Pattern4,
        MaskPattern::Pattern5,
        MaskPattern::Pattern6,
        MaskPattern::Pattern7,
    ];

    /// Get mask pattern from its three-bit id
    pub fn from_bits(bits: u8) -> Option<Self> {
        Self::ALL.get(bits as usize).copied()
    }

    /// Three-bit id of this pattern
    pub fn bits(&self) -> u8 {
        *self as u8
    }

    /// Check if module at (row i, column j) is flipped by this mask
    pub fn is_masked(&self, i: usize, j: usize) -> bool {
        match self {
            MaskPattern::Pattern0 => (i + j) % 2 == 0,
            MaskPattern::Pattern1 => i % 2 == 0,
            MaskPattern::Pattern2 => j % 3 == 0,
            MaskPattern::Pattern3 => (i + j) % 3 == 0,
            MaskPattern::Pattern4 => (i / 2 + j / 3) % 2 == 0,
            MaskPattern::Pattern5 => ((i * j) % 2 + (i * j) % 3) == 0,
            MaskPattern::Pattern6 => (((i * j) % 2) + ((i * j) % 3)) % 2 == 0,
            MaskPattern::Pattern7 => (((i + j) % 2) + ((i * j) % 3)) % 2 == 0,
        }
    }
}

/// An encoded QR Code symbol: a square grid of dark and light modules.
///
/// Instances are immutable once built. Create them with
/// [`QRCode::encode_text`], [`QRCode::encode_binary`],
/// [`QRCode::encode_segments`] or, at the lowest level,
/// [`QRCode::encode_codewords`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QRCode {
    pub(crate) version: Version,
    pub(crate) error_correction: ECLevel,
    pub(crate) mask_pattern: MaskPattern,
    pub(crate) modules: BitMatrix,
}

impl QRCode {
    /// Symbol version (1-40)
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level actually used, which may be higher than requested
    pub fn error_correction(&self) -> ECLevel {
        self.error_correction
    }

    /// Mask pattern applied to the data modules
    pub fn mask_pattern(&self) -> MaskPattern {
        self.mask_pattern
    }

    /// Side length in modules, between 21 and 177
    pub fn size(&self) -> i32 {
        self.modules.width() as i32
    }

    /// Colour of the module at column `x`, row `y` (`true` = dark).
    ///
    /// Coordinates outside `[0, size)` are light, which lets renderers walk a
    /// quiet zone with negative or oversized coordinates.
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        self.modules.get(x as usize, y as usize)
    }

    /// Module grid (true = dark)
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Total mask penalty of the finished symbol, as scored during mask selection
    pub fn penalty_score(&self) -> u32 {
        penalty::score(&self.modules)
    }
}
