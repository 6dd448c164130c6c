//! QR code encoding modules
//!
//! Everything needed to turn text or bytes into a symbol:
//! - Segment construction (numeric, alphanumeric, byte, kanji, ECI)
//! - Version selection and codeword assembly (padding, Reed-Solomon, interleaving)
//! - Symbol construction (function patterns, data placement, masking)

/// BCH codes for format and version info
pub mod bch;
/// Bit buffer used to assemble segment data
pub mod bitstream;
/// Version selection and ECC boosting
pub mod capacity;
/// Data codeword assembly, block split and interleaving
pub mod codewords;
pub(crate) mod config;
/// Format information placement (mask pattern, EC level)
pub mod format;
/// Working symbol grid with function patterns drawn
pub mod function_mask;
/// Mask application and penalty-driven selection
pub mod mask;
/// Per-mode segment payload encoders
pub mod modes;
/// Mask penalty rules
pub mod penalty;
/// Zigzag data placement
pub mod placement;
/// Main QR encoder that orchestrates the encoding pipeline
pub mod qr_encoder;
/// Reed-Solomon error correction
pub mod reed_solomon;
/// Segments and automatic segmentation
pub mod segment;
/// QR specification tables (ECC codewords/blocks, alignment positions)
pub mod tables;
/// Version information placement (versions 7-40)
pub mod version;
