//! RustQR-gen - QR Code Model 2 symbol encoder
//!
//! Turns text or bytes into an ISO/IEC 18004 symbol (versions 1-40, all four
//! error correction levels) and renders it as SVG or terminal block art.
//!
//! ```
//! use rust_qrgen::{ECLevel, encode_text};
//!
//! let qr = encode_text("HELLO WORLD", ECLevel::M).unwrap();
//! assert_eq!(qr.size(), 21);
//! let svg = rust_qrgen::render::svg::to_svg_string(&qr, 4);
//! assert!(svg.contains("viewBox=\"0 0 29 29\""));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// QR code encoding modules (segments, error correction, symbol construction)
pub mod encoder;
/// Error types
pub mod error;
/// Core data structures (QRCode, BitMatrix, Version, etc.)
pub mod models;
/// SVG and terminal renderers
pub mod render;

pub use encoder::qr_encoder::EncodeOptions;
pub use encoder::segment::{Segment, SegmentMode};
pub use error::EncodeError;
pub use models::{BitMatrix, ECLevel, MaskPattern, QRCode, Version};

/// Encode Unicode text, choosing segment modes and the smallest version automatically.
///
/// The error correction level may be raised if it costs no extra version.
pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<QRCode, EncodeError> {
    QRCode::encode_text(text, ec_level)
}

/// Encode raw bytes in byte mode
pub fn encode_binary(data: &[u8], ec_level: ECLevel) -> Result<QRCode, EncodeError> {
    QRCode::encode_binary(data, ec_level)
}

/// Encode pre-built segments with default options
pub fn encode_segments(segs: &[Segment], ec_level: ECLevel) -> Result<QRCode, EncodeError> {
    QRCode::encode_segments(segs, ec_level)
}
