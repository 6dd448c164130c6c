//! Output formats for a finished symbol
//!
//! Both renderers only read [`QRCode::size`](crate::QRCode::size) and
//! [`QRCode::get_module`](crate::QRCode::get_module), walking a quiet zone of
//! `border` light modules around the grid.

/// SVG document output
pub mod svg;
/// Block-character terminal output
pub mod text;
