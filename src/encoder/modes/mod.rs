/// Alphanumeric mode encoder (0-9, A-Z, space, $%*+-./:)
pub mod alphanumeric;
/// Byte mode encoder (raw 8-bit data)
pub mod byte;
/// ECI designator encoder
pub mod eci;
/// Kanji mode encoder (Shift JIS double-byte data)
pub mod kanji;
/// Numeric mode encoder (0-9)
pub mod numeric;
