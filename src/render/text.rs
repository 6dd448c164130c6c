use std::io::{self, Write};

use crate::models::QRCode;

const LIGHT: &str = "\u{2588}\u{2588}";
const DARK: &str = "  ";

/// Render the symbol as rows of block characters, two per module.
///
/// Light modules (the border included) are drawn as full blocks and dark
/// modules as spaces, which reads correctly on a dark terminal background.
/// The grid is followed by one empty line.
pub fn to_text_string(qr: &QRCode, border: u32) -> String {
    let border = i64::from(border);
    let end = i64::from(qr.size()) + border;
    let mut out = String::new();
    for y in -border..end {
        for x in -border..end {
            out.push_str(if module_at(qr, x, y) { DARK } else { LIGHT });
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

/// Quiet-zone coordinates can leave the `i32` range; those modules are light
fn module_at(qr: &QRCode, x: i64, y: i64) -> bool {
    match (i32::try_from(x), i32::try_from(y)) {
        (Ok(x), Ok(y)) => qr.get_module(x, y),
        _ => false,
    }
}

/// Write [`to_text_string`] output to stdout.
pub fn print_qr(qr: &QRCode, border: u32) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(to_text_string(qr, border).as_bytes())?;
    stdout.flush()
}
