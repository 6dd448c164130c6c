use crate::models::QRCode;

/// Render the symbol as a standalone SVG document.
///
/// All dark modules form one filled path of `1x1` squares, offset by
/// `border`; the view box is `size + 2 * border` on each side. Output
/// always uses `\n` line endings.
pub fn to_svg_string(qr: &QRCode, border: u32) -> String {
    let size = qr.size();
    let border = i64::from(border);
    let mut squares = Vec::new();
    for y in 0..size {
        for x in 0..size {
            if qr.get_module(x, y) {
                squares.push(format!(
                    "M{},{}h1v1h-1z",
                    i64::from(x) + border,
                    i64::from(y) + border
                ));
            }
        }
    }
    let path = squares.join(" ");

    let dimension = i64::from(size) + border * 2;
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {dim} {dim}\" stroke=\"none\">\n",
            "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n",
            "\t<path d=\"{path}\" fill=\"#000000\"/>\n",
            "</svg>\n",
        ),
        dim = dimension,
        path = path,
    )
}
