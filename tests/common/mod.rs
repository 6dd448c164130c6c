//! Minimal symbol reader used to check encoder output end to end.
//!
//! It reads a clean grid straight from `QRCode::get_module` (no image
//! processing), verifies every checksum on the way and parses the segments.

#![allow(dead_code)]

use rust_qrgen::{ECLevel, MaskPattern, QRCode};

/// Everything recovered from a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub version: u8,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
    /// Segment mode indicators in order
    pub modes: Vec<u8>,
    /// ECI designators in order
    pub eci: Vec<u32>,
    /// Concatenated payload: digits/characters as ASCII, bytes and Shift JIS as-is
    pub data: Vec<u8>,
}

impl Decoded {
    pub fn text(&self) -> String {
        String::from_utf8(self.data.clone()).expect("payload is not UTF-8")
    }
}

/// (ECC codewords per block, number of blocks) for L, M, Q, H, by version
const BLOCKS: [[(usize, usize); 4]; 40] = [
    [(7, 1), (10, 1), (13, 1), (17, 1)], // 1
    [(10, 1), (16, 1), (22, 1), (28, 1)], // 2
    [(15, 1), (26, 1), (18, 2), (22, 2)], // 3
    [(20, 1), (18, 2), (26, 2), (16, 4)], // 4
    [(26, 1), (24, 2), (18, 4), (22, 4)], // 5
    [(18, 2), (16, 4), (24, 4), (28, 4)], // 6
    [(20, 2), (18, 4), (18, 6), (26, 5)], // 7
    [(24, 2), (22, 4), (22, 6), (26, 6)], // 8
    [(30, 2), (22, 5), (20, 8), (24, 8)], // 9
    [(18, 4), (26, 5), (24, 8), (28, 8)], // 10
    [(20, 4), (30, 5), (28, 8), (24, 11)], // 11
    [(24, 4), (22, 8), (26, 10), (28, 11)], // 12
    [(26, 4), (22, 9), (24, 12), (22, 16)], // 13
    [(30, 4), (24, 9), (20, 16), (24, 16)], // 14
    [(22, 6), (24, 10), (30, 12), (24, 18)], // 15
    [(24, 6), (28, 10), (24, 17), (30, 16)], // 16
    [(28, 6), (28, 11), (28, 16), (28, 19)], // 17
    [(30, 6), (26, 13), (28, 18), (28, 21)], // 18
    [(28, 7), (26, 14), (26, 21), (26, 25)], // 19
    [(28, 8), (26, 16), (30, 20), (28, 25)], // 20
    [(28, 8), (26, 17), (28, 23), (30, 25)], // 21
    [(28, 9), (28, 17), (30, 23), (24, 34)], // 22
    [(30, 9), (28, 18), (30, 25), (30, 30)], // 23
    [(30, 10), (28, 20), (30, 27), (30, 32)], // 24
    [(26, 12), (28, 21), (30, 29), (30, 35)], // 25
    [(28, 12), (28, 23), (28, 34), (30, 37)], // 26
    [(30, 12), (28, 25), (30, 34), (30, 40)], // 27
    [(30, 13), (28, 26), (30, 35), (30, 42)], // 28
    [(30, 14), (28, 28), (30, 38), (30, 45)], // 29
    [(30, 15), (28, 29), (30, 40), (30, 48)], // 30
    [(30, 16), (28, 31), (30, 43), (30, 51)], // 31
    [(30, 17), (28, 33), (30, 45), (30, 54)], // 32
    [(30, 18), (28, 35), (30, 48), (30, 57)], // 33
    [(30, 19), (28, 37), (30, 51), (30, 60)], // 34
    [(30, 19), (28, 38), (30, 53), (30, 63)], // 35
    [(30, 20), (28, 40), (30, 56), (30, 66)], // 36
    [(30, 21), (28, 43), (30, 59), (30, 70)], // 37
    [(30, 22), (28, 45), (30, 62), (30, 74)], // 38
    [(30, 24), (28, 47), (30, 65), (30, 77)], // 39
    [(30, 25), (28, 49), (30, 68), (30, 81)], // 40
];

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

pub fn read(qr: &QRCode) -> Result<Decoded, String> {
    let size = qr.size();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(format!("bad size {size}"));
    }
    let version_number = ((size - 17) / 4) as u8;
    if !(1..=40).contains(&version_number) {
        return Err("version out of range".into());
    }
    let grid = Grid::new(qr);

    let (ec_level, mask) = read_format(&grid)?;
    if version_number >= 7 {
        read_version(&grid, version_number)?;
    }
    if !grid.get(8, size as usize - 8) {
        return Err("dark module missing".into());
    }

    let func = function_modules(version_number);
    let data_modules = func.iter().flatten().filter(|f| !**f).count();
    if data_modules != raw_data_modules(version_number) {
        return Err(format!("data area has {data_modules} modules"));
    }

    let bits = extract_bits(&grid, &func, mask);
    let codewords: Vec<u8> = bits
        .chunks(8)
        .filter(|c| c.len() == 8)
        .map(|c| c.iter().fold(0u8, |acc, &b| acc << 1 | b as u8))
        .collect();

    let (ecc, blocks) = block_layout(version_number, ec_level);
    let data = deinterleave_and_check(&codewords, ecc, blocks)?;
    if data.len() != codewords.len() - ecc * blocks {
        return Err("data codeword count mismatch".into());
    }

    let mut decoded = Decoded {
        version: version_number,
        ec_level,
        mask,
        modes: Vec::new(),
        eci: Vec::new(),
        data: Vec::new(),
    };
    parse_segments(&data, version_number, &mut decoded)?;
    Ok(decoded)
}

struct Grid {
    size: usize,
    cells: Vec<bool>,
}

impl Grid {
    fn new(qr: &QRCode) -> Self {
        let size = qr.size() as usize;
        let mut cells = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                cells.push(qr.get_module(x as i32, y as i32));
            }
        }
        Self { size, cells }
    }

    fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.size + x]
    }
}

fn block_layout(version: u8, ec_level: ECLevel) -> (usize, usize) {
    let column = match ec_level {
        ECLevel::L => 0,
        ECLevel::M => 1,
        ECLevel::Q => 2,
        ECLevel::H => 3,
    };
    BLOCKS[version as usize - 1][column]
}

/// Data plus ECC modules, counted from the standard's area formula
fn raw_data_modules(version: u8) -> usize {
    let v = version as usize;
    let size = v * 4 + 17;
    let align = if v == 1 { 0 } else { v / 7 + 2 };
    let align_patterns = (align * align).saturating_sub(3);
    // Alignment patterns crossing the timing lines share 5 modules each with them
    let on_timing = 2 * align.saturating_sub(2);
    let function = 3 * 64 + 2 * (size - 16) + align_patterns * 25 - on_timing * 5 + 31
        + if v >= 7 { 36 } else { 0 };
    size * size - function
}

/// Mask predicates by id, row `i`, column `j`
fn mask_bit(mask: u8, i: usize, j: usize) -> bool {
    match mask {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => i * j % 2 + i * j % 3 == 0,
        6 => (i * j % 2 + i * j % 3) % 2 == 0,
        _ => ((i + j) % 2 + i * j % 3) % 2 == 0,
    }
}

fn bch_remainder(value: u32, generator: u32, degree: u32, len: u32) -> u32 {
    let mut v = value;
    for bit in (degree..len).rev() {
        if (v >> bit) & 1 == 1 {
            v ^= generator << (bit - degree);
        }
    }
    v
}

fn read_format(grid: &Grid) -> Result<(ECLevel, MaskPattern), String> {
    let size = grid.size;
    let mut first = 0u32;
    for i in 0..6 {
        first |= (grid.get(8, i) as u32) << i;
    }
    first |= (grid.get(8, 7) as u32) << 6;
    first |= (grid.get(8, 8) as u32) << 7;
    first |= (grid.get(7, 8) as u32) << 8;
    for i in 9..15 {
        first |= (grid.get(14 - i, 8) as u32) << i;
    }

    let mut second = 0u32;
    for i in 0..8 {
        second |= (grid.get(size - 1 - i, 8) as u32) << i;
    }
    for i in 8..15 {
        second |= (grid.get(8, size - 15 + i) as u32) << i;
    }

    if first != second {
        return Err(format!("format copies differ: {first:015b} vs {second:015b}"));
    }
    let word = first ^ 0x5412;
    if bch_remainder(word, 0x537, 10, 15) != 0 {
        return Err(format!("format word {word:015b} fails BCH check"));
    }
    let data = (word >> 10) as u8;
    let ec_level = ECLevel::from_format_bits(data >> 3);
    let mask = MaskPattern::from_bits(data & 7).ok_or("bad mask bits")?;
    Ok((ec_level, mask))
}

fn read_version(grid: &Grid, version: u8) -> Result<(), String> {
    let size = grid.size;
    let mut top_right = 0u32;
    let mut bottom_left = 0u32;
    for i in 0..18 {
        let a = size - 11 + i % 3;
        let b = i / 3;
        top_right |= (grid.get(a, b) as u32) << i;
        bottom_left |= (grid.get(b, a) as u32) << i;
    }
    if top_right != bottom_left {
        return Err("version copies differ".into());
    }
    if bch_remainder(top_right, 0x1F25, 12, 18) != 0 || top_right >> 12 != u32::from(version) {
        return Err(format!("version word {top_right:018b} does not match {version}"));
    }
    Ok(())
}

fn alignment_positions(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let v = version as usize;
    let size = v * 4 + 17;
    let count = v / 7 + 2;
    let step = if v == 32 {
        26
    } else {
        (v * 4 + count * 2 + 1) / (count * 2 - 2) * 2
    };
    let mut positions: Vec<usize> = (0..count - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}

fn function_modules(version: u8) -> Vec<Vec<bool>> {
    let size = version as usize * 4 + 17;
    let mut func = vec![vec![false; size]; size];
    for (y, row) in func.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            let top_left = x < 9 && y < 9;
            let top_right = x >= size - 8 && y < 9;
            let bottom_left = x < 9 && y >= size - 8;
            let timing = x == 6 || y == 6;
            let version_blocks = version >= 7
                && ((x < 6 && (size - 11..size - 8).contains(&y))
                    || (y < 6 && (size - 11..size - 8).contains(&x)));
            *cell = top_left || top_right || bottom_left || timing || version_blocks;
        }
    }

    let positions = alignment_positions(version);
    let last = positions.len().saturating_sub(1);
    for (i, &cx) in positions.iter().enumerate() {
        for (j, &cy) in positions.iter().enumerate() {
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            for y in cy - 2..=cy + 2 {
                for x in cx - 2..=cx + 2 {
                    func[y][x] = true;
                }
            }
        }
    }
    func
}

fn extract_bits(grid: &Grid, func: &[Vec<bool>], mask: MaskPattern) -> Vec<bool> {
    let size = grid.size;
    let mut bits = Vec::new();
    let mut right = size as isize - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..size {
            for j in 0..2 {
                let x = (right - j) as usize;
                let upward = ((right + 1) & 2) == 0;
                let y = if upward { size - 1 - vert } else { vert };
                if !func[y][x] {
                    bits.push(grid.get(x, y) ^ mask_bit(mask.bits(), y, x));
                }
            }
        }
        right -= 2;
    }
    bits
}

fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80 != 0;
        a <<= 1;
        if carry {
            a ^= 0x1D;
        }
        b >>= 1;
    }
    product
}

fn gf_pow(base: u8, exp: usize) -> u8 {
    (0..exp).fold(1u8, |acc, _| gf_mul(acc, base))
}

fn syndromes_zero(block: &[u8], ecc_len: usize) -> bool {
    (0..ecc_len).all(|k| {
        let root = gf_pow(2, k);
        block.iter().fold(0u8, |acc, &c| gf_mul(acc, root) ^ c) == 0
    })
}

fn deinterleave_and_check(codewords: &[u8], ecc: usize, blocks: usize) -> Result<Vec<u8>, String> {
    let raw = codewords.len();
    let num_short = blocks - raw % blocks;
    let short_len = raw / blocks;
    let data_len = |i: usize| short_len - ecc + usize::from(i >= num_short);

    let mut data_blocks: Vec<Vec<u8>> = vec![Vec::new(); blocks];
    let mut iter = codewords.iter().copied();
    for j in 0..=short_len - ecc {
        for (i, block) in data_blocks.iter_mut().enumerate() {
            if j < data_len(i) {
                block.push(iter.next().ok_or("ran out of codewords")?);
            }
        }
    }
    let mut ecc_blocks: Vec<Vec<u8>> = vec![Vec::new(); blocks];
    for _ in 0..ecc {
        for block in ecc_blocks.iter_mut() {
            block.push(iter.next().ok_or("ran out of codewords")?);
        }
    }
    if iter.next().is_some() {
        return Err("codewords left over".into());
    }

    let mut data = Vec::new();
    for (i, (d, e)) in data_blocks.iter().zip(&ecc_blocks).enumerate() {
        let mut block = d.clone();
        block.extend_from_slice(e);
        if !syndromes_zero(&block, ecc) {
            return Err(format!("block {i} fails Reed-Solomon check"));
        }
        data.extend_from_slice(d);
    }
    Ok(data)
}

struct BitReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl BitReader<'_> {
    fn remaining(&self) -> usize {
        self.data.len() * 8 - self.pos
    }

    fn read(&mut self, n: usize) -> Result<u32, String> {
        if n > self.remaining() {
            return Err(format!("wanted {n} bits, {} left", self.remaining()));
        }
        let mut value = 0u32;
        for _ in 0..n {
            let bit = (self.data[self.pos >> 3] >> (7 - (self.pos & 7))) & 1;
            value = value << 1 | u32::from(bit);
            self.pos += 1;
        }
        Ok(value)
    }
}

fn count_bits(mode: u8, version: u8) -> usize {
    let band = match version {
        1..=9 => 0,
        10..=26 => 1,
        _ => 2,
    };
    match mode {
        1 => [10, 12, 14][band],
        2 => [9, 11, 13][band],
        4 => [8, 16, 16][band],
        8 => [8, 10, 12][band],
        _ => 0,
    }
}

fn parse_segments(data: &[u8], version: u8, out: &mut Decoded) -> Result<(), String> {
    let mut r = BitReader { data, pos: 0 };
    loop {
        if r.remaining() < 4 {
            // Truncated terminator
            let rest = r.remaining();
            if r.read(rest)? != 0 {
                return Err("non-zero terminator".into());
            }
            break;
        }
        let mode = r.read(4)? as u8;
        if mode == 0 {
            break;
        }
        out.modes.push(mode);
        let count = r.read(count_bits(mode, version))? as usize;
        match mode {
            1 => {
                let mut left = count;
                while left > 0 {
                    let take = left.min(3);
                    let value = r.read([0, 4, 7, 10][take])?;
                    let digits = format!("{value:0take$}");
                    if digits.len() != take {
                        return Err(format!("numeric group {value} too large"));
                    }
                    out.data.extend_from_slice(digits.as_bytes());
                    left -= take;
                }
            }
            2 => {
                let mut left = count;
                while left >= 2 {
                    let value = r.read(11)? as usize;
                    if value >= 45 * 45 {
                        return Err("alphanumeric pair out of range".into());
                    }
                    out.data.push(ALPHANUMERIC[value / 45]);
                    out.data.push(ALPHANUMERIC[value % 45]);
                    left -= 2;
                }
                if left == 1 {
                    let value = r.read(6)? as usize;
                    out.data.push(*ALPHANUMERIC.get(value).ok_or("bad alphanumeric char")?);
                }
            }
            4 => {
                for _ in 0..count {
                    out.data.push(r.read(8)? as u8);
                }
            }
            8 => {
                for _ in 0..count {
                    let value = r.read(13)?;
                    let mut sjis = (value / 0xC0) << 8 | (value % 0xC0);
                    sjis += if sjis < 0x1F00 { 0x8140 } else { 0xC140 };
                    out.data.push((sjis >> 8) as u8);
                    out.data.push(sjis as u8);
                }
            }
            7 => {
                let first = r.read(8)?;
                let value = if first & 0x80 == 0 {
                    first
                } else if first & 0xC0 == 0x80 {
                    (first & 0x3F) << 8 | r.read(8)?
                } else if first & 0xE0 == 0xC0 {
                    (first & 0x1F) << 16 | r.read(16)?
                } else {
                    return Err("bad ECI prefix".into());
                };
                out.eci.push(value);
            }
            other => return Err(format!("unknown mode {other:04b}")),
        }
    }

    // Zero bits up to the byte boundary, then alternating pad bytes
    let align = (8 - r.pos % 8) % 8;
    if r.read(align.min(r.remaining()))? != 0 {
        return Err("non-zero alignment bits".into());
    }
    let start = r.pos / 8;
    for (i, &byte) in data[start..].iter().enumerate() {
        let expected = if i % 2 == 0 { 0xEC } else { 0x11 };
        if byte != expected {
            return Err(format!("pad byte {i} is {byte:#04x}"));
        }
    }
    Ok(())
}
