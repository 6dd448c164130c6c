use tracing::debug;

use crate::encoder::bitstream::BitBuffer;
use crate::encoder::modes::{
    alphanumeric::AlphanumericEncoder, byte::ByteEncoder, eci::EciEncoder, kanji::KanjiEncoder,
    numeric::NumericEncoder,
};
use crate::error::EncodeError;
use crate::models::Version;

/// Data mode of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentMode {
    /// Decimal digits
    Numeric,
    /// 45-character uppercase set
    Alphanumeric,
    /// Arbitrary bytes
    Byte,
    /// Shift JIS double-byte characters
    Kanji,
    /// Extended Channel Interpretation designator
    Eci,
}

impl SegmentMode {
    /// Four-bit mode indicator
    pub fn mode_bits(&self) -> u32 {
        match self {
            SegmentMode::Numeric => 0x1,
            SegmentMode::Alphanumeric => 0x2,
            SegmentMode::Byte => 0x4,
            SegmentMode::Kanji => 0x8,
            SegmentMode::Eci => 0x7,
        }
    }

    /// Width of the character-count field at `version`
    pub fn char_count_bits(&self, version: Version) -> u8 {
        self.char_count_bits_for_band(version.band())
    }

    fn char_count_bits_for_band(&self, band: usize) -> u8 {
        let widths: [u8; 3] = match self {
            SegmentMode::Numeric => [10, 12, 14],
            SegmentMode::Alphanumeric => [9, 11, 13],
            SegmentMode::Byte => [8, 16, 16],
            SegmentMode::Kanji => [8, 10, 12],
            SegmentMode::Eci => [0, 0, 0],
        };
        widths[band]
    }
}

/// A run of data in a single mode, already packed into bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    mode: SegmentMode,
    num_chars: usize,
    data: Vec<bool>,
}

impl Segment {
    /// Build a segment from pre-packed bits.
    ///
    /// `num_chars` must be consistent with `mode` and `data`; the typed
    /// constructors below are the safe way to get that right.
    pub fn new(mode: SegmentMode, num_chars: usize, data: Vec<bool>) -> Self {
        Self {
            mode,
            num_chars,
            data,
        }
    }

    /// Numeric segment; fails on anything but ASCII digits
    pub fn make_numeric(text: &str) -> Result<Self, EncodeError> {
        let bits = NumericEncoder::encode(text)?;
        Ok(Self::new(SegmentMode::Numeric, text.len(), bits.into_bits()))
    }

    /// Alphanumeric segment over `0-9 A-Z $%*+-./:` and space
    pub fn make_alphanumeric(text: &str) -> Result<Self, EncodeError> {
        let bits = AlphanumericEncoder::encode(text)?;
        Ok(Self::new(
            SegmentMode::Alphanumeric,
            text.chars().count(),
            bits.into_bits(),
        ))
    }

    /// Byte segment, one count per byte
    pub fn make_bytes(data: &[u8]) -> Self {
        Self::new(
            SegmentMode::Byte,
            data.len(),
            ByteEncoder::encode(data).into_bits(),
        )
    }

    /// Kanji segment from Shift JIS encoded double-byte characters
    pub fn make_kanji(sjis: &[u8]) -> Result<Self, EncodeError> {
        let bits = KanjiEncoder::encode(sjis)?;
        Ok(Self::new(SegmentMode::Kanji, sjis.len() / 2, bits.into_bits()))
    }

    /// ECI designator segment, e.g. 26 for UTF-8
    pub fn make_eci(assign_value: u32) -> Result<Self, EncodeError> {
        let bits = EciEncoder::encode(assign_value)?;
        Ok(Self::new(SegmentMode::Eci, 0, bits.into_bits()))
    }

    /// True if every character is an ASCII digit
    pub fn is_numeric(text: &str) -> bool {
        text.bytes().all(|b| b.is_ascii_digit())
    }

    /// True if every character is in the alphanumeric set
    pub fn is_alphanumeric(text: &str) -> bool {
        text.chars()
            .all(|c| AlphanumericEncoder::char_value(c).is_some())
    }

    /// Split text into segments, one per classification run.
    ///
    /// Characters are classed numeric, alphanumeric or byte. Maximal runs of
    /// one class become segments, then neighbouring runs are merged into the
    /// wider mode while that does not cost extra bits (measured with the
    /// version 1-9 count widths). Kanji is never chosen here.
    pub fn make_segments(text: &str) -> Vec<Self> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut runs: Vec<Run> = Vec::new();
        for (offset, c) in text.char_indices() {
            let class = classify(c);
            match runs.last_mut() {
                Some(run) if run.mode == class => run.end = offset + c.len_utf8(),
                _ => runs.push(Run {
                    mode: class,
                    start: offset,
                    end: offset + c.len_utf8(),
                }),
            }
        }

        merge_runs(&mut runs, text);

        let segs: Vec<Self> = runs.iter().map(|run| run.to_segment(text)).collect();
        debug!(
            segments = ?segs.iter().map(|s| (s.mode, s.num_chars)).collect::<Vec<_>>(),
            "auto-segmented text"
        );
        segs
    }

    /// Data mode
    pub fn mode(&self) -> SegmentMode {
        self.mode
    }

    /// Character count as written in the count field
    pub fn num_chars(&self) -> usize {
        self.num_chars
    }

    /// Packed payload bits
    pub fn data(&self) -> &[bool] {
        &self.data
    }

    /// Bits needed for all segments at `version`, headers included.
    ///
    /// `None` when a count does not fit its field or the total overflows.
    pub fn total_bits(segs: &[Self], version: Version) -> Option<usize> {
        segs.iter().try_fold(0usize, |acc, seg| {
            let ccbits = seg.mode.char_count_bits(version);
            if ccbits < usize::BITS as u8 && seg.num_chars >= 1usize << ccbits {
                return None;
            }
            acc.checked_add(4 + usize::from(ccbits))?
                .checked_add(seg.data.len())
        })
    }

    /// Append mode indicator, count field and payload to `bb`
    pub(crate) fn write_to(&self, bb: &mut BitBuffer, version: Version) {
        bb.append_bits(self.mode.mode_bits(), 4);
        bb.append_bits(self.num_chars as u32, self.mode.char_count_bits(version));
        bb.extend_from_bits(&self.data);
    }
}

fn classify(c: char) -> SegmentMode {
    if c.is_ascii_digit() {
        SegmentMode::Numeric
    } else if AlphanumericEncoder::char_value(c).is_some() {
        SegmentMode::Alphanumeric
    } else {
        SegmentMode::Byte
    }
}

/// Byte-offset span of `text` destined for one segment
#[derive(Debug, Clone, Copy)]
struct Run {
    mode: SegmentMode,
    start: usize,
    end: usize,
}

impl Run {
    fn cost(&self, text: &str) -> usize {
        cost(self.mode, &text[self.start..self.end])
    }

    fn to_segment(self, text: &str) -> Segment {
        let slice = &text[self.start..self.end];
        let seg = match self.mode {
            SegmentMode::Numeric => Segment::make_numeric(slice),
            SegmentMode::Alphanumeric => Segment::make_alphanumeric(slice),
            _ => Ok(Segment::make_bytes(slice.as_bytes())),
        };
        // Runs are only ever widened, so the slice always fits its mode.
        seg.unwrap_or_else(|_| Segment::make_bytes(slice.as_bytes()))
    }
}

fn cost(mode: SegmentMode, slice: &str) -> usize {
    let payload = match mode {
        SegmentMode::Numeric => NumericEncoder::bit_len(slice.len()),
        SegmentMode::Alphanumeric => AlphanumericEncoder::bit_len(slice.chars().count()),
        _ => ByteEncoder::bit_len(slice.len()),
    };
    4 + usize::from(mode.char_count_bits_for_band(0)) + payload
}

fn wider(a: SegmentMode, b: SegmentMode) -> SegmentMode {
    fn rank(mode: SegmentMode) -> u8 {
        match mode {
            SegmentMode::Numeric => 0,
            SegmentMode::Alphanumeric => 1,
            _ => 2,
        }
    }
    if rank(a) >= rank(b) { a } else { b }
}

fn merge_runs(runs: &mut Vec<Run>, text: &str) {
    loop {
        let mut merged_any = false;
        let mut i = 0;
        while i + 1 < runs.len() {
            let (a, b) = (runs[i], runs[i + 1]);
            let joined = Run {
                mode: wider(a.mode, b.mode),
                start: a.start,
                end: b.end,
            };
            if joined.cost(text) <= a.cost(text) + b.cost(text) {
                runs[i] = joined;
                runs.remove(i + 1);
                merged_any = true;
            } else {
                i += 1;
            }
        }
        if !merged_any {
            break;
        }
    }
}
