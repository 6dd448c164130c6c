use tracing::debug;

use crate::encoder::capacity::select_version;
use crate::encoder::codewords::{add_ecc_and_interleave, build_data_codewords};
use crate::encoder::config::{parallel_mask_min_version, parallel_masks_enabled};
use crate::encoder::format::FormatInfo;
use crate::encoder::function_mask::SymbolCanvas;
use crate::encoder::mask::{apply_mask, select_mask};
use crate::encoder::placement::place_codewords;
use crate::encoder::segment::Segment;
use crate::encoder::tables::num_data_codewords;
use crate::error::EncodeError;
use crate::models::{ECLevel, MaskPattern, QRCode, Version};

/// Per-call knobs for [`QRCode::encode_segments_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Smallest version to consider
    pub min_version: Version,
    /// Largest version to consider
    pub max_version: Version,
    /// Fixed mask, or `None` to pick the lowest-penalty one
    pub mask: Option<MaskPattern>,
    /// Raise the ECC level when the chosen version has room for it
    pub boost_ecl: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            min_version: Version::MIN,
            max_version: Version::MAX,
            mask: None,
            boost_ecl: true,
        }
    }
}

impl EncodeOptions {
    /// Restrict the version search to `min..=max`
    pub fn with_versions(mut self, min: Version, max: Version) -> Self {
        self.min_version = min;
        self.max_version = max;
        self
    }

    /// Force a mask pattern
    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Enable or disable ECC level boosting
    pub fn with_boost_ecl(mut self, boost_ecl: bool) -> Self {
        self.boost_ecl = boost_ecl;
        self
    }
}

impl QRCode {
    /// Encode Unicode text at the given error correction level (or better).
    ///
    /// The text is split into numeric, alphanumeric and byte segments and the
    /// smallest fitting version is used.
    ///
    /// # Errors
    /// [`EncodeError::DataTooLong`] if the text does not fit in version 40.
    pub fn encode_text(text: &str, ec_level: ECLevel) -> Result<Self, EncodeError> {
        let segs = Segment::make_segments(text);
        Self::encode_segments(&segs, ec_level)
    }

    /// Encode raw bytes as a single byte-mode segment.
    pub fn encode_binary(data: &[u8], ec_level: ECLevel) -> Result<Self, EncodeError> {
        let segs = [Segment::make_bytes(data)];
        Self::encode_segments(&segs, ec_level)
    }

    /// Encode caller-built segments with default options.
    pub fn encode_segments(segs: &[Segment], ec_level: ECLevel) -> Result<Self, EncodeError> {
        Self::encode_segments_with(segs, ec_level, &EncodeOptions::default())
    }

    /// Encode caller-built segments within a version range, optionally with a
    /// fixed mask and without ECC boosting.
    pub fn encode_segments_with(
        segs: &[Segment],
        ec_level: ECLevel,
        options: &EncodeOptions,
    ) -> Result<Self, EncodeError> {
        let choice = select_version(
            segs,
            ec_level,
            options.min_version,
            options.max_version,
            options.boost_ecl,
        )?;
        let data = build_data_codewords(segs, choice.version, choice.ec_level);
        Ok(Self::encode_codewords(
            choice.version,
            choice.ec_level,
            &data,
            options.mask,
        ))
    }

    /// Build a symbol from finished data codewords (no headers or padding added).
    ///
    /// # Panics
    /// If `data_codewords.len()` is not the data capacity of `version` at `ec_level`.
    pub fn encode_codewords(
        version: Version,
        ec_level: ECLevel,
        data_codewords: &[u8],
        mask: Option<MaskPattern>,
    ) -> Self {
        let expected = num_data_codewords(version, ec_level);
        assert_eq!(
            data_codewords.len(),
            expected,
            "version {version} at level {ec_level} takes {expected} data codewords"
        );

        let codewords = add_ecc_and_interleave(data_codewords, version, ec_level);
        let mut canvas = SymbolCanvas::new(version);
        place_codewords(&mut canvas, &codewords);

        let mask = match mask {
            Some(mask) => mask,
            None => {
                let parallel = parallel_masks_enabled()
                    && version.number() >= parallel_mask_min_version();
                let (mask, penalty) = select_mask(&mut canvas, ec_level, parallel);
                debug!(mask = mask.bits(), penalty, parallel, "selected mask");
                mask
            }
        };
        apply_mask(&mut canvas, mask);
        FormatInfo::new(ec_level, mask).draw(&mut canvas);

        QRCode {
            version,
            error_correction: ec_level,
            mask_pattern: mask,
            modules: canvas.into_modules(),
        }
    }
}
