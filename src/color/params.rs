use super::space::convert_rgb_to_yuv_matrix;
use super::{ColorInfo, ColorRange, UnsupportedColorSpaceError};
use crate::PixelFormat;
use crate::color::mat_idxs::*;

/// Scale and offset mapping normalized luma and chroma onto the 8 bit sample range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeScale {
    pub y_multiply: f64,
    pub y_add: f64,
    pub uv_multiply: f64,
    pub uv_add: f64,
}

impl RangeScale {
    /// Studio range, Y (16 - 235), U & V (16 - 240)
    pub const LIMITED: Self = Self {
        y_multiply: 219.0 / 255.0,
        y_add: 16.0 / 255.0,
        uv_multiply: 224.0 / 255.0,
        uv_add: 128.0 / 255.0,
    };

    /// Full range (0 - 255)
    pub const FULL: Self = Self {
        y_multiply: 1.0,
        y_add: 0.0,
        uv_multiply: 1.0,
        uv_add: 0.5,
    };

    pub fn new(range: ColorRange) -> Self {
        if range.is_full() { Self::FULL } else { Self::LIMITED }
    }
}

/// Everything needed to turn a normalized RGB color into 8 bit YUV samples of a specific frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorParams {
    rgb_to_yuv: [[f64; 3]; 3],
    range: RangeScale,
}

impl ColorParams {
    /// Derive the parameters from the frame's color description
    ///
    /// Fails if the color space has no known luma coefficients.
    pub fn new(color: ColorInfo) -> Result<Self, UnsupportedColorSpaceError> {
        Ok(Self {
            rgb_to_yuv: color.space.rgb_to_yuv_matrix()?,
            range: RangeScale::new(color.range),
        })
    }

    /// Like [`ColorParams::new`] but accounts for formats which imply a sample range
    pub fn for_format(
        format: PixelFormat,
        color: ColorInfo,
    ) -> Result<Self, UnsupportedColorSpaceError> {
        let range = match format {
            PixelFormat::J420 => ColorRange::Full,
            _ => color.range,
        };

        Self::new(ColorInfo { range, ..color })
    }

    pub fn range(&self) -> RangeScale {
        self.range
    }

    /// Convert normalized RGB to normalized YUV with the range scale and offsets applied
    #[inline(always)]
    pub fn convert(&self, rgb: [f64; 3]) -> [f64; 3] {
        let mut yuv = convert_rgb_to_yuv_matrix(&self.rgb_to_yuv, rgb);

        yuv[Y] = yuv[Y] * self.range.y_multiply + self.range.y_add;
        yuv[U] = yuv[U] * self.range.uv_multiply + self.range.uv_add;
        yuv[V] = yuv[V] * self.range.uv_multiply + self.range.uv_add;

        yuv
    }
}

/// Scale a normalized value to 8 bits, rounding half up
#[inline(always)]
pub(crate) fn quantize(v: f64) -> u8 {
    (v * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorSpace;

    fn params(space: ColorSpace, range: ColorRange) -> ColorParams {
        ColorParams::new(ColorInfo { space, range }).unwrap()
    }

    #[test]
    fn white_luma() {
        let limited = params(ColorSpace::BT709, ColorRange::Limited).convert([1.0, 1.0, 1.0]);
        let full = params(ColorSpace::BT709, ColorRange::Full).convert([1.0, 1.0, 1.0]);

        assert_eq!(quantize(limited[Y]), 235);
        assert_eq!(quantize(full[Y]), 255);
    }

    #[test]
    fn black_luma_and_neutral_chroma() {
        let [y, u, v] = params(ColorSpace::SMPTE170M, ColorRange::Limited)
            .convert([0.0, 0.0, 0.0])
            .map(quantize);
        assert_eq!((y, u, v), (16, 128, 128));

        let [y, u, v] = params(ColorSpace::SMPTE170M, ColorRange::Full)
            .convert([0.0, 0.0, 0.0])
            .map(quantize);
        assert_eq!((y, u, v), (0, 128, 128));
    }

    #[test]
    fn limited_chroma_extremes() {
        // Pure blue has the maximum Cb
        let [_, u, _] = params(ColorSpace::BT709, ColorRange::Limited)
            .convert([0.0, 0.0, 1.0])
            .map(quantize);
        assert_eq!(u, 240);

        // Pure red has the maximum Cr
        let [_, _, v] = params(ColorSpace::BT709, ColorRange::Limited)
            .convert([1.0, 0.0, 0.0])
            .map(quantize);
        assert_eq!(v, 240);
    }

    #[test]
    fn range_table() {
        assert_eq!(RangeScale::new(ColorRange::Limited), RangeScale::LIMITED);
        assert_eq!(RangeScale::new(ColorRange::Full), RangeScale::FULL);
        assert_eq!(RangeScale::new(ColorRange::Unspecified), RangeScale::FULL);
        assert_eq!(params(ColorSpace::BT709, ColorRange::Full).range(), RangeScale::FULL);
    }

    #[test]
    fn j420_is_always_full_range() {
        let color = ColorInfo {
            space: ColorSpace::BT709,
            range: ColorRange::Limited,
        };

        assert_eq!(
            ColorParams::for_format(PixelFormat::J420, color).unwrap().range(),
            RangeScale::FULL
        );
        assert_eq!(
            ColorParams::for_format(PixelFormat::I420, color).unwrap().range(),
            RangeScale::LIMITED
        );
    }

    #[test]
    fn untagged_frames_use_full_range() {
        let params = ColorParams::new(ColorInfo::default()).unwrap();

        assert_eq!(params.range(), RangeScale::FULL);
        assert_eq!(params.convert([1.0, 1.0, 1.0]).map(quantize), [255, 128, 128]);
    }

    #[test]
    fn unsupported_space_fails() {
        let err = ColorParams::new(ColorInfo {
            space: ColorSpace::ICtCp,
            range: ColorRange::Limited,
        })
        .unwrap_err();

        assert_eq!(err.space, ColorSpace::ICtCp);
    }

    #[test]
    fn quantize_rounds_half_up_and_clamps() {
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(-0.1), 0);
        assert_eq!(quantize(1.2), 255);
        assert_eq!(quantize(100.0 / 255.0), 100);
    }
}
