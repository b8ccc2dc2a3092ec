mod params;
mod space;

pub(crate) use params::quantize;
pub use params::{ColorParams, RangeScale};
pub use space::{ColorSpace, LumaCoefficients, UnsupportedColorSpaceError};

/// Color description of a video frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ColorInfo {
    /// YUV matrix coefficients tagged on the frame, ignored for RGB frames
    pub space: ColorSpace,

    /// Sample range tagged on the frame, ignored for RGB frames
    pub range: ColorRange,
}

/// Sample range of a YUV frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorRange {
    /// Studio range, Y (16 - 235), U & V (16 - 240)
    Limited,

    /// Full range (0 - 255)
    Full,

    /// No tag, treated as [`ColorRange::Full`]
    #[default]
    Unspecified,
}

impl ColorRange {
    /// If samples use the full 8 bit range, only an explicit [`ColorRange::Limited`] tag does not
    pub fn is_full(self) -> bool {
        !matches!(self, ColorRange::Limited)
    }
}

pub(crate) mod mat_idxs {
    pub(crate) const Y: usize = 0;
    pub(crate) const U: usize = 1;
    pub(crate) const V: usize = 2;

    pub(crate) const R: usize = 0;
    pub(crate) const G: usize = 1;
    pub(crate) const B: usize = 2;
}
