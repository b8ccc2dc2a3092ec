use crate::color::mat_idxs::*;

/// YUV matrix coefficients a video frame can be tagged with
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// GBR stored in the Y, U and V planes
    RGB,

    /// YUV Rec. ITU-R BT.709-6
    BT709,

    /// No tag, treated as [`ColorSpace::SMPTE170M`]
    #[default]
    Unspecified,

    Reserved,

    /// FCC Title 47 Code of Federal Regulations 73.682 (a)(20)
    FCC,

    /// YUV Rec. ITU-R BT.601-7 625
    BT470BG,

    /// YUV Rec. ITU-R BT.601-7 525
    SMPTE170M,

    /// SMPTE 240M
    SMPTE240M,

    /// YCgCo
    YCgCo,

    /// YUV Rec. ITU-R BT.2020-2 non-constant luminance
    BT2020NCL,

    /// YUV Rec. ITU-R BT.2020-2 constant luminance
    BT2020CL,

    /// SMPTE ST 2085 Y'D'zD'x
    SMPTE2085,

    ChromaDerivedNCL,
    ChromaDerivedCL,

    /// ICtCp Rec. ITU-R BT.2100-2
    ICtCp,
}

/// Error returned when a [`ColorSpace`] has no known luma coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("color space {space:?} has no known luma coefficients")]
pub struct UnsupportedColorSpaceError {
    pub space: ColorSpace,
}

/// Weights of the R, G and B components in the luma signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LumaCoefficients {
    pub kr: f64,
    pub kg: f64,
    pub kb: f64,
}

impl ColorSpace {
    /// Replace [`ColorSpace::Unspecified`] with the color space it is interpreted as
    pub fn resolve(self) -> Self {
        match self {
            ColorSpace::Unspecified => ColorSpace::SMPTE170M,
            space => space,
        }
    }

    /// Luma coefficients of the color space, `None` if there are none defined
    pub fn luma_coefficients(self) -> Option<LumaCoefficients> {
        let (kr, kg, kb) = match self.resolve() {
            ColorSpace::FCC => (0.30, 0.59, 0.11),
            ColorSpace::BT470BG | ColorSpace::SMPTE170M => (0.299, 0.587, 0.114),
            ColorSpace::BT709 => (0.2126, 0.7152, 0.0722),
            ColorSpace::SMPTE240M => (0.212, 0.701, 0.087),
            ColorSpace::YCgCo => (0.25, 0.5, 0.25),
            ColorSpace::RGB => (1.0, 1.0, 1.0),
            ColorSpace::BT2020NCL | ColorSpace::BT2020CL => (0.2627, 0.6780, 0.0593),
            ColorSpace::Unspecified
            | ColorSpace::Reserved
            | ColorSpace::SMPTE2085
            | ColorSpace::ChromaDerivedNCL
            | ColorSpace::ChromaDerivedCL
            | ColorSpace::ICtCp => return None,
        };

        Some(LumaCoefficients { kr, kg, kb })
    }

    /// Matrix converting normalized R'G'B' to Y'CbCr, with chroma centered around zero
    pub fn rgb_to_yuv_matrix(self) -> Result<[[f64; 3]; 3], UnsupportedColorSpaceError> {
        self.luma_coefficients()
            .map(|coeffs| coeffs.rgb_to_yuv_matrix())
            .ok_or(UnsupportedColorSpaceError { space: self })
    }
}

impl LumaCoefficients {
    /// Build the RGB to YUV matrix, YCgCo and GBR are detected by their coefficients
    #[rustfmt::skip]
    pub fn rgb_to_yuv_matrix(self) -> [[f64; 3]; 3] {
        let Self { kr, kg, kb } = self;

        if (kr, kg, kb) == (0.25, 0.5, 0.25) {
            return YCGCO_RGB_TO_YUV;
        }

        if (kr, kg, kb) == (1.0, 1.0, 1.0) {
            return GBR_RGB_TO_YUV;
        }

        let bscale = 0.5 / (kb - 1.0);
        let rscale = 0.5 / (kr - 1.0);

        [
            // R             G               B
            [kr,             kg,             kb            ], // Y
            [bscale * kr,    bscale * kg,    0.5           ], // U
            [0.5,            rscale * kg,    rscale * kb   ], // V
        ]
    }
}

#[rustfmt::skip]
const YCGCO_RGB_TO_YUV: [[f64; 3]; 3] = [
    [ 0.25, 0.5,  0.25],
    [-0.25, 0.5, -0.25],
    [ 0.5,  0.0, -0.5 ],
];

// Frames tagged RGB carry G in the Y plane
#[rustfmt::skip]
const GBR_RGB_TO_YUV: [[f64; 3]; 3] = [
    [0.0,  1.0, 0.0],
    [0.0, -0.5, 0.5],
    [0.5, -0.5, 0.0],
];

/// Multiply a normalized RGB vector with a RGB to YUV matrix
#[inline(always)]
pub(crate) fn convert_rgb_to_yuv_matrix(mat: &[[f64; 3]; 3], rgb: [f64; 3]) -> [f64; 3] {
    [Y, U, V].map(|row| mat[row][R] * rgb[R] + mat[row][G] * rgb[G] + mat[row][B] * rgb[B])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unspecified_resolves_to_smpte170m() {
        assert_eq!(ColorSpace::Unspecified.resolve(), ColorSpace::SMPTE170M);
        assert_eq!(
            ColorSpace::Unspecified.rgb_to_yuv_matrix().unwrap(),
            ColorSpace::BT470BG.rgb_to_yuv_matrix().unwrap()
        );
    }

    #[test]
    fn unresolvable_spaces() {
        for space in [
            ColorSpace::Reserved,
            ColorSpace::SMPTE2085,
            ColorSpace::ChromaDerivedNCL,
            ColorSpace::ChromaDerivedCL,
            ColorSpace::ICtCp,
        ] {
            assert!(space.luma_coefficients().is_none());
            assert_eq!(
                space.rgb_to_yuv_matrix().unwrap_err(),
                UnsupportedColorSpaceError { space }
            );
        }
    }

    #[test]
    fn white_has_no_chroma() {
        for space in [
            ColorSpace::FCC,
            ColorSpace::SMPTE170M,
            ColorSpace::BT709,
            ColorSpace::SMPTE240M,
            ColorSpace::BT2020NCL,
            ColorSpace::YCgCo,
            ColorSpace::RGB,
        ] {
            let [y, u, v] =
                convert_rgb_to_yuv_matrix(&space.rgb_to_yuv_matrix().unwrap(), [1.0, 1.0, 1.0]);

            assert!((y - 1.0).abs() < 1e-9, "{space:?} y={y}");
            assert!(u.abs() < 1e-9, "{space:?} u={u}");
            assert!(v.abs() < 1e-9, "{space:?} v={v}");
        }
    }

    #[test]
    fn first_row_is_luma_coefficients() {
        let mat = ColorSpace::BT709.rgb_to_yuv_matrix().unwrap();
        let LumaCoefficients { kr, kg, kb } = ColorSpace::BT709.luma_coefficients().unwrap();

        assert_eq!(mat[Y], [kr, kg, kb]);
    }

    #[test]
    fn bt709_chroma_rows() {
        let mat = ColorSpace::BT709.rgb_to_yuv_matrix().unwrap();

        // Cb = (B - Y) / 1.8556, Cr = (R - Y) / 1.5748
        assert!((mat[U][R] + 0.2126 / 1.8556).abs() < 1e-12);
        assert_eq!(mat[U][B], 0.5);
        assert_eq!(mat[V][R], 0.5);
        assert!((mat[V][B] + 0.0722 / 1.5748).abs() < 1e-12);
    }

    #[test]
    fn special_matrices_are_selected_by_coefficients() {
        assert_eq!(ColorSpace::YCgCo.rgb_to_yuv_matrix().unwrap(), YCGCO_RGB_TO_YUV);
        assert_eq!(ColorSpace::RGB.rgb_to_yuv_matrix().unwrap(), GBR_RGB_TO_YUV);
    }
}
