use crate::planes::read_planes_mut;
use crate::{BlendError, BoundsCheckError, ColorParams, FrameMut, FrameRefExt, PixelFormat, Raster};

mod packed;
mod planar;

pub(crate) use packed::blend_packed;
pub(crate) use planar::blend_planar;
pub use planar::{YuvaBlock, reduce_2x2};

/// Blend a single 8 bit sample, `alpha` being the weight of `src`
///
/// Uses a truncating division by 255, so the result is never rounded up.
#[inline(always)]
pub fn blend_component(dst: u8, src: u8, alpha: u8) -> u8 {
    let alpha = u32::from(alpha);

    ((u32::from(dst) * (255 - alpha) + u32::from(src) * alpha) / 255) as u8
}

/// Split a premultiplied ARGB texel into its alpha and straight RGB normalized to 0.0 - 1.0
///
/// Fully transparent texels have no meaningful color and return black.
#[inline(always)]
pub fn unpremultiply(texel: u32) -> (u8, [f64; 3]) {
    let alpha = (texel >> 24) as u8;

    if alpha == 0 {
        return (0, [0.0; 3]);
    }

    let a = f64::from(alpha);
    let rgb = [16, 8, 0].map(|shift| f64::from((texel >> shift) as u8) / a);

    (alpha, rgb)
}

/// Destination frame split into its planes, by shape of the pixel format
pub(crate) enum FrameLayout<'a> {
    Packed {
        /// Channels are stored R, G, B instead of B, G, R
        reverse: bool,
        plane: (&'a mut [u8], usize),
    },
    Planar {
        params: ColorParams,
        planes: [(&'a mut [u8], usize); 3],
    },
}

impl<'a> FrameLayout<'a> {
    /// Validate `dst` against the overlay and borrow its planes
    pub(crate) fn new(overlay: &Raster, dst: &'a mut dyn FrameMut) -> Result<Self, BlendError> {
        let (width, height) = (dst.width(), dst.height());

        if overlay.width() != width || overlay.height() != height {
            return Err(BlendError::MismatchedDimensions {
                overlay_width: overlay.width(),
                overlay_height: overlay.height(),
                frame_width: width,
                frame_height: height,
            });
        }

        dst.bounds_check()?;

        let format = dst.format();

        if !format.is_planar() {
            let [plane] = read_planes_mut(dst.planes_mut()).map_err(BoundsCheckError::from)?;

            return Ok(Self::Packed {
                reverse: format == PixelFormat::RGB,
                plane,
            });
        }

        if width % 2 != 0 || height % 2 != 0 {
            return Err(BlendError::OddDimensions { width, height });
        }

        let params = ColorParams::for_format(format, dst.color())?;
        let planes = read_planes_mut(dst.planes_mut()).map_err(BoundsCheckError::from)?;

        Ok(Self::Planar { params, planes })
    }
}

/// Blend the overlay into the frame in place
///
/// Packed RGB frames are blended pixel by pixel, 4:2:0 frames in 2x2 blocks with the overlay
/// converted to the frame's color space and range. The frame is left untouched on error.
pub fn blend(overlay: &Raster, dst: &mut dyn FrameMut) -> Result<(), BlendError> {
    let layout = FrameLayout::new(overlay, dst)?;

    blend_rows(overlay.data(), overlay.stride(), layout, overlay.width(), overlay.height());

    Ok(())
}

/// Blend `height` rows of overlay texels into the given layout
pub(crate) fn blend_rows(
    src: &[u8],
    src_stride: usize,
    layout: FrameLayout<'_>,
    width: usize,
    height: usize,
) {
    match layout {
        FrameLayout::Packed {
            reverse: false,
            plane: (dst, dst_stride),
        } => blend_packed::<false>(src, src_stride, dst, dst_stride, width, height),
        FrameLayout::Packed {
            reverse: true,
            plane: (dst, dst_stride),
        } => blend_packed::<true>(src, src_stride, dst, dst_stride, width, height),
        FrameLayout::Planar { params, planes } => {
            blend_planar(&params, src, src_stride, planes, width, height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColorInfo, ColorRange, ColorSpace, Frame, FrameRef, premultiply};

    #[test]
    fn blend_component_extremes() {
        for dst in 0..=255u8 {
            for src in [0u8, 1, 100, 254, 255] {
                assert_eq!(blend_component(dst, src, 0), dst);
                assert_eq!(blend_component(dst, src, 255), src);
            }
        }
    }

    #[test]
    fn blend_component_never_leaves_range() {
        for dst in (0..=255u8).step_by(5) {
            for src in (0..=255u8).step_by(5) {
                for alpha in 0..=255u8 {
                    let out = blend_component(dst, src, alpha);

                    assert!(out >= dst.min(src) && out <= dst.max(src));
                }
            }
        }
    }

    #[test]
    fn blend_component_truncates() {
        // (10 * 127 + 200 * 128) / 255 = 105.37...
        assert_eq!(blend_component(10, 200, 128), 105);
        // (255 * 128 + 0 * 127) / 255 = 128
        assert_eq!(blend_component(0, 255, 128), 128);
    }

    #[test]
    fn unpremultiply_transparent() {
        assert_eq!(unpremultiply(0x00000000), (0, [0.0; 3]));
        assert_eq!(unpremultiply(0x00ff8040), (0, [0.0; 3]));
    }

    #[test]
    fn unpremultiply_opaque() {
        let (alpha, rgb) = unpremultiply(0xff_80_40_20);

        assert_eq!(alpha, 255);
        assert_eq!(rgb, [128.0 / 255.0, 64.0 / 255.0, 32.0 / 255.0]);
    }

    #[test]
    fn premultiply_roundtrip() {
        for a in 1..=255u8 {
            for c in (0..=255u8).step_by(3) {
                let texel = premultiply(a, c, c, c);
                let (alpha, rgb) = unpremultiply(texel);

                assert_eq!(alpha, a);

                let restored = premultiply(a, (rgb[0] * 255.0 + 0.5) as u8, 0, 0);
                let expected = (texel >> 16) & 0xff;
                let got = (restored >> 16) & 0xff;

                assert!(got.abs_diff(expected) <= 1, "a={a} c={c}");
            }
        }
    }

    #[test]
    fn mismatched_dimensions() {
        let overlay = Raster::new(4, 4).unwrap();
        let mut frame = Frame::blank(PixelFormat::BGR, 2, 2, ColorInfo::default());

        let err = blend(&overlay, &mut frame).unwrap_err();

        assert!(matches!(
            err,
            BlendError::MismatchedDimensions {
                overlay_width: 4,
                frame_width: 2,
                ..
            }
        ));
    }

    #[test]
    fn odd_planar_dimensions() {
        let overlay = Raster::new(3, 2).unwrap();
        let mut frame = Frame::blank(PixelFormat::I420, 3, 2, ColorInfo::default());

        let err = blend(&overlay, &mut frame).unwrap_err();

        assert!(matches!(
            err,
            BlendError::OddDimensions {
                width: 3,
                height: 2
            }
        ));
    }

    #[test]
    fn unsupported_color_space_leaves_frame_untouched() {
        let mut overlay = Raster::new(2, 2).unwrap();
        overlay.fill(0xffffffff);

        let color = ColorInfo {
            space: ColorSpace::ICtCp,
            range: ColorRange::Limited,
        };
        let mut frame = Frame::blank(PixelFormat::I420, 2, 2, color);

        let err = blend(&overlay, &mut frame).unwrap_err();

        assert!(matches!(err, BlendError::UnsupportedColorSpace(_)));
        assert!(frame.planes().all(|(plane, _)| plane.iter().all(|&b| b == 0)));
    }

    #[test]
    fn packed_frames_ignore_color_space() {
        let overlay = Raster::new(2, 2).unwrap();
        let color = ColorInfo {
            space: ColorSpace::ICtCp,
            range: ColorRange::Limited,
        };
        let mut frame = Frame::blank(PixelFormat::RGB, 2, 2, color);

        blend(&overlay, &mut frame).unwrap();
    }
}
