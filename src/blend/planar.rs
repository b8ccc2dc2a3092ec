use super::{blend_component, unpremultiply};
use crate::ColorParams;
use crate::color::quantize;
use crate::raster::read_texel;

/// A 2x2 block of overlay texels converted to 4:2:0 YUV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YuvaBlock {
    /// Luma of the top left, top right, bottom left and bottom right texel
    pub y: [u8; 4],
    pub u: u8,
    pub v: u8,
    /// Alpha of every texel, same order as `y`
    pub a: [u8; 4],
}

impl YuvaBlock {
    /// Alpha used to blend the block's chroma
    pub fn average_alpha(&self) -> u8 {
        (self.a.iter().map(|&a| u32::from(a)).sum::<u32>() / 4) as u8
    }
}

/// Convert 4 premultiplied ARGB texels (row major, top left first) into 4 luma and 1 chroma pair
///
/// Chroma is computed per texel and averaged after quantization.
pub fn reduce_2x2(params: &ColorParams, texels: [u32; 4]) -> YuvaBlock {
    let mut block = YuvaBlock {
        y: [0; 4],
        u: 0,
        v: 0,
        a: [0; 4],
    };

    let mut u_sum = 0u32;
    let mut v_sum = 0u32;

    for (i, texel) in texels.into_iter().enumerate() {
        let (alpha, rgb) = unpremultiply(texel);
        let [y, u, v] = params.convert(rgb).map(quantize);

        block.y[i] = y;
        block.a[i] = alpha;
        u_sum += u32::from(u);
        v_sum += u32::from(v);
    }

    block.u = (u_sum / 4) as u8;
    block.v = (v_sum / 4) as u8;

    block
}

/// Blend premultiplied ARGB rows into Y, U and V planes with 4:2:0 subsampling
///
/// `width` and `height` must be even.
pub(crate) fn blend_planar(
    params: &ColorParams,
    src: &[u8],
    src_stride: usize,
    planes: [(&mut [u8], usize); 3],
    width: usize,
    height: usize,
) {
    debug_assert_eq!(width % 2, 0);
    debug_assert_eq!(height % 2, 0);

    let [(y_plane, y_stride), (u_plane, u_stride), (v_plane, v_stride)] = planes;

    let src_rows = src.chunks(src_stride * 2);
    let y_rows = y_plane.chunks_mut(y_stride * 2);
    let u_rows = u_plane.chunks_mut(u_stride);
    let v_rows = v_plane.chunks_mut(v_stride);

    // Process 2 rows of pixels for iteration of this loop
    for (((src, y), u), v) in src_rows.zip(y_rows).zip(u_rows).zip(v_rows).take(height / 2) {
        let (src0, src1) = src.split_at(src_stride);
        let (y0, y1) = y.split_at_mut(y_stride);

        for x in 0..width / 2 {
            let texels = [
                read_texel(&src0[x * 8..]),
                read_texel(&src0[x * 8 + 4..]),
                read_texel(&src1[x * 8..]),
                read_texel(&src1[x * 8 + 4..]),
            ];

            if texels.iter().all(|texel| texel >> 24 == 0) {
                continue;
            }

            let block = reduce_2x2(params, texels);

            let lx = x * 2;
            y0[lx] = blend_component(y0[lx], block.y[0], block.a[0]);
            y0[lx + 1] = blend_component(y0[lx + 1], block.y[1], block.a[1]);
            y1[lx] = blend_component(y1[lx], block.y[2], block.a[2]);
            y1[lx + 1] = blend_component(y1[lx + 1], block.y[3], block.a[3]);

            let alpha = block.average_alpha();
            u[x] = blend_component(u[x], block.u, alpha);
            v[x] = blend_component(v[x], block.v, alpha);
        }
    }
}
