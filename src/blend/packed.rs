use crate::raster::read_texel;

/// Blend premultiplied ARGB rows into a packed 3 byte per pixel plane
///
/// Without `REVERSE` the channels are written in B, G, R order.
pub(crate) fn blend_packed<const REVERSE: bool>(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
) {
    let src_rows = src.chunks(src_stride);
    let dst_rows = dst.chunks_mut(dst_stride);

    for (src_row, dst_row) in src_rows.zip(dst_rows).take(height) {
        let src_row = &src_row[..width * 4];
        let dst_row = &mut dst_row[..width * 3];

        for (texel, pixel) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(3)) {
            let texel = read_texel(texel);
            let alpha = (texel >> 24) as u8;

            // Color bytes of a transparent texel carry no meaning
            if alpha == 0 {
                continue;
            }

            let [c0, c1, c2] = [0, 8, 16].map(|shift| (texel >> shift) as u8);
            let channels = if REVERSE { [c2, c1, c0] } else { [c0, c1, c2] };

            for (sample, c) in pixel.iter_mut().zip(channels) {
                *sample = blend_premultiplied(*sample, c, alpha);
            }
        }
    }
}

/// Blend an already premultiplied sample, equal to unpremultiplying and using [`blend_component`](super::blend_component)
#[inline(always)]
fn blend_premultiplied(dst: u8, src: u8, alpha: u8) -> u8 {
    let value = (u32::from(dst) * (255 - u32::from(alpha)) + u32::from(src) * 255) / 255;

    value.min(255) as u8
}
