use crate::blend::{FrameLayout, blend_packed, blend_planar, blend_rows};
use crate::{BlendError, FrameMut, Raster};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::{ParallelSlice, ParallelSliceMut};

/// Same as [`blend`](crate::blend) but splits the frame into horizontal bands which are blended in parallel
///
/// The result is identical to the single threaded version.
#[inline(never)]
pub fn blend_multi_thread(overlay: &Raster, dst: &mut dyn FrameMut) -> Result<(), BlendError> {
    let layout = FrameLayout::new(overlay, dst)?;

    let threads = num_cpus::get();
    let (width, height) = (overlay.width(), overlay.height());
    let src_stride = overlay.stride();

    if threads == 1 {
        blend_rows(overlay.data(), src_stride, layout, width, height);
        return Ok(());
    }

    match layout {
        FrameLayout::Packed {
            reverse,
            plane: (dst, dst_stride),
        } => {
            let rows = height.div_ceil(threads);

            let src_bands = overlay.data().par_chunks(src_stride * rows);
            let dst_bands = dst.par_chunks_mut(dst_stride * rows);

            src_bands.zip(dst_bands).for_each(|(src, dst)| {
                let height = src.len() / src_stride;

                if reverse {
                    blend_packed::<true>(src, src_stride, dst, dst_stride, width, height);
                } else {
                    blend_packed::<false>(src, src_stride, dst, dst_stride, width, height);
                }
            });
        }
        FrameLayout::Planar { params, planes } => {
            // Bands must not split a 2x2 block
            let rows = height.div_ceil(threads).next_multiple_of(2);

            let [(y, y_stride), (u, u_stride), (v, v_stride)] = planes;

            let src_bands = overlay.data().par_chunks(src_stride * rows);
            let y_bands = y.par_chunks_mut(y_stride * rows);
            let u_bands = u.par_chunks_mut(u_stride * (rows / 2));
            let v_bands = v.par_chunks_mut(v_stride * (rows / 2));

            src_bands.zip(y_bands).zip(u_bands).zip(v_bands).for_each(
                |(((src, y), u), v)| {
                    let height = src.len() / src_stride;

                    blend_planar(
                        &params,
                        src,
                        src_stride,
                        [(y, y_stride), (u, u_stride), (v, v_stride)],
                        width,
                        height,
                    );
                },
            );
        }
    }

    Ok(())
}
