use crate::{InvalidNumberOfPlanesError, plane_decs::*, planes::read_planes, util::StrictApi as _};

/// Frame pixel formats an overlay can be blended into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PixelFormat {
    /// Y, U and V planes, 4:2:0 sub sampling, range taken from the frame's [`ColorInfo`](crate::ColorInfo)
    I420,

    /// Y, U and V planes, 4:2:0 sub sampling, always full range
    J420,

    /// Single RGB interleaved plane
    RGB,

    /// Single BGR interleaved plane
    BGR,
}

impl PixelFormat {
    /// Calculate the required buffer size in bytes given the [`PixelFormat`] self and image dimensions (in pixel width, height).
    #[deny(clippy::arithmetic_side_effects)]
    pub fn buffer_size(self, width: usize, height: usize) -> usize {
        let mut size = 0;

        for plane in self.plane_desc() {
            let w = plane.width_op.op(width);
            let h = plane.height_op.op(height);

            size = size.strict_add_(w.strict_mul_(h).strict_mul_(plane.bytes_per_sample));
        }

        size
    }

    /// Calculate the strides of an image in a packed buffer
    #[deny(clippy::arithmetic_side_effects)]
    pub fn packed_strides(self, width: usize) -> Vec<usize> {
        self.plane_desc()
            .iter()
            .map(|desc| desc.packed_stride(width))
            .collect()
    }

    /// Check if the given planes+strides are valid for dimensions
    #[deny(clippy::arithmetic_side_effects)]
    pub fn bounds_check<'a>(
        self,
        planes: impl Iterator<Item = (&'a [u8], usize)>,
        width: usize,
        height: usize,
    ) -> Result<(), BoundsCheckError> {
        use PixelFormat::*;

        match self {
            I420 | J420 => bounds_check(I420_PLANES, read_planes(planes)?, width, height),
            RGB | BGR => bounds_check(RGB_PLANES, read_planes(planes)?, width, height),
        }
    }

    /// Whether the format stores luma and 4:2:0 subsampled chroma in separate planes
    pub fn is_planar(self) -> bool {
        matches!(self, PixelFormat::I420 | PixelFormat::J420)
    }

    pub(crate) fn plane_desc(&self) -> &'static [PlaneDesc] {
        use PixelFormat::*;

        match self {
            I420 | J420 => &I420_PLANES,
            RGB | BGR => &RGB_PLANES,
        }
    }

    pub fn variants() -> impl IntoIterator<Item = Self> {
        use PixelFormat::*;

        [I420, J420, RGB, BGR]
    }
}

#[deny(clippy::arithmetic_side_effects)]
pub(crate) fn bounds_check<const N: usize>(
    planes: [PlaneDesc; N],
    got: [(&[u8], usize); N],
    width: usize,
    height: usize,
) -> Result<(), BoundsCheckError> {
    for (i, (plane, (slice, stride))) in planes.into_iter().zip(got).enumerate() {
        // Ensure stride is not smaller than the width would allow
        let min_stride = plane.packed_stride(width);

        if min_stride > stride {
            return Err(BoundsCheckError::InvalidStride {
                plane: i,
                minimum: min_stride,
                got: stride,
            });
        }

        // Ensure slice is large enough
        let min_len = stride.strict_mul_(plane.height_op.op(height));

        if min_len > slice.len() {
            return Err(BoundsCheckError::InvalidPlaneSize {
                plane: i,
                minimum: min_len,
                got: slice.len(),
            });
        }
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum BoundsCheckError {
    #[error(transparent)]
    InvalidNumberOfPlanes(#[from] InvalidNumberOfPlanesError),

    #[error("invalid stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: usize,
        minimum: usize,
        got: usize,
    },

    #[error(
        "invalid plane size at plane {plane}, expected it to be at least {minimum}, but got {got}"
    )]
    InvalidPlaneSize {
        plane: usize,
        minimum: usize,
        got: usize,
    },
}
