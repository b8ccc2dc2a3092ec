use crate::plane_decs::ARGB_PLANES;
use crate::util::StrictApi as _;

/// Everything that can go wrong when creating a [`Raster`]
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("invalid stride, expected a multiple of 4 that is at least {minimum}, but got {got}")]
    InvalidStride { minimum: usize, got: usize },
}

/// Overlay image the renderer draws into
///
/// Every texel is a native endian `u32` holding premultiplied ARGB with alpha in the most
/// significant byte. Rows may be padded, see [`Raster::stride`].
#[derive(Debug, Clone)]
pub struct Raster {
    data: Vec<u8>,
    stride: usize,
    width: usize,
    height: usize,

    is_clear: bool,
}

impl Raster {
    /// Create a fully transparent raster without row padding
    pub fn new(width: usize, height: usize) -> Result<Self, RasterError> {
        Self::with_stride(width, height, ARGB_PLANES[0].packed_stride(width))
    }

    /// Create a fully transparent raster with `stride` bytes per row
    pub fn with_stride(width: usize, height: usize, stride: usize) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions);
        }

        let minimum = ARGB_PLANES[0].packed_stride(width);

        if stride < minimum || stride % 4 != 0 {
            return Err(RasterError::InvalidStride {
                minimum,
                got: stride,
            });
        }

        Ok(Self {
            data: vec![0u8; stride.strict_mul_(height)],
            stride,
            width,
            height,
            is_clear: true,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row, including padding
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the texels, marks the raster as no longer clear
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.is_clear = false;
        &mut self.data
    }

    /// If every texel is known to be fully transparent
    pub fn is_clear(&self) -> bool {
        self.is_clear
    }

    /// Forget that the raster is clear, e.g. after drawing into it through [`Raster::data`] derived pointers
    pub fn mark_dirty(&mut self) {
        self.is_clear = false;
    }

    /// Reset every texel to transparent black
    pub fn clear(&mut self) {
        self.data.fill(0);
        self.is_clear = true;
    }

    /// Read the texel at the given coordinates
    ///
    /// # Panics
    ///
    /// If `x` or `y` are out of bounds
    pub fn texel(&self, x: usize, y: usize) -> u32 {
        assert!(x < self.width && y < self.height);

        let offset = y * self.stride + x * 4;
        read_texel(&self.data[offset..offset + 4])
    }

    /// Write the texel at the given coordinates
    ///
    /// # Panics
    ///
    /// If `x` or `y` are out of bounds
    pub fn set_texel(&mut self, x: usize, y: usize, texel: u32) {
        assert!(x < self.width && y < self.height);

        let offset = y * self.stride + x * 4;
        self.data[offset..offset + 4].copy_from_slice(&texel.to_ne_bytes());
        self.is_clear = false;
    }

    /// Set every texel to the same value
    pub fn fill(&mut self, texel: u32) {
        if texel == 0 {
            return self.clear();
        }

        let bytes = texel.to_ne_bytes();
        let row_len = self.width * 4;

        for row in self.data.chunks_exact_mut(self.stride) {
            for t in row[..row_len].chunks_exact_mut(4) {
                t.copy_from_slice(&bytes);
            }
        }

        self.is_clear = false;
    }
}

/// Pack straight 8 bit channels into a premultiplied ARGB texel
pub fn premultiply(a: u8, r: u8, g: u8, b: u8) -> u32 {
    let mul = |c: u8| (u32::from(c) * u32::from(a) + 127) / 255;

    (u32::from(a) << 24) | (mul(r) << 16) | (mul(g) << 8) | mul(b)
}

#[inline(always)]
pub(crate) fn read_texel(bytes: &[u8]) -> u32 {
    u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_raster_is_clear() {
        let raster = Raster::new(3, 2).unwrap();

        assert!(raster.is_clear());
        assert_eq!(raster.stride(), 12);
        assert_eq!(raster.data().len(), 24);
        assert!(raster.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn invalid_dimensions() {
        assert!(matches!(
            Raster::new(0, 4),
            Err(RasterError::InvalidDimensions)
        ));
    }

    #[test]
    fn invalid_stride() {
        assert!(matches!(
            Raster::with_stride(4, 4, 12),
            Err(RasterError::InvalidStride {
                minimum: 16,
                got: 12
            })
        ));
        assert!(matches!(
            Raster::with_stride(4, 4, 18),
            Err(RasterError::InvalidStride {
                minimum: 16,
                got: 18
            })
        ));
    }

    #[test]
    fn texel_access_tracks_clear_flag() {
        let mut raster = Raster::with_stride(2, 2, 16).unwrap();

        raster.set_texel(1, 1, 0x80402010);
        assert!(!raster.is_clear());
        assert_eq!(raster.texel(1, 1), 0x80402010);
        assert_eq!(raster.texel(0, 1), 0);

        raster.clear();
        assert!(raster.is_clear());
        assert_eq!(raster.texel(1, 1), 0);
    }

    #[test]
    fn fill_skips_padding() {
        let mut raster = Raster::with_stride(1, 2, 8).unwrap();

        raster.fill(0xffffffff);

        assert_eq!(raster.texel(0, 0), 0xffffffff);
        assert_eq!(raster.texel(0, 1), 0xffffffff);
        assert_eq!(&raster.data()[4..8], &[0, 0, 0, 0]);
    }

    #[test]
    fn premultiply_texels() {
        assert_eq!(premultiply(255, 255, 0, 0), 0xffff0000);
        assert_eq!(premultiply(0, 255, 255, 255), 0);
        assert_eq!(premultiply(128, 255, 0, 0), 0x80800000);
    }
}
