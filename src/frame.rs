use crate::{BoundsCheckError, ColorInfo, FrameMut, FrameRef, FrameRefExt, PixelFormat, infer};

/// Basic wrapper around any video frame buffer, implementing the [`FrameRef`] and [`FrameMut`] trait
#[derive(Debug, Clone)]
pub struct Frame<S> {
    format: PixelFormat,
    buffer: BufferKind<S>,
    strides: Vec<usize>,
    width: usize,
    height: usize,

    color: ColorInfo,
}

/// Plane storage, either all planes back to back or one buffer per plane
#[derive(Debug, Clone)]
enum BufferKind<S> {
    Whole(S),
    Split(Vec<S>),
}

/// Everything that can go wrong when constructing a [`Frame`]
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("expected {expected} strides for the pixel format, got {got}")]
    InvalidNumberOfStrides { expected: usize, got: usize },

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

impl Frame<Vec<u8>> {
    /// Allocate a zeroed frame without row padding
    pub fn blank(format: PixelFormat, width: usize, height: usize, color: ColorInfo) -> Self {
        Self {
            format,
            buffer: BufferKind::Whole(vec![0u8; format.buffer_size(width, height)]),
            strides: format.packed_strides(width),
            width,
            height,
            color,
        }
    }
}

impl<S> Frame<S>
where
    Frame<S>: FrameRef,
{
    /// Wrap a single buffer containing all planes back to back
    pub fn from_buffer(
        format: PixelFormat,
        buffer: S,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
        color: ColorInfo,
    ) -> Result<Self, FrameError> {
        Self::new(
            format,
            BufferKind::Whole(buffer),
            strides,
            width,
            height,
            color,
        )
    }

    /// Wrap one buffer per plane
    pub fn from_planes(
        format: PixelFormat,
        planes: Vec<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
        color: ColorInfo,
    ) -> Result<Self, FrameError> {
        Self::new(
            format,
            BufferKind::Split(planes),
            strides,
            width,
            height,
            color,
        )
    }

    fn new(
        format: PixelFormat,
        buffer: BufferKind<S>,
        strides: Option<Vec<usize>>,
        width: usize,
        height: usize,
        color: ColorInfo,
    ) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions);
        }

        let expected = format.plane_desc().len();
        let strides = strides.unwrap_or_else(|| format.packed_strides(width));

        if strides.len() != expected {
            return Err(FrameError::InvalidNumberOfStrides {
                expected,
                got: strides.len(),
            });
        }

        let this = Self {
            format,
            buffer,
            strides,
            width,
            height,
            color,
        };

        this.bounds_check()?;

        Ok(this)
    }

    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Replace the color description, e.g. when the host retags a frame
    pub fn set_color(&mut self, color: ColorInfo) {
        self.color = color;
    }
}

unsafe impl<S: AsRef<[u8]>> FrameRef for Frame<S> {
    fn format(&self) -> PixelFormat {
        self.format
    }
    fn width(&self) -> usize {
        self.width
    }
    fn height(&self) -> usize {
        self.height
    }

    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_> {
        match &self.buffer {
            BufferKind::Whole(buffer) => Box::new(
                infer(
                    self.format,
                    buffer.as_ref(),
                    self.width,
                    self.height,
                    Some(self.strides.as_slice()),
                )
                .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter()
                    .map(|p| p.as_ref())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
    fn color(&self) -> ColorInfo {
        self.color
    }
}

unsafe impl<S: AsRef<[u8]> + AsMut<[u8]>> FrameMut for Frame<S> {
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_> {
        match &mut self.buffer {
            BufferKind::Whole(buffer) => Box::new(
                infer(
                    self.format,
                    buffer.as_mut(),
                    self.width,
                    self.height,
                    Some(self.strides.as_slice()),
                )
                .zip(self.strides.iter().copied()),
            ),
            BufferKind::Split(planes) => Box::new(
                planes
                    .iter_mut()
                    .map(|plane| plane.as_mut())
                    .zip(self.strides.iter().copied()),
            ),
        }
    }
}
