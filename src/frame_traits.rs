use crate::{BoundsCheckError, ColorInfo, PixelFormat};

/// Read access to a video frame
///
/// # Safety
///
/// Values returned must always be the same every call
pub unsafe trait FrameRef {
    fn format(&self) -> PixelFormat;
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Returns an iterator yielding every plane with their associated stride
    fn planes(&self) -> Box<dyn Iterator<Item = (&[u8], usize)> + '_>;
    fn color(&self) -> ColorInfo;
}

/// Write access to a video frame, required to blend an overlay into it
///
/// # Safety
///
/// Values returned must always be the same every call
pub unsafe trait FrameMut: FrameRef {
    /// Returns an iterator yielding every plane with their associated stride
    fn planes_mut(&mut self) -> Box<dyn Iterator<Item = (&mut [u8], usize)> + '_>;
}

/// [`FrameRef`] extension methods
pub trait FrameRefExt: FrameRef {
    /// Perform a bounds check, return an error when it fails
    fn bounds_check(&self) -> Result<(), BoundsCheckError> {
        self.format()
            .bounds_check(self.planes(), self.width(), self.height())
    }
}

impl<T: FrameRef + ?Sized> FrameRefExt for T {}
