#![allow(clippy::missing_safety_doc)]

pub use blend::{YuvaBlock, blend, blend_component, reduce_2x2, unpremultiply};
pub use color::{
    ColorInfo, ColorParams, ColorRange, ColorSpace, LumaCoefficients, RangeScale,
    UnsupportedColorSpaceError,
};
pub use frame::{Frame, FrameError};
pub use frame_traits::{FrameMut, FrameRef, FrameRefExt};
#[cfg(feature = "multi-thread")]
pub use multi_thread::blend_multi_thread;
pub use overlay::{Overlay, OverlayError, RenderStatus, Renderer, timestamp_from_pts};
pub use pixel_format::{BoundsCheckError, PixelFormat};
pub use planes::{AnySlice, InvalidNumberOfPlanesError, infer, infer_i420};
pub use raster::{Raster, RasterError, premultiply};

mod blend;
mod color;
mod frame;
mod frame_traits;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod overlay;
mod pixel_format;
mod plane_decs;
mod planes;
mod raster;
mod util;

/// Everything that can go wrong when blending an overlay into a frame
#[derive(Debug, thiserror::Error)]
pub enum BlendError {
    #[error(
        "overlay is {overlay_width}x{overlay_height} but the frame is {frame_width}x{frame_height}"
    )]
    MismatchedDimensions {
        overlay_width: usize,
        overlay_height: usize,
        frame_width: usize,
        frame_height: usize,
    },

    #[error("4:2:0 frames must have even dimensions, got {width}x{height}")]
    OddDimensions { width: usize, height: usize },

    #[error(transparent)]
    UnsupportedColorSpace(#[from] UnsupportedColorSpaceError),

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}
