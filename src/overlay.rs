use crate::{BlendError, FrameMut, Raster, RasterError};
use std::error::Error;

/// Outcome of a successful [`Renderer::render`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Something was drawn into the raster
    Rendered,

    /// Nothing is visible at this timestamp, the raster was not touched
    Empty,
}

/// Draws the overlay for a point in time
pub trait Renderer {
    type Error: Error + Send + Sync + 'static;

    /// Draw the overlay at `timestamp` (in seconds) into `raster`
    ///
    /// The raster is fully transparent when this is called.
    fn render(&mut self, raster: &mut Raster, timestamp: f64) -> Result<RenderStatus, Self::Error>;

    /// Called after [`RenderStatus::Rendered`], before the raster is read
    ///
    /// Renderers which defer drawing must finish all pending work here.
    fn finish(&mut self, raster: &mut Raster) {
        let _ = raster;
    }
}

/// Everything that can go wrong while processing a frame in [`Overlay::process_frame`]
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    #[error("failed to render overlay at {timestamp}s")]
    Render {
        timestamp: f64,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },

    #[error("failed to blend overlay at {timestamp}s")]
    Blend {
        timestamp: f64,
        #[source]
        source: BlendError,
    },

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Renders an overlay for every frame and blends it into the frame
///
/// Keeps one [`Raster`] alive across frames, it is only reallocated when the frame size changes.
pub struct Overlay<R> {
    renderer: R,
    raster: Option<Raster>,

    #[cfg(feature = "multi-thread")]
    multi_thread: bool,
}

impl<R: Renderer> Overlay<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            raster: None,
            #[cfg(feature = "multi-thread")]
            multi_thread: false,
        }
    }

    /// Blend frames using all available cores
    #[cfg(feature = "multi-thread")]
    pub fn with_multi_thread(mut self, multi_thread: bool) -> Self {
        self.multi_thread = multi_thread;
        self
    }

    /// The raster used for the last processed frame
    pub fn raster(&self) -> Option<&Raster> {
        self.raster.as_ref()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Render the overlay at `timestamp` (in seconds) and blend it into `frame`
    ///
    /// On error the frame is left unmodified. Errors do not affect subsequent calls.
    #[tracing::instrument(level = "trace", skip(self, frame))]
    pub fn process_frame(
        &mut self,
        frame: &mut dyn FrameMut,
        timestamp: f64,
    ) -> Result<(), OverlayError> {
        let raster = prepare_raster(&mut self.raster, frame.width(), frame.height())?;

        if !raster.is_clear() {
            raster.clear();
        }

        let status = match self.renderer.render(raster, timestamp) {
            Ok(status) => status,
            Err(e) => {
                tracing::warn!(timestamp, error = %e, "overlay rendering failed");

                return Err(OverlayError::Render {
                    timestamp,
                    source: Box::new(e),
                });
            }
        };

        if status == RenderStatus::Empty {
            tracing::trace!(timestamp, "overlay is empty, skipping blend");
            return Ok(());
        }

        raster.mark_dirty();
        self.renderer.finish(raster);

        #[cfg(feature = "multi-thread")]
        let result = if self.multi_thread {
            crate::blend_multi_thread(raster, frame)
        } else {
            crate::blend(raster, frame)
        };

        #[cfg(not(feature = "multi-thread"))]
        let result = crate::blend(raster, frame);

        result.map_err(|source| {
            tracing::warn!(timestamp, error = %source, "failed to blend overlay");

            OverlayError::Blend { timestamp, source }
        })
    }
}

/// Reuse the raster in `slot` if it matches the frame size, otherwise replace it
fn prepare_raster(
    slot: &mut Option<Raster>,
    width: usize,
    height: usize,
) -> Result<&mut Raster, RasterError> {
    let raster = match slot.take() {
        Some(raster) if raster.width() == width && raster.height() == height => raster,
        old => {
            tracing::debug!(
                old = ?old.map(|r| (r.width(), r.height())),
                new = ?(width, height),
                "allocating overlay raster"
            );

            Raster::new(width, height)?
        }
    };

    Ok(slot.insert(raster))
}

/// Convert a presentation timestamp in time base units to seconds
pub fn timestamp_from_pts(pts: i64, time_base_num: u32, time_base_den: u32) -> f64 {
    pts as f64 * f64::from(time_base_num) / f64::from(time_base_den)
}
