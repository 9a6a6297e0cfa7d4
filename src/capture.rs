//! # Frame Capture Module
//!
//! This module provides [`FrameCaptureService`], the synchronous single-shot capture path:
//! validate the destination buffer's shape, request one frame from the driver, normalise the
//! raw sensor codes into the buffer, and return the driver's timestamp. There is no internal
//! buffering, no retry, and no locking. Each call blocks on the driver until a frame arrives
//! or the fetch fails.
//!
//! Destination buffers are `ndarray` views, generic over `f32`/`f64` elements. Colour samples
//! are normalised by 255, depth codes by 2047, so every written element lies in [0, 1].

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::{ArrayViewMut, ArrayViewMut3, Axis, Dimension, NdFloat};

use crate::driver::{
    DepthFormat, Driver, VideoFormat, COLOR_MAX, DEPTH_MAX, FRAME_HEIGHT, FRAME_PIXELS,
    FRAME_WIDTH,
};
use crate::error::{Error, Result};

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// The device index captures default to when a caller has only one Kinect attached.
pub const DEFAULT_DEVICE: u32 = 0;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTS
// -----------------------------------------------------------------------------------------------

/// Synchronous frame capture against a driver.
///
/// The service itself is stateless: every capture is independent, and the only state in play
/// is the driver's own frame buffer and whatever [`DeviceHandle`](crate::DeviceHandle) tracks.
/// The driver's synchronous API is process-wide and not reentrant, so callers must keep at
/// most one capture in flight per process. No internal mutual exclusion is provided.
pub struct FrameCaptureService<D: Driver> {
    driver: D,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl<D: Driver> FrameCaptureService<D> {
    /// Create a new capture service over the given driver.
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    /// Capture one colour frame into `buffer`, which must be shaped exactly `[3, 480, 640]`
    /// (channel-major).
    ///
    /// The driver's interleaved RGB bytes are de-interleaved with a stride-3 walk: element
    /// `[c][r][col]` receives `source[(r * 640 + col) * 3 + c] / 255.0`.
    ///
    /// # Returns
    /// - `Ok(timestamp)` with the driver's capture timestamp on success.
    /// - `Err(Error::ShapeMismatch)` if the buffer shape is wrong, before any driver call.
    /// - `Err(Error::DeviceNotConnected)` if the driver cannot produce a frame.
    pub fn capture_color<A>(&self, mut buffer: ArrayViewMut3<A>, index: u32) -> Result<u32>
    where
        A: NdFloat + From<u8>,
    {
        check_image_shape(buffer.shape(), 3, "3x480x640")?;

        let frame = self.driver.video_frame(index, VideoFormat::Rgb)?;
        copy_color_channels(&mut buffer, &frame.data);

        Ok(frame.timestamp)
    }

    /// Capture one depth frame into `buffer`, which may have any shape with exactly
    /// 480 * 640 = 307200 elements.
    ///
    /// Raw 11 bit codes are written in the buffer's own logical iteration order, element `i`
    /// receiving `depth[i] / 2047.0`. Note that the maximum code 2047 therefore maps to
    /// exactly 1.0 and the zero code to 0.0.
    ///
    /// A colour frame is requested (and discarded) before the depth frame, so an unavailable
    /// colour stream also fails the depth capture. This mirrors the behaviour the original
    /// driver wrapper has always had, and callers depend on the capture priming the video
    /// stream, so it is kept rather than simplified to a depth-only request.
    ///
    /// # Returns
    /// - `Ok(timestamp)` with the depth frame's capture timestamp on success.
    /// - `Err(Error::ShapeMismatch)` if the element count is wrong, before any driver call.
    /// - `Err(Error::DeviceNotConnected)` if either driver fetch fails.
    pub fn capture_depth<A, Dm>(&self, mut buffer: ArrayViewMut<A, Dm>, index: u32) -> Result<u32>
    where
        A: NdFloat + From<u16>,
        Dm: Dimension,
    {
        if buffer.len() != FRAME_PIXELS {
            return Err(Error::ShapeMismatch {
                expected: "480x640 (307200 elements)",
                actual: buffer.shape().to_vec(),
            });
        }

        self.driver.video_frame(index, VideoFormat::Rgb)?;

        let frame = self.driver.depth_frame(index, DepthFormat::Raw11Bit)?;
        // Fully qualified to disambiguate from NumCast::from, which NdFloat also brings in
        let scale = <A as From<u16>>::from(DEPTH_MAX);

        for (elem, &raw) in buffer.iter_mut().zip(frame.data.iter()) {
            *elem = <A as From<u16>>::from(raw) / scale;
        }

        Ok(frame.timestamp)
    }

    /// Capture one colour frame and one depth frame into `buffer`, which must be shaped
    /// exactly `[4, 480, 640]`.
    ///
    /// Channels 0-2 are filled exactly as [`FrameCaptureService::capture_color`] fills them,
    /// channel 3 exactly as [`FrameCaptureService::capture_depth`] normalises depth codes.
    ///
    /// The two fetches are not atomic: if the depth fetch fails after the colour fetch
    /// succeeded, the colour channels already written are left as-is and the whole buffer
    /// must be treated as undefined.
    ///
    /// # Returns
    /// - `Ok((color_timestamp, depth_timestamp))` on success.
    /// - `Err(Error::ShapeMismatch)` if the buffer shape is wrong, before any driver call.
    /// - `Err(Error::DeviceNotConnected)` if either driver fetch fails.
    pub fn capture_color_depth<A>(
        &self,
        mut buffer: ArrayViewMut3<A>,
        index: u32,
    ) -> Result<(u32, u32)>
    where
        A: NdFloat + From<u8> + From<u16>,
    {
        check_image_shape(buffer.shape(), 4, "4x480x640")?;

        let color = self.driver.video_frame(index, VideoFormat::Rgb)?;
        copy_color_channels(&mut buffer, &color.data);

        let depth = self.driver.depth_frame(index, DepthFormat::Raw11Bit)?;
        let scale = <A as From<u16>>::from(DEPTH_MAX);
        let mut plane = buffer.index_axis_mut(Axis(0), 3);

        for (elem, &raw) in plane.iter_mut().zip(depth.data.iter()) {
            *elem = <A as From<u16>>::from(raw) / scale;
        }

        Ok((color.timestamp, depth.timestamp))
    }
}

// -----------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Check that `shape` is exactly `[channels, 480, 640]`.
fn check_image_shape(shape: &[usize], channels: usize, expected: &'static str) -> Result<()> {
    if shape.len() == 3
        && shape[0] == channels
        && shape[1] == FRAME_HEIGHT
        && shape[2] == FRAME_WIDTH
    {
        Ok(())
    } else {
        Err(Error::ShapeMismatch {
            expected,
            actual: shape.to_vec(),
        })
    }
}

/// De-interleave the driver's RGB bytes into channels 0-2 of `buffer`.
///
/// For channel `c` the source walk starts at byte offset `c` and advances 3 bytes per
/// destination element, while the destination walks the selected channel plane in logical
/// row-major order.
fn copy_color_channels<A>(buffer: &mut ArrayViewMut3<A>, data: &[u8])
where
    A: NdFloat + From<u8>,
{
    let scale = <A as From<u8>>::from(COLOR_MAX);

    for channel in 0..3 {
        let mut plane = buffer.index_axis_mut(Axis(0), channel);
        let samples = data[channel..].iter().step_by(3);

        for (elem, &byte) in plane.iter_mut().zip(samples) {
            *elem = <A as From<u8>>::from(byte) / scale;
        }
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
