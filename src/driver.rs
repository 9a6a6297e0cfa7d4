//! # Driver Seam Module
//!
//! This module defines the boundary between the capture layer and the native Kinect driver.
//! The driver is an external collaborator exposing a small synchronous surface: open a device,
//! grab one video frame, grab one depth frame, set the tilt motor, set the LED, and stop the
//! process-wide capture facility. The [`Driver`] trait abstracts that surface so the capture
//! and device-lifecycle code can be exercised against a scripted implementation in tests, with
//! the real libfreenect-backed implementation living in the `sync_ffi` module behind the
//! `freenect` feature.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use crate::error::Result;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Width in pixels of every frame produced by the sensor.
pub const FRAME_WIDTH: usize = 640;

/// Height in pixels of every frame produced by the sensor.
pub const FRAME_HEIGHT: usize = 480;

/// Total number of pixels in a frame.
pub const FRAME_PIXELS: usize = FRAME_WIDTH * FRAME_HEIGHT;

/// Maximum raw code of an 8 bit colour sample, used as the normalisation divisor.
pub const COLOR_MAX: u8 = 255;

/// Maximum raw code of an 11 bit depth sample, used as the normalisation divisor.
pub const DEPTH_MAX: u16 = 2047;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Video stream formats understood by the driver.
///
/// Only RGB is consumed by this crate, but the device-open call takes a format code so the
/// enumeration is kept explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFormat {
    /// Interleaved RGB, 3 bytes per pixel, row-major 640-wide rows.
    Rgb,
}

impl VideoFormat {
    /// The driver-level format code.
    pub fn code(self) -> i32 {
        match self {
            VideoFormat::Rgb => 0,
        }
    }
}

/// Depth stream formats understood by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFormat {
    /// Raw 11 bit depth codes in the range 0-2047, one unsigned 16 bit value per pixel.
    Raw11Bit,
}

impl DepthFormat {
    /// The driver-level format code.
    pub fn code(self) -> i32 {
        match self {
            DepthFormat::Raw11Bit => 0,
        }
    }
}

// -----------------------------------------------------------------------------------------------
// DATA STRUCTS
// -----------------------------------------------------------------------------------------------

/// One colour frame as returned by the driver.
pub struct ColorFrame {
    /// Interleaved RGB bytes, `3 * FRAME_PIXELS` long.
    pub data: Vec<u8>,

    /// Driver-supplied capture timestamp, monotonic per device but not across devices.
    pub timestamp: u32,
}

/// One depth frame as returned by the driver.
pub struct DepthFrame {
    /// Raw 11 bit depth codes, `FRAME_PIXELS` long.
    pub data: Vec<u16>,

    /// Driver-supplied capture timestamp, monotonic per device but not across devices.
    pub timestamp: u32,
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

/// The synchronous driver surface consumed by this crate.
///
/// All methods take `&self`: the real driver is process-wide state behind the FFI boundary,
/// and scripted implementations are expected to use interior mutability. None of the calls
/// are documented as reentrant, so callers must keep at most one capture in flight per
/// process. This crate does not enforce that with internal locking.
pub trait Driver {
    /// Initialise the device at `index` and start the driver's capture facility for it.
    ///
    /// # Returns
    /// - `Err(Error::DeviceUnavailable)` if the device is not plugged in or already claimed.
    fn open_device(&self, index: u32, format: VideoFormat) -> Result<()>;

    /// Block until one colour frame is available from the device at `index`.
    ///
    /// # Returns
    /// - `Err(Error::DeviceNotConnected)` if the driver cannot produce a frame.
    fn video_frame(&self, index: u32, format: VideoFormat) -> Result<ColorFrame>;

    /// Block until one depth frame is available from the device at `index`.
    ///
    /// # Returns
    /// - `Err(Error::DeviceNotConnected)` if the driver cannot produce a frame.
    fn depth_frame(&self, index: u32, format: DepthFormat) -> Result<DepthFrame>;

    /// Point the tilt motor of the device at `index` to `angle` degrees.
    ///
    /// Driver-level failures are not surfaced, matching the underlying API.
    fn set_tilt_degrees(&self, angle: i32, index: u32);

    /// Set the LED of the device at `index` to the given colour code.
    ///
    /// The code is forwarded unvalidated.
    fn set_led(&self, code: i32, index: u32);

    /// Stop the process-wide synchronous capture facility.
    ///
    /// This affects every open device, not just one index.
    fn stop_all(&self);
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {

    use super::*;

    /// The frame geometry constants must agree with each other.
    #[test]
    fn test_frame_geometry() {
        assert_eq!(FRAME_PIXELS, 307200);
        assert_eq!(FRAME_WIDTH * FRAME_HEIGHT, FRAME_PIXELS);
    }

    /// Format codes match the driver's enumeration values.
    #[test]
    fn test_format_codes() {
        assert_eq!(VideoFormat::Rgb.code(), 0);
        assert_eq!(DepthFormat::Raw11Bit.code(), 0);
    }
}
