//! # Synchronous Kinect frame capture
//!
//! This crate provides synchronous single-shot capture of colour and depth frames from a
//! Kinect sensor into caller-provided [`ndarray`](https://docs.rs/ndarray) buffers.
//! Under the hood this uses the `libfreenect_sync` wrapper of
//! [`libfreenect`](https://github.com/OpenKinect/libfreenect), therefore currently only
//! platforms with libfreenect support are covered by the real driver.
//!
//! Raw sensor codes are normalised on copy: 8 bit colour samples are divided by 255 and
//! 11 bit depth codes by 2047, so every element written lies in [0, 1].
//!
//! ## Dependencies
//!
//! The real driver is gated behind the `freenect` cargo feature and links against the
//! libfreenect sync wrapper. Before enabling it make sure libfreenect is installed:
//!
//! ### Ubuntu
//!
//! ```shell
//! sudo apt install libfreenect-dev
//! ```
//!
//! Without the feature the crate only contains the driver-agnostic capture and device
//! lifecycle layers, which any [`Driver`] implementation can back.
//!
//! ## Installation
//!
//! Add the following to your project's `Cargo.toml`
//!
//! ```toml
//! [dependencies]
//! kinect-capture = { version = "0.1", features = ["freenect"] }
//! ```
//!
//! ## Usage
//!
//! Devices are opened through the builder API `DeviceBuilder`, captures go through
//! `FrameCaptureService`:
//!
//! ```ignore
//! use kinect_capture::prelude::*;
//! use ndarray::Array3;
//!
//! // Open device 0 with a green LED (requires the `freenect` feature and hardware)
//! let device = DeviceBuilder::new()
//!     .index(0)
//!     .led(kinect_capture::device::led::GREEN)
//!     .open(FreenectDriver::new())
//!     .expect("Failed to open the Kinect");
//!
//! let capture = FrameCaptureService::new(FreenectDriver::new());
//!
//! // Channel-major colour buffer, normalised to [0, 1]
//! let mut rgb = Array3::<f32>::zeros((3, 480, 640));
//! let timestamp = capture
//!     .capture_color(rgb.view_mut(), device.index())
//!     .expect("Failed to grab a colour frame");
//! ```
//!
//! The driver's synchronous API is process-wide and not reentrant: keep at most one capture
//! in flight per process. This crate does not add locking of its own.

#[deny(missing_docs)]

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub use crate::builder::{DeviceBuilder, DeviceConfig};
pub use crate::capture::{FrameCaptureService, DEFAULT_DEVICE};
pub use crate::device::DeviceHandle;
pub use crate::driver::{
    ColorFrame, DepthFormat, DepthFrame, Driver, VideoFormat, COLOR_MAX, DEPTH_MAX,
    FRAME_HEIGHT, FRAME_PIXELS, FRAME_WIDTH,
};
pub use crate::error::{Error, Result};

#[cfg(feature = "freenect")]
pub use crate::sync_ffi::FreenectDriver;

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

mod builder;
mod capture;
pub mod device;
mod driver;
mod error;

#[cfg(feature = "freenect")]
mod sync_ffi;

pub mod prelude {
    pub use crate::{DeviceBuilder, DeviceConfig, DeviceHandle};
    pub use crate::{Driver, Error, FrameCaptureService, Result};

    #[cfg(feature = "freenect")]
    pub use crate::FreenectDriver;
}
