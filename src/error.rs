//! # `kinect_capture` Error module
//!
//! Provides abstractions over errors which can occur during this crate's use.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::PathBuf;

use serde_any;
use thiserror;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Result type used by faillible functions inside the `kinect_capture` crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors which can occur during use of the `kinect_capture` crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The destination buffer does not match the shape contract of the requested capture.
    ///
    /// Raised before any driver call is made, so the buffer contents are untouched.
    #[error("Destination buffer shape {actual:?} does not match the expected {expected} contract")]
    ShapeMismatch {
        expected: &'static str,
        actual: Vec<usize>,
    },

    /// The driver failed to fetch a frame from the device.
    ///
    /// The contents of the destination buffer are undefined after this error: any channels
    /// written before the failing fetch are left as-is.
    #[error("Cannot grab a frame from Kinect #{index}, is the device connected?")]
    DeviceNotConnected { index: u32 },

    /// The driver could not initialise the device at the given index.
    #[error("Init of Kinect #{index} failed, did you plug the device?")]
    DeviceUnavailable { index: u32 },

    #[error("Cannot find file at {0:?}")]
    FileNotFound(PathBuf),

    #[error("Error deserialising data: {0}")]
    DeserialisationError(serde_any::Error),
}
