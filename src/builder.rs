//! # `DeviceBuilder` implementation
//!
//! This module implements the builder for device handles, covering the open-time
//! configuration surface: device index, an initial tilt angle, and an initial LED colour.
//! Configuration can also be loaded from a file in any format
//! [`serde_any`](https://docs.rs/serde_any/0.5.0/serde_any/) can guess.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use serde::Deserialize;
use serde_any;

use crate::device::DeviceHandle;
use crate::driver::Driver;
use crate::error::{Error, Result};

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Open-time configuration for one device, deserialisable from a file.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Zero-based index of the device to open.
    #[serde(default)]
    pub index: u32,

    /// Tilt angle in degrees to apply after opening, if any.
    #[serde(default)]
    pub tilt_degrees: Option<i32>,

    /// LED colour code to apply after opening, if any.
    #[serde(default)]
    pub led: Option<i32>,
}

/// Builder for [`DeviceHandle`] objects.
pub struct DeviceBuilder {
    index: u32,

    tilt_degrees: Option<i32>,

    led: Option<i32>,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl DeviceBuilder {
    /// Start a builder with defaults: device index 0, no tilt applied, no LED change.
    pub fn new() -> Self {
        Self {
            index: 0,
            tilt_degrees: None,
            led: None,
        }
    }

    /// Set the zero-based index of the device to open.
    ///
    /// Default value is 0.
    pub fn index(mut self, index: u32) -> Self {
        self.index = index;

        self
    }

    /// Set a tilt angle in degrees to apply right after opening.
    ///
    /// The angle goes through the normal [-30, 30] clamping of
    /// [`DeviceHandle::set_tilt`].
    pub fn tilt_degrees(mut self, angle: i32) -> Self {
        self.tilt_degrees = Some(angle);

        self
    }

    /// Set an LED colour code to apply right after opening.
    ///
    /// See the [`led`](crate::device::led) constants for the codes the hardware recognises.
    pub fn led(mut self, code: i32) -> Self {
        self.led = Some(code);

        self
    }

    /// Take every setting from a [`DeviceConfig`].
    pub fn config(mut self, config: DeviceConfig) -> Self {
        self.index = config.index;
        self.tilt_degrees = config.tilt_degrees;
        self.led = config.led;

        self
    }

    /// Load the device configuration from a file.
    ///
    /// The file type will be guessed at runtime, any file type supported by
    /// [`serde_any`](https://docs.rs/serde_any/0.5.0/serde_any/) is supported, but it must be
    /// deserialisable into [`DeviceConfig`].
    pub fn config_from_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        // Check the file exists
        if !path.as_ref().exists() {
            return Err(Error::FileNotFound(path.as_ref().to_path_buf()));
        }

        // Load the config from the file, guessing which format it's in using serde_any
        let c = serde_any::from_file(path).map_err(|e| Error::DeserialisationError(e))?;

        Ok(self.config(c))
    }

    /// Open the device and apply the configured tilt and LED.
    ///
    /// # Returns
    /// - `Err(Error::DeviceUnavailable)` if the underlying device open fails, in which case
    ///   neither the tilt nor the LED is touched.
    pub fn open<D: Driver>(self, driver: D) -> Result<DeviceHandle<D>> {
        let mut handle = DeviceHandle::open(driver, self.index)?;

        if let Some(angle) = self.tilt_degrees {
            handle.set_tilt(angle);
        }

        if let Some(code) = self.led {
            handle.set_led(code);
        }

        Ok(handle)
    }
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------
