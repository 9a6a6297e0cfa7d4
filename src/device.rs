//! # Device Handle Module
//!
//! This module provides [`DeviceHandle`], the owner of one Kinect's lifecycle: opening the
//! device, pointing the tilt motor, driving the LED, and shutting the driver down again.
//! Every handle is turned off on some exit path, either through an explicit
//! [`DeviceHandle::shutdown`] call or through the guard in its `Drop` implementation.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::fmt;

use log::{info, warn};

use crate::driver::{Driver, VideoFormat};
use crate::error::Result;

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

/// Maximum tilt angle in degrees accepted by the motor.
pub const TILT_MAX_DEG: i32 = 30;

/// Minimum tilt angle in degrees accepted by the motor.
pub const TILT_MIN_DEG: i32 = -30;

/// LED colour codes understood by the driver.
///
/// The driver accepts any integer, these are the codes the hardware actually maps to colours.
pub mod led {
    pub const OFF: i32 = 0;
    pub const GREEN: i32 = 1;
    pub const RED: i32 = 2;
    pub const YELLOW: i32 = 3;
    pub const BLINK_GREEN: i32 = 4;
    pub const BLINK_RED_YELLOW: i32 = 6;
}

// -----------------------------------------------------------------------------------------------
// DATA STRUCTS
// -----------------------------------------------------------------------------------------------

/// A handle on one physical Kinect, identified by its zero-based device index.
///
/// The driver subsystem is process-wide shared state, so at most one handle per index should
/// be on at a time. Nothing prevents the same index being opened twice, but doing so is
/// caller misuse: the second shutdown stops capture for the first handle too.
pub struct DeviceHandle<D: Driver> {
    driver: D,

    index: u32,

    is_on: bool,

    led: i32,
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl<D: Driver> DeviceHandle<D> {
    /// Open the device at the given index and start the driver's capture facility.
    ///
    /// # Returns
    /// - `Err(Error::DeviceUnavailable)` if the driver cannot initialise the index, e.g. the
    ///   device is not plugged in or is claimed by another process.
    pub fn open(driver: D, index: u32) -> Result<Self> {
        driver.open_device(index, VideoFormat::Rgb)?;

        info!("Init Kinect ID #{} done", index);

        Ok(Self {
            driver,
            index,
            is_on: true,
            led: led::OFF,
        })
    }

    /// Point the tilt motor to `angle` degrees.
    ///
    /// The angle is clamped to the motor's [-30, 30] range before being forwarded. Angles
    /// above 30 clamp to 30. Angles below -30 clamp to 0, not -30: this asymmetry is
    /// long-standing behaviour that downstream users may rely on, so it is kept rather than
    /// silently corrected. Both clamps log a warning. Driver failures are not surfaced.
    pub fn set_tilt(&self, angle: i32) {
        let angle = if angle > TILT_MAX_DEG {
            warn!("Tilt angle {} is over the maximum, clamping to {}", angle, TILT_MAX_DEG);
            TILT_MAX_DEG
        } else if angle < TILT_MIN_DEG {
            warn!("Tilt angle {} is under the minimum, clamping to 0", angle);
            0
        } else {
            angle
        };

        self.driver.set_tilt_degrees(angle, self.index);
    }

    /// Set the device LED to the given colour code.
    ///
    /// The code is stored and forwarded unvalidated, see the [`led`] constants for the codes
    /// the hardware recognises.
    pub fn set_led(&mut self, code: i32) {
        self.led = code;
        self.driver.set_led(code, self.index);
    }

    /// Turn the device off: LED off, handle marked off, process-wide capture stopped.
    ///
    /// This path has no idempotence guard of its own. Calling it on a handle that is already
    /// off repeats the LED and stop side effects. Only the `Drop` path checks the on flag
    /// first. Tilt and LED calls remain permitted after shutdown, frame captures through the
    /// same driver are the caller's responsibility to guard.
    pub fn shutdown(&mut self) {
        info!("Turning Kinect ID #{} off", self.index);
        self.is_on = false;
        self.led = led::OFF;
        self.driver.set_led(self.led, self.index);
        self.driver.stop_all();
    }

    /// The zero-based index of the device this handle owns.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Whether the device is still on.
    pub fn is_on(&self) -> bool {
        self.is_on
    }

    /// The last LED colour code sent through this handle.
    pub fn led(&self) -> i32 {
        self.led
    }
}

impl<D: Driver> Drop for DeviceHandle<D> {
    /// Terminal cleanup: run the shutdown sequence only if the handle is still on.
    ///
    /// The `is_on` check guarantees the side-effecting body runs at most once per handle on
    /// the destruction path, even when `shutdown` was already called explicitly.
    fn drop(&mut self) {
        if self.is_on {
            self.shutdown();
        }
    }
}

impl<D: Driver> fmt::Display for DeviceHandle<D> {
    /// Render the diagnostic status string, e.g. `Kinect 0 is ON.`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Kinect {} is {}.",
            self.index,
            if self.is_on { "ON" } else { "OFF" }
        )
    }
}
